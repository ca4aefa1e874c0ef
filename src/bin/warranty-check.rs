//! Terminal front end for the warranty query form.
//!
//! Every line read from stdin is one Enter press in the serial-number field.
//! Set `WARRANTY_TABLE` to a JSON file to replace the built-in table.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use warranty_check::{
    Presentation, Prompt, QueryForm, ResultPanel, SUBMIT_KEY, SystemClock, WARRANTY_TABLE_ENV, WarrantyTable,
};

/// Writes results as `[class] message`. The first write error is kept for
/// the caller and later results are dropped.
struct TerminalPanel<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPanel<W> {
    const fn new(out: W) -> Self {
        Self { out, error: None }
    }
}

impl<W: Write> ResultPanel for TerminalPanel<W> {
    fn show(&mut self, presentation: &Presentation) {
        if self.error.is_some() {
            return;
        }
        let written = writeln!(self.out, "[{}] {}", presentation.style.css_class(), presentation.message)
            .and_then(|()| self.out.flush());
        self.error = written.err();
    }
}

/// Writes alerts as `! message`, keeping the first write error like `TerminalPanel`
struct TerminalPrompt<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalPrompt<W> {
    const fn new(out: W) -> Self {
        Self { out, error: None }
    }
}

impl<W: Write> Prompt for TerminalPrompt<W> {
    fn alert(&mut self, message: &str) {
        if self.error.is_some() {
            return;
        }
        self.error = writeln!(self.out, "! {message}").err();
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let path = std::env::var_os(WARRANTY_TABLE_ENV).map(PathBuf::from);
    let table = WarrantyTable::load(path.as_deref()).context("loading warranty table")?;
    let panel = TerminalPanel::new(io::stdout());
    let prompt = TerminalPrompt::new(io::stderr());
    let mut form = QueryForm::new(&table, SystemClock, panel, prompt);

    for line in io::stdin().lock().lines() {
        let line = line.context("reading serial number")?;
        form.key_press(SUBMIT_KEY, &line);
        if let Some(err) = form.panel_mut().error.take() {
            return Err(err).context("writing result");
        }
        if let Some(err) = form.prompt_mut().error.take() {
            return Err(err).context("writing prompt");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use warranty_check::Style;

    /// Accepts `budget` writes, then fails like a closed pipe
    struct ClosingWriter {
        budget: usize,
        written: Vec<u8>,
    }

    impl Write for ClosingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.budget -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn presentation(message: &str) -> Presentation {
        Presentation {
            message: message.to_owned(),
            style: Style::Valid,
        }
    }

    #[test]
    fn test_panel_writes_class_and_message() {
        let mut panel = TerminalPanel::new(Vec::new());
        panel.show(&presentation("covered"));
        assert!(panel.error.is_none());
        assert_eq!(String::from_utf8_lossy(&panel.out), "[valid] covered\n");
    }

    #[test]
    fn test_panel_keeps_write_error() {
        let writer = ClosingWriter {
            budget: 0,
            written: Vec::new(),
        };
        let mut panel = TerminalPanel::new(writer);
        panel.show(&presentation("lost"));

        let err = panel.error.take().expect("write failure must be kept");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_panel_stops_after_first_error() {
        let writer = ClosingWriter {
            budget: 0,
            written: Vec::new(),
        };
        let mut panel = TerminalPanel::new(writer);
        panel.show(&presentation("first"));
        panel.out.budget = 10;
        panel.show(&presentation("second"));

        assert!(panel.error.is_some());
        assert!(panel.out.written.is_empty());
    }

    #[test]
    fn test_form_surfaces_closed_output() {
        let table = WarrantyTable::builtin();
        let writer = ClosingWriter {
            budget: 0,
            written: Vec::new(),
        };
        let mut form = QueryForm::new(
            &table,
            SystemClock,
            TerminalPanel::new(writer),
            TerminalPrompt::new(Vec::new()),
        );

        form.key_press(SUBMIT_KEY, "E004XXXXXX01152023");
        assert!(form.panel_mut().error.take().is_some());
        assert!(form.prompt_mut().error.is_none());
    }

    #[test]
    fn test_prompt_writes_alert() {
        let mut prompt = TerminalPrompt::new(Vec::new());
        prompt.alert("please enter the product serial number");
        assert!(prompt.error.is_none());
        assert_eq!(
            String::from_utf8_lossy(&prompt.out),
            "! please enter the product serial number\n"
        );
    }
}
