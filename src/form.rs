//! Form binding: input events in, presentations out.
//!
//! `QueryForm` knows nothing about any UI toolkit. A front end implements
//! `ResultPanel` and `Prompt`, forwards the serial-number field's contents on
//! submit or key press, and renders whatever it is handed.

use chrono::{Local, NaiveDateTime};
use tracing::debug;

use crate::consts::SUBMIT_KEY;
use crate::prelude::*;
use crate::{Verdict, WarrantyTable, evaluate};

/// Visual treatment of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Style {
    #[display(fmt = "valid")]
    Valid,
    #[display(fmt = "expired")]
    Expired,
    #[display(fmt = "error")]
    Error,
}

impl Style {
    /// Class name for the result panel. Rejections share the expired class.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Expired | Self::Error => "expired",
        }
    }

    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// What the result panel should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub message: String,
    pub style: Style,
}

impl Presentation {
    /// Panel content for a verdict; `None` for missing input, which belongs
    /// to the prompt rather than the panel.
    pub fn for_verdict(verdict: &Verdict) -> Option<Self> {
        let style = match verdict {
            Verdict::MissingInput => return None,
            Verdict::Rejected { .. } => Style::Error,
            Verdict::Expired { .. } => Style::Expired,
            Verdict::Active { .. } => Style::Valid,
        };
        Some(Self {
            message: verdict.message(),
            style,
        })
    }
}

/// Inline result display. Showing a presentation also makes the panel visible.
pub trait ResultPanel {
    fn show(&mut self, presentation: &Presentation);
}

/// Blocking notice, used when nothing was entered
pub trait Prompt {
    fn alert(&mut self, message: &str);
}

/// Source of the evaluation time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

/// The serial-number query form.
#[derive(Debug)]
pub struct QueryForm<'t, C, R, P> {
    table: &'t WarrantyTable,
    clock: C,
    panel: R,
    prompt: P,
}

impl<'t, C, R, P> QueryForm<'t, C, R, P>
where
    C: Clock,
    R: ResultPanel,
    P: Prompt,
{
    pub const fn new(table: &'t WarrantyTable, clock: C, panel: R, prompt: P) -> Self {
        Self {
            table,
            clock,
            panel,
            prompt,
        }
    }

    /// Query button: evaluates the field contents and routes the outcome.
    pub fn submit(&mut self, serial: &str) -> Verdict {
        let verdict = evaluate(self.table, serial, self.clock.now());
        match Presentation::for_verdict(&verdict) {
            Some(presentation) => {
                debug!(style = %presentation.style, "showing result");
                self.panel.show(&presentation);
            }
            None => self.prompt.alert(&verdict.message()),
        }
        verdict
    }

    /// Key press in the serial-number field. Only `SUBMIT_KEY` queries.
    pub fn key_press(&mut self, key: &str, serial: &str) -> Option<Verdict> {
        (key == SUBMIT_KEY).then(|| self.submit(serial))
    }

    pub const fn panel(&self) -> &R {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut R {
        &mut self.panel
    }

    pub const fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub fn into_parts(self) -> (R, P) {
        (self.panel, self.prompt)
    }
}
