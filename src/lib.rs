//! Product warranty lookup by serial number.
//!
//! A serial number carries its model code in the first four characters and
//! its purchase date (`MMDDYYYY`) in the last eight. [`evaluate`] checks it
//! against a [`WarrantyTable`] at a given local time and returns a
//! [`Verdict`]; [`QueryForm`] wires that to a result panel and prompt.
//!
//! ```
//! use chrono::NaiveDate;
//! use warranty_check::{Verdict, WarrantyTable, evaluate};
//!
//! let table = WarrantyTable::builtin();
//! let now = NaiveDate::from_ymd_opt(2023, 6, 1)
//!     .and_then(|d| d.and_hms_opt(0, 0, 0))
//!     .ok_or("bad date")?;
//!
//! let verdict = evaluate(&table, "E004XXXXXX01152023", now);
//! assert!(matches!(verdict, Verdict::Active { days_remaining: 228, .. }));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod calendar;
mod consts;
mod evaluator;
mod form;
mod prelude;
mod table;
mod types;
mod verdict;

pub use consts::*;
pub use evaluator::{evaluate, normalize};
pub use form::{Clock, Presentation, Prompt, QueryForm, ResultPanel, Style, SystemClock};
pub use table::{TableError, WarrantyTable};
pub use types::{ModelCode, WarrantyMonths};
pub use verdict::{MISSING_INPUT_MESSAGE, RejectReason, Verdict};
