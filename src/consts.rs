/// Length of the model-code prefix of a serial number
pub const MODEL_CODE_LEN: usize = 4;

/// Length of the trailing purchase-date segment (MMDDYYYY)
pub const DATE_SEGMENT_LEN: usize = 8;

/// Shortest serial number accepted under the current scheme.
/// Anything shorter is a legacy serial or garbage.
pub const MIN_SERIAL_LEN: usize = 12;

/// Upper bound on a table entry (100 years)
pub const MAX_WARRANTY_MONTHS: u32 = 1200;

/// Years below this are two-digit years and never round-trip
pub(crate) const MIN_FOUR_DIGIT_YEAR: i32 = 100;

/// Months in a calendar year
pub(crate) const MONTHS_PER_YEAR: u32 = 12;

/// Milliseconds in one day, the unit of the days-remaining ceiling
pub(crate) const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Built-in warranty table: (model code, months)
pub const BUILTIN_WARRANTY_TABLE: [(&str, u32); 4] = [
    ("E004", 12),
    ("E005", 24),
    ("E006", 12),
    ("E007", 24),
];

/// Environment variable naming a JSON warranty table file
pub const WARRANTY_TABLE_ENV: &str = "WARRANTY_TABLE";

/// Key that triggers a query alongside the explicit submit action
pub const SUBMIT_KEY: &str = "Enter";
