use crate::consts::{MAX_WARRANTY_MONTHS, MODEL_CODE_LEN};
use crate::prelude::*;
use crate::TableError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::num::NonZeroU32;

/// A product model code: exactly `MODEL_CODE_LEN` characters, already in
/// the normalized (uppercase, no whitespace) form serial numbers are
/// compared in.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display, Into, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ModelCode(String);

impl ModelCode {
    /// Creates a new `ModelCode`
    ///
    /// # Errors
    /// Returns `TableError::InvalidModelCode` if the code is not exactly
    /// `MODEL_CODE_LEN` characters or contains lowercase or whitespace.
    pub fn new(code: &str) -> Result<Self, TableError> {
        let well_formed = code.chars().count() == MODEL_CODE_LEN
            && !code.chars().any(|c| c.is_lowercase() || c.is_whitespace());
        if !well_formed {
            return Err(TableError::InvalidModelCode(code.to_owned()));
        }
        Ok(Self(code.to_owned()))
    }

    /// Returns the code as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModelCode {
    type Error = TableError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl Borrow<str> for ModelCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A warranty duration in whole calendar months, guaranteed to be in the
/// range `1..=MAX_WARRANTY_MONTHS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WarrantyMonths(NonZeroU32);

impl WarrantyMonths {
    /// Creates a new `WarrantyMonths`, validating that it's non-zero and <= `MAX_WARRANTY_MONTHS`
    ///
    /// # Errors
    /// Returns `TableError::InvalidMonths` if the value is 0 or > `MAX_WARRANTY_MONTHS`.
    pub fn new(value: u32) -> Result<Self, TableError> {
        let non_zero = NonZeroU32::new(value).ok_or(TableError::InvalidMonths(value))?;
        if value > MAX_WARRANTY_MONTHS {
            return Err(TableError::InvalidMonths(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month count as u32
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for WarrantyMonths {
    type Error = TableError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WarrantyMonths> for u32 {
    fn from(months: WarrantyMonths) -> Self {
        months.0.get()
    }
}

impl fmt::Display for WarrantyMonths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
