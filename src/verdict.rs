use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::format_date;
use crate::prelude::*;
use crate::WarrantyMonths;

/// Shown instead of a verdict when the serial-number field is empty
pub const MISSING_INPUT_MESSAGE: &str = "please enter the product serial number";

/// Why a serial number was turned away.
///
/// Unknown models, impossible dates and future dates are different reasons
/// but show the user one and the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectReason {
    /// Shorter than the current serial scheme allows
    #[display(fmt = "legacy or invalid serial number")]
    LegacyOrInvalid,
    /// Model prefix is not in the warranty table
    #[display(fmt = "invalid serial number, please verify")]
    UnknownModel,
    /// Date segment is not eight decimal digits
    #[display(fmt = "serial number format error, please verify")]
    BadDateFormat,
    /// Date segment is numeric but not a calendar date
    #[display(fmt = "invalid serial number, please verify")]
    InvalidPurchaseDate,
    /// Purchase date lies after the evaluation time
    #[display(fmt = "invalid serial number, please verify")]
    FuturePurchaseDate,
}

/// Outcome of evaluating one serial number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Nothing was entered
    MissingInput,
    /// Turned away before any warranty arithmetic
    Rejected { reason: RejectReason },
    /// Warranty ended before the evaluation time
    Expired {
        end_date: NaiveDate,
        warranty_months: WarrantyMonths,
    },
    /// Still covered; `days_remaining` is rounded up
    Active {
        end_date: NaiveDate,
        warranty_months: WarrantyMonths,
        days_remaining: u32,
    },
}

impl Verdict {
    pub const fn rejected(reason: RejectReason) -> Self {
        Self::Rejected { reason }
    }

    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    /// Rejection reason, if the serial was rejected
    pub const fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Rejected { reason } => Some(*reason),
            _ => None,
        }
    }

    /// Warranty end date, for expired and active verdicts
    pub const fn end_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Expired { end_date, .. } | Self::Active { end_date, .. } => Some(*end_date),
            Self::MissingInput | Self::Rejected { .. } => None,
        }
    }

    /// Days left on an active warranty
    pub const fn days_remaining(&self) -> Option<u32> {
        match self {
            Self::Active { days_remaining, .. } => Some(*days_remaining),
            _ => None,
        }
    }

    /// The user-facing message for this verdict
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => f.write_str(MISSING_INPUT_MESSAGE),
            Self::Rejected { reason } => write!(f, "{reason}"),
            Self::Expired {
                end_date,
                warranty_months,
            } => write!(
                f,
                "this product is out of warranty ({warranty_months}-month warranty, expiry: {})",
                format_date(*end_date)
            ),
            Self::Active {
                end_date,
                warranty_months,
                days_remaining,
            } => write!(
                f,
                "this product is under warranty ({warranty_months}-month warranty, {days_remaining} days remaining, expiry: {})",
                format_date(*end_date)
            ),
        }
    }
}
