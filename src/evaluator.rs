//! Serial-number evaluation.
//!
//! A serial number reads `[model][middle][MMDDYYYY]`: the first
//! `MODEL_CODE_LEN` characters name the model, the last `DATE_SEGMENT_LEN`
//! are the purchase date, and whatever sits between is ignored.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::calendar::{add_months, days_until, midnight, parse_purchase_date};
use crate::consts::{DATE_SEGMENT_LEN, MIN_SERIAL_LEN, MODEL_CODE_LEN};
use crate::{RejectReason, Verdict, WarrantyTable};

/// Trims and uppercases a raw serial number
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Evaluates a serial number against `table` as of `now` (naive local time).
///
/// Never fails: malformed input becomes `Verdict::MissingInput` or a
/// `Verdict::Rejected`.
pub fn evaluate(table: &WarrantyTable, raw: &str, now: NaiveDateTime) -> Verdict {
    let serial = normalize(raw);
    if serial.is_empty() {
        debug!("empty serial number");
        return Verdict::MissingInput;
    }

    let chars: Vec<char> = serial.chars().collect();
    if chars.len() < MIN_SERIAL_LEN {
        debug!(%serial, len = chars.len(), "serial too short");
        return Verdict::rejected(RejectReason::LegacyOrInvalid);
    }

    let model: String = chars[..MODEL_CODE_LEN].iter().collect();
    let Some(warranty_months) = table.warranty_months(&model) else {
        debug!(%serial, %model, "unknown model");
        return Verdict::rejected(RejectReason::UnknownModel);
    };

    let segment: String = chars[chars.len() - DATE_SEGMENT_LEN..].iter().collect();
    if !segment.chars().all(|c| c.is_ascii_digit()) {
        debug!(%serial, %segment, "date segment is not numeric");
        return Verdict::rejected(RejectReason::BadDateFormat);
    }

    let Some(purchased) = parse_purchase_date(&segment) else {
        debug!(%serial, %segment, "date segment is not a calendar date");
        return Verdict::rejected(RejectReason::InvalidPurchaseDate);
    };

    if midnight(purchased) > now {
        debug!(%serial, %purchased, %now, "purchase date in the future");
        return Verdict::rejected(RejectReason::FuturePurchaseDate);
    }

    // Table months are bounded, so this only fails at the edge of chrono's range
    let Some(end_date) = add_months(purchased, warranty_months) else {
        warn!(%serial, %purchased, %warranty_months, "warranty end date out of range");
        return Verdict::rejected(RejectReason::InvalidPurchaseDate);
    };

    if now > midnight(end_date) {
        debug!(%serial, %end_date, "warranty expired");
        Verdict::Expired {
            end_date,
            warranty_months,
        }
    } else {
        let days_remaining = days_until(end_date, now);
        debug!(%serial, %end_date, days_remaining, "warranty active");
        Verdict::Active {
            end_date,
            warranty_months,
            days_remaining,
        }
    }
}
