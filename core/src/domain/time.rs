//! Local time helpers. Validity windows and event dates are evaluated in
//! Western Indonesia Time (Asia/Jakarta, UTC+7, no daylight saving).

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use once_cell::sync::Lazy;

use crate::errors::{DomainResult, ValidationError};

static JAKARTA: Lazy<FixedOffset> =
    Lazy::new(|| FixedOffset::east_opt(7 * 3600).unwrap_or_else(|| Utc.fix()));

pub fn jakarta_offset() -> FixedOffset {
    *JAKARTA
}

/// Current instant expressed in Jakarta time
pub fn jakarta_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jakarta_offset())
}

/// Calendar date in Jakarta for the given instant
pub fn jakarta_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&jakarta_offset()).date_naive()
}

/// Parses a `YYYY-MM-DD` date supplied by a client
pub fn parse_date(field: &str, value: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            field: field.to_string(),
        }
        .into()
    })
}
