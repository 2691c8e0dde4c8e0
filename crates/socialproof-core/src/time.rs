//! Timestamp parsing for exported posts and formatting for results.

use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

const RESULT_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
);

// Exports without an offset are read as UTC.
const NAIVE_FORMATS: [&[FormatItem<'static>]; 4] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
];

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(parsed);
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = PrimitiveDateTime::parse(value, format) {
            return Some(parsed.assume_utc());
        }
    }
    Date::parse(value, DATE_FORMAT)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// UTC instant with microsecond precision, e.g. `2026-10-19T08:30:00.000000Z`.
pub fn format_timestamp(instant: OffsetDateTime) -> String {
    let utc = instant.to_offset(time::UtcOffset::UTC);
    utc.format(RESULT_FORMAT)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}
