//! # Dates
//!
//! Timestamp parsing and the display formats used on screen and in the PDF.
//!
//! ## Accepted Input
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Format                                   Example                       │
//! │  ─────────────────────────────────────    ───────────────────────────   │
//! │  RFC 3339                                 2024-01-05T10:00:00Z          │
//! │  PostgreSQL text output                   2024-01-05 10:00:00.5+00      │
//! │  Naive date-time (report offset applies)  2024-01-05T10:00:00           │
//! │  Date only (midnight, report offset)      2024-01-05                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every parsed instant is expressed in the report offset, so calendar-day
//! bounds and displayed wall-clock times agree.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};

use crate::labels::Labels;

/// Date and time shown for a movement: `05/01/2024 10:00:00`.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Generation stamp printed in the PDF header: `05/01/2024 10:00`.
pub const STAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Generation stamp embedded in the PDF file name: `2024-01-05_10-00`.
pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Date filter input format.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a stored timestamp into the report offset.
///
/// Returns `None` for blank or unrecognised text; callers render a sentinel
/// instead of failing.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&offset));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&offset));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return offset.from_local_datetime(&naive).single();
        }
    }

    NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT)
        .ok()
        .and_then(|date| start_of_day(date, offset))
}

/// First instant of a calendar day in the report offset.
pub fn start_of_day(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    offset.from_local_datetime(&midnight).single()
}

/// First instant after a calendar day ends, i.e. the exclusive upper bound
/// that makes the day inclusive through its final instant.
pub fn end_of_day_exclusive(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    date.succ_opt().and_then(|next| start_of_day(next, offset))
}

/// Text shown for a movement date.
///
/// | raw          | parsed | shown                 |
/// |--------------|--------|-----------------------|
/// | missing/blank| -      | `date_unavailable`    |
/// | present      | `None` | `invalid_date`        |
/// | present      | `Some` | `dd/MM/yyyy HH:mm:ss` |
pub fn display_timestamp(
    raw: Option<&str>,
    parsed: Option<&DateTime<FixedOffset>>,
    labels: &Labels,
) -> String {
    match (raw.map(str::trim), parsed) {
        (None, _) | (Some(""), _) => labels.date_unavailable.to_string(),
        (Some(_), None) => labels.invalid_date.to_string(),
        (Some(_), Some(date)) => date.format(DISPLAY_FORMAT).to_string(),
    }
}
