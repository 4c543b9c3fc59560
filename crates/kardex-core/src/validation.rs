//! # Validation Module
//!
//! Validation of the filter inputs a user types on the report screen.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command line (clap)                                          │
//! │  └── Flag shape (one value per flag, repeatable --expand)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Type filter is one of all/sales/transfers/purchase_orders         │
//! │  ├── Dates are YYYY-MM-DD or empty                                     │
//! │  ├── Store id is trimmed, empty means unset                            │
//! │  └── Report offset stays within ±18h                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Filtering (never fails)                                      │
//! │  └── Unparseable stored dates degrade, they don't error                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kardex_core::validation::{parse_date_input, parse_type_filter};
//! use kardex_core::TypeFilter;
//!
//! assert_eq!(parse_type_filter("all").unwrap(), TypeFilter::All);
//! assert!(parse_date_input("start_date", "").unwrap().is_none());
//! assert!(parse_date_input("start_date", "05/01/2024").is_err());
//! ```

use chrono::{FixedOffset, NaiveDate};

use crate::dates::INPUT_DATE_FORMAT;
use crate::error::ValidationError;
use crate::filter::TypeFilter;
use crate::movement::MovementKind;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest report offset accepted, in minutes (18 hours).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Accepted values of the type filter.
pub const TYPE_FILTER_VALUES: [&str; 4] = ["all", "sales", "transfers", "purchase_orders"];

// =============================================================================
// Filter Inputs
// =============================================================================

/// Parses the type filter.
///
/// Empty input means "all", matching a cleared selector.
pub fn parse_type_filter(raw: &str) -> ValidationResult<TypeFilter> {
    match raw.trim() {
        "" | "all" => Ok(TypeFilter::All),
        "sales" => Ok(TypeFilter::Only(MovementKind::Sale)),
        "transfers" => Ok(TypeFilter::Only(MovementKind::Transfer)),
        "purchase_orders" => Ok(TypeFilter::Only(MovementKind::PurchaseOrder)),
        _ => Err(ValidationError::NotAllowed {
            field: "type".to_string(),
            allowed: TYPE_FILTER_VALUES.iter().map(|v| v.to_string()).collect(),
        }),
    }
}

/// Parses a date bound typed as `YYYY-MM-DD`.
///
/// ## Rules
/// - Empty (or whitespace) input is an open bound: `Ok(None)`
/// - Anything else must be a real calendar date
pub fn parse_date_input(field: &str, raw: &str) -> ValidationResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(raw, INPUT_DATE_FORMAT)
        .map(Some)
        .map_err(|err| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected YYYY-MM-DD ({})", err),
        })
}

/// Normalizes the store selection; blank means "all stores".
pub fn parse_store_input(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Rejects a date range whose start falls after its end.
pub fn validate_date_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ValidationResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::InvalidFormat {
            field: "date_range".to_string(),
            reason: format!("start {} is after end {}", start, end),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Report Settings
// =============================================================================

/// Validates the report offset and converts it to a [`FixedOffset`].
pub fn validate_utc_offset(minutes: i32) -> ValidationResult<FixedOffset> {
    if !(-MAX_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&minutes) {
        return Err(ValidationError::OutOfRange {
            field: "utc_offset_minutes".to_string(),
            min: -i64::from(MAX_UTC_OFFSET_MINUTES),
            max: i64::from(MAX_UTC_OFFSET_MINUTES),
        });
    }

    FixedOffset::east_opt(minutes * 60).ok_or_else(|| ValidationError::OutOfRange {
        field: "utc_offset_minutes".to_string(),
        min: -i64::from(MAX_UTC_OFFSET_MINUTES),
        max: i64::from(MAX_UTC_OFFSET_MINUTES),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_filter() {
        assert_eq!(parse_type_filter("all").unwrap(), TypeFilter::All);
        assert_eq!(parse_type_filter("").unwrap(), TypeFilter::All);
        assert_eq!(
            parse_type_filter(" sales ").unwrap(),
            TypeFilter::Only(MovementKind::Sale)
        );
        assert_eq!(
            parse_type_filter("purchase_orders").unwrap(),
            TypeFilter::Only(MovementKind::PurchaseOrder)
        );

        let err = parse_type_filter("refunds").unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("start_date", "  ").unwrap(), None);
        assert_eq!(
            parse_date_input("start_date", "2024-01-05").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert!(parse_date_input("end_date", "2024-02-30").is_err());
        assert!(parse_date_input("end_date", "yesterday").is_err());
    }

    #[test]
    fn test_parse_store_input() {
        assert_eq!(parse_store_input(""), None);
        assert_eq!(parse_store_input("  s1 "), Some("s1".to_string()));
    }

    #[test]
    fn test_validate_date_range() {
        let jan_1 = NaiveDate::from_ymd_opt(2024, 1, 1);
        let jan_9 = NaiveDate::from_ymd_opt(2024, 1, 9);

        assert!(validate_date_range(jan_1, jan_9).is_ok());
        assert!(validate_date_range(jan_1, jan_1).is_ok());
        assert!(validate_date_range(None, jan_1).is_ok());
        assert!(validate_date_range(jan_9, jan_1).is_err());
    }

    #[test]
    fn test_validate_utc_offset() {
        assert_eq!(validate_utc_offset(0).unwrap().local_minus_utc(), 0);
        assert_eq!(validate_utc_offset(-240).unwrap().local_minus_utc(), -4 * 3600);
        assert!(validate_utc_offset(1080).is_ok());
        assert!(validate_utc_offset(1081).is_err());
        assert!(validate_utc_offset(-2000).is_err());
    }
}
