//! # Error Types
//!
//! Domain-specific error types for kardex-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kardex-core errors (this file)                                        │
//! │  ├── CoreError        - Unknown movement ids, wrapped validation       │
//! │  └── ValidationError  - Filter input validation failures               │
//! │                                                                         │
//! │  kardex-db errors (separate crate)                                     │
//! │  └── DbError          - Data store read failures                       │
//! │                                                                         │
//! │  kardex-export errors (separate crate)                                 │
//! │  └── ExportError      - PDF rendering / file output failures           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT here: missing references, unparseable dates and failed
//! queries never become errors. They degrade to sentinel text or empty data.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core report errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A movement id does not exist in the loaded snapshot.
    ///
    /// ## Where It Comes From
    /// - Expanding a row by an id typed by hand (`--expand sale-42`)
    /// - Asking for the line items of a movement from another session
    #[error("Movement not found: {0}")]
    MovementNotFound(String),

    /// A filter input was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Filter input validation errors.
///
/// These errors occur when one of the filter inputs can't be interpreted.
/// Used before a filter is applied, never during filtering itself.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid format (e.g., a date that is not `YYYY-MM-DD`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The value is not one of the accepted choices.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A number lies outside its accepted bounds.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of core operations.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_not_found_message() {
        let err = CoreError::MovementNotFound("sale-42".to_string());
        assert_eq!(err.to_string(), "Movement not found: sale-42");
    }

    #[test]
    fn test_filter_input_messages() {
        let err = ValidationError::InvalidFormat {
            field: "start_date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "start_date has invalid format: expected YYYY-MM-DD"
        );

        let err = ValidationError::OutOfRange {
            field: "utc_offset_minutes".to_string(),
            min: -1080,
            max: 1080,
        };
        assert_eq!(
            err.to_string(),
            "utc_offset_minutes must be between -1080 and 1080"
        );
    }

    #[test]
    fn test_rejected_input_wraps_into_core_error() {
        let rejected = ValidationError::NotAllowed {
            field: "type".to_string(),
            allowed: vec!["all".to_string()],
        };
        let err: CoreError = rejected.into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
