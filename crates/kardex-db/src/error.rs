//! # Data Store Errors
//!
//! What a read against the shop's PostgreSQL store can fail with.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where a DbError Ends Up                              │
//! │                                                                         │
//! │  PostgreSQL Error (sqlx::Error)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← one variant per kind of failure                │
//! │       │                                                                 │
//! │       ├──► bad URL:  AppError (report cannot start)                    │
//! │       │                                                                 │
//! │       └──► query:    load_snapshot() logs it, records a QueryFailure,  │
//! │                      and carries on with an empty collection            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Data store errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The connection URL could not be parsed.
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    /// The store could not be reached for a query.
    ///
    /// ## Typical Causes
    /// - Host unreachable or refused
    /// - TLS handshake failure
    /// - Authentication rejected
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The store rejected a query.
    ///
    /// ## Typical Causes
    /// - Table or column missing on the remote store
    /// - Permission denied for the reporting role
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A column could not be decoded into the expected Rust type.
    #[error("Decode failed: {0}")]
    Decode(String),

    /// No connection became available within the connect timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Anything sqlx reports that fits none of the above.
    #[error("Unexpected data store error: {0}")]
    Internal(String),
}

/// ## sqlx Mapping
/// ```text
/// sqlx::Error::Configuration   → DbError::InvalidUrl
/// sqlx::Error::Io / Tls        → DbError::ConnectionFailed
/// sqlx::Error::Database        → DbError::QueryFailed
/// sqlx::Error::*Decode*        → DbError::Decode
/// sqlx::Error::PoolTimedOut    → DbError::PoolExhausted
/// Other                        → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Configuration(_) => DbError::InvalidUrl(err.to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::Protocol(_) => {
                DbError::ConnectionFailed(err.to_string())
            }

            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),

            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_) => DbError::Decode(err.to_string()),

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result of a data store read.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::ColumnNotFound("sale_date".to_string())),
            DbError::Decode(_)
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Internal(_)
        ));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(
            DbError::QueryFailed("relation \"sales\" does not exist".to_string()).to_string(),
            "Query failed: relation \"sales\" does not exist"
        );
        assert_eq!(DbError::PoolExhausted.to_string(), "Connection pool exhausted");
    }
}
