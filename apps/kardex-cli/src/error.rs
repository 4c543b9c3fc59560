//! # Application Errors
//!
//! Everything that can stop a `kardex` run.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in kardex                                 │
//! │                                                                         │
//! │  config.rs ──── ConfigError ─────────┐                                 │
//! │  screen.rs ──── ValidationError ─────┤                                 │
//! │           └──── CoreError ───────────┼──► AppError ──► anyhow (main)   │
//! │  kardex-db ──── DbError (bad URL) ───┤                                 │
//! │  kardex-export ─ ExportError ────────┘                                 │
//! │                                                                         │
//! │  NOT here: failed queries. They degrade to empty collections and a    │
//! │  warning line, and the run still exits 0.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use kardex_core::{CoreError, ValidationError};
use kardex_db::DbError;
use kardex_export::ExportError;

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file given with `--config` does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// An environment variable holds a value of the wrong type.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// No data store URL anywhere in the configuration chain.
    #[error("Missing database URL: set KARDEX_DATABASE_URL, DATABASE_URL or [database] url")]
    MissingDatabaseUrl,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// App Error
// =============================================================================

/// Top-level error of a report run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A filter input could not be interpreted.
    #[error("Invalid filter: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Data store error: {0}")]
    Db(#[from] DbError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}

/// Result type for a report run.
pub type AppResult<T> = Result<T, AppError>;
