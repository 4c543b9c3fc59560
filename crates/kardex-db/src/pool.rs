//! # Store Connection Pool
//!
//! One lazily connected, read-only pool to the shop's PostgreSQL store.
//!
//! ## Fan-out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   One Pool, Nine Concurrent Reads                       │
//! │                                                                         │
//! │  kardex startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(url) ← Configure pool settings                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect_lazy(config)  ← no connection opened yet            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │               PgPool                     │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       │ nine queries issued together by load_snapshot()                │
//! │       ▼                                                                 │
//! │  sales ─► Conn1   transfers ─► Conn2   purchase_orders ─► Conn3   ...  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read-Only Sessions
//! Every connection is opened with `default_transaction_read_only = on`, so
//! the store itself rejects any statement that would write.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::catalog::CatalogRepository;
use crate::repository::purchase_order::PurchaseOrderRepository;
use crate::repository::sale::SaleRepository;
use crate::repository::transfer::TransferRepository;

/// `application_name` reported to the server.
pub const APPLICATION_NAME: &str = "kardex";

// =============================================================================
// Configuration
// =============================================================================

/// How to reach the store and how large the pool may grow.
///
/// ## Example
/// ```rust
/// use kardex_db::DbConfig;
///
/// let config = DbConfig::new("postgres://report@db.example.com/shop")
///     .max_connections(4)
///     .connect_timeout(std::time::Duration::from_secs(3));
/// assert_eq!(config.max_connections, 4);
/// ```
#[derive(Clone)]
pub struct DbConfig {
    /// PostgreSQL connection URL.
    pub url: String,

    /// Upper bound on open connections.
    /// Default: 9 (one per collection, so the batch never queues)
    pub max_connections: u32,

    /// Connections kept open while idle.
    /// Default: 0
    pub min_connections: u32,

    /// How long a query waits for a connection before failing.
    /// Default: 10 seconds
    pub connect_timeout: Duration,

    /// Idle connections older than this are dropped.
    /// Default: 5 minutes
    pub idle_timeout: Duration,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

impl DbConfig {
    /// Creates a new database configuration for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        DbConfig {
            url: url.into(),
            max_connections: 9,
            min_connections: 0,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(300),
        }
    }

    /// Caps the pool size.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets how long a query may wait for a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Parses the URL into read-only connect options.
    pub fn connect_options(&self) -> DbResult<PgConnectOptions> {
        let options = PgConnectOptions::from_str(&self.url)
            .map_err(|e| DbError::InvalidUrl(e.to_string()))?
            .application_name(APPLICATION_NAME)
            .options([("default_transaction_read_only", "on")]);

        Ok(options)
    }
}

// =============================================================================
// Database
// =============================================================================

/// Database handle providing repository access.
///
/// Cloning is cheap; clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The PostgreSQL connection pool.
    pool: PgPool,
}

impl Database {
    /// Creates the pool without opening a connection.
    ///
    /// Connections are made by the first queries, so an unreachable store
    /// shows up as failed queries in [`load_snapshot`](crate::load_snapshot)
    /// instead of an error here. Only a malformed URL fails.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn connect_lazy(config: DbConfig) -> DbResult<Self> {
        let connect_options = config.connect_options()?;

        debug!(
            host = %connect_options.get_host(),
            max_connections = config.max_connections,
            "Lazy database pool created"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_lazy_with(connect_options);

        Ok(Database { pool })
    }

    /// Sales and their sold units.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Transfers and their moved units.
    pub fn transfers(&self) -> TransferRepository {
        TransferRepository::new(self.pool.clone())
    }

    /// Purchase orders and their product lines.
    pub fn purchase_orders(&self) -> PurchaseOrderRepository {
        PurchaseOrderRepository::new(self.pool.clone())
    }

    /// Returns the products/stores/employees repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.pool.clone())
    }

    /// Waits for open connections to finish and closes them.
    pub async fn close(&self) {
        info!("Closing data store pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
