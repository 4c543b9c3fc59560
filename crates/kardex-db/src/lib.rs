//! # kardex-db: Read-Only Data Store Access for Kardex
//!
//! This crate reads the record collections behind the movements report from
//! the remote PostgreSQL store. It never writes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kardex Data Flow                                 │
//! │                                                                         │
//! │  kardex (session start)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kardex-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │    fetch     │  │   │
//! │  │   │   (pool.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ SaleRepo      │    │ load_snapshot│  │   │
//! │  │   │ PgPool        │◄───│ TransferRepo  │◄───│ tokio::join! │  │   │
//! │  │   │ read-only     │    │ PurchaseOrder │    │ 9 queries    │  │   │
//! │  │   │ sessions      │    │ Catalog       │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  PostgreSQL (owned by the shop system)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`repository`] - One repository per record family
//! - [`source`] - The [`MovementSource`] seam and the [`Collection`] names
//! - [`fetch`] - Concurrent snapshot loading with per-query degradation
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kardex_db::{load_snapshot, Database, DbConfig};
//!
//! let db = Database::connect_lazy(DbConfig::new(url))?;
//! let loaded = load_snapshot(&db).await;
//! if loaded.is_partial() {
//!     // show a partial-data warning
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fetch;
pub mod pool;
pub mod repository;
pub mod source;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use fetch::{load_snapshot, LoadedSnapshot, QueryFailure};
pub use pool::{Database, DbConfig};
pub use source::{Collection, MovementSource};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::purchase_order::PurchaseOrderRepository;
pub use repository::sale::SaleRepository;
pub use repository::transfer::TransferRepository;
