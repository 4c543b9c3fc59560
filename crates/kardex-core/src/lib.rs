//! # kardex-core: Pure Report Logic for Kardex
//!
//! This crate is the **heart** of the movements report. It turns the raw
//! record families fetched from the data store into one list of movements,
//! filters and sorts that list, and projects it into screen rows and a PDF
//! table model. Everything here is a pure function with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kardex Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    kardex-cli (Report Screen)                   │   │
//! │  │    Filters ──► Movement Table ──► Expand Row ──► Export PDF    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kardex-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ movement  │  │  filter   │  │  report   │  │   │
//! │  │   │ Snapshot  │─►│ Movement  │─►│ Filter    │─►│ Report    │  │   │
//! │  │   │ Sale, ... │  │ LineItem  │  │ DateRange │  │ Table     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                    kardex-db (Data Store Reads)                 │   │
//! │  │              nine read-only queries, one Snapshot               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Raw record types (Sale, Transfer, PurchaseOrder, ...) and the [`Snapshot`]
//! - [`movement`] - Normalization into [`Movement`]s
//! - [`filter`] - Type/store/date filtering and date-descending sort
//! - [`expansion`] - Per-row expand/collapse state
//! - [`view`] - Screen rows for the movement table
//! - [`report`] - Table model handed to the PDF renderer
//! - [`dates`] - Timestamp parsing and display formats
//! - [`labels`] - English and Spanish label sets
//! - [`money`] - Exact totals in centavos
//! - [`validation`] - Filter input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::FixedOffset;
//! use kardex_core::{build_movements, apply_filter, Locale, MovementFilter, Snapshot};
//!
//! let snapshot = Snapshot::default();
//! let offset = FixedOffset::east_opt(0).unwrap();
//! let labels = Locale::En.labels();
//!
//! let movements = build_movements(&snapshot, labels, offset);
//! let visible = apply_filter(&movements, &MovementFilter::default(), offset);
//! assert!(visible.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dates;
pub mod error;
pub mod expansion;
pub mod filter;
pub mod labels;
pub mod money;
pub mod movement;
pub mod report;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kardex_core::Movement` instead of
// `use kardex_core::movement::Movement`

pub use error::{CoreError, CoreResult, ValidationError};
pub use expansion::ExpandedRows;
pub use filter::{apply_filter, DateRange, MovementFilter, TypeFilter};
pub use labels::{Labels, Locale};
pub use money::Money;
pub use movement::{build_movements, LineItem, Movement, MovementDetail, MovementKind};
pub use report::{build_report, MovementReport, ReportColumn};
pub use types::*;
pub use view::{ItemDetail, MovementRow};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of sale movement ids (`sale-<id>`).
pub const SALE_ID_PREFIX: &str = "sale";

/// Prefix of transfer movement ids (`transfer-<id>`).
pub const TRANSFER_ID_PREFIX: &str = "transfer";

/// Prefix of purchase order movement ids (`order-<id>`).
pub const ORDER_ID_PREFIX: &str = "order";
