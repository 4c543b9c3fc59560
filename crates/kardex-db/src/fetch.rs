//! # Snapshot Loading
//!
//! Issues the nine queries at once and settles them into one [`Snapshot`].
//!
//! ## Degradation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       load_snapshot(source)                             │
//! │                                                                         │
//! │   tokio::join!( sales, transfers, purchase_orders, order_items,        │
//! │                 products, stores, employees, sale_lines,               │
//! │                 transfer_lines )                                        │
//! │        │                                                                │
//! │        ▼   every query settles, none is cancelled                       │
//! │   ┌──────────────┐      ┌──────────────────────────────────────────┐   │
//! │   │   Ok(rows)   │ ───► │ rows go into the snapshot                │   │
//! │   └──────────────┘      └──────────────────────────────────────────┘   │
//! │   ┌──────────────┐      ┌──────────────────────────────────────────┐   │
//! │   │   Err(e)     │ ───► │ error! logged, empty collection,         │   │
//! │   └──────────────┘      │ QueryFailure recorded                    │   │
//! │                         └──────────────────────────────────────────┘   │
//! │                                                                         │
//! │   No retry. Loading itself never fails.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;
use tracing::{debug, error, info, warn};

use kardex_core::Snapshot;

use crate::error::DbResult;
use crate::source::{Collection, MovementSource};

/// One collection that could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub collection: Collection,
    pub message: String,
}

/// A snapshot plus the collections that came back empty because their
/// query failed.
#[derive(Debug, Clone, Default)]
pub struct LoadedSnapshot {
    pub snapshot: Snapshot,
    pub failures: Vec<QueryFailure>,
}

impl LoadedSnapshot {
    /// True when at least one collection is missing.
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failed(&self, collection: Collection) -> bool {
        self.failures.iter().any(|f| f.collection == collection)
    }
}

/// Loads every collection concurrently.
pub async fn load_snapshot<S: MovementSource>(source: &S) -> LoadedSnapshot {
    let started = Instant::now();
    debug!("Loading snapshot");

    let (
        sales,
        transfers,
        purchase_orders,
        purchase_order_items,
        products,
        stores,
        employees,
        sale_lines,
        transfer_lines,
    ) = tokio::join!(
        source.fetch_sales(),
        source.fetch_transfers(),
        source.fetch_purchase_orders(),
        source.fetch_purchase_order_items(),
        source.fetch_products(),
        source.fetch_stores(),
        source.fetch_employees(),
        source.fetch_sale_lines(),
        source.fetch_transfer_lines(),
    );

    let mut failures = Vec::new();
    let snapshot = Snapshot {
        sales: settle(Collection::Sales, sales, &mut failures),
        transfers: settle(Collection::Transfers, transfers, &mut failures),
        purchase_orders: settle(Collection::PurchaseOrders, purchase_orders, &mut failures),
        purchase_order_items: settle(
            Collection::PurchaseOrderItems,
            purchase_order_items,
            &mut failures,
        ),
        products: settle(Collection::Products, products, &mut failures),
        stores: settle(Collection::Stores, stores, &mut failures),
        employees: settle(Collection::Employees, employees, &mut failures),
        sale_lines: settle(Collection::SaleLines, sale_lines, &mut failures),
        transfer_lines: settle(Collection::TransferLines, transfer_lines, &mut failures),
    };

    if failures.is_empty() {
        info!(
            movements = snapshot.movement_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Snapshot loaded"
        );
    } else {
        warn!(
            movements = snapshot.movement_count(),
            failed = failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Snapshot loaded with missing collections"
        );
    }

    LoadedSnapshot { snapshot, failures }
}

fn settle<T>(
    collection: Collection,
    result: DbResult<Vec<T>>,
    failures: &mut Vec<QueryFailure>,
) -> Vec<T> {
    match result {
        Ok(rows) => {
            debug!(collection = %collection, rows = rows.len(), "Query settled");
            rows
        }
        Err(e) => {
            error!(collection = %collection, error = %e, "Query failed, using empty collection");
            failures.push(QueryFailure {
                collection,
                message: e.to_string(),
            });
            Vec::new()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
