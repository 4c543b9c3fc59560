//! # Movement Source
//!
//! The seam between snapshot loading and the data store: one async method per
//! collection. [`Database`] implements it against PostgreSQL; tests implement
//! it in memory.

use std::fmt;

use kardex_core::{
    Employee, Product, PurchaseOrder, PurchaseOrderItem, Sale, SaleLine, Store, Transfer,
    TransferLine,
};

use crate::error::DbResult;
use crate::pool::Database;

// =============================================================================
// Collections
// =============================================================================

/// The nine collections a snapshot is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Sales,
    Transfers,
    PurchaseOrders,
    PurchaseOrderItems,
    Products,
    Stores,
    Employees,
    SaleLines,
    TransferLines,
}

impl Collection {
    pub const ALL: [Collection; 9] = [
        Collection::Sales,
        Collection::Transfers,
        Collection::PurchaseOrders,
        Collection::PurchaseOrderItems,
        Collection::Products,
        Collection::Stores,
        Collection::Employees,
        Collection::SaleLines,
        Collection::TransferLines,
    ];

    /// Name of the source table.
    pub const fn table(&self) -> &'static str {
        match self {
            Collection::Sales => "sales",
            Collection::Transfers => "transfers",
            Collection::PurchaseOrders => "purchase_orders",
            Collection::PurchaseOrderItems => "purchase_order_items",
            Collection::Products => "products",
            Collection::Stores => "stores",
            Collection::Employees => "employees",
            Collection::SaleLines => "sale_product",
            Collection::TransferLines => "transfer_product",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

// =============================================================================
// Source Trait
// =============================================================================

/// Read access to the nine collections.
///
/// Futures are awaited together on one task, so they need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait MovementSource {
    async fn fetch_sales(&self) -> DbResult<Vec<Sale>>;
    async fn fetch_transfers(&self) -> DbResult<Vec<Transfer>>;
    async fn fetch_purchase_orders(&self) -> DbResult<Vec<PurchaseOrder>>;
    async fn fetch_purchase_order_items(&self) -> DbResult<Vec<PurchaseOrderItem>>;
    async fn fetch_products(&self) -> DbResult<Vec<Product>>;
    async fn fetch_stores(&self) -> DbResult<Vec<Store>>;
    async fn fetch_employees(&self) -> DbResult<Vec<Employee>>;
    async fn fetch_sale_lines(&self) -> DbResult<Vec<SaleLine>>;
    async fn fetch_transfer_lines(&self) -> DbResult<Vec<TransferLine>>;
}

impl MovementSource for Database {
    async fn fetch_sales(&self) -> DbResult<Vec<Sale>> {
        self.sales().list().await
    }

    async fn fetch_transfers(&self) -> DbResult<Vec<Transfer>> {
        self.transfers().list().await
    }

    async fn fetch_purchase_orders(&self) -> DbResult<Vec<PurchaseOrder>> {
        self.purchase_orders().list().await
    }

    async fn fetch_purchase_order_items(&self) -> DbResult<Vec<PurchaseOrderItem>> {
        self.purchase_orders().list_items().await
    }

    async fn fetch_products(&self) -> DbResult<Vec<Product>> {
        self.catalog().products().await
    }

    async fn fetch_stores(&self) -> DbResult<Vec<Store>> {
        self.catalog().stores().await
    }

    async fn fetch_employees(&self) -> DbResult<Vec<Employee>> {
        self.catalog().employees().await
    }

    async fn fetch_sale_lines(&self) -> DbResult<Vec<SaleLine>> {
        self.sales().list_lines().await
    }

    async fn fetch_transfer_lines(&self) -> DbResult<Vec<TransferLine>> {
        self.transfers().list_lines().await
    }
}
