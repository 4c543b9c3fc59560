//! # Record Types
//!
//! Typed records for the nine collections the report reads from the data store.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Record Types                                    │
//! │                                                                         │
//! │  Movements (one Movement each)       Line items (grouped by parent)    │
//! │  ┌─────────────────┐                 ┌─────────────────┐               │
//! │  │      Sale       │◄── sale_id ─────│    SaleLine     │               │
//! │  └─────────────────┘                 └─────────────────┘               │
//! │  ┌─────────────────┐                 ┌─────────────────┐               │
//! │  │    Transfer     │◄── transfer_id ─│  TransferLine   │               │
//! │  └─────────────────┘                 └─────────────────┘               │
//! │  ┌─────────────────┐                 ┌─────────────────┐               │
//! │  │  PurchaseOrder  │◄── order_id ────│PurchaseOrderItem│               │
//! │  └─────────────────┘                 └─────────────────┘               │
//! │                                                                         │
//! │  Lookups (id → display name)                                           │
//! │  Product · Store · Employee                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optional Fields
//! Rows come from a store this crate does not own. Every reference and every
//! date is optional here: a missing value degrades to sentinel text during
//! normalization instead of rejecting the row.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Lookups
// =============================================================================

/// A product, used only to resolve display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: Option<String>,
}

/// A store (shop or warehouse).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: Option<String>,
}

/// An employee who recorded a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Employee {
    /// Returns `"<first> <last>"`, skipping absent or blank parts.
    ///
    /// `None` when neither part carries text.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

// =============================================================================
// Sales
// =============================================================================

/// A completed sale at one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    /// Raw timestamp text as stored (`sale_date`).
    pub sale_date: Option<String>,
    pub store_id: Option<String>,
    pub employee_id: Option<String>,
    /// `total_sale`, rounded to cents by the query.
    pub total: Option<Money>,
}

/// One unit sold within a sale (`sale_product` joined with its barcode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    pub sale_id: String,
    pub product_id: Option<String>,
    /// Literal barcode resolved through `product_barcodes_store`.
    pub barcode: Option<String>,
    /// Device identifiers (IMEI-style) recorded on the unit.
    #[serde(default)]
    pub mei_codes: Vec<String>,
}

// =============================================================================
// Transfers
// =============================================================================

/// Stock moved from one store to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: String,
    pub transfer_date: Option<String>,
    pub store_origin_id: Option<String>,
    pub store_destiny_id: Option<String>,
    pub employee_id: Option<String>,
}

/// One unit moved within a transfer (`transfer_product` joined with its barcode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferLine {
    pub transfer_id: String,
    pub product_id: Option<String>,
    pub barcode: Option<String>,
}

// =============================================================================
// Purchase Orders
// =============================================================================

/// The approval state of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    /// Maps the stored status text.
    ///
    /// `approved` and `pending` map to themselves; anything else (including
    /// a missing status) is treated as rejected.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("approved") => OrderStatus::Approved,
            Some("pending") => OrderStatus::Pending,
            _ => OrderStatus::Rejected,
        }
    }
}

/// A purchase order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: String,
    pub order_date: Option<String>,
    pub employee_id: Option<String>,
    pub status: OrderStatus,
    /// `total_amount`, rounded to cents by the query.
    pub total: Option<Money>,
}

/// One product line of a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    pub order_id: String,
    pub product_id: Option<String>,
    pub quantity: i64,
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything the report reads, fetched once per session.
///
/// A collection whose query failed is simply empty; the loader records the
/// failure separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sales: Vec<Sale>,
    pub transfers: Vec<Transfer>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub purchase_order_items: Vec<PurchaseOrderItem>,
    pub products: Vec<Product>,
    pub stores: Vec<Store>,
    pub employees: Vec<Employee>,
    pub sale_lines: Vec<SaleLine>,
    pub transfer_lines: Vec<TransferLine>,
}

impl Snapshot {
    /// Number of movements this snapshot normalizes into.
    pub fn movement_count(&self) -> usize {
        self.sales.len() + self.transfers.len() + self.purchase_orders.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_mapping() {
        assert_eq!(OrderStatus::from_raw(Some("approved")), OrderStatus::Approved);
        assert_eq!(OrderStatus::from_raw(Some("pending")), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_raw(Some("rejected")), OrderStatus::Rejected);
        assert_eq!(OrderStatus::from_raw(Some("cancelled")), OrderStatus::Rejected);
        assert_eq!(OrderStatus::from_raw(None), OrderStatus::Rejected);
    }

    #[test]
    fn test_employee_full_name() {
        let employee = Employee {
            id: "e1".to_string(),
            first_name: Some("Ana".to_string()),
            last_name: Some("Quispe".to_string()),
        };
        assert_eq!(employee.full_name().as_deref(), Some("Ana Quispe"));

        let first_only = Employee {
            last_name: None,
            ..employee.clone()
        };
        assert_eq!(first_only.full_name().as_deref(), Some("Ana"));

        let blank = Employee {
            id: "e2".to_string(),
            first_name: Some("  ".to_string()),
            last_name: None,
        };
        assert_eq!(blank.full_name(), None);
    }

    #[test]
    fn test_snapshot_counts() {
        let mut snapshot = Snapshot::default();
        assert_eq!(snapshot.movement_count(), 0);

        snapshot.sales.push(Sale {
            id: "1".to_string(),
            sale_date: None,
            store_id: None,
            employee_id: None,
            total: None,
        });
        snapshot.stores.push(Store {
            id: "s1".to_string(),
            name: Some("Centro".to_string()),
        });
        assert_eq!(snapshot.movement_count(), 1);
    }
}
