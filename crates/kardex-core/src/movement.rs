//! # Movement Normalization
//!
//! Turns the three raw record families into one list of [`Movement`]s.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       build_movements()                                 │
//! │                                                                         │
//! │  Snapshot                                                               │
//! │  ├── products / stores / employees ──► Directory (id → name maps)      │
//! │  ├── sale_lines      ─┐                                                 │
//! │  ├── transfer_lines  ─┼─► grouped by parent id (input order kept)       │
//! │  └── order items     ─┘                                                 │
//! │                                                                         │
//! │  sales ──────────► Movement { id: "sale-<id>",     kind: Sale }        │
//! │  transfers ──────► Movement { id: "transfer-<id>", kind: Transfer }    │
//! │  purchase_orders ► Movement { id: "order-<id>",    kind: PurchaseOrder }│
//! │                                                                         │
//! │  Output order: all sales, then all transfers, then all orders.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Missing References
//! A product, store or employee id that resolves to nothing renders as the
//! label set's "not found" sentinel. Normalization never fails.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use ts_rs::TS;

use crate::dates::parse_timestamp;
use crate::labels::Labels;
use crate::money::Money;
use crate::types::{OrderStatus, Snapshot};
use crate::{ORDER_ID_PREFIX, SALE_ID_PREFIX, TRANSFER_ID_PREFIX};

// =============================================================================
// Movement Kind
// =============================================================================

/// The three movement families. Serialized with the type-filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MovementKind {
    #[serde(rename = "sales")]
    Sale,
    #[serde(rename = "transfers")]
    Transfer,
    #[serde(rename = "purchase_orders")]
    PurchaseOrder,
}

impl MovementKind {
    /// Type tag as used by the type filter (`sales`, `transfers`, `purchase_orders`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Sale => "sales",
            MovementKind::Transfer => "transfers",
            MovementKind::PurchaseOrder => "purchase_orders",
        }
    }

    /// Singular label shown in the type column.
    pub fn label(&self, labels: &Labels) -> &'static str {
        match self {
            MovementKind::Sale => labels.sale,
            MovementKind::Transfer => labels.transfer,
            MovementKind::PurchaseOrder => labels.purchase_order,
        }
    }

    /// Plural label shown in the filter selector and the PDF summary.
    pub fn plural_label(&self, labels: &Labels) -> &'static str {
        match self {
            MovementKind::Sale => labels.sales,
            MovementKind::Transfer => labels.transfers,
            MovementKind::PurchaseOrder => labels.purchase_orders,
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry of a movement, with names already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: Option<String>,
    pub product_name: String,
    /// Literal barcode; `None` when the unit has none (shown as "N/A").
    pub barcode: Option<String>,
    pub mei_codes: Vec<String>,
    /// Only purchase order items carry a quantity.
    pub quantity: Option<i64>,
}

impl LineItem {
    /// Barcode text, or the label set's "N/A".
    pub fn barcode_or<'a>(&'a self, labels: &'a Labels) -> &'a str {
        self.barcode.as_deref().unwrap_or(labels.no_barcode)
    }
}

// =============================================================================
// Movement
// =============================================================================

/// Type-specific fields of a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MovementDetail {
    Sale {
        store_id: Option<String>,
        store: String,
        total: Option<Money>,
    },
    Transfer {
        from_store_id: Option<String>,
        from_store: String,
        to_store_id: Option<String>,
        to_store: String,
    },
    PurchaseOrder {
        status: OrderStatus,
        total: Option<Money>,
    },
}

/// The normalized, display-oriented projection of a sale, transfer or
/// purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    /// Composite id: `sale-<id>`, `transfer-<id>` or `order-<id>`.
    pub id: String,

    /// Id of the underlying record.
    pub source_id: String,

    pub kind: MovementKind,

    /// Timestamp text exactly as stored.
    pub raw_date: Option<String>,

    /// Parsed timestamp in the report offset; `None` when missing or unparseable.
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<FixedOffset>>,

    /// Name of the first line item's product, or the "no products" sentinel.
    pub product: String,

    /// Line count for sales and transfers, summed quantity for orders.
    pub quantity: i64,

    pub employee: String,

    /// `Completed`, a route string, or the order status label.
    pub status: String,

    pub detail: MovementDetail,

    pub items: Vec<LineItem>,
}

impl Movement {
    /// Barcode of the first line item, if that item has one.
    pub fn first_barcode(&self) -> Option<&str> {
        self.items.first().and_then(|item| item.barcode.as_deref())
    }

    /// Total of a sale or purchase order.
    pub fn total(&self) -> Option<Money> {
        match &self.detail {
            MovementDetail::Sale { total, .. } | MovementDetail::PurchaseOrder { total, .. } => {
                *total
            }
            MovementDetail::Transfer { .. } => None,
        }
    }
}

/// Label of an order status.
pub fn order_status_label(status: OrderStatus, labels: &Labels) -> &'static str {
    match status {
        OrderStatus::Pending => labels.order_pending,
        OrderStatus::Approved => labels.order_approved,
        OrderStatus::Rejected => labels.order_rejected,
    }
}

// =============================================================================
// Lookups
// =============================================================================

struct Directory<'a> {
    products: HashMap<&'a str, &'a str>,
    stores: HashMap<&'a str, &'a str>,
    employees: HashMap<&'a str, String>,
    labels: &'a Labels,
}

impl<'a> Directory<'a> {
    fn new(snapshot: &'a Snapshot, labels: &'a Labels) -> Self {
        let products = snapshot
            .products
            .iter()
            .filter_map(|p| non_blank(p.name.as_deref()).map(|name| (p.id.as_str(), name)))
            .collect();

        let stores = snapshot
            .stores
            .iter()
            .filter_map(|s| non_blank(s.name.as_deref()).map(|name| (s.id.as_str(), name)))
            .collect();

        let employees = snapshot
            .employees
            .iter()
            .filter_map(|e| e.full_name().map(|name| (e.id.as_str(), name)))
            .collect();

        Self {
            products,
            stores,
            employees,
            labels,
        }
    }

    fn product(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.products.get(id))
            .copied()
            .unwrap_or(self.labels.product_not_found)
            .to_string()
    }

    fn store(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.stores.get(id))
            .copied()
            .unwrap_or(self.labels.store_not_found)
            .to_string()
    }

    fn employee(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.employees.get(id))
            .cloned()
            .unwrap_or_else(|| self.labels.employee_not_found.to_string())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Groups child rows by parent id, keeping input order inside each group.
fn group_by_parent<'a, T>(rows: &'a [T], parent: impl Fn(&T) -> &str) -> HashMap<&'a str, Vec<&'a T>> {
    let mut groups: HashMap<&'a str, Vec<&'a T>> = HashMap::new();
    for row in rows {
        groups.entry(parent(row)).or_default().push(row);
    }
    groups
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalizes a snapshot into movements: sales, then transfers, then
/// purchase orders, each in input order.
pub fn build_movements(snapshot: &Snapshot, labels: &Labels, offset: FixedOffset) -> Vec<Movement> {
    let directory = Directory::new(snapshot, labels);
    let sale_lines = group_by_parent(&snapshot.sale_lines, |line| line.sale_id.as_str());
    let transfer_lines = group_by_parent(&snapshot.transfer_lines, |line| line.transfer_id.as_str());
    let order_items = group_by_parent(&snapshot.purchase_order_items, |item| item.order_id.as_str());

    let mut movements = Vec::with_capacity(snapshot.movement_count());

    for sale in &snapshot.sales {
        let items: Vec<LineItem> = sale_lines
            .get(sale.id.as_str())
            .map(|lines| {
                lines
                    .iter()
                    .map(|line| LineItem {
                        product_id: line.product_id.clone(),
                        product_name: directory.product(line.product_id.as_deref()),
                        barcode: non_blank(line.barcode.as_deref()).map(str::to_string),
                        mei_codes: line.mei_codes.clone(),
                        quantity: None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        movements.push(Movement {
            id: format!("{}-{}", SALE_ID_PREFIX, sale.id),
            source_id: sale.id.clone(),
            kind: MovementKind::Sale,
            raw_date: sale.sale_date.clone(),
            date: parse_date(sale.sale_date.as_deref(), offset),
            product: primary_product(&items, labels),
            quantity: items.len() as i64,
            employee: directory.employee(sale.employee_id.as_deref()),
            status: labels.sale_completed.to_string(),
            detail: MovementDetail::Sale {
                store_id: sale.store_id.clone(),
                store: directory.store(sale.store_id.as_deref()),
                total: sale.total,
            },
            items,
        });
    }

    for transfer in &snapshot.transfers {
        let items: Vec<LineItem> = transfer_lines
            .get(transfer.id.as_str())
            .map(|lines| {
                lines
                    .iter()
                    .map(|line| LineItem {
                        product_id: line.product_id.clone(),
                        product_name: directory.product(line.product_id.as_deref()),
                        barcode: non_blank(line.barcode.as_deref()).map(str::to_string),
                        mei_codes: Vec::new(),
                        quantity: None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let from_store = directory.store(transfer.store_origin_id.as_deref());
        let to_store = directory.store(transfer.store_destiny_id.as_deref());

        movements.push(Movement {
            id: format!("{}-{}", TRANSFER_ID_PREFIX, transfer.id),
            source_id: transfer.id.clone(),
            kind: MovementKind::Transfer,
            raw_date: transfer.transfer_date.clone(),
            date: parse_date(transfer.transfer_date.as_deref(), offset),
            product: primary_product(&items, labels),
            quantity: items.len() as i64,
            employee: directory.employee(transfer.employee_id.as_deref()),
            status: labels.route_status(&from_store, &to_store),
            detail: MovementDetail::Transfer {
                from_store_id: transfer.store_origin_id.clone(),
                from_store,
                to_store_id: transfer.store_destiny_id.clone(),
                to_store,
            },
            items,
        });
    }

    for order in &snapshot.purchase_orders {
        let items: Vec<LineItem> = order_items
            .get(order.id.as_str())
            .map(|rows| {
                rows.iter()
                    .map(|item| LineItem {
                        product_id: item.product_id.clone(),
                        product_name: directory.product(item.product_id.as_deref()),
                        barcode: None,
                        mei_codes: Vec::new(),
                        quantity: Some(item.quantity),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let quantity = items.iter().filter_map(|item| item.quantity).sum();

        movements.push(Movement {
            id: format!("{}-{}", ORDER_ID_PREFIX, order.id),
            source_id: order.id.clone(),
            kind: MovementKind::PurchaseOrder,
            raw_date: order.order_date.clone(),
            date: parse_date(order.order_date.as_deref(), offset),
            product: primary_product(&items, labels),
            quantity,
            employee: directory.employee(order.employee_id.as_deref()),
            status: order_status_label(order.status, labels).to_string(),
            detail: MovementDetail::PurchaseOrder {
                status: order.status,
                total: order.total,
            },
            items,
        });
    }

    movements
}

fn parse_date(raw: Option<&str>, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    raw.and_then(|raw| parse_timestamp(raw, offset))
}

fn primary_product(items: &[LineItem], labels: &Labels) -> String {
    items
        .first()
        .map(|item| item.product_name.clone())
        .unwrap_or_else(|| labels.no_products.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
