//! # View Rows
//!
//! Projection of visible movements into the rows of the movement table.
//!
//! ## Row Layout
//! ```text
//! ┌────────────────┬──────┬──────────────┬──────────┬─────────────────────┬──────────┐
//! │ Date and Time  │ Type │ Main Product │ Barcode  │ Details             │ Employee │
//! ├────────────────┼──────┼──────────────┼──────────┼─────────────────────┼──────────┤
//! │ 05/01/2024 ... │ Sale │ Phone X      │ 7750001  │ Total: 150.50 Bs.   │ Ana ...  │
//! │                │      │              │          │ Store: Centro       │          │
//! ├────────────────┴──────┴──────────────┴──────────┴─────────────────────┴──────────┤
//! │ (expanded) one block per line item:                                              │
//! │   Phone X · Barcode: 7750001 · MEI codes: 3598... · Quantity: 4                  │
//! └──────────────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use crate::dates::display_timestamp;
use crate::expansion::ExpandedRows;
use crate::labels::Labels;
use crate::money::Money;
use crate::movement::{order_status_label, LineItem, Movement, MovementDetail, MovementKind};

// =============================================================================
// Item Detail
// =============================================================================

/// One line item block of an expanded row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetail {
    pub product_name: String,
    pub barcode: String,
    /// Comma-joined MEI codes; absent when the unit has none.
    pub mei_codes: Option<String>,
    /// Absent for sale and transfer lines and for zero quantities.
    pub quantity: Option<i64>,
}

impl ItemDetail {
    fn from_line(item: &LineItem, labels: &Labels) -> Self {
        Self {
            product_name: item.product_name.clone(),
            barcode: item.barcode_or(labels).to_string(),
            mei_codes: if item.mei_codes.is_empty() {
                None
            } else {
                Some(item.mei_codes.join(", "))
            },
            quantity: item.quantity.filter(|q| *q != 0),
        }
    }

    /// Labelled text lines, product name first.
    pub fn lines(&self, labels: &Labels) -> Vec<String> {
        let mut lines = vec![
            self.product_name.clone(),
            format!("{}: {}", labels.barcode, self.barcode),
        ];
        if let Some(codes) = &self.mei_codes {
            lines.push(format!("{}: {}", labels.mei_codes, codes));
        }
        if let Some(quantity) = self.quantity {
            lines.push(format!("{}: {}", labels.quantity, quantity));
        }
        lines
    }
}

// =============================================================================
// Movement Row
// =============================================================================

/// One row of the movement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MovementRow {
    pub id: String,
    pub kind: MovementKind,
    pub date: String,
    pub type_label: String,
    pub main_product: String,
    pub main_barcode: String,
    /// Two type-specific lines.
    pub details: Vec<String>,
    pub employee: String,
    pub expanded: bool,
    /// Filled only when the row is expanded.
    pub items: Vec<ItemDetail>,
}

impl MovementRow {
    pub fn new(movement: &Movement, expanded: &ExpandedRows, labels: &Labels) -> Self {
        let is_expanded = expanded.is_expanded(&movement.id);
        let items = if is_expanded {
            movement
                .items
                .iter()
                .map(|item| ItemDetail::from_line(item, labels))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: movement.id.clone(),
            kind: movement.kind,
            date: display_timestamp(
                movement.raw_date.as_deref(),
                movement.date.as_ref(),
                labels,
            ),
            type_label: movement.kind.label(labels).to_string(),
            main_product: movement.product.clone(),
            main_barcode: movement
                .first_barcode()
                .unwrap_or(labels.no_barcode)
                .to_string(),
            details: detail_lines(movement, labels),
            employee: movement.employee.clone(),
            expanded: is_expanded,
            items,
        }
    }
}

fn detail_lines(movement: &Movement, labels: &Labels) -> Vec<String> {
    match &movement.detail {
        MovementDetail::Sale { store, total, .. } => vec![
            total_with_currency(*total, labels),
            format!("{}: {}", labels.store, store),
        ],
        MovementDetail::Transfer {
            from_store,
            to_store,
            ..
        } => vec![
            labels.route_path(from_store, to_store),
            format!("{} {}", movement.quantity, labels.products_count),
        ],
        MovementDetail::PurchaseOrder { status, total } => vec![
            format!("{}: {}", labels.status, order_status_label(*status, labels)),
            format!("{}: {}", labels.total, money_or_missing(*total, labels)),
        ],
    }
}

/// `Total: 150.50 Bs.`, or `Total: -` when the total is missing.
pub(crate) fn total_with_currency(total: Option<Money>, labels: &Labels) -> String {
    match total {
        Some(total) => format!("{}: {} {}", labels.total, total, labels.currency),
        None => format!("{}: {}", labels.total, labels.missing_total),
    }
}

pub(crate) fn money_or_missing(total: Option<Money>, labels: &Labels) -> String {
    total
        .map(|total| total.to_string())
        .unwrap_or_else(|| labels.missing_total.to_string())
}

// =============================================================================
// Table
// =============================================================================

/// Projects the visible movements, keeping their order.
pub fn movement_rows(
    visible: &[&Movement],
    expanded: &ExpandedRows,
    labels: &Labels,
) -> Vec<MovementRow> {
    visible
        .iter()
        .map(|movement| MovementRow::new(movement, expanded, labels))
        .collect()
}

/// `Movements (<n>)`.
pub fn heading(count: usize, labels: &Labels) -> String {
    format!("{} ({})", labels.movements_heading, count)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{EN, ES};
    use crate::movement::build_movements;
    use crate::types::*;
    use chrono::FixedOffset;

    fn movements() -> Vec<Movement> {
        let snapshot = Snapshot {
            sales: vec![Sale {
                id: "1".to_string(),
                sale_date: Some("2024-01-05T10:00:00Z".to_string()),
                store_id: Some("s1".to_string()),
                employee_id: None,
                total: Some(Money::from_cents(15050)),
            }],
            sale_lines: vec![SaleLine {
                sale_id: "1".to_string(),
                product_id: Some("p1".to_string()),
                barcode: Some("7750001".to_string()),
                mei_codes: vec!["111".to_string(), "222".to_string()],
            }],
            transfers: vec![Transfer {
                id: "2".to_string(),
                transfer_date: Some("garbage".to_string()),
                store_origin_id: Some("s1".to_string()),
                store_destiny_id: Some("s2".to_string()),
                employee_id: None,
            }],
            purchase_orders: vec![PurchaseOrder {
                id: "3".to_string(),
                order_date: None,
                employee_id: None,
                status: OrderStatus::Approved,
                total: Some(Money::from_cents(99900)),
            }],
            purchase_order_items: vec![
                PurchaseOrderItem {
                    order_id: "3".to_string(),
                    product_id: Some("p1".to_string()),
                    quantity: 5,
                },
                PurchaseOrderItem {
                    order_id: "3".to_string(),
                    product_id: Some("p1".to_string()),
                    quantity: 0,
                },
            ],
            products: vec![Product {
                id: "p1".to_string(),
                name: Some("Phone X".to_string()),
            }],
            stores: vec![
                Store {
                    id: "s1".to_string(),
                    name: Some("Centro".to_string()),
                },
                Store {
                    id: "s2".to_string(),
                    name: Some("Norte".to_string()),
                },
            ],
            ..Snapshot::default()
        };
        build_movements(&snapshot, &EN, FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn test_sale_row() {
        let movements = movements();
        let row = MovementRow::new(&movements[0], &ExpandedRows::new(), &EN);

        assert_eq!(row.date, "05/01/2024 10:00:00");
        assert_eq!(row.type_label, "Sale");
        assert_eq!(row.main_product, "Phone X");
        assert_eq!(row.main_barcode, "7750001");
        assert_eq!(row.details, vec!["Total: 150.50 Bs.", "Store: Centro"]);
        assert_eq!(row.employee, "Employee not found");
        assert!(!row.expanded);
        assert!(row.items.is_empty());
    }

    #[test]
    fn test_transfer_row() {
        let movements = movements();
        let row = MovementRow::new(&movements[1], &ExpandedRows::new(), &EN);

        assert_eq!(row.date, "Invalid date");
        assert_eq!(row.main_product, "No products");
        assert_eq!(row.main_barcode, "N/A");
        assert_eq!(row.details, vec!["Centro → Norte", "0 products"]);
    }

    #[test]
    fn test_purchase_order_row() {
        let movements = movements();
        let row = MovementRow::new(&movements[2], &ExpandedRows::new(), &EN);

        assert_eq!(row.date, "Date unavailable");
        assert_eq!(row.details, vec!["Status: Approved", "Total: 999.00"]);
    }

    #[test]
    fn test_expanded_rows_carry_item_details() {
        let movements = movements();
        let expanded = ExpandedRows::new().toggled("sale-1").toggled("order-3");

        let sale = MovementRow::new(&movements[0], &expanded, &EN);
        assert!(sale.expanded);
        assert_eq!(
            sale.items[0].lines(&EN),
            vec!["Phone X", "Barcode: 7750001", "MEI codes: 111, 222"]
        );

        let order = MovementRow::new(&movements[2], &expanded, &EN);
        assert_eq!(order.items.len(), 2);
        assert_eq!(
            order.items[0].lines(&EN),
            vec!["Phone X", "Barcode: N/A", "Quantity: 5"]
        );
        // Zero quantities are not shown.
        assert_eq!(order.items[1].quantity, None);

        let transfer = MovementRow::new(&movements[1], &expanded, &EN);
        assert!(!transfer.expanded);
    }

    #[test]
    fn test_heading_and_localized_labels() {
        assert_eq!(heading(3, &EN), "Movements (3)");
        assert_eq!(heading(0, &ES), "Movimientos (0)");

        let movements = movements();
        let row = MovementRow::new(&movements[0], &ExpandedRows::new(), &ES);
        assert_eq!(row.type_label, "Venta");
        assert_eq!(row.details[1], "Tienda: Centro");
    }

    #[test]
    fn test_missing_total() {
        assert_eq!(total_with_currency(None, &EN), "Total: -");
        assert_eq!(money_or_missing(None, &EN), "-");
    }

    #[test]
    fn test_rows_keep_order() {
        let movements = movements();
        let visible: Vec<&Movement> = movements.iter().rev().collect();
        let rows = movement_rows(&visible, &ExpandedRows::new(), &EN);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["order-3", "transfer-2", "sale-1"]);
    }

    #[test]
    fn test_row_json_shape() {
        let movements = movements();
        let row = MovementRow::new(&movements[0], &ExpandedRows::new(), &EN);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["kind"], "sales");
        assert_eq!(json["typeLabel"], "Sale");
        assert_eq!(json["mainBarcode"], "7750001");
        assert_eq!(json["expanded"], false);
        assert!(json["items"].as_array().unwrap().is_empty());
    }
}
