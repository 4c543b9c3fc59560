//! # Report Model
//!
//! The table handed to the PDF renderer: title, summary of the active
//! filters, generation stamp, column headers with width hints, and one row
//! per visible movement.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Movements Report                                        (title)        │
//! │  Type: Sales                                  ┐                         │
//! │  Store: Centro                                ├─ only the filters set   │
//! │  Dates: 2024-01-01 - End                      ┘                         │
//! │  Generated: 05/01/2024 10:00                                            │
//! │                                                                         │
//! │  Date │ Type │ Products │ Barcodes │ Details │ Employee   (header row)  │
//! │  25mm   20mm    35mm       30mm       40mm      30mm                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The file name is `<prefix>_yyyy-MM-dd_HH-mm.pdf`, stamped with the same
//! generation time.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::dates::{display_timestamp, FILE_STAMP_FORMAT, INPUT_DATE_FORMAT, STAMP_FORMAT};
use crate::filter::{MovementFilter, TypeFilter};
use crate::labels::Labels;
use crate::movement::{order_status_label, Movement, MovementDetail};
use crate::view::{money_or_missing, total_with_currency};

/// Column width hints, in millimetres.
pub const COLUMN_WIDTHS_MM: [f32; 6] = [25.0, 20.0, 35.0, 30.0, 40.0, 30.0];

/// A table column: header text and width hint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportColumn {
    pub header: String,
    pub width_mm: f32,
}

/// Everything the PDF renderer prints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementReport {
    pub title: String,
    pub summary: Vec<String>,
    pub generated: String,
    pub columns: Vec<ReportColumn>,
    pub rows: Vec<Vec<String>>,
    pub file_name: String,
}

impl MovementReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builds the report for the movements currently on screen.
///
/// `store_name` is the resolved name of the selected store; it is only read
/// when a store filter is set.
pub fn build_report(
    visible: &[&Movement],
    filter: &MovementFilter,
    store_name: Option<&str>,
    labels: &Labels,
    generated_at: DateTime<FixedOffset>,
) -> MovementReport {
    let columns = labels
        .report_headers
        .iter()
        .zip(COLUMN_WIDTHS_MM)
        .map(|(header, width_mm)| ReportColumn {
            header: header.to_string(),
            width_mm,
        })
        .collect();

    MovementReport {
        title: labels.report_title.to_string(),
        summary: filter_summary(filter, store_name, labels),
        generated: format!(
            "{}: {}",
            labels.generated,
            generated_at.format(STAMP_FORMAT)
        ),
        columns,
        rows: visible.iter().map(|m| report_row(m, labels)).collect(),
        file_name: format!(
            "{}_{}.pdf",
            labels.file_prefix,
            generated_at.format(FILE_STAMP_FORMAT)
        ),
    }
}

fn filter_summary(filter: &MovementFilter, store_name: Option<&str>, labels: &Labels) -> Vec<String> {
    let mut summary = Vec::new();

    if let TypeFilter::Only(kind) = filter.kind {
        summary.push(format!("{}: {}", labels.filter_type, kind.plural_label(labels)));
    }

    if filter.store_id.is_some() {
        summary.push(format!(
            "{}: {}",
            labels.filter_store,
            store_name.unwrap_or(labels.store_not_found)
        ));
    }

    if !filter.dates.is_open() {
        let start = filter
            .dates
            .start
            .map(|d| d.format(INPUT_DATE_FORMAT).to_string())
            .unwrap_or_else(|| labels.range_start.to_string());
        let end = filter
            .dates
            .end
            .map(|d| d.format(INPUT_DATE_FORMAT).to_string())
            .unwrap_or_else(|| labels.range_end.to_string());
        summary.push(format!("{}: {} - {}", labels.filter_dates, start, end));
    }

    summary
}

fn report_row(movement: &Movement, labels: &Labels) -> Vec<String> {
    let products = if movement.items.is_empty() {
        labels.no_products.to_string()
    } else {
        movement
            .items
            .iter()
            .map(|item| item.product_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let barcodes: Vec<&str> = movement
        .items
        .iter()
        .filter_map(|item| item.barcode.as_deref())
        .collect();
    let barcodes = if barcodes.is_empty() {
        labels.no_barcode.to_string()
    } else {
        barcodes.join(", ")
    };

    let detail = match &movement.detail {
        MovementDetail::Sale { store, total, .. } => format!(
            "{} - {}: {}",
            total_with_currency(*total, labels),
            labels.store,
            store
        ),
        MovementDetail::Transfer {
            from_store,
            to_store,
            ..
        } => labels.route_path(from_store, to_store),
        MovementDetail::PurchaseOrder { status, total } => format!(
            "{}: {} - {}: {}",
            labels.status,
            order_status_label(*status, labels),
            labels.total,
            money_or_missing(*total, labels)
        ),
    };

    vec![
        display_timestamp(movement.raw_date.as_deref(), movement.date.as_ref(), labels),
        movement.kind.label(labels).to_string(),
        products,
        barcodes,
        detail,
        movement.employee.clone(),
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{apply_filter, DateRange};
    use crate::labels::{EN, ES};
    use crate::money::Money;
    use crate::movement::{build_movements, MovementKind};
    use crate::types::*;
    use chrono::{NaiveDate, TimeZone};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn generated_at() -> DateTime<FixedOffset> {
        utc().with_ymd_and_hms(2024, 1, 15, 9, 5, 0).unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            sales: vec![Sale {
                id: "1".to_string(),
                sale_date: Some("2024-01-05T10:00:00Z".to_string()),
                store_id: Some("s1".to_string()),
                employee_id: Some("e1".to_string()),
                total: Some(Money::from_cents(2500)),
            }],
            sale_lines: vec![
                SaleLine {
                    sale_id: "1".to_string(),
                    product_id: Some("p1".to_string()),
                    barcode: Some("111".to_string()),
                    mei_codes: Vec::new(),
                },
                SaleLine {
                    sale_id: "1".to_string(),
                    product_id: Some("p2".to_string()),
                    barcode: None,
                    mei_codes: Vec::new(),
                },
                SaleLine {
                    sale_id: "1".to_string(),
                    product_id: Some("p2".to_string()),
                    barcode: Some("222".to_string()),
                    mei_codes: Vec::new(),
                },
            ],
            transfers: vec![Transfer {
                id: "2".to_string(),
                transfer_date: Some("2024-01-10T09:00:00Z".to_string()),
                store_origin_id: Some("s1".to_string()),
                store_destiny_id: Some("s2".to_string()),
                employee_id: None,
            }],
            purchase_orders: vec![PurchaseOrder {
                id: "3".to_string(),
                order_date: Some("2024-01-01T08:00:00Z".to_string()),
                employee_id: None,
                status: OrderStatus::Pending,
                total: None,
            }],
            products: vec![
                Product {
                    id: "p1".to_string(),
                    name: Some("Phone X".to_string()),
                },
                Product {
                    id: "p2".to_string(),
                    name: Some("Charger".to_string()),
                },
            ],
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
            employees: vec![Employee {
                id: "e1".to_string(),
                first_name: Some("Ana".to_string()),
                last_name: Some("Quispe".to_string()),
            }],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_unfiltered_report() {
        let movements = build_movements(&snapshot(), &EN, utc());
        let visible = apply_filter(&movements, &MovementFilter::default(), utc());
        let report = build_report(&visible, &MovementFilter::default(), None, &EN, generated_at());

        assert_eq!(report.title, "Movements Report");
        assert!(report.summary.is_empty());
        assert_eq!(report.generated, "Generated: 15/01/2024 09:05");
        assert_eq!(report.file_name, "movements_2024-01-15_09-05.pdf");
        assert_eq!(report.columns.len(), 6);
        assert_eq!(report.columns[4].header, "Details");
        assert_eq!(report.columns[4].width_mm, 40.0);
        assert_eq!(report.rows.len(), 3);

        // Rows follow the on-screen order: transfer, sale, order.
        assert_eq!(
            report.rows[0],
            vec![
                "10/01/2024 09:00:00",
                "Transfer",
                "No products",
                "N/A",
                "Centro → Norte",
                "Employee not found",
            ]
        );
        assert_eq!(
            report.rows[1],
            vec![
                "05/01/2024 10:00:00",
                "Sale",
                "Phone X, Charger, Charger",
                "111, 222",
                "Total: 25.00 Bs. - Store: Centro",
                "Ana Quispe",
            ]
        );
        assert_eq!(report.rows[2][4], "Status: Pending - Total: -");
    }

    #[test]
    fn test_summary_lists_only_set_filters() {
        let filter = MovementFilter {
            kind: TypeFilter::Only(MovementKind::Sale),
            store_id: Some("s1".to_string()),
            dates: DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 1), None),
        };
        let report = build_report(&[], &filter, Some("Centro"), &EN, generated_at());

        assert_eq!(
            report.summary,
            vec!["Type: Sales", "Store: Centro", "Dates: 2024-01-01 - End"]
        );
        assert!(report.is_empty());

        let end_only = MovementFilter {
            dates: DateRange::new(None, NaiveDate::from_ymd_opt(2024, 1, 31)),
            ..MovementFilter::default()
        };
        let report = build_report(&[], &end_only, None, &EN, generated_at());
        assert_eq!(report.summary, vec!["Dates: Start - 2024-01-31"]);
    }

    #[test]
    fn test_unknown_store_in_summary() {
        let filter = MovementFilter {
            store_id: Some("s9".to_string()),
            ..MovementFilter::default()
        };
        let report = build_report(&[], &filter, None, &EN, generated_at());
        assert_eq!(report.summary, vec!["Store: Store not found"]);
    }

    #[test]
    fn test_spanish_report() {
        let movements = build_movements(&snapshot(), &ES, utc());
        let visible = apply_filter(&movements, &MovementFilter::default(), utc());
        let report = build_report(&visible, &MovementFilter::default(), None, &ES, generated_at());

        assert_eq!(report.title, "Reporte de Movimientos");
        assert_eq!(report.file_name, "movimientos_2024-01-15_09-05.pdf");
        assert_eq!(report.rows[2][1], "Orden de Compra");
        assert_eq!(report.rows[2][4], "Estado: Pendiente - Total: -");
    }
}
