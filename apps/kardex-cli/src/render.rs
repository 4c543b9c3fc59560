//! Terminal rendering of the movements screen.
//!
//! ```text
//! Some data could not be loaded: stores        (only when partial)
//! Movements (3)
//! Type: Transfers | Store: All stores
//! +---------------------+------+--------------+---------+-----------------+----------+
//! | Date and Time       | Type | Main Product | Barcode | Details         | Employee |
//! +=====================+======+==============+=========+=================+==========+
//! | 10/01/2024 08:30:00 | ...  |              |         | Centro → Norte  |          |
//! |                     |      |              |         | 1 products      |          |
//! +---------------------+------+--------------+---------+-----------------+----------+
//! ```
//!
//! An expanded row is followed by one extra row holding its item blocks.

use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};

use kardex_core::{Labels, MovementRow};

use crate::screen::{MovementsScreen, StoreOption};

/// Warning, heading, selector values, then the table or the no-matches line.
pub fn render_screen(screen: &MovementsScreen) -> String {
    let labels = screen.labels();
    let rows = screen.rows();
    let mut out = String::new();

    if let Some(warning) = screen.partial_data_warning() {
        out.push_str(&format!("! {}\n", warning));
    }
    out.push_str(&screen.heading());
    out.push('\n');
    out.push_str(&screen.filter_line());
    out.push('\n');

    if rows.is_empty() {
        out.push_str(labels.no_matches);
        out.push('\n');
    } else {
        out.push_str(&movement_table(&rows, labels).to_string());
        out.push('\n');
    }

    out
}

/// The movement table, expanded item blocks included.
pub fn movement_table(rows: &[MovementRow], labels: &Labels) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_header(labels.screen_headers);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.date),
            Cell::new(&row.type_label),
            Cell::new(&row.main_product),
            Cell::new(&row.main_barcode),
            Cell::new(row.details.join("\n")),
            Cell::new(&row.employee),
        ]);

        if row.expanded {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(""),
                Cell::new(item_blocks(row, labels)),
                Cell::new(""),
                Cell::new(""),
                Cell::new(""),
            ]);
        }
    }

    table
}

/// `All products:` followed by one block per line item.
fn item_blocks(row: &MovementRow, labels: &Labels) -> String {
    let body = if row.items.is_empty() {
        labels.no_products.to_string()
    } else {
        row.items
            .iter()
            .map(|item| item.lines(labels).join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    format!("{}:\n{}", labels.all_products, body)
}

/// `--list-stores` output: id and name per store.
pub fn store_table(options: &[StoreOption], labels: &Labels) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_header(["id", labels.store]);

    for option in options {
        table.add_row([option.id.as_str(), option.name.as_str()]);
    }

    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use kardex_core::{Locale, Sale, SaleLine, Snapshot, Store};
    use kardex_db::{Collection, LoadedSnapshot, QueryFailure};

    fn screen_with(snapshot: Snapshot, failures: Vec<QueryFailure>) -> MovementsScreen {
        MovementsScreen::new(
            LoadedSnapshot { snapshot, failures },
            Locale::En,
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    fn one_sale() -> Snapshot {
        Snapshot {
            sales: vec![Sale {
                id: "1".into(),
                sale_date: Some("2024-01-05T10:00:00Z".into()),
                store_id: Some("10".into()),
                employee_id: None,
                total: None,
            }],
            sale_lines: vec![SaleLine {
                sale_id: "1".into(),
                product_id: None,
                barcode: Some("7701".into()),
                mei_codes: vec!["3569".into(), "3570".into()],
            }],
            stores: vec![Store {
                id: "10".into(),
                name: Some("Centro".into()),
            }],
            ..Snapshot::default()
        }
    }

    #[test]
    fn test_render_rows() {
        let out = render_screen(&screen_with(one_sale(), Vec::new()));

        assert!(out.starts_with("Movements (1)\n"));
        assert!(out.contains("05/01/2024 10:00:00"));
        assert!(out.contains("Product not found"));
        assert!(out.contains("Store: Centro"));
        assert!(out.contains("Employee not found"));
        assert!(!out.contains("MEI codes"));
    }

    #[test]
    fn test_render_expanded_row() {
        let mut screen = screen_with(one_sale(), Vec::new());
        screen.toggle_expanded("sale-1").unwrap();

        let out = render_screen(&screen);
        assert!(out.contains("All products:"));
        assert!(out.contains("Barcode: 7701"));
        assert!(out.contains("MEI codes: 3569, 3570"));
    }

    #[test]
    fn test_render_no_matches() {
        let mut screen = screen_with(one_sale(), Vec::new());
        screen.set_type("transfers").unwrap();

        let out = render_screen(&screen);
        assert_eq!(
            out,
            "Movements (0)\nType: Transfers | Store: All stores\nNo movements match the selected filters\n"
        );
    }

    #[test]
    fn test_render_partial_warning() {
        let failures = vec![QueryFailure {
            collection: Collection::Employees,
            message: "permission denied".into(),
        }];
        let out = render_screen(&screen_with(one_sale(), failures));

        assert!(out.starts_with("! Some data could not be loaded: employees\n"));
        assert!(out.contains("Movements (1)"));
    }

    #[test]
    fn test_render_filter_line() {
        let mut screen = screen_with(one_sale(), Vec::new());
        let out = render_screen(&screen);
        assert!(out.contains("Movements (1)\nType: All | Store: All stores\n"));
        assert!(!out.contains("All products:"));

        screen.set_store("10");
        screen.set_type("sales").unwrap();
        assert_eq!(screen.filter_line(), "Type: Sales | Store: Centro");

        screen.set_store("99");
        assert_eq!(screen.filter_line(), "Type: Sales | Store: Store not found");
    }

    #[test]
    fn test_store_table() {
        let screen = screen_with(one_sale(), Vec::new());
        let rendered = store_table(&screen.store_options(), screen.labels()).to_string();
        assert!(rendered.contains("Centro"));
        assert!(rendered.contains("10"));
    }
}
