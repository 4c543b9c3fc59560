//! # Movements Screen State
//!
//! The report screen: one loaded snapshot, the filter inputs, and the set
//! of expanded rows. Every view is recomputed from that state on demand.
//!
//! ## Screen Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Screen State Operations                              │
//! │                                                                         │
//! │  Input                    Method                  State Change          │
//! │  ─────                    ──────                  ────────────          │
//! │                                                                         │
//! │  --store 7 ─────────────► set_store() ──────────► filter.store_id      │
//! │  --type sales ──────────► set_type() ───────────► filter.kind          │
//! │  --from / --to ─────────► set_start/end_date() ─► filter.dates         │
//! │  (reset) ───────────────► clear_filters() ──────► MovementFilter::default│
//! │  --expand sale-1 ───────► toggle_expanded() ────► expanded.toggled(id) │
//! │                                                                         │
//! │  render ────────────────► visible() / rows() ───► (read only)          │
//! │  --pdf ─────────────────► export_report() ──────► (read only)          │
//! │                                                                         │
//! │  NOTE: movements are built once; filtering and sorting run on every    │
//! │        read and never mutate them.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, FixedOffset};
use tracing::{debug, warn};

use kardex_core::validation::{
    parse_date_input, parse_store_input, parse_type_filter, validate_date_range, ValidationResult,
};
use kardex_core::view::{heading, movement_rows};
use kardex_core::{
    apply_filter, build_movements, build_report, CoreError, CoreResult, ExpandedRows, Labels,
    Locale, Movement, MovementFilter, MovementReport, MovementRow, Store,
};
use kardex_db::{LoadedSnapshot, QueryFailure};

/// One selectable store: id and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOption {
    pub id: String,
    pub name: String,
}

/// State of the movements report screen.
#[derive(Debug)]
pub struct MovementsScreen {
    movements: Vec<Movement>,
    stores: Vec<Store>,
    failures: Vec<QueryFailure>,
    filter: MovementFilter,
    expanded: ExpandedRows,
    labels: &'static Labels,
    offset: FixedOffset,
}

impl MovementsScreen {
    /// Normalizes a loaded snapshot. No filter is active and no row is expanded.
    pub fn new(loaded: LoadedSnapshot, locale: Locale, offset: FixedOffset) -> Self {
        let labels = locale.labels();
        let movements = build_movements(&loaded.snapshot, labels, offset);
        debug!(movements = movements.len(), %locale, "Screen ready");

        MovementsScreen {
            movements,
            stores: loaded.snapshot.stores,
            failures: loaded.failures,
            filter: MovementFilter::default(),
            expanded: ExpandedRows::new(),
            labels,
            offset,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        self.labels
    }

    pub fn filter(&self) -> &MovementFilter {
        &self.filter
    }

    /// Every normalized movement, unfiltered.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    // =========================================================================
    // Filter Inputs
    // =========================================================================

    /// Selects a store by id; blank input selects all stores.
    pub fn set_store(&mut self, raw: &str) {
        let store_id = parse_store_input(raw);
        if let Some(id) = &store_id {
            if !self.stores.iter().any(|store| &store.id == id) {
                warn!(store_id = %id, "Unknown store selected, no sale or transfer will match");
            }
        }
        self.filter.store_id = store_id;
    }

    /// Selects a movement type: `all`, `sales`, `transfers` or `purchase_orders`.
    pub fn set_type(&mut self, raw: &str) -> ValidationResult<()> {
        self.filter.kind = parse_type_filter(raw)?;
        Ok(())
    }

    /// Sets the first day of the range; blank input opens the bound.
    pub fn set_start_date(&mut self, raw: &str) -> ValidationResult<()> {
        let start = parse_date_input("from", raw)?;
        validate_date_range(start, self.filter.dates.end)?;
        self.filter.dates.start = start;
        Ok(())
    }

    /// Sets the last day of the range; blank input opens the bound.
    pub fn set_end_date(&mut self, raw: &str) -> ValidationResult<()> {
        let end = parse_date_input("to", raw)?;
        validate_date_range(self.filter.dates.start, end)?;
        self.filter.dates.end = end;
        Ok(())
    }

    /// Resets type, store and both date bounds.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }

    // =========================================================================
    // Row Expansion
    // =========================================================================

    /// Flips one row between collapsed and expanded.
    pub fn toggle_expanded(&mut self, id: &str) -> CoreResult<()> {
        if !self.movements.iter().any(|movement| movement.id == id) {
            return Err(CoreError::MovementNotFound(id.to_string()));
        }
        self.expanded = self.expanded.toggled(id);
        Ok(())
    }

    /// Expands every currently visible row.
    pub fn expand_visible(&mut self) {
        let ids: Vec<String> = self.visible().iter().map(|m| m.id.clone()).collect();
        self.expanded = ExpandedRows::all(ids.iter().map(String::as_str));
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.is_expanded(id)
    }

    // =========================================================================
    // Views
    // =========================================================================

    /// Movements passing the filter, most recent first.
    pub fn visible(&self) -> Vec<&Movement> {
        apply_filter(&self.movements, &self.filter, self.offset)
    }

    /// Table rows of the visible movements.
    pub fn rows(&self) -> Vec<MovementRow> {
        movement_rows(&self.visible(), &self.expanded, self.labels)
    }

    /// `Movements (<n>)` over the visible movements.
    pub fn heading(&self) -> String {
        heading(self.visible().len(), self.labels)
    }

    /// Current selector values: `Type: All | Store: All stores`.
    pub fn filter_line(&self) -> String {
        let store = match self.filter.store_id {
            None => self.labels.all_stores,
            Some(_) => self
                .selected_store_name()
                .unwrap_or(self.labels.store_not_found),
        };
        format!(
            "{}: {} | {}: {}",
            self.labels.filter_type,
            self.filter.kind.label(self.labels),
            self.labels.filter_store,
            store
        )
    }

    /// Store selector entries, in store order.
    pub fn store_options(&self) -> Vec<StoreOption> {
        self.stores
            .iter()
            .map(|store| StoreOption {
                id: store.id.clone(),
                name: store
                    .name
                    .clone()
                    .unwrap_or_else(|| self.labels.store_not_found.to_string()),
            })
            .collect()
    }

    /// Name of the selected store, when it is known.
    pub fn selected_store_name(&self) -> Option<&str> {
        let id = self.filter.store_id.as_deref()?;
        self.stores
            .iter()
            .find(|store| store.id == id)
            .and_then(|store| store.name.as_deref())
    }

    /// `Some data could not be loaded: sales, stores` when any query failed.
    pub fn partial_data_warning(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }

        let collections: Vec<String> = self
            .failures
            .iter()
            .map(|failure| failure.collection.to_string())
            .collect();
        Some(format!(
            "{}: {}",
            self.labels.partial_data,
            collections.join(", ")
        ))
    }

    /// The PDF model of what is currently listed.
    pub fn export_report(&self, generated_at: DateTime<FixedOffset>) -> MovementReport {
        build_report(
            &self.visible(),
            &self.filter,
            self.selected_store_name(),
            self.labels,
            generated_at,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use kardex_core::{
        Employee, MovementKind, OrderStatus, Product, PurchaseOrder, PurchaseOrderItem, Sale,
        SaleLine, Snapshot, Transfer, TransferLine, TypeFilter,
    };
    use kardex_db::Collection;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            sales: vec![Sale {
                id: "1".into(),
                sale_date: Some("2024-01-05T10:00:00Z".into()),
                store_id: Some("10".into()),
                employee_id: Some("e1".into()),
                total: Some(kardex_core::Money::from_cents(15050)),
            }],
            transfers: vec![Transfer {
                id: "2".into(),
                transfer_date: Some("2024-01-10T08:30:00Z".into()),
                store_origin_id: Some("10".into()),
                store_destiny_id: Some("20".into()),
                employee_id: Some("e1".into()),
            }],
            purchase_orders: vec![PurchaseOrder {
                id: "3".into(),
                order_date: Some("2024-01-01T00:00:00Z".into()),
                employee_id: Some("e1".into()),
                status: OrderStatus::Pending,
                total: None,
            }],
            purchase_order_items: vec![PurchaseOrderItem {
                order_id: "3".into(),
                product_id: Some("p1".into()),
                quantity: 5,
            }],
            products: vec![
                Product {
                    id: "p1".into(),
                    name: Some("Phone X".into()),
                },
                Product {
                    id: "p2".into(),
                    name: Some("Charger".into()),
                },
            ],
            stores: vec![
                Store {
                    id: "10".into(),
                    name: Some("Centro".into()),
                },
                Store {
                    id: "20".into(),
                    name: None,
                },
            ],
            employees: vec![Employee {
                id: "e1".into(),
                first_name: Some("Ana".into()),
                last_name: Some("Rojas".into()),
            }],
            sale_lines: vec![
                SaleLine {
                    sale_id: "1".into(),
                    product_id: Some("p1".into()),
                    barcode: Some("7701".into()),
                    mei_codes: vec!["356938035643809".into()],
                },
                SaleLine {
                    sale_id: "1".into(),
                    product_id: Some("p2".into()),
                    barcode: None,
                    mei_codes: Vec::new(),
                },
            ],
            transfer_lines: vec![TransferLine {
                transfer_id: "2".into(),
                product_id: Some("p1".into()),
                barcode: Some("7701".into()),
            }],
        }
    }

    fn screen() -> MovementsScreen {
        let loaded = LoadedSnapshot {
            snapshot: snapshot(),
            failures: Vec::new(),
        };
        MovementsScreen::new(loaded, Locale::En, utc())
    }

    fn visible_ids(screen: &MovementsScreen) -> Vec<String> {
        screen.visible().iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_unfiltered_order() {
        let screen = screen();
        assert_eq!(screen.movements().len(), 3);
        assert_eq!(visible_ids(&screen), vec!["transfer-2", "sale-1", "order-3"]);
        assert_eq!(screen.heading(), "Movements (3)");
    }

    #[test]
    fn test_type_filter() {
        let mut screen = screen();
        screen.set_type("sales").unwrap();
        assert_eq!(visible_ids(&screen), vec!["sale-1"]);
        assert_eq!(screen.filter().kind, TypeFilter::Only(MovementKind::Sale));

        assert!(screen.set_type("refunds").is_err());
        assert_eq!(screen.filter().kind, TypeFilter::Only(MovementKind::Sale));
    }

    #[test]
    fn test_store_filter_keeps_purchase_orders() {
        let mut screen = screen();
        screen.set_store("20");
        assert_eq!(visible_ids(&screen), vec!["transfer-2", "order-3"]);

        screen.set_store("  ");
        assert_eq!(screen.filter().store_id, None);
        assert_eq!(screen.visible().len(), 3);
    }

    #[test]
    fn test_date_filter() {
        let mut screen = screen();
        screen.set_start_date("2024-01-02").unwrap();
        screen.set_end_date("2024-01-05").unwrap();
        assert_eq!(visible_ids(&screen), vec!["sale-1"]);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let mut screen = screen();
        screen.set_end_date("2024-01-05").unwrap();
        assert!(screen.set_start_date("2024-01-06").is_err());
        assert_eq!(screen.filter().dates.start, None);
    }

    #[test]
    fn test_bad_date_input() {
        let mut screen = screen();
        assert!(screen.set_start_date("05/01/2024").is_err());
    }

    #[test]
    fn test_clear_filters() {
        let mut screen = screen();
        screen.set_type("transfers").unwrap();
        screen.set_store("10");
        screen.set_start_date("2024-01-09").unwrap();
        assert_eq!(screen.visible().len(), 1);

        screen.clear_filters();
        assert!(!screen.filter().is_active());
        assert_eq!(screen.visible().len(), 3);
    }

    #[test]
    fn test_toggle_expanded() {
        let mut screen = screen();
        screen.toggle_expanded("sale-1").unwrap();
        assert!(screen.is_expanded("sale-1"));
        assert!(!screen.is_expanded("transfer-2"));

        let rows = screen.rows();
        let sale = rows.iter().find(|row| row.id == "sale-1").unwrap();
        assert_eq!(sale.items.len(), 2);
        let transfer = rows.iter().find(|row| row.id == "transfer-2").unwrap();
        assert!(transfer.items.is_empty());

        screen.toggle_expanded("sale-1").unwrap();
        assert!(!screen.is_expanded("sale-1"));
    }

    #[test]
    fn test_toggle_unknown_movement() {
        let mut screen = screen();
        let err = screen.toggle_expanded("sale-99").unwrap_err();
        assert!(matches!(err, CoreError::MovementNotFound(id) if id == "sale-99"));
    }

    #[test]
    fn test_expand_visible() {
        let mut screen = screen();
        screen.set_type("purchase_orders").unwrap();
        screen.expand_visible();
        assert!(screen.is_expanded("order-3"));
        assert!(!screen.is_expanded("sale-1"));
    }

    #[test]
    fn test_store_options() {
        let screen = screen();
        let options = screen.store_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].name, "Centro");
        assert_eq!(options[1].name, "Store not found");
    }

    #[test]
    fn test_partial_data_warning() {
        assert_eq!(screen().partial_data_warning(), None);

        let loaded = LoadedSnapshot {
            snapshot: Snapshot::default(),
            failures: vec![
                QueryFailure {
                    collection: Collection::Sales,
                    message: "timeout".into(),
                },
                QueryFailure {
                    collection: Collection::Stores,
                    message: "timeout".into(),
                },
            ],
        };
        let screen = MovementsScreen::new(loaded, Locale::En, utc());
        assert_eq!(
            screen.partial_data_warning().as_deref(),
            Some("Some data could not be loaded: sales, stores")
        );
        assert!(screen.visible().is_empty());
    }

    #[test]
    fn test_export_report_follows_filters() {
        let mut screen = screen();
        screen.set_store("10");
        screen.set_type("sales").unwrap();

        let generated_at = utc().with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let report = screen.export_report(generated_at);

        assert_eq!(report.rows.len(), 1);
        assert!(report.summary.iter().any(|line| line.contains("Centro")));
        assert_eq!(report.file_name, "movements_2024-02-01_12-00.pdf");
    }
}
