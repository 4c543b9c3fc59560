//! # Labels
//!
//! Every piece of text the report prints: sentinels, status names, type
//! names, headings and PDF strings. Two label sets exist, English and the
//! Spanish wording of the stores the report was first written for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

// =============================================================================
// Locale
// =============================================================================

/// Language of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Returns the label set for this locale.
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::En => &EN,
            Locale::Es => &ES,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Es => write!(f, "es"),
        }
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "es" | "spanish" | "español" => Ok(Locale::Es),
            _ => Err(ValidationError::NotAllowed {
                field: "locale".to_string(),
                allowed: vec!["en".to_string(), "es".to_string()],
            }),
        }
    }
}

// =============================================================================
// Label Set
// =============================================================================

/// One complete set of report strings.
#[derive(Debug, PartialEq, Eq)]
pub struct Labels {
    // Sentinels
    pub product_not_found: &'static str,
    pub store_not_found: &'static str,
    pub employee_not_found: &'static str,
    pub no_products: &'static str,
    pub no_barcode: &'static str,
    pub date_unavailable: &'static str,
    pub invalid_date: &'static str,
    pub missing_total: &'static str,

    // Statuses
    pub sale_completed: &'static str,
    pub order_pending: &'static str,
    pub order_approved: &'static str,
    pub order_rejected: &'static str,
    pub route_from: &'static str,
    pub route_to: &'static str,
    pub route_arrow: &'static str,

    // Movement types
    pub sale: &'static str,
    pub transfer: &'static str,
    pub purchase_order: &'static str,
    pub sales: &'static str,
    pub transfers: &'static str,
    pub purchase_orders: &'static str,
    pub all_types: &'static str,
    pub all_stores: &'static str,

    // Detail fields
    pub currency: &'static str,
    pub total: &'static str,
    pub store: &'static str,
    pub status: &'static str,
    pub products_count: &'static str,
    pub barcode: &'static str,
    pub mei_codes: &'static str,
    pub quantity: &'static str,
    pub all_products: &'static str,

    // Screen
    pub movements_heading: &'static str,
    pub no_matches: &'static str,
    pub partial_data: &'static str,
    pub screen_headers: [&'static str; 6],

    // PDF report
    pub report_title: &'static str,
    pub filter_type: &'static str,
    pub filter_store: &'static str,
    pub filter_dates: &'static str,
    pub range_start: &'static str,
    pub range_end: &'static str,
    pub generated: &'static str,
    pub report_headers: [&'static str; 6],
    pub file_prefix: &'static str,
}

impl Labels {
    /// `From <origin> to <destination>`.
    pub fn route_status(&self, from: &str, to: &str) -> String {
        format!("{} {} {} {}", self.route_from, from, self.route_to, to)
    }

    /// `<origin> → <destination>`.
    pub fn route_path(&self, from: &str, to: &str) -> String {
        format!("{} {} {}", from, self.route_arrow, to)
    }
}

/// English labels.
pub static EN: Labels = Labels {
    product_not_found: "Product not found",
    store_not_found: "Store not found",
    employee_not_found: "Employee not found",
    no_products: "No products",
    no_barcode: "N/A",
    date_unavailable: "Date unavailable",
    invalid_date: "Invalid date",
    missing_total: "-",

    sale_completed: "Completed",
    order_pending: "Pending",
    order_approved: "Approved",
    order_rejected: "Rejected",
    route_from: "From",
    route_to: "to",
    route_arrow: "→",

    sale: "Sale",
    transfer: "Transfer",
    purchase_order: "Purchase Order",
    sales: "Sales",
    transfers: "Transfers",
    purchase_orders: "Purchase Orders",
    all_types: "All",
    all_stores: "All stores",

    currency: "Bs.",
    total: "Total",
    store: "Store",
    status: "Status",
    products_count: "products",
    barcode: "Barcode",
    mei_codes: "MEI codes",
    quantity: "Quantity",
    all_products: "All products",

    movements_heading: "Movements",
    no_matches: "No movements match the selected filters",
    partial_data: "Some data could not be loaded",
    screen_headers: [
        "Date and Time",
        "Type",
        "Main Product",
        "Barcode",
        "Details",
        "Employee",
    ],

    report_title: "Movements Report",
    filter_type: "Type",
    filter_store: "Store",
    filter_dates: "Dates",
    range_start: "Start",
    range_end: "End",
    generated: "Generated",
    report_headers: ["Date", "Type", "Products", "Barcodes", "Details", "Employee"],
    file_prefix: "movements",
};

/// Spanish labels.
pub static ES: Labels = Labels {
    product_not_found: "Producto no encontrado",
    store_not_found: "Tienda no encontrada",
    employee_not_found: "Empleado no encontrado",
    no_products: "Sin productos",
    no_barcode: "N/A",
    date_unavailable: "Fecha no disponible",
    invalid_date: "Fecha inválida",
    missing_total: "-",

    sale_completed: "Completado",
    order_pending: "Pendiente",
    order_approved: "Aprobada",
    order_rejected: "Rechazada",
    route_from: "De",
    route_to: "a",
    route_arrow: "→",

    sale: "Venta",
    transfer: "Transferencia",
    purchase_order: "Orden de Compra",
    sales: "Ventas",
    transfers: "Transferencias",
    purchase_orders: "Órdenes de Compra",
    all_types: "Todos",
    all_stores: "Todas las tiendas",

    currency: "Bs.",
    total: "Total",
    store: "Tienda",
    status: "Estado",
    products_count: "productos",
    barcode: "Código de barras",
    mei_codes: "Códigos MEI",
    quantity: "Cantidad",
    all_products: "Todos los productos",

    movements_heading: "Movimientos",
    no_matches: "No hay movimientos que coincidan con los filtros seleccionados",
    partial_data: "No se pudieron cargar algunos datos",
    screen_headers: [
        "Fecha y Hora",
        "Tipo",
        "Producto Principal",
        "Códigos de Barras",
        "Detalles",
        "Empleado",
    ],

    report_title: "Reporte de Movimientos",
    filter_type: "Tipo",
    filter_store: "Tienda",
    filter_dates: "Fechas",
    range_start: "Inicio",
    range_end: "Fin",
    generated: "Generado",
    report_headers: [
        "Fecha",
        "Tipo",
        "Productos",
        "Códigos de Barras",
        "Detalles",
        "Empleado",
    ],
    file_prefix: "movimientos",
};
