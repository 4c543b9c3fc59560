//! Command line surface.
//!
//! The filter inputs stay raw strings here; the report screen validates
//! them the same way it validates any other typed input.

use clap::Parser;
use std::path::PathBuf;

use kardex_core::Locale;

/// Inventory movements report (sales, transfers and purchase orders).
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "kardex", version, about)]
pub struct Cli {
    /// Only movements touching this store id (sales and transfers).
    #[arg(long, value_name = "STORE_ID")]
    pub store: Option<String>,

    /// Movement type: all, sales, transfers or purchase_orders.
    #[arg(long = "type", value_name = "TYPE", default_value = "all")]
    pub kind: String,

    /// First day of the date range (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<String>,

    /// Last day of the date range (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<String>,

    /// Show line items of a movement, e.g. `sale-42`. Repeatable.
    #[arg(long = "expand", value_name = "MOVEMENT_ID")]
    pub expand: Vec<String>,

    /// Show line items of every listed movement.
    #[arg(long, conflicts_with = "expand")]
    pub expand_all: bool,

    /// Export the listed movements to PDF.
    #[arg(long)]
    pub pdf: bool,

    /// Directory for the PDF file.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Report language: en or es.
    #[arg(long)]
    pub locale: Option<Locale>,

    /// PostgreSQL URL of the data store.
    #[arg(long, value_name = "URL")]
    pub database_url: Option<String>,

    /// Config file (defaults to kardex.toml in the user config directory).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the store ids and names usable with --store, then exit.
    #[arg(long)]
    pub list_stores: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_filters() {
        let cli = Cli::try_parse_from([
            "kardex",
            "--store",
            "7",
            "--type",
            "transfers",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--expand",
            "transfer-3",
            "--expand",
            "transfer-4",
            "--locale",
            "es",
        ])
        .unwrap();

        assert_eq!(cli.store.as_deref(), Some("7"));
        assert_eq!(cli.kind, "transfers");
        assert_eq!(cli.from.as_deref(), Some("2024-01-01"));
        assert_eq!(cli.to.as_deref(), Some("2024-01-31"));
        assert_eq!(cli.expand, vec!["transfer-3", "transfer-4"]);
        assert_eq!(cli.locale, Some(Locale::Es));
        assert!(!cli.pdf);
    }

    #[test]
    fn test_type_defaults_to_all() {
        let cli = Cli::try_parse_from(["kardex"]).unwrap();
        assert_eq!(cli.kind, "all");
        assert!(cli.expand.is_empty());
    }

    #[test]
    fn test_expand_all_conflicts_with_expand() {
        let result = Cli::try_parse_from(["kardex", "--expand-all", "--expand", "sale-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!(Cli::try_parse_from(["kardex", "--locale", "fr"]).is_err());
    }
}
