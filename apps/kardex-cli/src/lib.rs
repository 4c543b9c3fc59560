//! # kardex: Inventory Movements Report
//!
//! Loads sales, transfers and purchase orders from the shop's data store,
//! lists them as one movement ledger, and optionally exports the listing
//! to PDF.
//!
//! ## Module Organization
//! ```text
//! kardex_cli/
//! ├── lib.rs      ◄─── You are here (run sequence, logging)
//! ├── cli.rs      ◄─── clap flags
//! ├── config.rs   ◄─── AppConfig: defaults → TOML → env → flags
//! ├── screen.rs   ◄─── MovementsScreen: filters, expansion, views
//! ├── render.rs   ◄─── comfy-table output
//! └── error.rs    ◄─── ConfigError, AppError
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod screen;

use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kardex_db::{load_snapshot, Database};

use cli::Cli;
use config::AppConfig;
use error::AppResult;
use screen::MovementsScreen;

/// Runs one report session.
///
/// ## Run Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       kardex run sequence                               │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults, kardex.toml, KARDEX_* env, flags; then validate         │
/// │                                                                         │
/// │  2. Load Snapshot ────────────────────────────────────────────────────► │
/// │     • nine concurrent queries, failed ones become empty collections     │
/// │                                                                         │
/// │  3. Apply Inputs ─────────────────────────────────────────────────────► │
/// │     • store, type, date range, expanded rows                            │
/// │                                                                         │
/// │  4. Output ───────────────────────────────────────────────────────────► │
/// │     • table on stdout                                                   │
/// │     • --pdf: <prefix>_<yyyy-MM-dd_HH-mm>.pdf in the output directory    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(&cli)?;
    let offset = config.utc_offset()?;
    info!(
        locale = %config.report.locale,
        utc_offset_minutes = config.report.utc_offset_minutes,
        "Configuration loaded"
    );

    let db = Database::connect_lazy(config.db_config())?;
    let loaded = load_snapshot(&db).await;
    db.close().await;

    let mut screen = MovementsScreen::new(loaded, config.report.locale, offset);

    if cli.list_stores {
        println!(
            "{}",
            render::store_table(&screen.store_options(), screen.labels())
        );
        return Ok(());
    }

    if let Some(store) = &cli.store {
        screen.set_store(store);
    }
    screen.set_type(&cli.kind)?;
    if let Some(from) = &cli.from {
        screen.set_start_date(from)?;
    }
    if let Some(to) = &cli.to {
        screen.set_end_date(to)?;
    }

    if cli.expand_all {
        screen.expand_visible();
    }
    for id in &cli.expand {
        screen.toggle_expanded(id)?;
    }

    print!("{}", render::render_screen(&screen));

    if cli.pdf {
        let generated_at = Utc::now().with_timezone(&offset);
        let report = screen.export_report(generated_at);
        if report.is_empty() {
            warn!("Exporting a report with no movements");
        }
        let path = kardex_export::write_pdf(&report, &config.report.output_dir)?;
        println!("{}", path.display());
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kardex_db=trace` - Show trace for the fetch stage only
/// - Default: `info,kardex=debug,sqlx=warn`
///
/// Logs go to stderr; stdout carries the report.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kardex=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
