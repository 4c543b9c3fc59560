//! # kardex-export: PDF Export for Kardex
//!
//! Turns a [`MovementReport`] into PDF bytes and writes them under the
//! report's file name.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kardex-core::build_report()  ──►  MovementReport                       │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                              pdf::render_pdf()   (pure, bytes)          │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                              write_pdf(dir)  ──►  dir/<file_name>       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writing the file is the only side effect of an export.

pub mod error;
pub mod pdf;

pub use error::{ExportError, ExportResult};
pub use pdf::{render_pdf, render_pdf_with, PdfLayout};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use kardex_core::MovementReport;

/// Renders the report and writes it to `dir/<report.file_name>`.
///
/// Creates `dir` if needed and returns the path written.
pub fn write_pdf(report: &MovementReport, dir: &Path) -> ExportResult<PathBuf> {
    let bytes = render_pdf(report)?;

    fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(&report.file_name);
    fs::write(&path, &bytes).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(
        path = %path.display(),
        rows = report.rows.len(),
        bytes = bytes.len(),
        "Movements PDF written"
    );
    Ok(path)
}
