//! Error types for PDF export.

use std::path::PathBuf;
use thiserror::Error;

/// PDF export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The PDF library failed to build or serialize the document.
    #[error("PDF rendering failed: {0}")]
    Render(String),

    /// The output directory could not be created or the file not written.
    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<printpdf::Error> for ExportError {
    fn from(err: printpdf::Error) -> Self {
        ExportError::Render(err.to_string())
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message() {
        let err = ExportError::Io {
            path: PathBuf::from("/readonly/movements.pdf"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Could not write /readonly/movements.pdf: denied");
    }
}
