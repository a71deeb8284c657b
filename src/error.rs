//! Error types for pdf2docx.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf2docx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The batch request or a configuration value is not usable.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// A page source could not open or decode an input file.
    #[error("Failed to read '{}': {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// A table row does not have as many cells as the first row.
    #[error("Inconsistent table: row {row} has {found} cells, expected {expected}")]
    InconsistentTable {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A cell was addressed outside the dimensions of its table.
    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} table")]
    TableCellOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The document sink could not write its output.
    #[error("Failed to write '{}': {reason}", path.display())]
    SinkWrite { path: PathBuf, reason: String },

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),
}

impl Error {
    /// Wrap an error raised while reading `path`.
    pub fn source_read(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::SourceRead {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::InconsistentTable {
            row: 2,
            expected: 3,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "Inconsistent table: row 2 has 1 cells, expected 3"
        );
    }

    #[test]
    fn test_source_read_names_file_and_cause() {
        let err = Error::source_read("reports/q3.pdf", Error::UnknownFormat);
        let message = err.to_string();
        assert!(message.contains("reports/q3.pdf"));
        assert!(message.contains("not a valid PDF"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
