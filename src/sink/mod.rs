//! Document sinks.
//!
//! A sink receives structural commands in document order and writes the
//! accumulated document when asked to save. [`DocxSink`] writes DOCX files.

mod docx;

pub use docx::{DocxSink, DocxSinkFactory, DocxStyle};

use std::path::Path;

use crate::error::Result;
use crate::model::HeadingLevel;

/// Refers to a table previously added to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableHandle(pub(crate) usize);

impl TableHandle {
    /// Create a handle for the table at `index`.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the table among the sink's tables.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Accumulates a document from structural commands.
///
/// Dropping a sink without saving discards the partial document.
pub trait DocumentSink {
    /// Append a heading.
    fn add_heading(&mut self, text: &str, level: HeadingLevel) -> Result<()>;

    /// Append a body paragraph.
    fn add_paragraph(&mut self, text: &str) -> Result<()>;

    /// Append an empty `rows` x `cols` table.
    fn add_table(&mut self, rows: usize, cols: usize) -> Result<TableHandle>;

    /// Set the text of one cell of a table added earlier.
    fn set_cell(&mut self, table: TableHandle, row: usize, col: usize, text: &str) -> Result<()>;

    /// Append a page break.
    fn add_page_break(&mut self) -> Result<()>;

    /// Write the document to `path`.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Creates a fresh [`DocumentSink`] for each output document.
pub trait DocumentSinkFactory {
    /// The sink type produced.
    type Sink: DocumentSink;

    /// Create an empty sink.
    fn create(&self) -> Self::Sink;
}
