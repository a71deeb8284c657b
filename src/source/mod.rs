//! Page sources.
//!
//! A page source turns one input document into pages of sized glyphs and
//! extracted tables. [`PdfPageSource`] is the lopdf-backed implementation;
//! [`MemoryPageSource`] serves pages that were built in memory.

mod layout;
mod options;
mod pdf;
mod table_detector;

pub use layout::{spans_to_glyphs, TextSpan};
pub use options::{ErrorMode, SourceOptions};
pub use pdf::{PdfPageSource, PdfSourceFactory};
pub use table_detector::{DetectedTable, TableDetector, TableDetectorConfig, TableRowData};

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::SourcePage;

/// One opened input document.
///
/// Dropping the source releases whatever it holds open.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Read a page (1-indexed).
    fn read_page(&mut self, page_num: u32) -> Result<SourcePage>;
}

/// Opens a [`PageSource`] for an input path.
pub trait PageSourceFactory {
    /// The source type produced.
    type Source: PageSource;

    /// Open the document at `path`.
    fn open(&self, path: &Path) -> Result<Self::Source>;
}

/// A page source over pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageSource {
    pages: Vec<SourcePage>,
}

impl MemoryPageSource {
    /// Create a source serving `pages` in order.
    pub fn new(pages: Vec<SourcePage>) -> Self {
        Self { pages }
    }
}

impl PageSource for MemoryPageSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn read_page(&mut self, page_num: u32) -> Result<SourcePage> {
        page_num
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(page_num, self.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_pages() {
        let mut source = MemoryPageSource::new(vec![SourcePage::new(1), SourcePage::new(2)]);
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.read_page(2).unwrap().number, 2);
        assert!(matches!(
            source.read_page(3),
            Err(Error::PageOutOfRange(3, 2))
        ));
    }
}
