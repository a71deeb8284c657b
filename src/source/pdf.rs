//! PDF page source backed by lopdf.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect::sniff_pdf_version;
use crate::error::{Error, Result};
use crate::model::{SourcePage, Table};

use super::layout::{scan_page, spans_to_glyphs, TextSpan};
use super::options::{ErrorMode, SourceOptions};
use super::table_detector::TableDetector;
use super::{PageSource, PageSourceFactory};

/// Reads glyphs and tables out of one PDF document.
pub struct PdfPageSource {
    doc: LopdfDocument,
    pages: Vec<ObjectId>,
    detector: TableDetector,
    options: SourceOptions,
}

impl PdfPageSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, SourceOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: SourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let version = sniff_pdf_version(path)?;
        log::debug!("{}: PDF {}", path.display(), version);

        let doc = LopdfDocument::load(path)?;
        Ok(Self::from_document(doc, options))
    }

    /// Read a PDF from bytes.
    pub fn from_bytes(data: &[u8], options: SourceOptions) -> Result<Self> {
        crate::detect::pdf_version_from_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::from_document(doc, options))
    }

    fn from_document(doc: LopdfDocument, options: SourceOptions) -> Self {
        // get_pages is keyed by page number, so values come out in page order.
        let pages = doc.get_pages().into_values().collect();
        Self {
            doc,
            pages,
            detector: TableDetector::with_config(options.table_detector.clone()),
            options,
        }
    }

    /// Positioned spans of a page, honoring the error mode.
    fn page_spans(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        match scan_page(&self.doc, page_id) {
            Ok(spans) => Ok(spans),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to read text from page {}: {}", page_num, e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

impl PageSource for PdfPageSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn read_page(&mut self, page_num: u32) -> Result<SourcePage> {
        let page_id = page_num
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .copied()
            .ok_or(Error::PageOutOfRange(page_num, self.page_count()))?;

        let spans = self.page_spans(page_num, page_id)?;

        let detected = if self.options.detect_tables {
            self.detector.detect(&spans)
        } else {
            Vec::new()
        };
        let tables: Vec<Table> = detected.iter().map(|t| self.detector.to_grid(t)).collect();

        let glyphs = if self.options.exclude_table_text && !detected.is_empty() {
            let in_tables: HashSet<usize> = detected.iter().flat_map(|t| t.span_orders()).collect();
            spans_to_glyphs(spans.iter().filter(|s| !in_tables.contains(&s.order)))
        } else {
            spans_to_glyphs(&spans)
        };

        log::debug!(
            "page {}: {} spans, {} glyphs, {} tables",
            page_num,
            spans.len(),
            glyphs.len(),
            tables.len()
        );

        Ok(SourcePage {
            number: page_num,
            glyphs,
            tables,
        })
    }
}

/// Opens every input with [`PdfPageSource`].
#[derive(Debug, Clone, Default)]
pub struct PdfSourceFactory {
    options: SourceOptions,
}

impl PdfSourceFactory {
    /// Create a factory with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with custom options.
    pub fn with_options(options: SourceOptions) -> Self {
        Self { options }
    }
}

impl PageSourceFactory for PdfSourceFactory {
    type Source = PdfPageSource;

    fn open(&self, path: &Path) -> Result<PdfPageSource> {
        PdfPageSource::open_with_options(path, self.options.clone())
            .map_err(|e| Error::source_read(PathBuf::from(path), e))
    }
}
