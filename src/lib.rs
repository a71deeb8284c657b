//! # pdf2docx
//!
//! Batch conversion of PDF documents into editable DOCX files.
//!
//! The converter does not try to reproduce page layout. It reads the size of
//! every glyph, groups equally sized glyphs into runs, and classifies runs as
//! level-1 headings, level-2 headings or body paragraphs by size alone.
//! Tables found on a page follow its text, and every page ends with a page
//! break.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf2docx::{convert_pdfs, BatchJob, ConvertOptions, NoopReporter};
//!
//! fn main() -> pdf2docx::Result<()> {
//!     let job = BatchJob::new()
//!         .with_inputs(["report.pdf", "minutes.pdf"])
//!         .with_output_dir("converted");
//!
//!     let outcome = convert_pdfs(&job, &ConvertOptions::default(), &mut NoopReporter)?;
//!     println!("{} files written", outcome.outputs().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - [`source`]: a [`PageSource`] yields pages of sized glyphs and tables
//! - [`segment`]: glyphs become [`TextRun`]s at every size change
//! - [`assemble`]: runs and tables become an ordered [`Block`] sequence
//! - [`sink`]: [`realize`] replays the blocks into a [`DocumentSink`]
//! - [`batch`]: [`convert_batch`] repeats this per input file

pub mod assemble;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod progress;
pub mod segment;
pub mod sink;
pub mod source;

// Re-export commonly used types
pub use assemble::{
    assemble, assemble_page, classify, realize, AssembleOptions, HeadingThresholds, TablePolicy,
};
pub use batch::{
    convert_batch, convert_file, convert_pdfs, output_path_for, BatchJob, BatchOutcome,
    ConvertOptions,
};
pub use detect::sniff_pdf_version;
pub use error::{Error, Result};
pub use model::{Block, BlockKind, Glyph, HeadingLevel, SourcePage, Table, TextRun};
pub use progress::{BatchReporter, NoopReporter};
pub use segment::segment;
pub use sink::{DocumentSink, DocumentSinkFactory, DocxSink, DocxSinkFactory, TableHandle};
pub use source::{
    ErrorMode, MemoryPageSource, PageSource, PageSourceFactory, PdfPageSource, PdfSourceFactory,
    SourceOptions,
};

use std::path::Path;

/// Read a PDF file and return its block sequence.
///
/// # Example
///
/// ```no_run
/// use pdf2docx::{read_blocks, ConvertOptions};
///
/// let blocks = read_blocks("report.pdf", &ConvertOptions::default()).unwrap();
/// println!("{}", serde_json::to_string_pretty(&blocks).unwrap());
/// ```
pub fn read_blocks<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<Vec<Block>> {
    options.assemble.validate()?;
    let mut source = PdfPageSource::open_with_options(path, options.source.clone())?;
    assemble(&mut source, &options.assemble)
}

/// Read a PDF from bytes and return its block sequence.
pub fn read_blocks_from_bytes(data: &[u8], options: &ConvertOptions) -> Result<Vec<Block>> {
    options.assemble.validate()?;
    let mut source = PdfPageSource::from_bytes(data, options.source.clone())?;
    assemble(&mut source, &options.assemble)
}
