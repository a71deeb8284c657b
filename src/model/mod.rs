//! Document model types for the conversion pipeline.
//!
//! Glyphs and tables come out of a page source, text runs come out of the
//! style segmenter, and blocks are what the assembler hands to a document
//! sink. None of these types know anything about PDF or DOCX internals.

mod block;
mod glyph;
mod page;
mod table;

pub use block::{Block, BlockKind, HeadingLevel};
pub use glyph::{Glyph, TextRun};
pub use page::SourcePage;
pub use table::Table;
