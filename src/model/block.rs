//! Block types produced by the document assembler.

use serde::{Deserialize, Serialize};

use super::Table;

/// Heading depth recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Largest type on the page
    H1,
    /// Intermediate type
    H2,
}

impl HeadingLevel {
    /// Numeric level (1 or 2).
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
        }
    }
}

/// Result of classifying a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// A heading at the given level
    Heading(HeadingLevel),
    /// Body text
    Paragraph,
}

/// A structural unit in final document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading
    Heading { level: HeadingLevel, text: String },

    /// A body paragraph
    Paragraph { text: String },

    /// A table grid
    Table { table: Table },

    /// End of a source page
    PageBreak,
}

impl Block {
    /// Build a text block of the given kind.
    pub fn text(kind: BlockKind, text: impl Into<String>) -> Self {
        let text = text.into();
        match kind {
            BlockKind::Heading(level) => Block::Heading { level, text },
            BlockKind::Paragraph => Block::Paragraph { text },
        }
    }

    /// Check if this is a page break.
    pub fn is_page_break(&self) -> bool {
        matches!(self, Block::PageBreak)
    }

    /// Get the text of a heading or paragraph.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Paragraph { text } => Some(text),
            _ => None,
        }
    }
}
