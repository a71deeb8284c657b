//! Page-level types.

use super::{Glyph, Table};
use serde::{Deserialize, Serialize};

/// One page as produced by a page source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePage {
    /// Page number (1-indexed)
    pub number: u32,

    /// Glyphs in extraction order
    pub glyphs: Vec<Glyph>,

    /// Tables in extraction order
    pub tables: Vec<Table>,
}

impl SourcePage {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Set the glyph stream.
    pub fn with_glyphs(mut self, glyphs: Vec<Glyph>) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Add a table.
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    /// Concatenated text of every glyph on the page.
    pub fn plain_text(&self) -> String {
        self.glyphs.iter().map(|g| g.text.as_str()).collect()
    }

    /// Check if the page has neither glyphs nor tables.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty() && self.tables.is_empty()
    }
}
