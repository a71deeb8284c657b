//! Glyph and text run types.

use serde::{Deserialize, Serialize};

/// One rendered character unit on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// The character this glyph renders (normally a single char)
    pub text: String,

    /// Effective font size in points
    pub size: f32,

    /// Position in the page's glyph order
    pub index: usize,
}

impl Glyph {
    /// Create a new glyph.
    pub fn new(text: impl Into<String>, size: f32, index: usize) -> Self {
        Self {
            text: text.into(),
            size,
            index,
        }
    }

    /// Build a glyph stream from `(text, size)` pairs, numbering them in order.
    pub fn sequence<'a>(items: impl IntoIterator<Item = (&'a str, f32)>) -> Vec<Glyph> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, (text, size))| Glyph::new(text, size, index))
            .collect()
    }
}

/// A maximal run of consecutive glyphs sharing one size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Concatenated glyph text with surrounding whitespace trimmed
    pub text: String,

    /// Concatenated glyph text exactly as extracted
    pub raw_text: String,

    /// Size shared by every glyph in the run
    pub size: f32,
}

impl TextRun {
    /// Create a run from its untrimmed text.
    pub fn new(raw_text: impl Into<String>, size: f32) -> Self {
        let raw_text = raw_text.into();
        Self {
            text: raw_text.trim().to_string(),
            raw_text,
            size,
        }
    }

    /// Check if the trimmed text is empty.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}
