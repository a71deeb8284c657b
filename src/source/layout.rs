//! Content stream scanning.
//!
//! Walks a page's content stream and records every piece of shown text
//! together with its position and effective font size. The spans feed both
//! the glyph stream and the table detector.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};
use crate::model::Glyph;

/// Adjustment (in thousandths of text space) above which a `TJ` gap reads as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Minimum baseline change that starts a new line.
const LINE_EPSILON: f32 = 0.5;

/// A piece of text shown by one text operator.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Effective font size in points
    pub font_size: f32,
    /// Position of the span in content stream order
    pub order: usize,
}

impl TextSpan {
    /// Create a new text span. The width is estimated from the font size.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, order: usize) -> Self {
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            font_size,
            order,
        }
    }

    /// Check if the span has visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extract the positioned text spans of one page.
pub fn scan_page(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<TextSpan>> {
    let fonts = doc
        .get_page_fonts(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;
    let content = page_content(doc, page_id)?;
    let content =
        lopdf::content::Content::decode(&content).map_err(|e| Error::PdfParse(e.to_string()))?;

    let mut scanner = Scanner::new(doc, &fonts);
    for op in &content.operations {
        scanner.apply(&op.operator, &op.operands);
    }
    Ok(scanner.spans)
}

/// Turn spans into a glyph stream.
///
/// Each character becomes one glyph carrying its span's size. When a span
/// starts on a new baseline and the stream does not already end in
/// whitespace, a single space glyph sized like the preceding glyph is
/// inserted so words on consecutive lines stay apart without introducing a
/// size change.
pub fn spans_to_glyphs<'a>(spans: impl IntoIterator<Item = &'a TextSpan>) -> Vec<Glyph> {
    let mut glyphs: Vec<Glyph> = Vec::new();
    let mut last_y: Option<f32> = None;

    for span in spans {
        let new_line = last_y.is_some_and(|y| (span.y - y).abs() > LINE_EPSILON);
        if new_line {
            if let Some(prev) = glyphs.last() {
                let ends_blank = prev.text.chars().last().is_some_and(char::is_whitespace);
                if !ends_blank {
                    let size = prev.size;
                    glyphs.push(Glyph::new(" ", size, glyphs.len()));
                }
            }
        }

        for c in span.text.chars() {
            glyphs.push(Glyph::new(c.to_string(), span.font_size, glyphs.len()));
        }
        last_y = Some(span.y);
    }

    glyphs
}

/// Get the decompressed content stream of a page.
fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let page_dict = doc
        .get_dictionary(page_id)
        .map_err(|e| Error::PdfParse(e.to_string()))?;

    let contents = match page_dict.get(b"Contents") {
        Ok(contents) => contents,
        // A page without a content stream is blank, not broken.
        Err(_) => return Ok(Vec::new()),
    };

    match contents {
        Object::Reference(r) => match doc.get_object(*r) {
            Ok(Object::Stream(s)) => Ok(stream_bytes(s)),
            Ok(Object::Array(arr)) => Ok(concat_streams(doc, arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        },
        Object::Array(arr) => Ok(concat_streams(doc, arr)),
        _ => Err(Error::PdfParse("Invalid content stream".to_string())),
    }
}

fn concat_streams(doc: &LopdfDocument, parts: &[Object]) -> Vec<u8> {
    let mut content = Vec::new();
    for obj in parts {
        if let Object::Reference(r) = obj {
            if let Ok(Object::Stream(s)) = doc.get_object(*r) {
                content.extend_from_slice(&stream_bytes(s));
                content.push(b' ');
            }
        }
    }
    content
}

/// Unfiltered streams have nothing to decompress and are used as stored.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Text state tracked while walking a content stream.
struct Scanner<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    font: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
    in_text: bool,
    spans: Vec<TextSpan>,
}

impl<'a> Scanner<'a> {
    fn new(doc: &'a LopdfDocument, fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        Self {
            doc,
            fonts,
            font: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            matrix: TextMatrix::default(),
            in_text: false,
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "BT" => {
                self.in_text = true;
                self.matrix = TextMatrix::default();
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let [Object::Name(name), size, ..] = operands {
                    self.font = name.clone();
                    self.font_size = get_number(size).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    self.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let [tx, ty, ..] = operands {
                    let tx = get_number(tx).unwrap_or(0.0);
                    let ty = get_number(ty).unwrap_or(0.0);
                    if operator == "TD" {
                        self.leading = -ty;
                    }
                    self.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let n: Vec<f32> = operands
                        .iter()
                        .take(6)
                        .map(|o| get_number(o).unwrap_or(0.0))
                        .collect();
                    self.matrix.set(n[0], n[1], n[2], n[3], n[4], n[5]);
                }
            }
            "T*" => self.matrix.next_line(self.leading),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.emit(text);
                }
            }
            "'" | "\"" => {
                self.matrix.next_line(self.leading);
                let text_idx = if operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(text_idx) {
                    let text = self.decode(bytes);
                    self.emit(text);
                }
            }
            _ => {}
        }
    }

    fn emit(&mut self, text: String) {
        if !self.in_text || text.is_empty() {
            return;
        }
        let (x, y) = self.matrix.position();
        let size = self.font_size * self.matrix.vertical_scale();
        let order = self.spans.len();
        self.spans.push(TextSpan::new(text, x, y, size, order));
    }

    /// Decode a string operand with the current font's encoding.
    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(&self.font)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    /// Decode a `TJ` array, turning large negative adjustments into spaces.
    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                other => {
                    let Some(adjustment) = get_number(other) else {
                        continue;
                    };
                    if -adjustment <= TJ_SPACE_THRESHOLD {
                        continue;
                    }
                    match combined.chars().last() {
                        Some(c) if !c.is_whitespace() && !is_spaceless_script_char(c) => {
                            combined.push(' ')
                        }
                        _ => {}
                    }
                }
            }
        }
        combined
    }
}

/// Text matrix with the line matrix folded in.
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self { a, b, c, d, e, f };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        // Without a TL operator, fall back to a 12pt leading.
        let leading = if leading == 0.0 { 12.0 } else { leading };
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // CJK Unified Ideographs Extension B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
