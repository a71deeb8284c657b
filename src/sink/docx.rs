//! DOCX sink backed by docx-rs.

use std::fs::File;
use std::path::Path;

use docx_rs::{
    BreakType, Docx, Paragraph, Run, Style, StyleType, Table as DocxTable, TableCell, TableRow,
};

use crate::error::{Error, Result};
use crate::model::HeadingLevel;

use super::{DocumentSink, DocumentSinkFactory, TableHandle};

/// Usable text width of a Letter page with 1" margins, in twips.
const TEXT_WIDTH_TWIPS: usize = 9360;

/// Heading appearance for generated documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxStyle {
    /// Heading 1 size in half-points
    pub heading1_size: usize,
    /// Heading 2 size in half-points
    pub heading2_size: usize,
    /// Render headings in bold
    pub bold_headings: bool,
}

impl Default for DocxStyle {
    fn default() -> Self {
        Self {
            heading1_size: 32,
            heading2_size: 26,
            bold_headings: true,
        }
    }
}

impl DocxStyle {
    fn heading_style(&self, level: HeadingLevel) -> Style {
        let (id, name, size) = match level {
            HeadingLevel::H1 => ("Heading1", "Heading 1", self.heading1_size),
            HeadingLevel::H2 => ("Heading2", "Heading 2", self.heading2_size),
        };
        let style = Style::new(id, StyleType::Paragraph).name(name).size(size);
        if self.bold_headings {
            style.bold()
        } else {
            style
        }
    }
}

fn style_id(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "Heading1",
        HeadingLevel::H2 => "Heading2",
    }
}

#[derive(Debug, Clone)]
enum Element {
    Heading(HeadingLevel, String),
    Paragraph(String),
    Table(Vec<Vec<String>>),
    PageBreak,
}

/// Collects document content and writes it as a DOCX package on save.
#[derive(Debug, Clone, Default)]
pub struct DocxSink {
    style: DocxStyle,
    elements: Vec<Element>,
    /// Element index of each table, by handle.
    tables: Vec<usize>,
}

impl DocxSink {
    /// Create an empty document with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with the given heading styles.
    pub fn with_style(style: DocxStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Number of elements added so far.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if nothing has been added.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn table_mut(&mut self, table: TableHandle) -> Result<&mut Vec<Vec<String>>> {
        let index = self
            .tables
            .get(table.index())
            .copied()
            .ok_or_else(|| Error::Validation(format!("unknown table handle {}", table.index())))?;
        match self.elements.get_mut(index) {
            Some(Element::Table(grid)) => Ok(grid),
            _ => Err(Error::Validation(format!(
                "table handle {} does not refer to a table",
                table.index()
            ))),
        }
    }

    fn build(&self) -> Docx {
        let mut docx = Docx::new()
            .add_style(self.style.heading_style(HeadingLevel::H1))
            .add_style(self.style.heading_style(HeadingLevel::H2));

        for element in &self.elements {
            docx = match element {
                Element::Heading(level, text) => docx.add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text(text.as_str()))
                        .style(style_id(*level)),
                ),
                Element::Paragraph(text) => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text.as_str())))
                }
                // Word refuses tables without rows or cells.
                Element::Table(grid) if grid.first().map_or(true, Vec::is_empty) => docx,
                Element::Table(grid) => docx.add_table(build_table(grid)),
                Element::PageBreak => docx
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page))),
            };
        }
        docx
    }
}

fn build_table(grid: &[Vec<String>]) -> DocxTable {
    let cols = grid.first().map_or(0, Vec::len).max(1);
    let rows = grid
        .iter()
        .map(|row| {
            let cells = row
                .iter()
                .map(|text| {
                    TableCell::new()
                        .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text.as_str())))
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();
    DocxTable::new(rows).set_grid(vec![TEXT_WIDTH_TWIPS / cols; cols])
}

impl DocumentSink for DocxSink {
    fn add_heading(&mut self, text: &str, level: HeadingLevel) -> Result<()> {
        self.elements.push(Element::Heading(level, text.to_string()));
        Ok(())
    }

    fn add_paragraph(&mut self, text: &str) -> Result<()> {
        self.elements.push(Element::Paragraph(text.to_string()));
        Ok(())
    }

    fn add_table(&mut self, rows: usize, cols: usize) -> Result<TableHandle> {
        let handle = TableHandle(self.tables.len());
        self.tables.push(self.elements.len());
        self.elements
            .push(Element::Table(vec![vec![String::new(); cols]; rows]));
        Ok(handle)
    }

    fn set_cell(&mut self, table: TableHandle, row: usize, col: usize, text: &str) -> Result<()> {
        let grid = self.table_mut(table)?;
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        let cell = grid
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(Error::TableCellOutOfRange {
                row,
                col,
                rows,
                cols,
            })?;
        *cell = text.to_string();
        Ok(())
    }

    fn add_page_break(&mut self) -> Result<()> {
        self.elements.push(Element::PageBreak);
        Ok(())
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        let sink_error = |reason: String| Error::SinkWrite {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::create(path).map_err(|e| sink_error(e.to_string()))?;
        self.build()
            .build()
            .pack(file)
            .map_err(|e| sink_error(e.to_string()))?;

        log::debug!("wrote {} elements to {}", self.elements.len(), path.display());
        Ok(())
    }
}

/// Creates a [`DocxSink`] per output document.
#[derive(Debug, Clone, Default)]
pub struct DocxSinkFactory {
    style: DocxStyle,
}

impl DocxSinkFactory {
    /// Create a factory with default styles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory with custom heading styles.
    pub fn with_style(style: DocxStyle) -> Self {
        Self { style }
    }
}

impl DocumentSinkFactory for DocxSinkFactory {
    type Sink = DocxSink;

    fn create(&self) -> DocxSink {
        DocxSink::with_style(self.style.clone())
    }
}
