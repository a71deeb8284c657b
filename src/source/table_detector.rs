//! Table detection using text position analysis (Stream mode algorithm).
//!
//! Tables are found by looking for runs of consecutive rows whose spans
//! start at the same handful of x positions. No ruling lines are consulted.

use std::collections::{HashMap, HashSet};

use crate::model::Table;

use super::layout::TextSpan;

/// Width of the buckets left edges are snapped to.
const EDGE_BUCKET: f32 = 5.0;

/// Distance from a column edge within which a span counts as aligned.
const ALIGN_TOLERANCE: f32 = 5.0;

/// A detected table region with its content.
#[derive(Debug, Clone)]
pub struct DetectedTable {
    /// Detected column boundaries (X coordinates)
    pub columns: Vec<f32>,
    /// Right X boundary
    pub right_x: f32,
    /// Rows of text spans grouped by Y position
    pub rows: Vec<TableRowData>,
}

impl DetectedTable {
    /// Content stream positions of every span inside the table.
    pub fn span_orders(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .flat_map(|r| r.spans.iter())
            .map(|s| s.order)
    }
}

/// A row of text spans in a table.
#[derive(Debug, Clone)]
pub struct TableRowData {
    /// Y position of this row
    pub y: f32,
    /// Spans in this row, sorted by X
    pub spans: Vec<TextSpan>,
}

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Minimum number of rows to consider as table
    pub min_rows: usize,
    /// Minimum number of columns to consider as table
    pub min_columns: usize,
    /// Maximum number of columns (above this, likely word-level splitting)
    pub max_columns: usize,
    /// Y tolerance for grouping spans into rows (fraction of font size)
    pub y_tolerance_factor: f32,
    /// Minimum column alignment ratio (0.0-1.0)
    pub min_alignment_ratio: f32,
    /// Minimum gap between columns (points)
    pub min_column_gap: f32,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_rows: 2,
            min_columns: 2,
            max_columns: 6,
            y_tolerance_factor: 0.4,
            min_alignment_ratio: 0.3,
            min_column_gap: 15.0,
        }
    }
}

/// Detects tables in a list of text spans.
#[derive(Debug, Clone, Default)]
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect tables among the visible spans of a page, top to bottom.
    pub fn detect(&self, spans: &[TextSpan]) -> Vec<DetectedTable> {
        let spans: Vec<TextSpan> = spans.iter().filter(|s| !s.is_blank()).cloned().collect();

        if spans.len() < self.config.min_rows * self.config.min_columns {
            log::debug!("TableDetector: not enough spans ({})", spans.len());
            return vec![];
        }

        let rows = self.group_into_rows(&spans);
        if rows.len() < self.config.min_rows {
            log::debug!("TableDetector: not enough rows ({})", rows.len());
            return vec![];
        }

        let columns = self.detect_columns(&rows);
        log::debug!(
            "TableDetector: {} rows, column edges at {:?}",
            rows.len(),
            columns
        );
        if columns.len() < self.config.min_columns {
            return vec![];
        }

        let mut tables = Vec::new();
        for (start, end) in self.find_table_regions(&rows, &columns) {
            let table_rows = rows[start..=end].to_vec();

            // Columns are re-derived from the region alone.
            let table_columns = self.detect_columns(&table_rows);
            if table_columns.len() < self.config.min_columns {
                continue;
            }
            if table_columns.len() > self.config.max_columns {
                log::debug!(
                    "TableDetector: skipping region, too many columns ({} > {})",
                    table_columns.len(),
                    self.config.max_columns
                );
                continue;
            }
            if self.is_list_pattern(&table_rows, &table_columns) {
                log::debug!("TableDetector: skipping region, detected as list pattern");
                continue;
            }

            let right_x = table_rows
                .iter()
                .flat_map(|r| r.spans.iter())
                .map(|s| s.x + s.width)
                .fold(f32::MIN, f32::max);

            tables.push(DetectedTable {
                columns: table_columns,
                right_x,
                rows: table_rows,
            });
        }

        log::debug!("TableDetector: found {} tables", tables.len());
        tables
    }

    /// Convert a detected table into a rectangular grid of cell strings.
    ///
    /// Spans falling in the same cell are joined with a space.
    pub fn to_grid(&self, detected: &DetectedTable) -> Table {
        let columns = &detected.columns;
        let mut table = Table::new();

        for row in &detected.rows {
            let mut cells: Vec<Vec<&str>> = vec![Vec::new(); columns.len()];
            for span in &row.spans {
                let col = find_column_for_span(span.x, columns, detected.right_x);
                if let Some(cell) = cells.get_mut(col) {
                    cell.push(span.text.trim());
                }
            }
            table.add_row(cells.into_iter().map(|parts| parts.join(" ")).collect());
        }

        table
    }

    /// Group spans into rows by Y position, top of page first.
    fn group_into_rows(&self, spans: &[TextSpan]) -> Vec<TableRowData> {
        let mut sorted = spans.to_vec();
        sorted.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

        let mut rows: Vec<TableRowData> = Vec::new();
        let mut current: Vec<TextSpan> = Vec::new();
        let mut current_y: Option<f32> = None;

        for span in sorted {
            let tolerance = span.font_size * self.config.y_tolerance_factor;
            match current_y {
                Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
                _ => {
                    if !current.is_empty() {
                        rows.push(close_row(std::mem::take(&mut current)));
                    }
                    current_y = Some(span.y);
                    current.push(span);
                }
            }
        }
        if !current.is_empty() {
            rows.push(close_row(current));
        }

        rows
    }

    /// Detect column boundaries from aligned left edges.
    ///
    /// Rows holding at least two spans are the evidence when there are
    /// enough of them; otherwise every row votes.
    fn detect_columns(&self, rows: &[TableRowData]) -> Vec<f32> {
        let multi_span_rows: Vec<&TableRowData> =
            rows.iter().filter(|r| r.spans.len() >= 2).collect();

        let evidence: Vec<&TableRowData> = if multi_span_rows.len() >= self.config.min_rows {
            multi_span_rows
        } else {
            rows.iter().collect()
        };
        if evidence.is_empty() {
            return vec![];
        }

        // Each bucket is counted at most once per row.
        let mut edge_counts: HashMap<i32, usize> = HashMap::new();
        for row in &evidence {
            let buckets: HashSet<i32> = row
                .spans
                .iter()
                .map(|s| (s.x / EDGE_BUCKET).round() as i32)
                .collect();
            for bucket in buckets {
                *edge_counts.entry(bucket).or_insert(0) += 1;
            }
        }

        let min_occurrences =
            ((evidence.len() as f32 * self.config.min_alignment_ratio) as usize).max(2);

        let mut edges: Vec<f32> = edge_counts
            .iter()
            .filter(|(_, count)| **count >= min_occurrences)
            .map(|(bucket, _)| *bucket as f32 * EDGE_BUCKET)
            .collect();
        edges.sort_by(f32::total_cmp);

        let mut merged: Vec<f32> = Vec::new();
        for edge in edges {
            match merged.last() {
                Some(&last) if edge - last < self.config.min_column_gap => {}
                _ => merged.push(edge),
            }
        }
        merged
    }

    /// Find contiguous row regions that form tables.
    fn find_table_regions(&self, rows: &[TableRowData], columns: &[f32]) -> Vec<(usize, usize)> {
        let mut regions = Vec::new();
        let mut start: Option<usize> = None;

        for (i, row) in rows.iter().enumerate() {
            if alignment_score(row, columns) >= self.config.min_alignment_ratio {
                start.get_or_insert(i);
                continue;
            }
            if let Some(s) = start.take() {
                if i - s >= self.config.min_rows {
                    regions.push((s, i - 1));
                }
            }
        }
        if let Some(s) = start {
            if rows.len() - s >= self.config.min_rows {
                regions.push((s, rows.len() - 1));
            }
        }

        regions
    }

    /// Check if detected table rows actually represent a numbered or bulleted list.
    ///
    /// A list like "1. Item" often yields the marker and the text as separate
    /// spans at two x positions, which looks like a two-column table.
    fn is_list_pattern(&self, rows: &[TableRowData], columns: &[f32]) -> bool {
        if columns.len() < 2 || rows.is_empty() {
            return false;
        }

        let mut bullets = 0;
        let mut numbers = 0;
        for row in rows {
            let Some(first) = row.spans.iter().min_by(|a, b| a.x.total_cmp(&b.x)) else {
                continue;
            };
            let text = first.text.trim();
            if is_bullet_marker(text) {
                bullets += 1;
            } else if is_number_marker(text) {
                numbers += 1;
            }
        }

        let bullet_ratio = bullets as f32 / rows.len() as f32;
        let marker_ratio = (bullets + numbers) as f32 / rows.len() as f32;

        // Numbered first columns are common in real tables, so only two-column
        // regions are rejected for them.
        bullet_ratio >= 0.5 || (columns.len() == 2 && marker_ratio >= 0.5)
    }
}

fn close_row(spans: Vec<TextSpan>) -> TableRowData {
    let y = spans.iter().map(|s| s.y).sum::<f32>() / spans.len() as f32;
    TableRowData { y, spans }
}

/// Share of a row's spans that start on a column edge.
fn alignment_score(row: &TableRowData, columns: &[f32]) -> f32 {
    if row.spans.is_empty() || columns.is_empty() {
        return 0.0;
    }
    let aligned = row
        .spans
        .iter()
        .filter(|span| columns.iter().any(|col| (span.x - col).abs() <= ALIGN_TOLERANCE))
        .count();
    aligned as f32 / row.spans.len() as f32
}

/// Find which column a span belongs to based on its left edge.
fn find_column_for_span(span_x: f32, columns: &[f32], right_x: f32) -> usize {
    // Spans may start up to 10pt before their column edge.
    for (i, &col_start) in columns.iter().enumerate() {
        let col_end = columns.get(i + 1).copied().unwrap_or(right_x + 100.0);
        if span_x >= col_start - 10.0 && span_x < col_end - 10.0 {
            return i;
        }
    }

    columns
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (span_x - **a).abs().total_cmp(&(span_x - **b).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Check if text is a bullet marker (•, -, etc.).
fn is_bullet_marker(text: &str) -> bool {
    matches!(
        text.trim(),
        "-" | "–" | "—" | "•" | "·" | "*" | "○" | "▪" | "◦" | "▸" | "►" | "■" | "●" | "□" | "◆" | "▶" | "➤"
    )
}

/// Check if text is a number-style list marker (1., 2), a., etc.).
fn is_number_marker(text: &str) -> bool {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return false;
    }

    if cleaned.parse::<u32>().is_ok() {
        return true;
    }

    let digits = cleaned.chars().take_while(char::is_ascii_digit).count();
    let suffix = &cleaned[digits..];
    if digits > 0 && (suffix == "." || suffix == ")") {
        return true;
    }

    // Letter marker: "a.", "B)"
    let mut chars = cleaned.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.' | ')'), None) if letter.is_alphabetic()
    )
}
