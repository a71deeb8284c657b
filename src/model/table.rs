//! Table grid type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A grid of cell strings extracted from a page.
///
/// The column count is the length of the first row. Extractors are expected
/// to produce rectangular grids, but nothing enforces it here; see
/// [`Table::check_rectangular`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows of cell text
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from any nested collection of strings.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fail on the first row whose width differs from the first row's.
    pub fn check_rectangular(&self) -> Result<()> {
        let expected = self.column_count();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, cells)) => Err(Error::InconsistentTable {
                row,
                expected,
                found: cells.len(),
            }),
            None => Ok(()),
        }
    }

    /// Pad short rows with empty cells and cut long rows to the first row's width.
    pub fn normalized(&self) -> Table {
        let width = self.column_count();
        Table {
            rows: self
                .rows
                .iter()
                .map(|row| {
                    let mut row: Vec<String> = row.iter().take(width).cloned().collect();
                    row.resize(width, String::new());
                    row
                })
                .collect(),
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_follow_first_row() {
        let table = Table::from_rows([vec!["a", "b", "c"], vec!["d", "e", "f"]]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert!(table.check_rectangular().is_ok());
        assert_eq!(Table::new().column_count(), 0);
    }

    #[test]
    fn test_check_rectangular_reports_row() {
        let table = Table::from_rows([vec!["a", "b"], vec!["c", "d"], vec!["e"]]);
        match table.check_rectangular() {
            Err(Error::InconsistentTable {
                row,
                expected,
                found,
            }) => {
                assert_eq!((row, expected, found), (2, 2, 1));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_normalized_pads_and_truncates() {
        let table = Table::from_rows([vec!["a", "b"], vec!["c"], vec!["d", "e", "f"]]);
        let fixed = table.normalized();
        assert_eq!(fixed.rows[1], vec!["c".to_string(), String::new()]);
        assert_eq!(fixed.rows[2], vec!["d".to_string(), "e".to_string()]);
        assert!(fixed.check_rectangular().is_ok());
    }

    #[test]
    fn test_plain_text() {
        let table = Table::from_rows([vec!["Name", "Age"], vec!["Alice", "30"]]);
        assert_eq!(table.plain_text(), "Name\tAge\nAlice\t30");
    }
}
