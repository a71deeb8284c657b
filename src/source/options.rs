//! Page source options.

use super::table_detector::TableDetectorConfig;

/// Options for reading pages out of a PDF.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Whether to run table detection on each page
    pub detect_tables: bool,

    /// Whether text that landed in a detected table is removed from the glyph stream
    pub exclude_table_text: bool,

    /// Table detection tuning
    pub table_detector: TableDetectorConfig,
}

impl SourceOptions {
    /// Create new source options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (pages whose content cannot be decoded come back empty).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Enable or disable removal of table text from the glyph stream.
    pub fn with_exclude_table_text(mut self, exclude: bool) -> Self {
        self.exclude_table_text = exclude;
        self
    }

    /// Set the table detector configuration.
    pub fn with_table_detector(mut self, config: TableDetectorConfig) -> Self {
        self.table_detector = config;
        self
    }
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            detect_tables: true,
            exclude_table_text: false,
            table_detector: TableDetectorConfig::default(),
        }
    }
}

/// Error handling mode while reading pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip undecodable page content and continue
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_options_builder() {
        let options = SourceOptions::new()
            .lenient()
            .with_tables(false)
            .with_exclude_table_text(true);

        assert_eq!(options.error_mode, ErrorMode::Lenient);
        assert!(!options.detect_tables);
        assert!(options.exclude_table_text);
    }

    #[test]
    fn test_default_options() {
        let options = SourceOptions::default();
        assert_eq!(options.error_mode, ErrorMode::Strict);
        assert!(options.detect_tables);
        assert!(!options.exclude_table_text);
        assert_eq!(options.table_detector.min_rows, 2);
    }
}
