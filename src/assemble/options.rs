//! Assembly options.

use crate::error::{Error, Result};

/// Size thresholds separating headings from body text.
///
/// A run larger than `heading1` is a level-1 heading; larger than `heading2`
/// (and not above `heading1`) a level-2 heading; anything else a paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingThresholds {
    /// Exclusive lower bound for level-1 headings
    pub heading1: f32,
    /// Exclusive lower bound for level-2 headings
    pub heading2: f32,
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self {
            heading1: 15.0,
            heading2: 12.0,
        }
    }
}

impl HeadingThresholds {
    /// Create thresholds with explicit bounds.
    pub fn new(heading1: f32, heading2: f32) -> Self {
        Self { heading1, heading2 }
    }

    /// Reject bounds that are not finite or would make level 1 easier to
    /// reach than level 2.
    pub fn validate(&self) -> Result<()> {
        if !self.heading1.is_finite() || !self.heading2.is_finite() {
            return Err(Error::Validation(format!(
                "heading thresholds must be finite (got {} and {})",
                self.heading1, self.heading2
            )));
        }
        if self.heading1 < self.heading2 {
            return Err(Error::Validation(format!(
                "heading 1 threshold {} is below heading 2 threshold {}",
                self.heading1, self.heading2
            )));
        }
        Ok(())
    }
}

/// How `realize` treats table rows whose width differs from the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TablePolicy {
    /// Fail with an inconsistent-table error
    #[default]
    Strict,
    /// Pad short rows and truncate long ones
    Pad,
}

/// Options controlling block assembly and realization.
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Heading size thresholds
    pub thresholds: HeadingThresholds,

    /// Drop runs whose trimmed text is empty
    pub skip_empty_runs: bool,

    /// Handling of non-rectangular tables
    pub table_policy: TablePolicy,
}

impl AssembleOptions {
    /// Create new assembly options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set heading thresholds.
    pub fn with_thresholds(mut self, thresholds: HeadingThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Enable or disable dropping of empty runs.
    pub fn with_skip_empty_runs(mut self, skip: bool) -> Self {
        self.skip_empty_runs = skip;
        self
    }

    /// Set table policy.
    pub fn with_table_policy(mut self, policy: TablePolicy) -> Self {
        self.table_policy = policy;
        self
    }

    /// Check the options before any input is read.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }
}
