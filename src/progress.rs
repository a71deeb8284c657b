//! Batch progress notifications.
//!
//! [`convert_batch`](crate::convert_batch) reports to a [`BatchReporter`]
//! after each converted file and once when the batch ends. Every method has a
//! no-op default, so implementations only override what they display.

use std::path::PathBuf;

/// Receives progress and outcome notifications for a batch.
pub trait BatchReporter {
    /// Called after the `current`-th of `total` files has been saved.
    fn report_progress(&mut self, current: usize, total: usize) {
        let _ = (current, total);
    }

    /// Called once when every file converted, with the written paths.
    fn report_success(&mut self, paths: &[PathBuf]) {
        let _ = paths;
    }

    /// Called once when the batch aborts.
    fn report_error(&mut self, message: &str) {
        let _ = message;
    }
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl BatchReporter for NoopReporter {}
