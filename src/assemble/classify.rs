//! Size-based block classification.

use crate::model::{BlockKind, HeadingLevel, TextRun};

use super::options::HeadingThresholds;

/// Classify a run by its size.
pub fn classify(run: &TextRun, thresholds: &HeadingThresholds) -> BlockKind {
    classify_size(run.size, thresholds)
}

/// Classify a bare size.
pub fn classify_size(size: f32, thresholds: &HeadingThresholds) -> BlockKind {
    if size > thresholds.heading1 {
        BlockKind::Heading(HeadingLevel::H1)
    } else if size > thresholds.heading2 {
        BlockKind::Heading(HeadingLevel::H2)
    } else {
        BlockKind::Paragraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(size: f32) -> BlockKind {
        classify(&TextRun::new("x", size), &HeadingThresholds::default())
    }

    #[test]
    fn test_default_boundaries() {
        assert_eq!(kind(16.0), BlockKind::Heading(HeadingLevel::H1));
        assert_eq!(kind(15.01), BlockKind::Heading(HeadingLevel::H1));
        assert_eq!(kind(15.0), BlockKind::Heading(HeadingLevel::H2));
        assert_eq!(kind(13.0), BlockKind::Heading(HeadingLevel::H2));
        assert_eq!(kind(12.0), BlockKind::Paragraph);
        assert_eq!(kind(5.0), BlockKind::Paragraph);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = HeadingThresholds::new(20.0, 20.0);
        assert_eq!(classify_size(21.0, &thresholds), BlockKind::Heading(HeadingLevel::H1));
        assert_eq!(classify_size(20.0, &thresholds), BlockKind::Paragraph);
    }
}
