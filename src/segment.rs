//! Style segmentation.
//!
//! Splits a page's glyph stream into text runs at every change of glyph
//! size. No geometry is consulted: two glyphs belong to the same run exactly
//! when they are adjacent in the stream and their sizes compare equal.

use crate::model::{Glyph, TextRun};

/// Accumulates the glyphs of one run.
#[derive(Debug)]
struct RunBuilder {
    size: f32,
    text: String,
}

impl RunBuilder {
    fn start(glyph: &Glyph) -> Self {
        Self {
            size: glyph.size,
            text: glyph.text.clone(),
        }
    }

    fn accepts(&self, glyph: &Glyph) -> bool {
        glyph.size == self.size
    }

    fn push(&mut self, glyph: &Glyph) {
        self.text.push_str(&glyph.text);
    }

    fn finish(self) -> TextRun {
        TextRun::new(self.text, self.size)
    }
}

/// Group contiguous glyphs of equal size into text runs.
///
/// Runs whose text trims to nothing are still returned; filtering is left
/// to the caller.
pub fn segment(glyphs: &[Glyph]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut current: Option<RunBuilder> = None;

    for glyph in glyphs {
        match current.as_mut() {
            Some(builder) if builder.accepts(glyph) => builder.push(glyph),
            _ => {
                if let Some(builder) = current.replace(RunBuilder::start(glyph)) {
                    runs.push(builder.finish());
                }
            }
        }
    }

    if let Some(builder) = current {
        runs.push(builder.finish());
    }

    log::trace!("segmented {} glyphs into {} runs", glyphs.len(), runs.len());
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs_of(text: &str, sizes: &[f32]) -> Vec<Glyph> {
        text.chars()
            .zip(sizes.iter().copied())
            .enumerate()
            .map(|(i, (c, size))| Glyph::new(c.to_string(), size, i))
            .collect()
    }

    fn transitions(glyphs: &[Glyph]) -> usize {
        glyphs.windows(2).filter(|w| w[0].size != w[1].size).count()
    }

    #[test]
    fn test_empty_input() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn test_single_glyph() {
        let runs = segment(&glyphs_of("A", &[11.0]));
        assert_eq!(runs, vec![TextRun::new("A", 11.0)]);
    }

    #[test]
    fn test_splits_at_size_changes() {
        let glyphs = glyphs_of("Big body", &[16.0, 16.0, 16.0, 10.0, 10.0, 10.0, 10.0, 10.0]);
        let runs = segment(&glyphs);

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Big");
        assert_eq!(runs[0].size, 16.0);
        assert_eq!(runs[1].text, "body");
        assert_eq!(runs[1].raw_text, " body");
        assert_eq!(runs[1].size, 10.0);
    }

    #[test]
    fn test_same_size_reappearing_is_a_new_run() {
        let glyphs = glyphs_of("abc", &[10.0, 12.0, 10.0]);
        let runs = segment(&glyphs);
        let sizes: Vec<f32> = runs.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![10.0, 12.0, 10.0]);
    }

    #[test]
    fn test_whitespace_only_run_is_kept() {
        let glyphs = glyphs_of("A B", &[14.0, 9.0, 14.0]);
        let runs = segment(&glyphs);
        assert_eq!(runs.len(), 3);
        assert!(runs[1].is_blank());
        assert_eq!(runs[1].raw_text, " ");
    }

    #[test]
    fn test_reconstruction_and_run_count() {
        let cases: Vec<(&str, Vec<f32>)> = vec![
            ("Heading text", vec![18.0; 12]),
            (
                "T1 body\tmore ",
                vec![
                    20.0, 20.0, 9.5, 9.5, 9.5, 9.5, 9.5, 13.0, 13.0, 9.5, 9.5, 9.5, 9.5,
                ],
            ),
            ("ab cd", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
        ];

        for (text, sizes) in cases {
            let glyphs = glyphs_of(text, &sizes);
            let runs = segment(&glyphs);

            let rebuilt: String = runs.iter().map(|r| r.raw_text.as_str()).collect();
            assert_eq!(rebuilt, text);
            assert_eq!(transitions(&glyphs), runs.len() - 1);
            for pair in runs.windows(2) {
                assert_ne!(pair[0].size, pair[1].size);
            }
        }
    }
}
