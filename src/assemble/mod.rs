//! Document assembly.
//!
//! Turns the pages of a [`PageSource`] into the ordered [`Block`] sequence
//! that [`realize`] replays into a document sink. Each page contributes its
//! text runs (classified by size), then its tables, then a page break.

mod classify;
mod options;
mod realize;

pub use classify::{classify, classify_size};
pub use options::{AssembleOptions, HeadingThresholds, TablePolicy};
pub use realize::{realize, write_blocks};

use crate::error::Result;
use crate::model::{Block, SourcePage};
use crate::segment::segment;
use crate::source::PageSource;

/// Read every page of `source` and build its block sequence.
pub fn assemble<S>(source: &mut S, options: &AssembleOptions) -> Result<Vec<Block>>
where
    S: PageSource + ?Sized,
{
    let mut blocks = Vec::new();
    let page_count = source.page_count();

    for page_num in 1..=page_count {
        let page = source.read_page(page_num)?;
        assemble_page_into(&page, options, &mut blocks);
    }

    log::debug!("assembled {} blocks from {} pages", blocks.len(), page_count);
    Ok(blocks)
}

/// Build the blocks of a single page, ending with its page break.
pub fn assemble_page(page: &SourcePage, options: &AssembleOptions) -> Vec<Block> {
    let mut blocks = Vec::new();
    assemble_page_into(page, options, &mut blocks);
    blocks
}

fn assemble_page_into(page: &SourcePage, options: &AssembleOptions, blocks: &mut Vec<Block>) {
    let runs = segment(&page.glyphs);
    let before = blocks.len();

    for run in runs {
        if options.skip_empty_runs && run.is_blank() {
            continue;
        }
        let kind = classify(&run, &options.thresholds);
        blocks.push(Block::text(kind, run.text));
    }

    blocks.extend(page.tables.iter().map(|table| Block::Table {
        table: table.clone(),
    }));
    blocks.push(Block::PageBreak);

    log::debug!(
        "page {}: {} blocks ({} tables)",
        page.number,
        blocks.len() - before,
        page.tables.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Glyph, HeadingLevel, Table};
    use crate::source::MemoryPageSource;

    fn sized(text: &str, sizes: &[f32]) -> Vec<Glyph> {
        Glyph::sequence(
            text.char_indices()
                .zip(sizes.iter().copied())
                .map(|((i, c), size)| (&text[i..i + c.len_utf8()], size)),
        )
    }

    #[test]
    fn test_heading_paragraph_table_page_break() {
        let page = SourcePage::new(1)
            .with_glyphs(sized("Hi Yo", &[16.0, 16.0, 16.0, 10.0, 10.0]))
            .with_table(Table::from_rows([["a", "b"], ["c", "d"]]));
        let mut source = MemoryPageSource::new(vec![page]);

        let blocks = assemble(&mut source, &AssembleOptions::default()).unwrap();
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: HeadingLevel::H1,
                    text: "Hi".into()
                },
                Block::Paragraph { text: "Yo".into() },
                Block::Table {
                    table: Table::from_rows([["a", "b"], ["c", "d"]])
                },
                Block::PageBreak,
            ]
        );
    }

    #[test]
    fn test_one_page_break_per_page() {
        for n in [1u32, 2, 5] {
            let pages = (1..=n)
                .map(|i| SourcePage::new(i).with_glyphs(sized("text", &[11.0; 4])))
                .collect();
            let mut source = MemoryPageSource::new(pages);
            let blocks = assemble(&mut source, &AssembleOptions::default()).unwrap();

            let breaks = blocks.iter().filter(|b| b.is_page_break()).count();
            assert_eq!(breaks, n as usize);
            assert!(blocks.last().unwrap().is_page_break());
        }
    }

    #[test]
    fn test_empty_page_is_only_a_page_break() {
        let blocks = assemble_page(&SourcePage::new(1), &AssembleOptions::default());
        assert_eq!(blocks, vec![Block::PageBreak]);
    }

    #[test]
    fn test_empty_runs_kept_unless_skipped() {
        let page = SourcePage::new(1).with_glyphs(sized("A B", &[14.0, 9.0, 14.0]));

        let kept = assemble_page(&page, &AssembleOptions::default());
        assert_eq!(kept.len(), 4);
        assert_eq!(kept[1], Block::Paragraph { text: String::new() });

        let skipped = assemble_page(&page, &AssembleOptions::new().with_skip_empty_runs(true));
        assert_eq!(skipped.len(), 3);
        assert!(skipped
            .iter()
            .all(|b| b.text_content().map_or(true, |t| !t.is_empty())));
    }

    #[test]
    fn test_source_errors_propagate() {
        struct Broken;
        impl PageSource for Broken {
            fn page_count(&self) -> u32 {
                1
            }
            fn read_page(&mut self, _page_num: u32) -> Result<SourcePage> {
                Err(crate::error::Error::PdfParse("bad xref".into()))
            }
        }

        assert!(assemble(&mut Broken, &AssembleOptions::default()).is_err());
    }
}
