//! Driving a document sink from a block sequence.

use std::borrow::Cow;
use std::path::Path;

use crate::error::Result;
use crate::model::{Block, Table};
use crate::sink::DocumentSink;

use super::options::TablePolicy;

/// Replay `blocks` into `sink` in order, then save it to `path`.
pub fn realize<S>(blocks: &[Block], sink: &mut S, path: &Path, policy: TablePolicy) -> Result<()>
where
    S: DocumentSink + ?Sized,
{
    write_blocks(blocks, sink, policy)?;
    sink.save(path)
}

/// Replay `blocks` into `sink` without saving.
pub fn write_blocks<S>(blocks: &[Block], sink: &mut S, policy: TablePolicy) -> Result<()>
where
    S: DocumentSink + ?Sized,
{
    for block in blocks {
        match block {
            Block::Heading { level, text } => sink.add_heading(text, *level)?,
            Block::Paragraph { text } => sink.add_paragraph(text)?,
            Block::Table { table } => write_table(table, sink, policy)?,
            Block::PageBreak => sink.add_page_break()?,
        }
    }
    Ok(())
}

fn write_table<S>(table: &Table, sink: &mut S, policy: TablePolicy) -> Result<()>
where
    S: DocumentSink + ?Sized,
{
    let table = match policy {
        TablePolicy::Strict => {
            table.check_rectangular()?;
            Cow::Borrowed(table)
        }
        TablePolicy::Pad => Cow::Owned(table.normalized()),
    };

    let handle = sink.add_table(table.row_count(), table.column_count())?;
    for (row, cells) in table.rows.iter().enumerate() {
        for (col, text) in cells.iter().enumerate() {
            sink.set_cell(handle, row, col, text)?;
        }
    }
    Ok(())
}
