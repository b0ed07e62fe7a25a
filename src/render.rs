use std::io::Write;

use anyhow::Context;
use tracing::trace;

use crate::{
    config::Config,
    format::{NO_DATE, format_citation, sort_key},
    record::Record,
};

const ITEM_INDENT: &str = "                    ";
const BODY_INDENT: &str = "                        ";

/// Wrap one citation line in the `<li>` skeleton, followed by a blank line.
pub fn list_item(line: &str) -> String {
    format!("{ITEM_INDENT}<li>\n{BODY_INDENT}{line}\n{ITEM_INDENT}</li>\n\n")
}

/// Rendered blocks, newest year first and undated records last.
///
/// Only the ordering is computed up front; each block is formatted when the
/// iterator reaches it. Records sharing a year keep their document order.
pub fn citations<'a>(
    records: &'a [Record],
    config: &'a Config,
) -> impl Iterator<Item = String> + 'a {
    let mut order: Vec<(String, &Record)> = records.iter().map(|r| (sort_key(r), r)).collect();
    order.sort_by(|a, b| {
        (a.0 == NO_DATE)
            .cmp(&(b.0 == NO_DATE))
            .then_with(|| b.0.cmp(&a.0))
    });
    order
        .into_iter()
        .map(move |(year, record)| {
            trace!(key = %record.key, %year, "formatting record");
            list_item(&format_citation(record, config))
        })
}

/// Write every block to `out` as soon as it is produced, returning how many were written.
pub fn write_all<W, I>(out: &mut W, blocks: I) -> anyhow::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    let mut count = 0;
    for block in blocks {
        out.write_all(block.as_bytes())
            .context("failed to write citation")?;
        count += 1;
    }
    out.flush().context("failed to flush output")?;
    Ok(count)
}
