use std::io::Write;

use tracing::{debug, info};

use crate::{
    config::Config, names::normalize_names, parser::RecordParser, render, strip::strip_fields,
};

/// Strip unwanted fields and rewrite extended name syntax.
pub fn preprocess(raw: &str, config: &Config) -> String {
    let stripped = strip_fields(raw, &config.drop_fields);
    debug!(before = raw.len(), after = stripped.len(), "stripped fields");
    let normalized = normalize_names(&stripped).into_owned();
    debug!(bytes = normalized.len(), "normalized names");
    normalized
}

/// Turn a raw bibliography into `<li>` blocks on `out`, returning the number written.
pub fn run<P, W>(raw: &str, parser: &P, config: &Config, out: &mut W) -> anyhow::Result<usize>
where
    P: RecordParser + ?Sized,
    W: Write,
{
    let text = preprocess(raw, config);
    let records = parser.parse(&text)?;
    debug!(records = records.len(), "parsed bibliography");
    let count = render::write_all(out, render::citations(&records, config))?;
    info!(count, "wrote citations");
    Ok(count)
}
