use crate::record::Record;

pub mod bibtex;

/// Turns normalized bibliography text into records, in document order.
pub trait RecordParser {
    fn parse(&self, text: &str) -> anyhow::Result<Vec<Record>>;
}
