use anyhow::anyhow;
use biblatex::{Bibliography, Chunk, Entry, Person, RetrievalError, Spanned};

use crate::{
    parser::RecordParser,
    record::{PersonName, Record},
};

/// The only role the citation line shows.
const AUTHOR_ROLE: &str = "author";

/// [`RecordParser`] backed by the `biblatex` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct BiblatexParser;

impl RecordParser for BiblatexParser {
    fn parse(&self, text: &str) -> anyhow::Result<Vec<Record>> {
        let bib =
            Bibliography::parse(text).map_err(|e| anyhow!("failed to parse BibLaTeX: {e}"))?;
        bib.iter().map(to_record).collect()
    }
}

fn to_record(entry: &Entry) -> anyhow::Result<Record> {
    let mut record = Record::new(entry.key.clone());
    for (name, chunks) in &entry.fields {
        record = record.with_field(name, chunks_to_string(chunks));
    }
    match entry.get_as::<Vec<Person>>(AUTHOR_ROLE) {
        Ok(people) => {
            record = record.with_persons(AUTHOR_ROLE, people.iter().map(to_person_name).collect());
        }
        Err(RetrievalError::Missing(_)) => {}
        Err(e) => {
            return Err(anyhow!("entry {}: invalid author list: {e}", entry.key));
        }
    }
    Ok(record)
}

fn chunks_to_string(chunks: &[Spanned<Chunk>]) -> String {
    let mut out = String::new();
    for chunk in chunks {
        match &chunk.v {
            Chunk::Normal(s) | Chunk::Verbatim(s) => out.push_str(s),
            Chunk::Math(s) => {
                out.push('$');
                out.push_str(s);
                out.push('$');
            }
        }
    }
    out
}

fn words(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

fn to_person_name(person: &Person) -> PersonName {
    let mut given = words(&person.given_name);
    let middle = if given.len() > 1 {
        given.split_off(1)
    } else {
        Vec::new()
    };
    PersonName {
        prelast: words(&person.prefix),
        last: words(&person.name),
        first: given,
        middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fields_and_authors() {
        let src = "@article{doe2020,\n  author = {de Paula, E. R. and Kherani, A.},\n  title = {Ionospheric {GPS} study},\n  Journal = {Radio Science},\n  year = {2020}\n}\n";
        let records = BiblatexParser.parse(src).expect("parse");
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.key, "doe2020");
        assert_eq!(record.field("journal"), Some("Radio Science"));
        assert_eq!(record.field("year"), Some("2020"));
        assert_eq!(record.field("title"), Some("Ionospheric GPS study"));

        let authors = record.persons("author");
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].prelast, vec!["de"]);
        assert_eq!(authors[0].last, vec!["Paula"]);
        assert_eq!(authors[0].first, vec!["E."]);
        assert_eq!(authors[0].middle, vec!["R."]);
        assert_eq!(authors[1].last_display(), "Kherani");
    }

    #[test]
    fn editors_stay_plain_fields() {
        let src = "@book{k,\n  editor = {Honda, R. and Ouar, M.},\n  year = {2015}\n}\n";
        let records = BiblatexParser.parse(src).expect("parse");
        let record = &records[0];
        assert!(record.persons("editor").is_empty());
        assert!(record.persons("author").is_empty());
        assert_eq!(record.field("editor"), Some("Honda, R. and Ouar, M."));
    }

    #[test]
    fn keeps_document_order() {
        let src = "@misc{b, year = {2001}}\n@misc{a, year = {2002}}\n@misc{c, year = {2000}}\n";
        let keys: Vec<_> = BiblatexParser
            .parse(src)
            .expect("parse")
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(BiblatexParser.parse("").expect("parse").is_empty());
    }

    #[test]
    fn unbalanced_input_fails() {
        let err = BiblatexParser
            .parse("@article{k, title = {never closed")
            .unwrap_err();
        assert!(err.to_string().contains("failed to parse BibLaTeX"));
    }

    #[test]
    fn given_names_split_into_first_and_middle() {
        let p = to_person_name(&Person {
            name: "Ravanelli".to_string(),
            given_name: "Mauro  Luca".to_string(),
            prefix: String::new(),
            suffix: String::new(),
        });
        assert_eq!(p.first, vec!["Mauro"]);
        assert_eq!(p.middle, vec!["Luca"]);
        assert!(p.prelast.is_empty());
    }
}
