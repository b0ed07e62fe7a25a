//! Citation formatting: one record in, one line of HTML out.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    config::Config,
    record::{PersonName, Record},
};

/// Sort key of records without any usable year.
pub const NO_DATE: &str = "n.d.";

const DOI_RESOLVER: &str = "https://doi.org/";
const DOI_PREFIXES: &[&str] = &["https://doi.org/", "http://doi.org/"];

const SOURCE_FIELDS: &[&str] = &["journal", "journaltitle", "booktitle"];
const ISSUE_FIELDS: &[&str] = &["number", "issue"];

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").unwrap());
static SPACE_BEFORE_COMMA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+,").unwrap());

/// HTML-escape text for element content and attribute values alike.
///
/// Quotes come out as `&quot;` and `&#x27;`.
pub fn escape(s: &str) -> String {
    let partial = quick_xml::escape::partial_escape(s);
    if !partial.contains(['"', '\'']) {
        return partial.into_owned();
    }
    let mut out = String::with_capacity(partial.len() + 8);
    for ch in partial.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Drop TeX grouping braces and collapse whitespace runs.
pub fn strip_braces(s: &str) -> String {
    s.split(|c: char| c.is_whitespace())
        .map(|w| w.replace(['{', '}'], ""))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn field_text(record: &Record, name: &str) -> String {
    record.field(name).map(strip_braces).unwrap_or_default()
}

/// Display text of the first of `names` that is not empty once braces are stripped.
fn first_text(record: &Record, names: &[&str]) -> String {
    names
        .iter()
        .map(|name| field_text(record, name))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

/// `year`, else the first four-digit run in `date`, else [`NO_DATE`].
pub fn sort_key(record: &Record) -> String {
    if let Some(year) = record.field("year").map(str::trim)
        && !year.is_empty()
    {
        return year.to_string();
    }
    record
        .field("date")
        .and_then(|date| YEAR_RE.captures(date.trim()))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| NO_DATE.to_string(), |m| m.as_str().to_string())
}

/// `"E. R."` style initials for a list of name parts.
pub fn initials(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.ends_with('.') {
                p.to_string()
            } else {
                let first: String = p.chars().take(1).flat_map(char::to_uppercase).collect();
                format!("{first}.")
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `Last, F. M.`, escaped, and in bold when the surname is highlighted.
pub fn format_person(person: &PersonName, config: &Config) -> String {
    let last = person.last_display();
    let given = [initials(&person.first), initials(&person.middle)]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let name = format!("{last}, {given}");
    let name = escape(name.trim().trim_end_matches(','));
    match last.split_whitespace().last() {
        Some(surname) if config.is_bold(surname) => format!("<b>{name}</b>"),
        _ => name,
    }
}

/// `A`, `A, &amp; B`, `A, B, &amp; C`, ...
pub fn format_authors(persons: &[PersonName], config: &Config) -> String {
    let names: Vec<String> = persons.iter().map(|p| format_person(p, config)).collect();
    match names.split_last() {
        None => String::new(),
        Some((only, [])) => only.clone(),
        Some((last, rest)) => format!("{}, &amp; {last}", rest.join(", ")),
    }
}

/// The DOI resolver URL when a DOI is present, else the raw `url` field.
pub fn link(record: &Record) -> Option<String> {
    let doi = record.field("doi").map(str::trim).unwrap_or_default();
    if !doi.is_empty() {
        let mut bare = doi;
        while let Some(rest) = DOI_PREFIXES.iter().find_map(|p| bare.strip_prefix(p)) {
            bare = rest;
        }
        return Some(format!("{DOI_RESOLVER}{bare}"));
    }
    record
        .field("url")
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

/// `12(3)`, `12`, or empty when there is no volume.
fn volume_issue(record: &Record) -> String {
    let volume = field_text(record, "volume");
    if volume.is_empty() {
        return volume;
    }
    let issue = first_text(record, ISSUE_FIELDS);
    if issue.is_empty() {
        volume
    } else {
        format!("{volume}({issue})")
    }
}

/// Format `record` as a single line of HTML.
pub fn format_citation(record: &Record, config: &Config) -> String {
    let authors = format_authors(record.persons("author"), config);
    let year = escape(&sort_key(record));
    let title = escape(&field_text(record, "title"));
    let source = escape(&first_text(record, SOURCE_FIELDS));
    let anchor = link(record).map(|url| {
        format!(
            r#"<a href="{}">{}</a>"#,
            escape(&url),
            escape(&config.link_label)
        )
    });

    let mut parts = Vec::new();
    if authors.is_empty() {
        parts.push(format!("({year})."));
    } else {
        parts.push(format!("{authors} ({year})."));
    }
    if !title.is_empty() {
        parts.push(format!("{title}."));
    }
    if !source.is_empty() {
        let tail: Vec<String> = [volume_issue(record), field_text(record, "pages")]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| escape(&s))
            .collect();
        let mut segment = format!("<i>{source}</i>");
        for item in &tail {
            segment.push_str(", ");
            segment.push_str(item);
        }
        if !tail.is_empty() || anchor.is_some() {
            segment.push(',');
        }
        parts.push(segment);
    }
    parts.extend(anchor);

    let line = parts.join(" ");
    let line = SPACE_BEFORE_COMMA_RE.replace_all(line.trim(), ",");
    line.trim_end_matches(',').trim().to_string()
}
