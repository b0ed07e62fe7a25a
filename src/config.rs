use std::collections::BTreeSet;

/// Fields deleted from every record before parsing.
pub const DROP_FIELDS: &[&str] = &[
    "abstract",
    "file",
    "keywords",
    "urldate",
    "issn",
    "langid",
    "shortjournal",
    "shorttitle",
    "publisher",
];

/// Surnames whose author entry is rendered in bold.
pub const BOLD_SURNAMES: &[&str] = &[
    "Astafyeva",
    "Maletckii",
    "Kherani",
    "Sanchez",
    "Honda",
    "Ouar",
    "Ravanelli",
];

pub const LINK_LABEL: &str = "Open Access";

/// A set of field names, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeSet<String>);

impl FieldSet {
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(&name.to_ascii_lowercase())
    }

    pub fn insert(&mut self, name: &str) {
        self.0.insert(name.to_ascii_lowercase());
    }
}

impl<S: AsRef<str>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FieldSet::default();
        for name in iter {
            set.insert(name.as_ref());
        }
        set
    }
}

/// Everything the pipeline needs to know that is not in the input itself.
///
/// Built once at startup and only ever handed out by shared reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub drop_fields: FieldSet,
    pub bold_surnames: BTreeSet<String>,
    pub link_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            drop_fields: DROP_FIELDS.iter().collect(),
            bold_surnames: BOLD_SURNAMES.iter().map(|s| s.to_string()).collect(),
            link_label: LINK_LABEL.to_string(),
        }
    }
}

impl Config {
    /// Extend the built-in sets with user-supplied values.
    pub fn extend<D, B>(mut self, drop: D, bold: B) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        for name in drop {
            self.drop_fields.insert(name.as_ref());
        }
        self.bold_surnames.extend(bold.into_iter().map(Into::into));
        self
    }

    pub fn with_link_label(mut self, label: impl Into<String>) -> Self {
        self.link_label = label.into();
        self
    }

    pub fn is_bold(&self, surname: &str) -> bool {
        self.bold_surnames.contains(surname)
    }
}
