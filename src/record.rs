use std::collections::BTreeMap;

/// A person as split by the bibliography parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    pub prelast: Vec<String>,
    pub last: Vec<String>,
    pub first: Vec<String>,
    pub middle: Vec<String>,
}

impl PersonName {
    /// Prelast and last parts joined by single spaces.
    pub fn last_display(&self) -> String {
        self.prelast
            .iter()
            .chain(&self.last)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One bibliography entry, read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub key: String,
    fields: BTreeMap<String, String>,
    persons: BTreeMap<String, Vec<PersonName>>,
}

impl Record {
    pub fn new(key: impl Into<String>) -> Self {
        Record {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_persons(mut self, role: &str, persons: Vec<PersonName>) -> Self {
        self.persons.insert(role.to_ascii_lowercase(), persons);
        self
    }

    /// Raw value of `name`, looked up case-insensitively.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn persons(&self, role: &str) -> &[PersonName] {
        self.persons
            .get(&role.to_ascii_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(prelast: &[&str], last: &[&str]) -> PersonName {
        PersonName {
            prelast: prelast.iter().map(|s| s.to_string()).collect(),
            last: last.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn last_display_joins_prelast_and_last() {
        assert_eq!(person(&["de", "la"], &["Cruz"]).last_display(), "de la Cruz");
        assert_eq!(person(&[], &["Kherani"]).last_display(), "Kherani");
        assert_eq!(person(&[" "], &["  Honda "]).last_display(), "Honda");
    }

    #[test]
    fn fields_are_case_insensitive() {
        let record = Record::new("k").with_field("Journal", "Nature");
        assert_eq!(record.field("journal"), Some("Nature"));
        assert_eq!(record.field("JOURNAL"), Some("Nature"));
        assert_eq!(record.field("title"), None);
    }

    #[test]
    fn missing_role_is_empty() {
        let record = Record::new("k").with_persons("Author", vec![person(&[], &["X"])]);
        assert_eq!(record.persons("author").len(), 1);
        assert!(record.persons("editor").is_empty());
    }
}
