use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

pub const DEFAULT_BIB: &str = "ref.bib";

#[derive(Parser, Debug)]
#[command(version, about = "Render a BibTeX database as HTML list items", long_about = None)]
pub struct Cli {
    /// Bibliography file to read
    #[arg(value_name = "BIB", default_value = DEFAULT_BIB)]
    pub bib: PathBuf,

    /// Also delete this field before parsing (repeatable)
    #[arg(long = "drop", value_name = "FIELD")]
    pub drop: Vec<String>,

    /// Also render this surname in bold (repeatable)
    #[arg(long = "bold", value_name = "SURNAME")]
    pub bold: Vec<String>,

    /// Text of the link shown after each citation
    #[arg(long, value_name = "TEXT")]
    pub link_label: Option<String>,
}

impl Cli {
    /// The built-in configuration extended with whatever was given on the command line.
    pub fn config(&self) -> Config {
        let config = Config::default().extend(&self.drop, self.bold.iter().cloned());
        match &self.link_label {
            Some(label) => config.with_link_label(label.clone()),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bib_defaults_to_ref_bib() {
        let cli = Cli::try_parse_from(["bibhtml"]).expect("parse");
        assert_eq!(cli.bib, PathBuf::from("ref.bib"));
        assert!(cli.drop.is_empty());
        assert_eq!(cli.config().link_label, "Open Access");
    }

    #[test]
    fn options_extend_config() {
        let cli = Cli::try_parse_from([
            "bibhtml",
            "pubs.bib",
            "--drop",
            "Note",
            "--drop",
            "series",
            "--bold",
            "Smith",
            "--link-label",
            "PDF",
        ])
        .expect("parse");
        assert_eq!(cli.bib, PathBuf::from("pubs.bib"));
        let config = cli.config();
        assert!(config.drop_fields.contains("note"));
        assert!(config.drop_fields.contains("series"));
        assert!(config.drop_fields.contains("abstract"));
        assert!(config.is_bold("Smith"));
        assert!(config.is_bold("Kherani"));
        assert_eq!(config.link_label, "PDF");
    }

    #[test]
    fn any_path_is_accepted() {
        proptest::proptest!(|(s in "[A-Za-z0-9._-]{1,32}")| {
            proptest::prop_assume!(!s.starts_with('-'));
            let cli = Cli::try_parse_from(["bibhtml", s.as_str()]).expect("parse");
            proptest::prop_assert_eq!(cli.bib, PathBuf::from(&s));
        })
    }
}
