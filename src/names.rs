use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static EXTENDED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"family=(?P<family>[^,}]+),\s*given=(?P<given>[^,}]+)(?:,\s*prefix=(?P<prefix>[^,}]+))?(?:,[^}]*)?",
    )
    .unwrap()
});

/// Rewrite BibLaTeX extended name syntax into the classic `prefix family, given` form.
///
/// `family=Paula, given=E. R., prefix=de, useprefix=true` becomes `de Paula, E. R.`.
/// Attributes other than `family`, `given` and the first `prefix` are dropped.
pub fn normalize_names(text: &str) -> Cow<'_, str> {
    EXTENDED_NAME_RE.replace_all(text, |caps: &Captures<'_>| {
        let part = |name| caps.name(name).map_or("", |m| m.as_str().trim());
        let surname = format!("{} {}", part("prefix"), part("family"));
        format!("{}, {}", surname.trim(), part("given"))
    })
}
