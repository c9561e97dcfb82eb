//! Regex grammar for `category: value` pairs.
//!
//! A field is either quoted (`'...'` or `"..."`, at least one character
//! inside) or bare (a run of non-whitespace that does not start with a quote).
//! A pair is `<field>:<whitespace>*<field>`; the value is required.
//!
//! [`DANGLING`] is only consulted once no pair is left: a lone trailing
//! `category:` with nothing after it is a facet whose value is still empty.

use once_cell::sync::Lazy;
use regex::Regex;

/// A quoted or bare field. Quoted alternatives are tried first.
const FIELD: &str = r#"(?:'[^']+'|"[^"]+"|[^'"\s]\S*)"#;

/// Lazy-compiled pair pattern with `category` and `value` capture groups.
pub(crate) static PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<category>{field}):\s*(?P<value>{field})",
        field = FIELD
    ))
    .expect("pair grammar is a valid regex")
});

/// A whole remainder made of one `category:` and nothing else.
pub(crate) static DANGLING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s*(?P<category>{field}):\s*$", field = FIELD))
        .expect("dangling grammar is a valid regex")
});

/// Remove exactly one layer of matching surrounding quotes.
pub(crate) fn strip_quotes(field: &str) -> &str {
    for quote in ['"', '\''] {
        if field.len() >= 2 && field.starts_with(quote) && field.ends_with(quote) {
            return &field[1..field.len() - 1];
        }
    }
    field
}
