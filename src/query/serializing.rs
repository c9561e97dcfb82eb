//! Query serialization
//!
//! The inverse of [parsing](super::parsing): facets are rendered as
//! `category: value` (or just the value for free text) and joined with single
//! spaces. Facets with an empty value are skipped entirely.
//!
//! Quoting keeps categories and values intact on the next parse:
//!
//! | contains                        | rendered as |
//! |---------------------------------|-------------|
//! | `"` but no `'`                  | `'...'`     |
//! | whitespace, or any `'`          | `"..."`     |
//! | none of the above               | unchanged   |
//!
//! A string with both kinds of quote gets double quotes. Free text is written
//! verbatim, and values in unquotable categories are never quoted.

use std::borrow::Cow;

use super::config::QueryConfig;
use super::facet::Facet;

/// Wrap `text` in quotes if it would not survive a re-parse bare.
pub fn quote(text: &str) -> Cow<'_, str> {
    let has_double = text.contains('"');
    let has_single = text.contains('\'');
    let has_space = text.chars().any(char::is_whitespace);

    if has_double && !has_single {
        Cow::Owned(format!("'{}'", text))
    } else if has_space || has_single {
        Cow::Owned(format!("\"{}\"", text))
    } else {
        Cow::Borrowed(text)
    }
}

/// Render one facet. Returns an empty string for an empty value.
pub fn serialize_facet(facet: &Facet, config: &QueryConfig) -> String {
    let value = facet.value().trim();
    if value.is_empty() {
        return String::new();
    }
    if config.is_remainder(&facet.category) {
        return value.to_string();
    }

    let value = if config.is_unquotable(&facet.category) {
        Cow::Borrowed(value)
    } else {
        quote(value)
    };
    format!("{}: {}", quote(&facet.category), value)
}

/// Render facets, in order, as a single query string.
pub fn serialize<'a, I>(facets: I, config: &QueryConfig) -> String
where
    I: IntoIterator<Item = &'a Facet>,
{
    facets
        .into_iter()
        .map(|facet| serialize_facet(facet, config))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
