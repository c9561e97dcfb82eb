//! Query parsing
//!
//! Turns a raw query string into an ordered list of [`Facet`]s. The scan is a
//! single forward pass over the input:
//!
//! 1. Find the next `category: value` pair at or after the cursor.
//! 2. Any text between the cursor and that pair is free text and becomes one
//!    remainder facet, emitted before the pair.
//! 3. The pair itself becomes a facet, with one layer of quotes stripped from
//!    the category and the value.
//! 4. When no pair is left, whatever remains is free text, unless it is a
//!    single trailing `category:` with no value, which is dropped.
//!
//! Values are trimmed and facets with an empty value are dropped. Parsing never
//! fails: unbalanced quotes or stray colons simply end up in free text.
//!
//! ```text
//! status: open priority: "very high" free text
//! -> [status: open] [priority: very high] [text: free text]
//! ```

pub mod grammar;

use std::ops::Range;

use tracing::{debug, trace, warn};

use self::grammar::{strip_quotes, DANGLING, PAIR};
use super::config::QueryConfig;
use super::facet::Facet;

/// A raw field found by the scanner, before configuration is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field<'a> {
    /// Category with quotes stripped, or `None` for free text.
    pub category: Option<&'a str>,
    /// Value with quotes stripped and whitespace trimmed. May be empty.
    pub value: &'a str,
    /// Byte range of the whole field in the input.
    pub span: Range<usize>,
}

/// Iterator over the fields of a query, in input order.
///
/// Yields empty-valued fields too; [`parse`] is what drops them.
pub struct Fields<'a> {
    query: &'a str,
    cursor: usize,
    pending: Option<Field<'a>>,
}

/// Scan `query` into fields without applying any configuration.
pub fn fields(query: &str) -> Fields<'_> {
    Fields {
        query,
        cursor: 0,
        pending: None,
    }
}

impl<'a> Fields<'a> {
    /// Everything from `start` on, once no pair is left in it.
    fn tail(&self, start: usize) -> Field<'a> {
        let query: &'a str = self.query;
        let rest = &query[start..];
        let span = start..self.query.len();
        match DANGLING.captures(rest).and_then(|caps| caps.name("category")) {
            Some(category) => Field {
                category: Some(strip_quotes(category.as_str()).trim()),
                value: "",
                span,
            },
            None => self.free_text(span),
        }
    }

    fn free_text(&self, span: Range<usize>) -> Field<'a> {
        Field {
            category: None,
            value: self.query[span.clone()].trim(),
            span,
        }
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = Field<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(field) = self.pending.take() {
            return Some(field);
        }
        if self.cursor >= self.query.len() {
            return None;
        }

        let start = self.cursor;
        let caps = match PAIR.captures_at(self.query, start) {
            Some(caps) => caps,
            None => {
                self.cursor = self.query.len();
                return Some(self.tail(start));
            }
        };
        // Group 0 and the non-optional groups always take part in a match.
        let whole = caps.get(0).expect("a match has group 0");
        let category = caps.name("category").expect("category is not optional");
        let value = caps.name("value").expect("value is not optional");
        if whole.end() <= start {
            warn!(offset = start, "pair match made no progress, stopping scan");
            self.cursor = self.query.len();
            return None;
        }

        let pair = Field {
            category: Some(strip_quotes(category.as_str()).trim()),
            value: strip_quotes(value.as_str()).trim(),
            span: whole.range(),
        };
        self.cursor = whole.end();

        if self.query[start..whole.start()].trim().is_empty() {
            Some(pair)
        } else {
            self.pending = Some(pair);
            Some(self.free_text(start..whole.start()))
        }
    }
}

/// Parse a query into facets, left to right.
///
/// Free text is assigned to `config.remainder`, as is a pair whose category is
/// blank once quotes are removed.
pub fn parse(query: &str, config: &QueryConfig) -> Vec<Facet> {
    let facets: Vec<Facet> = fields(query)
        .filter(|field| !field.value.is_empty())
        .map(|field| {
            let category = match field.category {
                Some(category) if !category.is_empty() => category,
                _ => config.remainder.as_str(),
            };
            trace!(category, value = field.value, span = ?field.span, "facet");
            Facet::new(category, field.value)
        })
        .collect();
    debug!(facets = facets.len(), query_len = query.len(), "parsed query");
    facets
}
