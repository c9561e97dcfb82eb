//! Per-search-box query state.
//!
//! A [`QueryEditor`] ties one [`FacetList`] to the [`QueryConfig`] used to read
//! and write it. The rendering layer owns one editor per search box, renders a
//! widget per facet, and calls back in here when the user edits the query.

use tracing::debug;

use super::config::QueryConfig;
use super::facet::Facet;
use super::facet_list::{FacetId, FacetList};
use super::parsing::parse;

#[derive(Debug, Default)]
pub struct QueryEditor {
    config: QueryConfig,
    facets: FacetList,
}

impl QueryEditor {
    pub fn new(config: QueryConfig) -> Self {
        Self {
            config,
            facets: FacetList::new(),
        }
    }

    /// Create an editor and load `query` into it.
    pub fn with_query(config: QueryConfig, query: &str) -> Self {
        let mut editor = Self::new(config);
        editor.set_query(query);
        editor
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn facets(&self) -> &FacetList {
        &self.facets
    }

    pub fn facets_mut(&mut self) -> &mut FacetList {
        &mut self.facets
    }

    /// Parse `query` and replace the current facets with the result.
    pub fn set_query(&mut self, query: &str) {
        let facets = parse(query, &self.config);
        self.facets.reset(facets);
    }

    /// The current query string.
    pub fn value(&self) -> String {
        self.facets.serialize(&self.config)
    }

    /// Add a facet for `category`, optionally at `position`.
    ///
    /// Both arguments are trimmed. A blank category adds nothing.
    pub fn add_facet(
        &mut self,
        category: &str,
        initial_value: &str,
        position: Option<usize>,
    ) -> Option<FacetId> {
        let category = category.trim();
        if category.is_empty() {
            return None;
        }
        let facet = Facet::new(category, initial_value);
        Some(match position {
            Some(position) => self.facets.insert(position, facet),
            None => self.facets.add(facet),
        })
    }

    /// Add free text as a remainder facet. Blank text adds nothing.
    pub fn add_text(&mut self, text: &str, position: Option<usize>) -> Option<FacetId> {
        if text.trim().is_empty() {
            return None;
        }
        let remainder = self.config.remainder.clone();
        self.add_facet(&remainder, text, position)
    }

    /// Launch a search.
    ///
    /// The current facets are serialized and read back, so the list handed to
    /// `on_search` is in its normalized form (empty facets gone, stray text
    /// split into its own facets). Returns the query that was searched.
    pub fn search<F>(&mut self, on_search: F) -> String
    where
        F: FnOnce(&str, &FacetList),
    {
        let query = self.value();
        self.set_query(&query);
        debug!(query = %query, facets = self.facets.len(), "search");
        on_search(&query, &self.facets);
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::testing::assert_facets;

    #[test]
    fn set_query_then_value_round_trips() {
        let editor = QueryEditor::with_query(
            QueryConfig::default(),
            r#"status: open priority: "very high" free text"#,
        );
        assert_eq!(editor.facets().len(), 3);
        assert_eq!(
            editor.value(),
            r#"status: open priority: "very high" free text"#
        );
    }

    #[test]
    fn add_facet_trims_and_rejects_blank_category() {
        let mut editor = QueryEditor::new(QueryConfig::default());
        assert!(editor.add_facet("   ", "x", None).is_none());
        editor.add_facet(" owner ", " me ", None);
        editor.add_facet("tag", "first", Some(0));
        assert_facets(editor.facets())
            .count(2)
            .facet(0, "tag", "first")
            .facet(1, "owner", "me");
    }

    #[test]
    fn add_text_uses_remainder_category() {
        let mut editor = QueryEditor::new(QueryConfig::new("keyword"));
        assert!(editor.add_text("  ", None).is_none());
        editor.add_text("rust lang", None);
        assert_facets(editor.facets()).facet(0, "keyword", "rust lang");
        assert_eq!(editor.value(), "rust lang");
    }

    #[test]
    fn search_normalizes_and_reports_query() {
        let mut editor = QueryEditor::new(QueryConfig::default());
        let empty = editor.add_facet("tag", "", None).expect("facet added");
        editor.add_facet("tag", "a", None);
        editor.add_text("x tag: b", None);
        assert!(editor.facets().get(empty).is_some());

        let mut reported = None;
        let query = editor.search(|query, facets| {
            reported = Some((query.to_string(), facets.values("tag").len()));
        });

        assert_eq!(query, "tag: a x tag: b");
        assert_eq!(reported, Some((query.clone(), 2)));
        assert_facets(editor.facets())
            .categories(&["tag", "text", "tag"])
            .values(&["a", "x", "b"]);
    }
}
