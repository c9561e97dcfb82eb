//! A single `category: value` pair.

use serde::{Deserialize, Serialize};

/// One facet of a query.
///
/// The value is trimmed on construction. The optional label only changes how a
/// facet is displayed; it never takes part in serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub category: String,
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Facet {
    pub fn new(category: impl Into<String>, value: impl AsRef<str>) -> Self {
        Self {
            category: category.into(),
            value: value.as_ref().trim().to_string(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value, trimming it first.
    pub fn set_value(&mut self, value: impl AsRef<str>) {
        self.value = value.as_ref().trim().to_string();
    }

    /// The text shown for this facet: the label override if any, else the value.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }

    /// Case-insensitive category comparison, as used by all list lookups.
    pub fn is_category(&self, category: &str) -> bool {
        if self.category.is_ascii() && category.is_ascii() {
            return self.category.eq_ignore_ascii_case(category);
        }
        self.category
            .chars()
            .flat_map(char::to_lowercase)
            .eq(category.chars().flat_map(char::to_lowercase))
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Re-apply the trimming invariant. Needed after deserializing.
    pub fn normalized(mut self) -> Self {
        let trimmed = self.value.trim();
        if trimmed.len() != self.value.len() {
            self.value = trimmed.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_trimmed() {
        let facet = Facet::new("status", "  open \t");
        assert_eq!(facet.value(), "open");

        let mut facet = facet;
        facet.set_value(" closed ");
        assert_eq!(facet.value(), "closed");
    }

    #[test]
    fn label_falls_back_to_value() {
        let facet = Facet::new("account", "42");
        assert_eq!(facet.label(), "42");
        let facet = facet.with_label("Jane Doe");
        assert_eq!(facet.label(), "Jane Doe");
        assert_eq!(facet.value(), "42");
    }

    #[test]
    fn category_match_ignores_case() {
        let facet = Facet::new("Status", "open");
        assert!(facet.is_category("status"));
        assert!(facet.is_category("STATUS"));
        assert!(!facet.is_category("state"));
        assert!(!facet.is_category("statuses"));
    }

    #[test]
    fn category_match_folds_unicode_case() {
        let facet = Facet::new("Статус", "открыт");
        assert!(facet.is_category("статус"));
        assert!(facet.is_category("СТАТУС"));
        assert!(!facet.is_category("status"));
        assert!(!Facet::new("Straße", "x").is_category("STRASSE"));
        assert!(Facet::new("ÉTAT", "x").is_category("état"));
    }

    #[test]
    fn deserialized_facets_are_normalized() {
        let facet: Facet = serde_json::from_str(r#"{"category":"tag","value":"  a "}"#)
            .expect("facet json");
        assert_eq!(facet.normalized().value(), "a");
    }
}
