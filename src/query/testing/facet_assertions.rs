//! Fluent assertion API for facet sequences

use crate::query::facet::Facet;

/// Create an assertion builder for an ordered sequence of facets
pub fn assert_facets<'a, I>(facets: I) -> FacetsAssertion<'a>
where
    I: IntoIterator<Item = &'a Facet>,
{
    FacetsAssertion {
        facets: facets.into_iter().collect(),
    }
}

pub struct FacetsAssertion<'a> {
    facets: Vec<&'a Facet>,
}

impl<'a> FacetsAssertion<'a> {
    /// Assert the number of facets
    pub fn count(self, expected: usize) -> Self {
        assert_eq!(
            self.facets.len(),
            expected,
            "Expected {} facets, found {}: [{}]",
            expected,
            self.facets.len(),
            self.summary()
        );
        self
    }

    /// Assert category and value of the facet at `index`
    pub fn facet(self, index: usize, category: &str, value: &str) -> Self {
        self.facet_with(index, |facet| {
            facet.category(category).value(value);
        })
    }

    /// Run arbitrary assertions on the facet at `index`
    pub fn facet_with<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(FacetAssertion<'a>),
    {
        assert!(
            index < self.facets.len(),
            "Facet index {} out of bounds ({} facets: [{}])",
            index,
            self.facets.len(),
            self.summary()
        );
        assertion(FacetAssertion {
            facet: self.facets[index],
            context: format!("facets[{}]", index),
        });
        self
    }

    /// Assert the ordered list of categories
    pub fn categories(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.facets.iter().map(|f| f.category.as_str()).collect();
        assert_eq!(actual, expected, "Category order mismatch");
        self
    }

    /// Assert the ordered list of values
    pub fn values(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self.facets.iter().map(|f| f.value()).collect();
        assert_eq!(actual, expected, "Value order mismatch");
        self
    }

    fn summary(&self) -> String {
        summarize(&self.facets)
    }
}

pub struct FacetAssertion<'a> {
    facet: &'a Facet,
    context: String,
}

impl<'a> FacetAssertion<'a> {
    pub fn category(self, expected: &str) -> Self {
        assert_eq!(
            self.facet.category, expected,
            "{}: expected category '{}', found '{}'",
            self.context, expected, self.facet.category
        );
        self
    }

    pub fn value(self, expected: &str) -> Self {
        assert_eq!(
            self.facet.value(),
            expected,
            "{}: expected value '{}', found '{}'",
            self.context,
            expected,
            self.facet.value()
        );
        self
    }

    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.facet.label(),
            expected,
            "{}: expected label '{}', found '{}'",
            self.context,
            expected,
            self.facet.label()
        );
        self
    }
}

fn summarize(facets: &[&Facet]) -> String {
    facets
        .iter()
        .map(|f| format!("{}={:?}", f.category, f.value()))
        .collect::<Vec<_>>()
        .join(", ")
}
