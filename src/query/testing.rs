//! Testing utilities for facet assertions
//!
//! Asserting only on counts says little about whether a query was read
//! correctly. What matters is the full ordered shape: which categories, which
//! values, in which order. The fluent API checks that in one chain:
//!
//! ```rust-example
//! use facetq::query::{parse, QueryConfig};
//! use facetq::query::testing::assert_facets;
//!
//! let facets = parse("tag: a tag: b rest", &QueryConfig::default());
//! assert_facets(&facets)
//!     .count(3)
//!     .facet(0, "tag", "a")
//!     .facet(1, "tag", "b")
//!     .facet(2, "text", "rest");
//! ```
//!
//! Anything iterable over `&Facet` works, including `&FacetList`.

mod facet_assertions;

pub use facet_assertions::{assert_facets, FacetAssertion, FacetsAssertion};
