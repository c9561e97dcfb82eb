//! # facetq
//!
//! Parser, serializer and ordered model for faceted search queries.
//!
//! A query such as `status: open priority: "very high" free text` is read into
//! an ordered list of category/value facets and written back out again. See the
//! [query module](query) for the entry points.
//!
//! ## Testing
//!
//! Facet lists are verified with the fluent helpers in
//! [`query::testing`], see [`assert_facets`](query::testing::assert_facets).

pub mod query;
