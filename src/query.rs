//! Main module for query parsing and the facet model
//!
//! Control flow:
//!
//! ```text
//! raw string -> parse -> FacetList -> (UI edits) -> serialize -> raw string
//! ```
//!
//! Everything here is synchronous and free of global state. Configuration is
//! passed explicitly as a [`QueryConfig`].

pub mod config;
pub mod editor;
pub mod facet;
pub mod facet_list;
pub mod parsing;
pub mod serializing;
pub mod testing;

pub use config::{QueryConfig, Settings};
pub use editor::QueryEditor;
pub use facet::Facet;
pub use facet_list::{FacetId, FacetList, FacetListEvent, SubscriptionId};
pub use parsing::parse;
pub use serializing::{quote, serialize};
