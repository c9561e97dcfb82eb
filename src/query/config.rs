//! Configuration for parsing and serializing queries.
//!
//! `defaults/facetq.default.toml` is embedded into the crate so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`Settings`].
//!
//! Parsing and serializing only need the [`QueryConfig`] section; the rest is
//! consumed by the command-line front end.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/facetq.default.toml");

/// Category assigned to free text when nothing else is configured.
pub const DEFAULT_REMAINDER: &str = "text";

/// Top-level configuration consumed by facetq applications.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub query: QueryConfig,
    pub output: OutputConfig,
}

/// Knobs shared by the parser and the serializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Category given to free text.
    pub remainder: String,
    /// Categories whose values are serialized without quotes.
    #[serde(default)]
    pub unquotable: Vec<String>,
}

impl QueryConfig {
    pub fn new(remainder: impl Into<String>) -> Self {
        Self {
            remainder: remainder.into(),
            unquotable: Vec::new(),
        }
    }

    /// Builder-style helper to mark categories as unquotable.
    pub fn with_unquotable<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unquotable
            .extend(categories.into_iter().map(Into::into));
        self
    }

    pub fn is_remainder(&self, category: &str) -> bool {
        self.remainder == category
    }

    pub fn is_unquotable(&self, category: &str) -> bool {
        self.unquotable.iter().any(|c| c == category)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REMAINDER)
    }
}

/// How the command-line front end prints parsed facets.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Json,
    Tag,
    Query,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "tag" => Ok(OutputFormat::Tag),
            "query" => Ok(OutputFormat::Query),
            other => Err(format!(
                "unknown format '{}' (expected json, tag or query)",
                other
            )),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}
