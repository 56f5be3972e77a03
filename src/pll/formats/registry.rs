//! Output formats by name
//!
//!     `pll parse --format <name>` looks its formatter up here. The built-in set is pll,
//!     treeviz, outline, json and yaml, each configured from a [`PllConfig`].

use crate::pll::ast::Tree;
use crate::pll::config::PllConfig;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No formatter is registered under this name.
    FormatNotFound(String),
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Renders a whole forest: every root of the tree with its descendants.
pub trait Formatter: Send + Sync {
    fn name(&self) -> &str;

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError>;

    /// One line for `pll list-formats`.
    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// A registry with no formatters at all.
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Add `formatter` under its own name, replacing any earlier one.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, tree: &Tree, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tree)
    }

    /// Registered names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// The built-in formatters, with tokens, indentation and widths taken from `config`.
    pub fn with_config(config: &PllConfig) -> Self {
        let mut registry = Self::new();
        registry.register(super::PllFormatter::new(&config.parser, &config.render));
        registry.register(super::TreevizFormatter::new(config.render.treeviz_width));
        registry.register(super::OutlineFormatter::new(&config.render.indent_string));
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }

    pub fn with_defaults() -> Self {
        Self::with_config(&PllConfig::default())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
