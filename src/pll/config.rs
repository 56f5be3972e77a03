//! Configuration for the pll parser and renderers.
//!
//! `defaults/pll.default.toml` is embedded into every binary so that docs and runtime behavior
//! stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`PllConfig`].
//!
//! Library entry points never read files themselves: they take a [`ParserConfig`] or
//! [`RenderConfig`] value, and `Default` gives the same values as the embedded defaults.

use config::builder::DefaultState;
use crate::pll::ast::OptionPattern;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/pll.default.toml");

/// Top-level configuration consumed by pll applications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PllConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Knobs of the indentation parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Leading marker recording a node in the tag mapping.
    pub mark_token: String,
    /// In-line marker announcing a raw block; one block per occurrence.
    pub verbatim_token: String,
    pub comment_char: char,
    pub escape_char: char,
    /// Synthetic root label. When set, every line of input sits one level below this root and
    /// empty input is allowed.
    pub root_label: Option<String>,
    /// Regex used to read `key = value` children, carried into every [`ParseResult`].
    ///
    /// [`ParseResult`]: crate::pll::parsing::ParseResult
    pub option_pattern: OptionPattern,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            mark_token: "*".to_string(),
            verbatim_token: "<<<".to_string(),
            comment_char: '#',
            escape_char: '\\',
            root_label: None,
            option_pattern: OptionPattern::default(),
        }
    }
}

impl ParserConfig {
    /// Same configuration with synthetic-root mode turned on.
    pub fn with_root(mut self, label: impl Into<String>) -> Self {
        self.root_label = Some(label.into());
        self
    }

    /// Check the settings that would make the parser ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mark_token.starts_with(self.escape_char) {
            return Err(ConfigError::Message(
                "parser.mark_token must not start with parser.escape_char".to_string(),
            ));
        }
        if self.mark_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "parser.mark_token must not be blank".to_string(),
            ));
        }
        if self.verbatim_token.trim().is_empty() {
            return Err(ConfigError::Message(
                "parser.verbatim_token must not be blank".to_string(),
            ));
        }
        if self.comment_char == self.escape_char {
            return Err(ConfigError::Message(
                "parser.comment_char and parser.escape_char must differ".to_string(),
            ));
        }
        if self.comment_char.is_whitespace() || self.escape_char.is_whitespace() {
            return Err(ConfigError::Message(
                "parser.comment_char and parser.escape_char must not be whitespace".to_string(),
            ));
        }
        if let Some(root) = &self.root_label {
            if !crate::pll::ast::is_valid_label(root) {
                return Err(ConfigError::Message(format!(
                    "parser.root_label {root:?} is not a valid label"
                )));
            }
        }
        Ok(())
    }
}

/// Knobs of the text renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// One indentation level in rendered output.
    pub indent_string: String,
    /// Maximum label width in treeviz output.
    pub treeviz_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_string: "\t".to_string(),
            treeviz_width: 30,
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

    /// Layer configuration text (TOML).
    pub fn with_str(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
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

    /// Finalize the builder, deserialize and validate the resulting configuration.
    pub fn build(self) -> Result<PllConfig, ConfigError> {
        let config: PllConfig = self.builder.build()?.try_deserialize()?;
        config.parser.validate()?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PllConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config, PllConfig::default());
        assert_eq!(config.parser.mark_token, "*");
        assert_eq!(config.parser.escape_char, '\\');
        assert_eq!(config.render.indent_string, "\t");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parser.root_label", "App")
            .expect("override to apply")
            .set_override("render.treeviz_width", 12i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.root_label.as_deref(), Some("App"));
        assert_eq!(config.render.treeviz_width, 12);
    }

    #[test]
    fn layers_user_text() {
        let config = Loader::new()
            .with_str("[parser]\nverbatim_token = \"%%%\"\n")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.verbatim_token, "%%%");
        assert_eq!(config.parser.mark_token, "*");
    }

    #[test]
    fn rejects_ambiguous_settings() {
        let result = Loader::new()
            .set_override("parser.escape_char", "#")
            .expect("override to apply")
            .build();
        assert!(result.is_err());

        let blank = ParserConfig {
            mark_token: " ".to_string(),
            ..ParserConfig::default()
        };
        assert!(blank.validate().is_err());

        let escaped = ParserConfig {
            mark_token: "\\@".to_string(),
            ..ParserConfig::default()
        };
        assert!(escaped.validate().is_err());
    }

    #[test]
    fn compiles_option_pattern() {
        let config = Loader::new()
            .with_str("[parser]\noption_pattern = '^(\\w+):\\s*(.*)$'\n")
            .build()
            .expect("config to build");
        assert_eq!(config.parser.option_pattern.as_str(), r"^(\w+):\s*(.*)$");
        assert_eq!(config.parser.option_pattern.split("width: 25"), Some(("width", "25")));

        let broken = Loader::new()
            .with_str("[parser]\noption_pattern = '(unclosed'\n")
            .build();
        assert!(broken.is_err());
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/nonexistent/pll.toml")
            .build();
        assert!(result.is_err());
    }
}
