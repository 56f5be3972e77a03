//! JSON and YAML output through [`TreeSnapshot`]

use super::registry::{FormatError, Formatter};
use crate::pll::ast::{snapshot_forest, Tree};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        serde_json::to_string_pretty(&snapshot_forest(tree))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON array of top-level nodes"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_forest(tree))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of top-level nodes"
    }
}
