//! Option extraction: reading `key = value` children as a mapping
//!
//!     Collaborators configure things by writing option lines under a node:
//!
//!         ProgramEditor
//!             name = turtleCode
//!             width = 25
//!             sticky = n
//!
//!     `options()` scans the node's direct children, keeps those whose label matches the option
//!     pattern, and returns key to value. Children that don't match are skipped silently; they
//!     are ordinary content as far as this module is concerned. A later duplicate key wins.

use super::node::NodeRef;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The pattern used by [`NodeRef::options`]: an identifier, `=`, and the rest of the line.
pub const DEFAULT_OPTION_PATTERN: &str = r"^([A-Za-z][A-Za-z0-9_]*)\s*=\s*(.*)$";

static DEFAULT_PATTERN: Lazy<OptionPattern> =
    Lazy::new(|| OptionPattern::new(DEFAULT_OPTION_PATTERN).unwrap());

/// A compiled option pattern. Capture group 1 is the key, group 2 the value.
///
/// Serialized as its source text; deserializing compiles it, so a bad regex in a
/// configuration file fails at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionPattern {
    regex: Regex,
}

impl OptionPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Split a label into `(key, value)`, or `None` if it is not an option line.
    pub fn split<'l>(&self, label: &'l str) -> Option<(&'l str, &'l str)> {
        let caps = self.regex.captures(label)?;
        let key = caps.get(1)?.as_str();
        let value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        Some((key, value.trim_end()))
    }
}

impl Default for OptionPattern {
    fn default() -> Self {
        DEFAULT_PATTERN.clone()
    }
}

impl PartialEq for OptionPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for OptionPattern {
    type Error = regex::Error;

    fn try_from(pattern: String) -> Result<Self, Self::Error> {
        Self::new(&pattern)
    }
}

impl From<OptionPattern> for String {
    fn from(pattern: OptionPattern) -> String {
        pattern.as_str().to_string()
    }
}

impl<'a> NodeRef<'a> {
    /// Options declared by this node's children, using [`DEFAULT_OPTION_PATTERN`].
    pub fn options(&self) -> BTreeMap<String, String> {
        self.options_with(&DEFAULT_PATTERN)
    }

    pub fn options_with(&self, pattern: &OptionPattern) -> BTreeMap<String, String> {
        self.children()
            .filter_map(|child| pattern.split(child.label()))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pll::ast::Tree;

    fn editor() -> Tree {
        let mut tree = Tree::new();
        let editor = tree.add_root("ProgramEditor");
        tree.append_child(editor, "name = turtleCode");
        tree.append_child(editor, "width=25");
        tree.append_child(editor, "label Turtle Program");
        tree.append_child(editor, "background = light gray");
        tree
    }

    #[test]
    fn test_options_skip_non_matching_children() {
        let tree = editor();
        let options = tree.node(tree.roots()[0]).options();
        assert_eq!(options.len(), 3);
        assert_eq!(options["name"], "turtleCode");
        assert_eq!(options["width"], "25");
        assert_eq!(options["background"], "light gray");
    }

    #[test]
    fn test_later_duplicate_wins() {
        let mut tree = Tree::new();
        let root = tree.add_root("Turtle");
        tree.append_child(root, "speed = 1");
        tree.append_child(root, "speed = 5");
        assert_eq!(tree.node(root).options()["speed"], "5");
    }

    #[test]
    fn test_custom_pattern() {
        let tree = editor();
        let colon = OptionPattern::new(r"^(\w+):\s*(.*)$").unwrap();
        assert!(tree.node(tree.roots()[0]).options_with(&colon).is_empty());

        let mut tree = Tree::new();
        let root = tree.add_root("Window");
        tree.append_child(root, "title: Turtle Graphics");
        let options = tree.node(root).options_with(&colon);
        assert_eq!(options["title"], "Turtle Graphics");
    }

    #[test]
    fn test_pattern_serializes_as_text() {
        let pattern: OptionPattern = serde_json::from_str(r#""^(\\w+):(.*)$""#).unwrap();
        assert_eq!(pattern.as_str(), r"^(\w+):(.*)$");
        assert_eq!(serde_json::to_string(&pattern).unwrap(), r#""^(\\w+):(.*)$""#);
        assert!(serde_json::from_str::<OptionPattern>(r#""(unclosed""#).is_err());
        assert_eq!(OptionPattern::default().as_str(), DEFAULT_OPTION_PATTERN);
    }

    #[test]
    fn test_leaf_has_no_options() {
        let mut tree = Tree::new();
        let root = tree.add_root("leaf");
        assert!(tree.node(root).options().is_empty());
    }
}
