//! Outline: indented debug listing
//!
//! Each node on its own line, indented by depth. Labels made only of letters, digits and
//! underscores print bare; anything else is single-quoted.

use super::registry::{FormatError, Formatter};
use crate::pll::ast::Tree;

pub struct OutlineFormatter {
    indent: String,
}

impl OutlineFormatter {
    pub fn new(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
        }
    }
}

pub fn to_outline_str(tree: &Tree, indent: &str) -> String {
    let Some(first) = tree.first_root() else {
        return String::new();
    };
    first
        .following()
        .map(|(depth, node)| format!("{}{}\n", indent.repeat(depth), node.as_string()))
        .collect()
}

impl Formatter for OutlineFormatter {
    fn name(&self) -> &str {
        "outline"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_outline_str(tree, &self.indent))
    }

    fn description(&self) -> &str {
        "Indented listing, non-identifier labels quoted"
    }
}
