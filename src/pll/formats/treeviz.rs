//! Treeviz formatter for pll trees
//!
//! One line per node with box-drawing connectors, labels truncated to a fixed width:
//!
//!     ├─ top
//!     │ ├─ peach
//!     │ │ └─ fuzzy navel
//!     │ └─ handler [1 verbatim]
//!     └─ second root

use super::registry::{FormatError, Formatter};
use crate::pll::ast::{NodeRef, Tree};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(tree: &Tree, width: usize) -> String {
    let mut result = String::new();
    let roots: Vec<_> = tree.roots().iter().map(|&id| tree.node(id)).collect();
    append_nodes(&mut result, &roots, "", width);
    result
}

fn append_nodes(result: &mut String, nodes: &[NodeRef<'_>], prefix: &str, width: usize) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == nodes.len() - 1;
        let connector = if is_last { "└─" } else { "├─" };
        result.push_str(&format!(
            "{}{} {}",
            prefix,
            connector,
            truncate(node.label(), width)
        ));
        if !node.verbatim().is_empty() {
            result.push_str(&format!(" [{} verbatim]", node.verbatim().len()));
        }
        result.push('\n');

        let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let children: Vec<_> = node.children().collect();
        append_nodes(result, &children, &new_prefix, width);
    }
}

pub struct TreevizFormatter {
    width: usize,
}

impl TreevizFormatter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree, self.width))
    }

    fn description(&self) -> &str {
        "Tree with box-drawing connectors, one line per node"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pll::parsing::parse;

    #[test]
    fn test_treeviz_output() {
        let text = "top\n\tpeach\n\t\t\tfuzzy\n\t\tnavel\n\thandler <<<\n\t\tbody\n\nsecond root with a long label";
        let result = parse(text).unwrap();
        insta::assert_snapshot!(to_treeviz_str(result.tree(), 20), @r###"
        ├─ top
        │ ├─ peach fuzzy
        │ │ └─ navel
        │ └─ handler [1 verbatim]
        └─ second root with a l...
        "###);
    }
}
