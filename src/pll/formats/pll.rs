//! pll text output: the inverse of the parser
//!
//!     One line per node, indented by depth. Verbatim blocks follow their node one level
//!     deeper, each closed by a blank line, and the label gets one verbatim token per block.
//!     Comment characters in labels are escaped, and so is a label that would otherwise start
//!     with the mark token. With a tab indent string the output parses back into the same tree.

use super::registry::{FormatError, Formatter};
use crate::pll::ast::Tree;
use crate::pll::config::{ParserConfig, RenderConfig};

pub struct PllFormatter {
    indent: String,
    verbatim_token: String,
    mark_token: String,
    comment_char: char,
    escape_char: char,
}

impl PllFormatter {
    pub fn new(parser: &ParserConfig, render: &RenderConfig) -> Self {
        Self {
            indent: render.indent_string.clone(),
            verbatim_token: parser.verbatim_token.clone(),
            mark_token: parser.mark_token.clone(),
            comment_char: parser.comment_char,
            escape_char: parser.escape_char,
        }
    }

    fn escape(&self, label: &str) -> String {
        let mut out = String::with_capacity(label.len() + 1);
        if !self.mark_token.is_empty()
            && label
                .trim_start_matches(self.escape_char)
                .starts_with(self.mark_token.as_str())
        {
            out.push(self.escape_char);
        }
        for c in label.chars() {
            if c == self.comment_char {
                out.push(self.escape_char);
            }
            out.push(c);
        }
        out
    }
}

impl Default for PllFormatter {
    fn default() -> Self {
        Self::new(&ParserConfig::default(), &RenderConfig::default())
    }
}

/// Render a tree as pll text with the default settings.
pub fn to_pll_string(tree: &Tree) -> String {
    PllFormatter::default().render(tree)
}

impl PllFormatter {
    pub fn render(&self, tree: &Tree) -> String {
        let Some(first) = tree.first_root() else {
            return String::new();
        };
        let mut out = String::new();
        for (depth, node) in first.following() {
            out.push_str(&self.indent.repeat(depth));
            out.push_str(&self.escape(node.label()));
            for _ in node.verbatim() {
                out.push(' ');
                out.push_str(&self.verbatim_token);
            }
            out.push('\n');
            let block_indent = self.indent.repeat(depth + 1);
            for block in node.verbatim() {
                for line in block.lines() {
                    out.push_str(&block_indent);
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
        }
        out
    }
}

impl Formatter for PllFormatter {
    fn name(&self) -> &str {
        "pll"
    }

    fn serialize(&self, tree: &Tree) -> Result<String, FormatError> {
        Ok(self.render(tree))
    }

    fn description(&self) -> &str {
        "Indented pll text, one node per line"
    }
}
