//! The cursor-driven tree builder
//!
//!     The parser keeps a cursor: the node most recently created (or extended) and its level.
//!     For each structural line at level `L`, with the cursor at level `C`:
//!
//!         L - C > 1    continuation: the content is appended to the cursor's label
//!         L - C == 1   first child of the cursor
//!         L - C == 0   next sibling of the cursor
//!         L - C < 0    next sibling of the cursor's ancestor `C - L` levels up
//!
//!     Continuation lines never move the cursor. The cursor node is always the newest node,
//!     so it never already has a child or a next sibling; the checks below guard the
//!     structure rather than a reachable input.
//!
//!     After the line is attached, one verbatim block is drained per verbatim token on it and
//!     attached to the node the line resolved to.

use super::error::{ParseError, ParseErrorKind};
use super::line::{LineClassifier, ParsedLine};
use super::source::{LineSource, PullMode};
use super::verbatim::read_block;
use crate::pll::ast::{NodeId, NodeRef, OptionPattern, Tree};
use crate::pll::config::ParserConfig;
use std::collections::BTreeMap;

/// Parsed tree plus the nodes flagged with the mark token.
#[derive(Debug, Clone)]
pub struct ParseResult {
    tree: Tree,
    root: NodeId,
    tags: Vec<(String, NodeId)>,
    option_pattern: OptionPattern,
}

impl ParseResult {
    /// The primary root: the synthetic root, or the node of the first line.
    pub fn root(&self) -> NodeRef<'_> {
        self.tree.node(self.root)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Marked nodes in encounter order. Names may repeat.
    pub fn tags(&self) -> impl Iterator<Item = (&str, NodeRef<'_>)> + '_ {
        self.tags
            .iter()
            .map(|(name, id)| (name.as_str(), self.tree.node(*id)))
    }

    /// First node marked under `name`.
    pub fn tag(&self, name: &str) -> Option<NodeRef<'_>> {
        self.tags
            .iter()
            .find(|(tag, _)| tag == name)
            .map(|(_, id)| self.tree.node(*id))
    }

    /// Every node marked under `name`, in encounter order.
    pub fn tagged<'r>(&'r self, name: &'r str) -> impl Iterator<Item = NodeRef<'r>> + 'r {
        self.tags
            .iter()
            .filter(move |(tag, _)| tag == name)
            .map(|(_, id)| self.tree.node(*id))
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Options of a node, read with the configured option pattern.
    pub fn options(&self, id: NodeId) -> BTreeMap<String, String> {
        self.tree.node(id).options_with(&self.option_pattern)
    }
}

/// Parse text with the default configuration.
pub fn parse(text: &str) -> Result<ParseResult, ParseError> {
    parse_with(text, &ParserConfig::default())
}

/// Parse text with an explicit configuration.
pub fn parse_with(text: &str, config: &ParserConfig) -> Result<ParseResult, ParseError> {
    parse_lines(text.lines().map(str::to_string), config)
}

/// Parse from any supplier of physical lines.
pub fn parse_lines<L>(lines: L, config: &ParserConfig) -> Result<ParseResult, ParseError>
where
    L: IntoIterator<Item = String>,
{
    let source = LineSource::new(lines, config.comment_char, config.escape_char);
    Builder::new(config).run(source)
}

struct Cursor {
    node: NodeId,
    level: usize,
}

struct Builder<'c> {
    config: &'c ParserConfig,
    classifier: LineClassifier<'c>,
    tree: Tree,
    root: Option<NodeId>,
    cursor: Option<Cursor>,
    tags: Vec<(String, NodeId)>,
}

impl<'c> Builder<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        let mut tree = Tree::new();
        let mut root = None;
        let mut cursor = None;
        if let Some(label) = &config.root_label {
            let id = tree.add_root(label.clone());
            log::trace!("synthetic root {label:?}");
            root = Some(id);
            cursor = Some(Cursor { node: id, level: 0 });
        }
        Self {
            config,
            classifier: LineClassifier::new(config),
            tree,
            root,
            cursor,
            tags: Vec::new(),
        }
    }

    fn run<I>(mut self, mut source: LineSource<I>) -> Result<ParseResult, ParseError>
    where
        I: Iterator<Item = String>,
    {
        while let Some(line) = source.next(PullMode::SkipBlank) {
            let parsed = self.classifier.classify(&line)?;
            let target = self.attach(&parsed)?;

            if parsed.marked {
                let name = self.tree.label(target).to_string();
                log::trace!("line {}: tagged {name:?}", parsed.number);
                self.tags.push((name, target));
            }

            for read in 0..parsed.verbatim_count {
                let block = read_block(&mut source, parsed.number, parsed.verbatim_count, read)?;
                log::trace!(
                    "line {}: verbatim block {} of {} ({} bytes)",
                    parsed.number,
                    read + 1,
                    parsed.verbatim_count,
                    block.len()
                );
                self.tree.add_verbatim(target, block);
            }
        }

        match self.root {
            Some(root) => Ok(ParseResult {
                tree: self.tree,
                root,
                tags: self.tags,
                option_pattern: self.config.option_pattern.clone(),
            }),
            None => Err(ParseError::new(ParseErrorKind::EmptyInput, 0)),
        }
    }

    /// Place one line in the tree and return the node it resolved to.
    fn attach(&mut self, line: &ParsedLine) -> Result<NodeId, ParseError> {
        let Some(cursor) = &self.cursor else {
            let id = self.new_node(line)?;
            self.tree.make_root(id);
            log::trace!("line {}: root {:?}", line.number, line.content);
            self.root = Some(id);
            self.cursor = Some(Cursor {
                node: id,
                level: line.level,
            });
            return Ok(id);
        };
        let (current, level) = (cursor.node, cursor.level);
        let transition = ParseError::new(
            ParseErrorKind::InvalidLevelTransition {
                from: level,
                to: line.level,
            },
            line.number,
        );

        if line.level > level + 1 {
            if !line.content.is_empty() {
                self.tree.push_label(current, &line.content);
            }
            log::trace!("line {}: continuation of {current}", line.number);
            return Ok(current);
        }

        let id = if line.level == level + 1 {
            if !self.tree.children(current).is_empty() {
                return Err(transition);
            }
            let id = self.new_node(line)?;
            log::trace!("line {}: child of {current}", line.number);
            self.tree.make_child_of(id, current)
        } else {
            let mut anchor = current;
            for _ in 0..level - line.level {
                anchor = self.tree.parent(anchor).ok_or_else(|| transition.clone())?;
            }
            if self.tree.next_sibling(anchor).is_some() {
                return Err(transition);
            }
            let id = self.new_node(line)?;
            if line.level == level {
                log::trace!("line {}: sibling of {current}", line.number);
            } else {
                log::trace!(
                    "line {}: up {} level(s), sibling of {anchor}",
                    line.number,
                    level - line.level
                );
            }
            self.tree.make_sibling_of(id, anchor)
        };

        self.cursor = Some(Cursor {
            node: id,
            level: line.level,
        });
        Ok(id)
    }

    fn new_node(&mut self, line: &ParsedLine) -> Result<NodeId, ParseError> {
        if line.content.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyLabel, line.number));
        }
        Ok(self.tree.new_node(line.content.clone()))
    }
}
