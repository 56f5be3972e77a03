//! Borrowed node views and traversal iterators

use super::tree::{NodeId, Tree};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Labels matching this are printed bare by [`NodeRef::as_string`]; anything else is quoted.
static SIMPLE_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// A read-only view of one node in a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(super) fn new(tree: &'a Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    pub fn label(&self) -> &'a str {
        self.tree.label(self.id)
    }

    /// Raw blocks attached by verbatim markers, in source order.
    pub fn verbatim(&self) -> &'a [String] {
        self.tree.verbatim(self.id)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.parent(self.id).map(|id| self.tree.node(id))
    }

    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        self.tree.next_sibling(self.id).map(|id| self.tree.node(id))
    }

    pub fn prev_sibling(&self) -> Option<NodeRef<'a>> {
        self.tree.prev_sibling(self.id).map(|id| self.tree.node(id))
    }

    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.tree
            .children(self.id)
            .first()
            .map(|&id| self.tree.node(id))
    }

    pub fn has_children(&self) -> bool {
        !self.tree.children(self.id).is_empty()
    }

    pub fn num_children(&self) -> usize {
        self.tree.children(self.id).len()
    }

    /// Number of nodes in this subtree, the node included.
    pub fn num_nodes(&self) -> usize {
        self.descendants().count()
    }

    pub fn depth(&self) -> usize {
        self.tree.depth(self.id)
    }

    pub fn children(&self) -> Children<'a> {
        Children {
            tree: self.tree,
            iter: self.tree.children(self.id).iter(),
        }
    }

    /// Pre-order walk of this node and everything below it.
    ///
    /// Depths are relative: the node itself is yielded at depth 0.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            tree: self.tree,
            stack: vec![(0, self.id)],
        }
    }

    /// Pre-order walk of this node, its descendants, then each trailing sibling with its
    /// descendants. All trailing siblings are yielded at depth 0.
    pub fn following(&self) -> Descendants<'a> {
        let mut stack: Vec<(usize, NodeId)> = self
            .tree
            .trailing_siblings(self.id)
            .iter()
            .rev()
            .map(|&id| (0, id))
            .collect();
        stack.push((0, self.id));
        Descendants {
            tree: self.tree,
            stack,
        }
    }

    /// The label, single-quoted unless it is a simple identifier.
    pub fn as_string(&self) -> String {
        let label = self.label();
        if SIMPLE_LABEL.is_match(label) {
            label.to_string()
        } else {
            format!("'{label}'")
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("label", &self.label())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// Iterator over the direct children of a node.
#[derive(Clone)]
pub struct Children<'a> {
    tree: &'a Tree,
    iter: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|&id| self.tree.node(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|&id| self.tree.node(id))
    }
}

/// Pre-order iterator yielding `(depth, node)` pairs.
#[derive(Clone)]
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<(usize, NodeId)>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, NodeRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        self.stack.extend(
            self.tree
                .children(id)
                .iter()
                .rev()
                .map(|&child| (depth + 1, child)),
        );
        Some((depth, self.tree.node(id)))
    }
}
