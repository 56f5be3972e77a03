//! Arena storage and structural mutation for pll trees

use super::node::NodeRef;
use std::fmt;

/// Handle to a node inside a [`Tree`].
///
/// Handles are only meaningful for the tree that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its tree's arena (creation order).
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    label: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    verbatim: Vec<String>,
    is_root: bool,
}

/// A label is valid when it is non-empty and does not start with whitespace.
///
/// Labels that are all whitespace fail the second rule as well.
pub fn is_valid_label(label: &str) -> bool {
    label.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// An ordered forest of labeled nodes.
///
/// Nodes are created detached ([`Tree::new_node`]) and then placed with
/// [`Tree::make_root`], [`Tree::make_child_of`] or [`Tree::make_sibling_of`]; the `add_*` and
/// `append*` helpers do both steps at once. A node can be placed exactly once. Misuse (placing
/// a node twice, creating a cycle, using a node that is not in the tree as an anchor) is a
/// programming error and panics.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena, placed or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Top-level nodes, in order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The first top-level node, if any.
    pub fn first_root(&self) -> Option<NodeRef<'_>> {
        self.roots.first().map(|&id| self.node(id))
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node {id} does not belong to this tree");
        NodeRef::new(self, id)
    }

    // ------------------------------------------------------------------------
    // Creation and placement
    // ------------------------------------------------------------------------

    /// Create a node that is not yet part of the tree structure.
    pub fn new_node(&mut self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        assert!(is_valid_label(&label), "invalid node label {label:?}");
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            label,
            parent: None,
            children: Vec::new(),
            verbatim: Vec::new(),
            is_root: false,
        });
        id
    }

    /// Create a node and append it to the top-level forest.
    pub fn add_root(&mut self, label: impl Into<String>) -> NodeId {
        let id = self.new_node(label);
        self.make_root(id)
    }

    /// Place a detached node at the end of the top-level forest.
    pub fn make_root(&mut self, node: NodeId) -> NodeId {
        self.assert_detached(node);
        self.data_mut(node).is_root = true;
        self.roots.push(node);
        node
    }

    /// Place a detached node as the last child of `parent`.
    pub fn make_child_of(&mut self, node: NodeId, parent: NodeId) -> NodeId {
        self.assert_detached(node);
        assert!(
            !self.is_ancestor_or_self(node, parent),
            "node {node} cannot become a child of its own descendant {parent}"
        );
        self.data_mut(node).parent = Some(parent);
        self.data_mut(parent).children.push(node);
        node
    }

    /// Place a detached node as the trailing sibling of `prior`.
    ///
    /// `prior` must itself be placed (a root, or a node with a parent). The new node goes to
    /// the end of `prior`'s sibling list.
    pub fn make_sibling_of(&mut self, node: NodeId, prior: NodeId) -> NodeId {
        self.assert_detached(node);
        match self.data(prior).parent {
            Some(parent) => self.make_child_of(node, parent),
            None => {
                assert!(
                    self.data(prior).is_root,
                    "node {prior} is not placed in the tree and cannot take siblings"
                );
                self.make_root(node)
            }
        }
    }

    /// Create a node with `label` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        let id = self.new_node(label);
        self.make_child_of(id, parent)
    }

    /// Create a node with `label` as the trailing sibling of `sibling`.
    pub fn append(&mut self, sibling: NodeId, label: impl Into<String>) -> NodeId {
        let id = self.new_node(label);
        self.make_sibling_of(id, sibling)
    }

    /// Copy every top-level node of `other` (with descendants) into this tree.
    ///
    /// The copies become trailing children of `parent`, or trailing roots when `parent` is
    /// `None`. Returns the ids of the copied top-level nodes.
    pub fn append_forest(&mut self, other: &Tree, parent: Option<NodeId>) -> Vec<NodeId> {
        other
            .roots
            .iter()
            .map(|&root| {
                let copy = self.copy_from(other, root);
                match parent {
                    Some(parent) => self.make_child_of(copy, parent),
                    None => self.make_root(copy),
                }
            })
            .collect()
    }

    /// Deep copy of the subtree rooted at `id` into a fresh tree, with `id`'s copy as its only
    /// root.
    pub fn subtree(&self, id: NodeId) -> Tree {
        let mut tree = Tree::new();
        let root = tree.copy_from(self, id);
        tree.make_root(root);
        tree
    }

    // Copies the subtree at `id` of `other`; the returned node is detached.
    fn copy_from(&mut self, other: &Tree, id: NodeId) -> NodeId {
        let source = other.data(id);
        let copy = self.new_node(source.label.clone());
        self.data_mut(copy).verbatim = source.verbatim.clone();
        for &child in &source.children {
            let child_copy = self.copy_from(other, child);
            self.make_child_of(child_copy, copy);
        }
        copy
    }

    // ------------------------------------------------------------------------
    // Node data
    // ------------------------------------------------------------------------

    pub fn label(&self, id: NodeId) -> &str {
        &self.data(id).label
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        let label = label.into();
        assert!(is_valid_label(&label), "invalid node label {label:?}");
        self.data_mut(id).label = label;
    }

    /// Append `text` to the node's label, separated by a single space.
    pub fn push_label(&mut self, id: NodeId, text: &str) {
        let data = self.data_mut(id);
        data.label.push(' ');
        data.label.push_str(text);
    }

    pub fn verbatim(&self, id: NodeId) -> &[String] {
        &self.data(id).verbatim
    }

    pub fn add_verbatim(&mut self, id: NodeId, block: impl Into<String>) {
        self.data_mut(id).verbatim.push(block.into());
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.data(id).children
    }

    /// True when the node is a root or has a parent.
    pub fn is_placed(&self, id: NodeId) -> bool {
        let data = self.data(id);
        data.is_root || data.parent.is_some()
    }

    /// The ordered list the node belongs to: its parent's children, or the root list.
    ///
    /// Returns `None` for detached nodes.
    pub fn sibling_list(&self, id: NodeId) -> Option<&[NodeId]> {
        let data = self.data(id);
        match data.parent {
            Some(parent) => Some(&self.data(parent).children),
            None if data.is_root => Some(&self.roots),
            None => None,
        }
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.sibling_list(id)?;
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings.get(pos + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.sibling_list(id)?;
        let pos = siblings.iter().position(|&s| s == id)?;
        pos.checked_sub(1).map(|p| siblings[p])
    }

    /// Siblings after `id`, in order.
    pub fn trailing_siblings(&self, id: NodeId) -> &[NodeId] {
        match self.sibling_list(id) {
            Some(siblings) => match siblings.iter().position(|&s| s == id) {
                Some(pos) => &siblings[pos + 1..],
                None => &[],
            },
            None => &[],
        }
    }

    /// Number of parent links between the node and its top-level ancestor.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = id;
        while let Some(parent) = self.data(cur).parent {
            depth += 1;
            cur = parent;
        }
        depth
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.data(id).parent;
        }
        false
    }

    fn assert_detached(&self, node: NodeId) {
        assert!(
            !self.is_placed(node),
            "node {node} ({:?}) is already placed in the tree",
            self.data(node).label
        );
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn data_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }
}
