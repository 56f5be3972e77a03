//! Tree snapshot: a normalized, serializable copy of a tree
//!
//! Serializers (json, yaml) and structural comparisons consume snapshots instead of walking
//! the arena themselves. Snapshots also go the other way: [`Tree::from_snapshots`] rebuilds a
//! tree, which is how tests describe expected shapes compactly.

use super::node::NodeRef;
use super::tree::{NodeId, Tree};
use serde::{Deserialize, Serialize};

/// A node with its label, verbatim blocks and children, detached from any arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub label: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub verbatim: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSnapshot>,
}

impl TreeSnapshot {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            verbatim: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_verbatim(mut self, block: impl Into<String>) -> Self {
        self.verbatim.push(block.into());
        self
    }
}

/// Snapshot a node and all of its descendants.
pub fn snapshot_node(node: NodeRef<'_>) -> TreeSnapshot {
    TreeSnapshot {
        label: node.label().to_string(),
        verbatim: node.verbatim().to_vec(),
        children: node.children().map(snapshot_node).collect(),
    }
}

/// Snapshot every top-level node of a tree.
pub fn snapshot_forest(tree: &Tree) -> Vec<TreeSnapshot> {
    tree.roots()
        .iter()
        .map(|&id| snapshot_node(tree.node(id)))
        .collect()
}

impl Tree {
    /// Build a tree whose roots are the given snapshots.
    pub fn from_snapshots(snapshots: &[TreeSnapshot]) -> Tree {
        let mut tree = Tree::new();
        for snapshot in snapshots {
            let id = tree.build_snapshot(snapshot);
            tree.make_root(id);
        }
        tree
    }

    fn build_snapshot(&mut self, snapshot: &TreeSnapshot) -> NodeId {
        let id = self.new_node(snapshot.label.clone());
        for block in &snapshot.verbatim {
            self.add_verbatim(id, block.clone());
        }
        for child in &snapshot.children {
            let child_id = self.build_snapshot(child);
            self.make_child_of(child_id, id);
        }
        id
    }
}
