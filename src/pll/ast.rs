//! Tree model shared by the parser, the turtle compiler and the formatters
//!
//!     A pll document is an ordered forest of labeled nodes. Order is semantic: it is the order
//!     lines appeared in the source, and every mutation keeps it stable.
//!
//!     Nodes live in an arena owned by [`Tree`]. Parents own their children through ordered
//!     `Vec<NodeId>` lists, and the back reference to a parent is a plain index. This keeps the
//!     "exactly one parent, never its own ancestor" invariants checkable in one place
//!     (the mutation methods on [`Tree`]) and lets traversal hand out cheap [`NodeRef`] views.
//!
//!     Top-level nodes have no parent. They are kept in the tree's root list, so a parsed turtle
//!     program (many top-level commands) is a forest rather than a single root.
//!
//! Traversal
//!
//!     - `children()`: direct children, in order.
//!     - `descendants()`: pre-order `(depth, node)` pairs, the node itself first at depth 0.
//!     - `following()`: like `descendants()`, then continues over each trailing sibling and its
//!       descendants. Starting at the first root, it enumerates the whole forest.
//!
//!     All of these are lazy, finite, and restartable (calling the method again starts over).

mod node;
mod options;
mod snapshot;
mod tree;

pub use node::{Children, Descendants, NodeRef};
pub use options::{OptionPattern, DEFAULT_OPTION_PATTERN};
pub use snapshot::{snapshot_forest, snapshot_node, TreeSnapshot};
pub use tree::{is_valid_label, NodeId, Tree};
