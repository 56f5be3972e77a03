//! Code tree and code renderer
//!
//!     The code tree is a debug view of a program: one node per instruction, labeled with the
//!     statement text, and a `repeat n times:` node whose children are the loop body. The
//!     renderer flattens any tree in pre-order into `(depth, text)` lines.

use super::instr::{Instr, Program};
use crate::pll::ast::{NodeId, Tree};

/// Statement text of one instruction. Loops render as their header.
pub fn statement(instr: &Instr) -> String {
    match instr {
        Instr::MoveForward(d) => format!("move_forward({d})"),
        Instr::Turn(a) => format!("turn({a})"),
        Instr::MoveTo(x, y) => format!("move_to({x}, {y})"),
        Instr::SaveState => "save_state()".to_string(),
        Instr::RestoreState => "restore_state()".to_string(),
        Instr::CenterView => "center_view()".to_string(),
        Instr::Repeat(n, _) => format!("repeat {n} times:"),
    }
}

/// Build the code tree of a program; top-level instructions become roots.
pub fn code_tree(instrs: &[Instr]) -> Tree {
    let mut tree = Tree::new();
    for instr in instrs {
        let id = add_instr(&mut tree, instr);
        tree.make_root(id);
    }
    tree
}

fn add_instr(tree: &mut Tree, instr: &Instr) -> NodeId {
    let id = tree.new_node(statement(instr));
    if let Instr::Repeat(_, body) = instr {
        for child in body {
            let child_id = add_instr(tree, child);
            tree.make_child_of(child_id, id);
        }
    }
    id
}

/// Pre-order `(depth, label)` lines of every top-level node in `tree`.
pub fn render_code_tree(tree: &Tree) -> Vec<(usize, String)> {
    match tree.first_root() {
        Some(first) => first
            .following()
            .map(|(depth, node)| (depth, node.label().to_string()))
            .collect(),
        None => Vec::new(),
    }
}

impl Program {
    pub fn to_code_tree(&self) -> Tree {
        code_tree(self.instrs())
    }

    pub fn render(&self) -> Vec<(usize, String)> {
        render_code_tree(&self.to_code_tree())
    }

    /// Rendered lines indented with `indent` per level, each ending in a newline.
    pub fn render_text(&self, indent: &str) -> String {
        self.render()
            .into_iter()
            .map(|(depth, text)| format!("{}{}\n", indent.repeat(depth), text))
            .collect()
    }
}
