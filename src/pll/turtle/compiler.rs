//! Command tree to instruction AST
//!
//!     Each command node maps to instructions:
//!
//!         move d       MoveForward(d)                       no children allowed
//!         turn a       Turn(a)                              no children allowed
//!         center       CenterView                           no children allowed
//!         at x, y      SaveState, MoveTo(x, y), [children], RestoreState
//!         repeat n     Repeat(n, [children])
//!
//!     `at` and `repeat` must have children.
//!
//! Elision
//!
//!     Consecutive `at` siblings share one saved state. An `at` whose previous sibling is an
//!     `at` skips its SaveState, and one whose next sibling is an `at` skips its RestoreState,
//!     so a run of k `at` nodes is wrapped in exactly one SaveState/RestoreState pair. The
//!     rule is applied within every sibling list: the top-level sequence, the children of an
//!     `at`, and the body of a `repeat`.
//!
//!     The top-level program is the starting node followed by all of its trailing siblings.

use super::command::{command_name, Command};
use super::error::{CompileError, TurtleError};
use super::instr::{Instr, Program};
use crate::pll::ast::{NodeRef, Tree};
use crate::pll::parsing::parse;

/// Compile `first` and its trailing siblings.
pub fn compile(first: NodeRef<'_>) -> Result<Program, CompileError> {
    let tree = first.tree();
    let sequence: Vec<NodeRef<'_>> = std::iter::once(first)
        .chain(
            tree.trailing_siblings(first.id())
                .iter()
                .map(|&id| tree.node(id)),
        )
        .collect();
    Ok(Program::new(compile_sequence(&sequence)?))
}

/// Compile the whole top-level forest of a tree. An empty tree gives an empty program.
pub fn compile_tree(tree: &Tree) -> Result<Program, CompileError> {
    match tree.first_root() {
        Some(first) => compile(first),
        None => Ok(Program::default()),
    }
}

/// Parse turtle source with the default parser settings, then compile it.
pub fn compile_str(text: &str) -> Result<Program, TurtleError> {
    let parsed = parse(text)?;
    Ok(compile_tree(parsed.tree())?)
}

fn is_at(node: Option<&NodeRef<'_>>) -> bool {
    node.and_then(|n| command_name(n.label()))
        .is_some_and(|name| name == "at")
}

fn compile_sequence(nodes: &[NodeRef<'_>]) -> Result<Vec<Instr>, CompileError> {
    let mut out = Vec::new();
    for (i, node) in nodes.iter().enumerate() {
        let prev = i.checked_sub(1).and_then(|p| nodes.get(p));
        let next = nodes.get(i + 1);
        compile_node(*node, is_at(prev), is_at(next), &mut out)?;
    }
    Ok(out)
}

fn compile_node(
    node: NodeRef<'_>,
    after_at: bool,
    before_at: bool,
    out: &mut Vec<Instr>,
) -> Result<(), CompileError> {
    let statement = node.label();
    let command = Command::parse(statement)?;
    log::debug!("compiling {statement:?} as {command:?}");

    if command.takes_block() && !node.has_children() {
        return Err(CompileError::ChildrenRequired {
            command: command.name().to_string(),
            statement: statement.to_string(),
        });
    }
    if !command.takes_block() && node.has_children() {
        return Err(CompileError::ChildrenForbidden {
            command: command.name().to_string(),
            statement: statement.to_string(),
        });
    }

    let children = || node.children().collect::<Vec<_>>();
    match command {
        Command::Move(d) => out.push(Instr::MoveForward(d)),
        Command::Turn(a) => out.push(Instr::Turn(a)),
        Command::Center => out.push(Instr::CenterView),
        Command::At(x, y) => {
            if after_at {
                log::debug!("{statement:?}: save elided, previous sibling is an 'at'");
            } else {
                out.push(Instr::SaveState);
            }
            out.push(Instr::MoveTo(x, y));
            out.extend(compile_sequence(&children())?);
            if before_at {
                log::debug!("{statement:?}: restore elided, next sibling is an 'at'");
            } else {
                out.push(Instr::RestoreState);
            }
        }
        Command::Repeat(n) => out.push(Instr::Repeat(n, compile_sequence(&children())?)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pll::parsing::parse;

    fn compiled(text: &str) -> Vec<Instr> {
        compile_str(text).unwrap().into_instrs()
    }

    #[test]
    fn test_primitives_in_order() {
        assert_eq!(
            compiled("move 10\nturn 90\ncenter"),
            vec![Instr::MoveForward(10.0), Instr::Turn(90.0), Instr::CenterView]
        );
    }

    #[test]
    fn test_repeat_wraps_children() {
        assert_eq!(
            compiled("repeat 4\n\tmove 5\n\tturn 15"),
            vec![Instr::Repeat(
                4,
                vec![Instr::MoveForward(5.0), Instr::Turn(15.0)]
            )]
        );
    }

    #[test]
    fn test_single_at() {
        assert_eq!(
            compiled("at 1, 2\n\tmove 3"),
            vec![
                Instr::SaveState,
                Instr::MoveTo(1.0, 2.0),
                Instr::MoveForward(3.0),
                Instr::RestoreState,
            ]
        );
    }

    #[test]
    fn test_consecutive_at_share_one_state() {
        let instrs = compiled("at 0, 0\n\tmove 1\nat 5, 5\n\tmove 2\nAT 9, 9\n\tmove 3\nmove 4");
        assert_eq!(
            instrs,
            vec![
                Instr::SaveState,
                Instr::MoveTo(0.0, 0.0),
                Instr::MoveForward(1.0),
                Instr::MoveTo(5.0, 5.0),
                Instr::MoveForward(2.0),
                Instr::MoveTo(9.0, 9.0),
                Instr::MoveForward(3.0),
                Instr::RestoreState,
                Instr::MoveForward(4.0),
            ]
        );
    }

    #[test]
    fn test_elision_inside_blocks() {
        let text = "repeat 2\n\tat 1, 1\n\t\tmove 1\n\tat 2, 2\n\t\tmove 2";
        assert_eq!(
            compiled(text),
            vec![Instr::Repeat(
                2,
                vec![
                    Instr::SaveState,
                    Instr::MoveTo(1.0, 1.0),
                    Instr::MoveForward(1.0),
                    Instr::MoveTo(2.0, 2.0),
                    Instr::MoveForward(2.0),
                    Instr::RestoreState,
                ]
            )]
        );
    }

    #[test]
    fn test_compile_starts_at_given_node() {
        let parsed = parse("at 0, 0\n\tmove 1\nat 5, 5\n\tmove 2").unwrap();
        let second = parsed.root().next_sibling().unwrap();
        assert_eq!(
            compile(second).unwrap().into_instrs(),
            vec![
                Instr::SaveState,
                Instr::MoveTo(5.0, 5.0),
                Instr::MoveForward(2.0),
                Instr::RestoreState,
            ]
        );
    }

    #[test]
    fn test_semantic_errors() {
        assert!(matches!(
            compile_str("jump 10"),
            Err(TurtleError::Compile(CompileError::UnknownCommand { .. }))
        ));
        assert!(matches!(
            compile_str("move 10\n\tturn 5"),
            Err(TurtleError::Compile(CompileError::ChildrenForbidden { .. }))
        ));
        assert!(matches!(
            compile_str("repeat 3"),
            Err(TurtleError::Compile(CompileError::ChildrenRequired { .. }))
        ));
        assert!(matches!(
            compile_str("move 1\n    move 2"),
            Err(TurtleError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_tree_compiles_to_empty_program() {
        assert!(compile_tree(&Tree::new()).unwrap().is_empty());
    }
}
