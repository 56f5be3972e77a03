//! The turtle language: command trees compiled to an instruction AST
//!
//!     A turtle program is pll text whose labels are commands:
//!
//!         at 10, 10
//!             repeat 4
//!                 move 5
//!                 turn 90
//!         center
//!
//!     [`compile`] turns the command tree into a [`Program`] of [`Instr`]s. A program is
//!     executed by walking it against a [`TurtleBackend`]; the [`MockTurtle`] backend records
//!     the bounding box of every visited position. [`Program::render`] gives the code tree
//!     view, one statement per line, for debugging.
//!
//!     Layout:
//!         token.rs      logos tokens of a statement label
//!         command.rs    decoding a label into a [`Command`]
//!         instr.rs      [`Instr`] and [`Program`]
//!         compiler.rs   tree walk, arity checks, save/restore elision
//!         render.rs     code tree and `(depth, text)` flattening
//!         backend.rs    [`TurtleBackend`], the interpreter, [`RecordingBackend`]
//!         mock.rs       [`MockTurtle`] and [`compute_bounds`]

mod backend;
mod command;
mod compiler;
mod error;
mod instr;
mod mock;
mod render;
mod token;

pub use backend::{execute, Call, RecordingBackend, TurtleBackend};
pub use command::{command_name, Command};
pub use compiler::{compile, compile_str, compile_tree};
pub use error::{CompileError, TurtleError};
pub use instr::{Instr, Program};
pub use mock::{compute_bounds, compute_bounds_with, Bounds, MockTurtle};
pub use render::{code_tree, render_code_tree, statement};
pub use token::{tokenize, Token};
