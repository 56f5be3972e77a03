//! # pll
//!
//! A parser for the PLL ("Python like language") indentation format, and a compiler for the
//! turtle drawing language that is written in it.
//!
//! File Layout
//!
//!     src/pll
//!       ├── ast        The tree model shared by parser output and compiler input/output
//!       ├── parsing    Text to tree: line source, line classification, verbatim blocks
//!       ├── config     Parser and renderer configuration, layered loading
//!       ├── turtle     Tree to program: commands, compiler, code tree, interpreter
//!       └── formats    Tree serialization (pll, treeviz, outline, json, yaml)
//!
//! The parser and the compiler never touch a UI toolkit. Collaborators feed text in, read the
//! resulting tree back, and hand compiled programs to anything implementing
//! [`TurtleBackend`](pll::turtle::TurtleBackend).

pub mod pll;
