//! Errors raised while compiling a turtle program

use crate::pll::parsing::ParseError;
use std::fmt;

/// A semantic error in one statement. Compilation stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The command name is not part of the turtle vocabulary.
    UnknownCommand { command: String, statement: String },
    /// `move`, `turn` and `center` take no block.
    ChildrenForbidden { command: String, statement: String },
    /// `at` and `repeat` need a block.
    ChildrenRequired { command: String, statement: String },
    /// Wrong number of arguments, or an argument of the wrong kind.
    InvalidArgument {
        command: String,
        statement: String,
        reason: String,
    },
    /// The statement does not start with a command name.
    EmptyCommand { statement: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::UnknownCommand { command, statement } => {
                write!(f, "Unknown command '{command}' in '{statement}'")
            }
            CompileError::ChildrenForbidden { command, statement } => write!(
                f,
                "Malformed command '{statement}': '{command}' cannot have children"
            ),
            CompileError::ChildrenRequired { command, statement } => write!(
                f,
                "Malformed command '{statement}': '{command}' must have children"
            ),
            CompileError::InvalidArgument {
                command,
                statement,
                reason,
            } => write!(
                f,
                "Malformed command '{statement}': invalid arguments for '{command}': {reason}"
            ),
            CompileError::EmptyCommand { statement } => {
                write!(f, "Statement '{statement}' has no command name")
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Failure of a text-to-program helper: either stage can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurtleError {
    Parse(ParseError),
    Compile(CompileError),
}

impl fmt::Display for TurtleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurtleError::Parse(e) => write!(f, "{e}"),
            TurtleError::Compile(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TurtleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurtleError::Parse(e) => Some(e),
            TurtleError::Compile(e) => Some(e),
        }
    }
}

impl From<ParseError> for TurtleError {
    fn from(e: ParseError) -> Self {
        TurtleError::Parse(e)
    }
}

impl From<CompileError> for TurtleError {
    fn from(e: CompileError) -> Self {
        TurtleError::Compile(e)
    }
}
