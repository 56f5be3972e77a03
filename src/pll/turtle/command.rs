//! Command decomposition
//!
//!     A command node's label is `name [arg, arg, ...]`. The name is matched without regard to
//!     case and must be followed by a blank before any argument (`move10` is rejected);
//!     arguments are comma separated numbers. Decomposition happens on demand, each time
//!     a node is compiled or a sibling is inspected for elision.

use super::error::CompileError;
use super::token::{tokenize, Token};

/// One decoded turtle statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Move(f64),
    Turn(f64),
    Center,
    At(f64, f64),
    Repeat(u32),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Move(_) => "move",
            Command::Turn(_) => "turn",
            Command::Center => "center",
            Command::At(..) => "at",
            Command::Repeat(_) => "repeat",
        }
    }

    /// True for commands that introduce a block (`at`, `repeat`).
    pub fn takes_block(&self) -> bool {
        matches!(self, Command::At(..) | Command::Repeat(_))
    }

    /// Decode a statement label.
    pub fn parse(statement: &str) -> Result<Command, CompileError> {
        let name = command_name(statement).ok_or_else(|| CompileError::EmptyCommand {
            statement: statement.to_string(),
        })?;
        let invalid = |reason: String| CompileError::InvalidArgument {
            command: name.clone(),
            statement: statement.to_string(),
            reason,
        };

        let arity = match name.as_str() {
            "move" | "turn" | "repeat" => 1,
            "at" => 2,
            "center" => 0,
            _ => {
                return Err(CompileError::UnknownCommand {
                    command: name.clone(),
                    statement: statement.to_string(),
                })
            }
        };

        let after_name = &statement.trim_start()[name.len()..];
        if after_name.starts_with(|c: char| !c.is_whitespace()) {
            return Err(invalid(format!("expected a blank after '{name}'")));
        }

        let args = split_args(statement).map_err(&invalid)?;
        if args.len() != arity {
            return Err(invalid(format!(
                "expected {arity} argument(s), found {}",
                args.len()
            )));
        }
        let number = |text: &str| -> Result<f64, CompileError> {
            text.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| invalid(format!("'{text}' is not a finite number")))
        };

        Ok(match name.as_str() {
            "move" => Command::Move(number(args[0])?),
            "turn" => Command::Turn(number(args[0])?),
            "at" => Command::At(number(args[0])?, number(args[1])?),
            "repeat" => Command::Repeat(args[0].parse::<u32>().map_err(|_| {
                invalid(format!("'{}' is not a non-negative integer", args[0]))
            })?),
            _ => Command::Center,
        })
    }
}

/// Lowercased command name, if the statement starts with one.
pub fn command_name(statement: &str) -> Option<String> {
    match tokenize(statement).first() {
        Some(Ok((Token::Word, name))) => Some(name.to_ascii_lowercase()),
        _ => None,
    }
}

// Arguments after the command name: Number (Comma Number)*
fn split_args(statement: &str) -> Result<Vec<&str>, String> {
    let mut args = Vec::new();
    let mut expect_value = true;
    for token in tokenize(statement).into_iter().skip(1) {
        match token {
            Ok((Token::Number, text)) if expect_value => {
                args.push(text);
                expect_value = false;
            }
            Ok((Token::Comma, _)) if !expect_value => expect_value = true,
            Ok((Token::Comma, _)) => return Err("missing argument before ','".to_string()),
            Ok((_, text)) | Err(text) => return Err(format!("unexpected '{text}'")),
        }
    }
    if expect_value && !args.is_empty() {
        return Err("trailing ','".to_string());
    }
    Ok(args)
}
