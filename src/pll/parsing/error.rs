//! Error types for the indentation parser

use std::fmt;

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line is indented with something other than the established tab prefix.
    IndentationMismatch { expected_tabs: usize, found: String },
    /// Tabs and spaces both appear in the line's indentation.
    MixedIndentation,
    /// The line cannot attach at its level (second child or sibling of the cursor node, or a
    /// jump above the top level).
    InvalidLevelTransition { from: usize, to: usize },
    /// End of input was reached while a verbatim block was still open.
    UnterminatedVerbatim { expected: usize, read: usize },
    /// A verbatim block line does not start with the block's own prefix.
    VerbatimIndentation,
    /// The mark token is not followed by a label.
    EmptyMarkLabel,
    /// Nothing is left of a node's label once tokens are removed.
    EmptyLabel,
    /// No structural line at all, and no synthetic root to return instead.
    EmptyInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::IndentationMismatch {
                expected_tabs,
                found,
            } => write!(
                f,
                "Invalid indentation: expected at least {expected_tabs} tab(s), found {found:?}"
            ),
            ParseErrorKind::MixedIndentation => {
                write!(f, "Invalid indentation: tabs and spaces are mixed")
            }
            ParseErrorKind::InvalidLevelTransition { from, to } => {
                write!(f, "Invalid level transition from level {from} to level {to}")
            }
            ParseErrorKind::UnterminatedVerbatim { expected, read } => write!(
                f,
                "Unterminated verbatim block: expected {expected} block(s), input ended inside block {}",
                read + 1
            ),
            ParseErrorKind::VerbatimIndentation => {
                write!(f, "Bad indentation inside verbatim block")
            }
            ParseErrorKind::EmptyMarkLabel => write!(f, "Marked line has no label"),
            ParseErrorKind::EmptyLabel => write!(f, "Line has no label"),
            ParseErrorKind::EmptyInput => write!(f, "Input contains no lines"),
        }
    }
}

/// A fatal parse error, located at a physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// 1-based physical line number; 0 when the input had no lines at all.
    pub line: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self { kind, line }
    }

    /// Full message with the surrounding source lines.
    pub fn with_context(&self, source: &str) -> String {
        if self.line == 0 {
            return self.to_string();
        }
        format!("{}\n\n{}", self, format_source_context(source, self.line))
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "Syntax error: {}", self.kind)
        } else {
            write!(f, "Syntax error at line {}: {}", self.line, self.kind)
        }
    }
}

impl std::error::Error for ParseError {}

/// Format source code context around an error line (1-based)
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// Tabs are shown as `→` so indentation problems are visible.
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (line_num, text) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!(
            "{} {:3} | {}\n",
            marker,
            line_num + 1,
            text.replace('\t', "→")
        ));
    }
    context
}
