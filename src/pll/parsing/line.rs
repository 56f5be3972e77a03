//! Line classification: indentation, level, mark and verbatim tokens
//!
//!     The first structural line fixes the common prefix (its run of leading tabs). Every
//!     later line must start with at least that many tabs; its level is the number of tabs
//!     beyond the prefix, plus one when a synthetic root sits above the input.
//!
//!     After indentation comes the content, where two independent tokens are recognised:
//!
//!     - the mark token, only at the very start of the content (`* Foo`), which flags the node
//!       for the tag mapping. Whitespace after the token is dropped. Escape characters in
//!       front of it (`\* Foo`) make it literal text, and one of them is removed.
//!     - the verbatim token, anywhere in the content (`handler <<<`). Each occurrence means
//!       one raw block follows the line. The tokens are removed from the label.

use super::error::{ParseError, ParseErrorKind};
use super::source::SourceLine;
use crate::pll::config::ParserConfig;

/// A structural line after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub number: usize,
    pub level: usize,
    /// Label text. May be empty only when `verbatim_count > 0`.
    pub content: String,
    pub marked: bool,
    pub verbatim_count: usize,
}

/// Stateful classifier: remembers the common prefix once the first line has been seen.
pub struct LineClassifier<'c> {
    config: &'c ParserConfig,
    prefix_tabs: Option<usize>,
    level_offset: usize,
}

impl<'c> LineClassifier<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self {
            config,
            prefix_tabs: None,
            level_offset: usize::from(config.root_label.is_some()),
        }
    }

    pub fn classify(&mut self, line: &SourceLine) -> Result<ParsedLine, ParseError> {
        let error = |kind| ParseError::new(kind, line.number);

        let indent_len = line
            .text
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| i)
            .unwrap_or(line.text.len());
        let (indent, rest) = line.text.split_at(indent_len);

        let tabs = indent.chars().filter(|&c| c == '\t').count();
        if tabs != indent.chars().count() {
            if tabs > 0 {
                return Err(error(ParseErrorKind::MixedIndentation));
            }
            return Err(error(ParseErrorKind::IndentationMismatch {
                expected_tabs: self.prefix_tabs.unwrap_or(0),
                found: indent.to_string(),
            }));
        }

        let prefix = *self.prefix_tabs.get_or_insert(tabs);
        if tabs < prefix {
            return Err(error(ParseErrorKind::IndentationMismatch {
                expected_tabs: prefix,
                found: indent.to_string(),
            }));
        }

        let (marked, content) = self.split_mark(rest);

        let token = self.config.verbatim_token.as_str();
        let verbatim_count = if token.is_empty() {
            0
        } else {
            content.matches(token).count()
        };
        let content = if verbatim_count > 0 {
            // Each removed token leaves at most one space between the remaining pieces.
            content
                .split(token)
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            content.to_string()
        };

        if content.is_empty() {
            if marked {
                return Err(error(ParseErrorKind::EmptyMarkLabel));
            }
            if verbatim_count == 0 {
                return Err(error(ParseErrorKind::EmptyLabel));
            }
        }

        Ok(ParsedLine {
            number: line.number,
            level: tabs - prefix + self.level_offset,
            content,
            marked,
            verbatim_count,
        })
    }

    fn split_mark<'l>(&self, rest: &'l str) -> (bool, &'l str) {
        let mark = self.config.mark_token.as_str();
        if mark.is_empty() {
            return (false, rest);
        }
        if let Some(after) = rest.strip_prefix(mark) {
            return (true, after.trim_start());
        }
        let escape = self.config.escape_char;
        if rest.trim_start_matches(escape).starts_with(mark) {
            return (false, &rest[escape.len_utf8()..]);
        }
        (false, rest)
    }
}
