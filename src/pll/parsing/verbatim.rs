//! Verbatim blocks
//!
//!     A line carrying the verbatim token is followed by one raw block per token. A block is
//!     every physical line up to (and consuming) the next whitespace-only line. Lines are read
//!     in [`PullMode::Raw`], so comment characters inside a block are kept.
//!
//!     The block is dedented by its own prefix: the leading whitespace of its first non-blank
//!     line. That prefix has nothing to do with the indentation of the structural lines.
//!
//!         handler <<<
//!             if x:           <- prefix is "\t\t" (say)
//!                 go()
//!                             <- blank line ends the block
//!
//!     The result is `"if x:\n\tgo()"`.

use super::error::{ParseError, ParseErrorKind};
use super::source::{LineSource, PullMode, SourceLine};

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Strip the common prefix from a block's lines and join them with `\n`.
///
/// Whitespace-only lines inside the block come out empty; leading and trailing ones are
/// dropped. A non-blank line that does not start with the prefix is a
/// [`ParseErrorKind::VerbatimIndentation`] error, reported at `first_line + index`.
pub fn dedent(lines: &[String], first_line: usize) -> Result<String, ParseError> {
    let Some(start) = lines.iter().position(|l| !is_blank(l)) else {
        return Ok(String::new());
    };
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);

    let first = &lines[start];
    let prefix_len = first.len() - first.trim_start().len();
    let prefix = &first[..prefix_len];

    let mut out = Vec::with_capacity(end - start);
    for (offset, line) in lines[start..end].iter().enumerate() {
        if is_blank(line) {
            out.push("");
            continue;
        }
        match line.strip_prefix(prefix) {
            Some(rest) => out.push(rest),
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::VerbatimIndentation,
                    first_line + start + offset,
                ))
            }
        }
    }
    Ok(out.join("\n"))
}

/// Drain one raw block from `source`.
///
/// `expected` and `read` describe the owning line's blocks for the error message;
/// `opened_at` is that line's number, reported if the input ends inside the block.
pub(super) fn read_block<I>(
    source: &mut LineSource<I>,
    opened_at: usize,
    expected: usize,
    read: usize,
) -> Result<String, ParseError>
where
    I: Iterator<Item = String>,
{
    let mut lines: Vec<String> = Vec::new();
    let mut first_line = None;
    loop {
        let Some(SourceLine { number, text }) = source.next(PullMode::Raw) else {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedVerbatim { expected, read },
                opened_at,
            ));
        };
        if is_blank(&text) {
            break;
        }
        first_line.get_or_insert(number);
        lines.push(text);
    }
    dedent(&lines, first_line.unwrap_or(opened_at + 1))
}
