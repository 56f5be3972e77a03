//! Line source with a per-request pull mode
//!
//!     The parser and the verbatim reader share one cursor over the input. Each call to
//!     [`LineSource::next`] says what kind of line it wants:
//!
//!     - [`PullMode::SkipBlank`]: comments are stripped, trailing whitespace removed, and lines
//!       left empty are skipped. Used for every structural line.
//!     - [`PullMode::Raw`]: the next physical line, exactly as written. Used while a verbatim
//!       block is open, so blank lines (the terminator) and `#` text are seen as they are.
//!
//!     Lines skipped in `SkipBlank` mode are consumed; switching modes never replays or drops
//!     a line.

/// What the caller wants from the next pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullMode {
    SkipBlank,
    Raw,
}

/// One line handed out by a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based physical line number.
    pub number: usize,
    /// Raw text in `Raw` mode; comment-stripped, right-trimmed text in `SkipBlank` mode.
    pub text: String,
}

/// Resumable cursor over physical lines.
pub struct LineSource<I> {
    lines: I,
    consumed: usize,
    comment_char: char,
    escape_char: char,
}

impl<I> LineSource<I>
where
    I: Iterator<Item = String>,
{
    pub fn new<L>(lines: L, comment_char: char, escape_char: char) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            consumed: 0,
            comment_char,
            escape_char,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Pull the next line in the given mode, or `None` at end of input.
    pub fn next(&mut self, mode: PullMode) -> Option<SourceLine> {
        loop {
            let raw = self.lines.next()?;
            self.consumed += 1;
            let raw = raw.strip_suffix('\r').map(str::to_string).unwrap_or(raw);
            match mode {
                PullMode::Raw => {
                    return Some(SourceLine {
                        number: self.consumed,
                        text: raw,
                    })
                }
                PullMode::SkipBlank => {
                    let text = strip_comment(&raw, self.comment_char, self.escape_char);
                    let text = text.trim_end();
                    if text.is_empty() {
                        continue;
                    }
                    return Some(SourceLine {
                        number: self.consumed,
                        text: text.to_string(),
                    });
                }
            }
        }
    }
}

/// Remove an unescaped comment and everything after it.
///
/// `escape` directly before `comment` keeps a literal comment character; the escape itself is
/// dropped. Any other use of the escape character is left alone.
pub(super) fn strip_comment(line: &str, comment: char, escape: char) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == escape && chars.peek() == Some(&comment) {
            out.push(comment);
            chars.next();
        } else if c == comment {
            break;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(text: &str) -> LineSource<std::vec::IntoIter<String>> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        LineSource::new(lines, '#', '\\')
    }

    #[test]
    fn test_skip_blank_skips_empty_and_comment_lines() {
        let mut src = source("\n# only a comment\n\tfirst   # trailing\n\n\tsecond");
        let first = src.next(PullMode::SkipBlank).unwrap();
        assert_eq!(first.number, 3);
        assert_eq!(first.text, "\tfirst");
        let second = src.next(PullMode::SkipBlank).unwrap();
        assert_eq!(second.number, 5);
        assert_eq!(second.text, "\tsecond");
        assert_eq!(src.next(PullMode::SkipBlank), None);
    }

    #[test]
    fn test_raw_mode_returns_lines_untouched() {
        let mut src = source("handler <<<\n\t# not a comment\n\n\tnext");
        assert_eq!(src.next(PullMode::SkipBlank).unwrap().text, "handler <<<");
        assert_eq!(src.next(PullMode::Raw).unwrap().text, "\t# not a comment");
        assert_eq!(src.next(PullMode::Raw).unwrap().text, "");
        let next = src.next(PullMode::SkipBlank).unwrap();
        assert_eq!((next.number, next.text.as_str()), (4, "\tnext"));
        assert_eq!(src.consumed(), 4);
    }

    #[test]
    fn test_carriage_returns_are_dropped() {
        let mut src = LineSource::new(vec!["a\r".to_string(), "b".to_string()], '#', '\\');
        assert_eq!(src.next(PullMode::Raw).unwrap().text, "a");
        assert_eq!(src.next(PullMode::Raw).unwrap().text, "b");
    }

    #[test]
    fn test_strip_comment_respects_escape() {
        assert_eq!(strip_comment("color \\#fff # hex", '#', '\\'), "color #fff ");
        assert_eq!(strip_comment("path c:\\dir", '#', '\\'), "path c:\\dir");
        assert_eq!(strip_comment("# all gone", '#', '\\'), "");
    }
}
