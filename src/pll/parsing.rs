//! Text to tree: the pll indentation parser
//!
//!     pll is a line oriented format. Every structural line becomes a node, and its place in
//!     the tree comes from its indentation:
//!
//!         top
//!             peach
//!                 fuzzy
//!                         navel       <- continuation: label becomes "fuzzy navel"
//!                 pink
//!             apple
//!
//! Pipeline
//!
//!     1. [`LineSource`](source::LineSource) hands out physical lines on request. Each request
//!        carries a [`PullMode`]: `SkipBlank` returns the next line that still has content
//!        after comment stripping, `Raw` returns the next physical line untouched. Raw mode is
//!        only used while draining a verbatim block, then the parser goes back to
//!        `SkipBlank` without losing or repeating a line.
//!     2. The [line classifier](line) validates indentation, computes the level relative
//!        to the common prefix (set by the first line), and picks out the mark and verbatim
//!        tokens.
//!     3. The [parser](parser) moves a cursor (current node, current level) through the
//!        tree and attaches each line as child, sibling, ancestor's sibling or continuation.
//!     4. [Verbatim blocks](verbatim) are read raw up to the next blank line and dedented by
//!        their own common prefix.
//!
//! Indentation
//!
//!     Indentation is tabs only. A space anywhere in a line's leading whitespace is an error
//!     (mixed indentation if tabs are present too, an indentation mismatch otherwise). Lines
//!     may not be indented less than the first line.
//!
//! Errors
//!
//!     Every problem is fatal and returns a [`ParseError`] with the physical line number. No
//!     partial tree is ever returned.

mod error;
mod line;
mod parser;
mod source;
mod verbatim;

pub use error::{format_source_context, ParseError, ParseErrorKind};
pub use line::{LineClassifier, ParsedLine};
pub use parser::{parse, parse_lines, parse_with, ParseResult};
pub use source::{LineSource, PullMode, SourceLine};
pub use verbatim::dedent;
