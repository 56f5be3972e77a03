//! Output formats for pll trees
//!
//! Every format implements [`Formatter`] and is looked up by name in a [`FormatRegistry`]:
//! - pll: indented text that parses back into the same tree
//! - treeviz: box-drawing tree view
//! - outline: indented listing with quoted labels
//! - json / yaml: serialized [`TreeSnapshot`](crate::pll::ast::TreeSnapshot)s

pub mod outline;
pub mod pll;
pub mod registry;
pub mod structured;
pub mod treeviz;

pub use outline::{to_outline_str, OutlineFormatter};
pub use pll::{to_pll_string, PllFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use structured::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
