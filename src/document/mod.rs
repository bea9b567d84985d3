//! Segmented documents.
//!
//! A document is an ordered list of lines, each holding the spans its raw
//! text segments into. Documents are rebuilt from scratch on every edit.

mod parser;
mod types;

pub use parser::parse_line;
pub use types::{CaretPosition, Document, Line};
