// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. caret::CaretDirection)
    clippy::module_name_repetitions
)]

//! # tagline
//!
//! Hashtag and username highlighting for free-form text.
//!
//! tagline splits each line into typed spans (plain text, `#hashtag`,
//! `@username`) and keeps the caret on the same character when a widget
//! replaces its content with the highlighted runs.
//!
//! ## Architecture
//!
//! - **Core**: pure functions from a line to spans, and from a caret offset
//!   to its counterpart in the run-annotated representation
//! - **Adapter**: a view model plus an edit-cycle driver for rich text
//!   widgets
//!
//! ## Modules
//!
//! - [`segment`]: Span validation and line segmentation
//! - [`document`]: Segmented lines and documents
//! - [`caret`]: Plain/structured caret translation
//! - [`formatter`]: View model over a document
//! - [`highlighter`]: Edit-cycle driver and widget seam
//! - [`config`]: CLI defaults files
//! - [`render`]: CLI output formats
//! - [`perf`]: Timing and debug event log

pub mod caret;
pub mod config;
pub mod document;
pub mod error;
pub mod formatter;
pub mod highlighter;
pub mod perf;
pub mod render;
pub mod segment;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::caret::{CaretDirection, RunLayout, remap_caret};
    pub use crate::document::{CaretPosition, Document, Line};
    pub use crate::formatter::{Formatter, StyledRun};
    pub use crate::highlighter::{Highlighter, RichTextHost};
    pub use crate::segment::{Span, SpanKind, segment};
}
