//! View model over a segmented document.
//!
//! The formatter turns host text into styled runs and remembers where the
//! caret should land once those runs replace the host's content.

use serde::Serialize;

use crate::caret::CaretDirection;
use crate::document::{CaretPosition, Document};
use crate::error::Result;
use crate::segment::{Span, SpanKind};

/// A span as the host should render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub kind: SpanKind,
    pub highlighted: bool,
}

impl From<&Span> for StyledRun {
    fn from(span: &Span) -> Self {
        Self {
            text: span.full_text().to_string(),
            kind: span.kind(),
            highlighted: span.kind().is_highlighted(),
        }
    }
}

/// Holds the current document and the caret recomputed for it.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    document: Document,
    caret: Option<CaretPosition>,
    adjusted_caret: Option<usize>,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the document from `lines` and recompute the caret.
    ///
    /// `caret` carries a plain offset within its line, or `None` when the
    /// caret is not inside any line.
    ///
    /// # Errors
    ///
    /// Propagates segmentation failures; the previous state is kept.
    pub fn handle_text_changed<I, S>(
        &mut self,
        lines: I,
        caret: Option<CaretPosition>,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let document = Document::from_lines(lines)?;
        let adjusted = document.remap_caret(caret, CaretDirection::PlainToStructured);
        if let Some(caret) = caret {
            if adjusted.is_none() {
                tracing::warn!(
                    line = caret.line,
                    line_count = document.line_count(),
                    "caret line outside document"
                );
            }
        }

        self.document = document;
        self.caret = caret;
        self.adjusted_caret = adjusted;
        Ok(())
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Runs per line, in order.
    pub fn formatted_text(&self) -> Vec<Vec<StyledRun>> {
        self.document
            .lines()
            .iter()
            .map(|line| line.spans().iter().map(StyledRun::from).collect())
            .collect()
    }

    /// Line holding the caret, if any.
    pub fn caret_line(&self) -> Option<usize> {
        self.caret.map(|c| c.line)
    }

    /// Structured caret offset for the current runs.
    pub const fn caret_offset(&self) -> Option<usize> {
        self.adjusted_caret
    }
}
