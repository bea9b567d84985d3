//! Core document types.

use crate::caret::{CaretDirection, RunLayout, remap_caret};
use crate::segment::Span;

/// A caret location: line index plus an offset within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretPosition {
    /// Zero-based line (paragraph) index.
    pub line: usize,
    /// Zero-based character offset within the line.
    pub offset: usize,
}

impl CaretPosition {
    pub const fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// One segmented line.
///
/// The spans' full text concatenates back to the raw line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub(crate) const fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Reconstruct the raw line.
    pub fn text(&self) -> String {
        self.spans.iter().map(Span::full_text).collect()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.spans.iter().map(Span::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Run layout for caret translation.
    pub fn layout(&self) -> RunLayout {
        RunLayout::from_spans(&self.spans)
    }

    /// Number of spans rendered highlighted.
    pub fn highlighted_count(&self) -> usize {
        self.spans
            .iter()
            .filter(|s| s.kind().is_highlighted())
            .count()
    }
}

/// A segmented document: every line of the host text, rebuilt on each edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<Line>,
}

impl Document {
    /// Create an empty document.
    pub const fn empty() -> Self {
        Self { lines: Vec::new() }
    }

    pub(crate) const fn from_parsed(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Reconstruct the text, joining lines with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Translate a caret against the line it sits in.
    ///
    /// Returns `None` when there is no caret, or the caret's line does not
    /// exist in this document.
    pub fn remap_caret(
        &self,
        caret: Option<CaretPosition>,
        direction: CaretDirection,
    ) -> Option<usize> {
        let caret = caret?;
        let line = self.line(caret.line)?;
        Some(remap_caret(line.spans(), caret.offset, direction))
    }
}
