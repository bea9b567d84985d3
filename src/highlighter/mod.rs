//! Edit-cycle driver for rich text widgets.
//!
//! A widget reports its paragraphs and caret through [`RichTextHost`]; the
//! [`Highlighter`] re-segments everything, writes the styled runs back and
//! puts the caret on the same character it was on before.
//!
//! Writing runs back makes most widgets raise another "text changed"
//! notification from inside the edit. Those nested notifications are
//! suppressed for the duration of the cycle.

mod memory;

pub use memory::MemoryHost;

use crate::caret::RunLayout;
use crate::document::CaretPosition;
use crate::error::Result;
use crate::formatter::{Formatter, StyledRun};

/// Caret as a widget reports it: a paragraph plus a structured offset
/// measured against the widget's current runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCaret {
    pub paragraph: usize,
    pub offset: usize,
}

/// The seam to a rich text widget.
pub trait RichTextHost {
    /// Plain text of every paragraph.
    fn paragraphs(&self) -> Vec<String>;

    /// Current caret, or `None` if it is outside every paragraph.
    fn caret(&self) -> Option<HostCaret>;

    /// Character lengths of the runs currently shown in `paragraph`.
    fn run_lengths(&self, paragraph: usize) -> Vec<usize>;

    /// Replace the runs of `paragraph`.
    ///
    /// Returns true when the widget fires a content-changed notification in
    /// response, which the caller must dispatch back into the highlighter.
    fn replace_runs(&mut self, paragraph: usize, runs: &[StyledRun]) -> bool;

    /// Move the caret to a structured offset in `paragraph`.
    fn set_caret(&mut self, paragraph: usize, offset: usize);
}

/// Result of one change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Runs were rebuilt. `caret` holds the structured caret that was set.
    Applied { caret: Option<CaretPosition> },
    /// The notification arrived while an edit was already in progress.
    Suppressed,
}

/// Re-highlights a host on every change notification.
#[derive(Debug)]
pub struct Highlighter<H> {
    host: H,
    formatter: Formatter,
    editing: bool,
    suppressed: usize,
}

impl<H: RichTextHost> Highlighter<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            formatter: Formatter::new(),
            editing: false,
            suppressed: 0,
        }
    }

    /// Handle a content-changed notification from the host.
    ///
    /// # Errors
    ///
    /// Propagates segmentation failures. The guard is released either way.
    pub fn on_text_changed(&mut self) -> Result<EditOutcome> {
        if self.editing {
            self.suppressed += 1;
            tracing::trace!("suppressed nested text change");
            return Ok(EditOutcome::Suppressed);
        }

        self.editing = true;
        let outcome = self.apply_edit();
        self.editing = false;
        outcome
    }

    fn apply_edit(&mut self) -> Result<EditOutcome> {
        let paragraphs = self.host.paragraphs();
        let caret = self.host.caret().map(|caret| {
            let layout = RunLayout::from_lengths(self.host.run_lengths(caret.paragraph));
            CaretPosition::new(caret.paragraph, layout.structured_to_plain(caret.offset))
        });

        self.formatter.handle_text_changed(&paragraphs, caret)?;

        for (index, runs) in self.formatter.formatted_text().iter().enumerate() {
            if self.host.replace_runs(index, runs) {
                self.on_text_changed()?;
            }
        }

        let caret = match (self.formatter.caret_line(), self.formatter.caret_offset()) {
            (Some(line), Some(offset)) => {
                self.host.set_caret(line, offset);
                Some(CaretPosition::new(line, offset))
            }
            _ => None,
        };
        tracing::debug!(
            paragraphs = paragraphs.len(),
            ?caret,
            "applied highlighting"
        );
        Ok(EditOutcome::Applied { caret })
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access for simulating user edits between notifications.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub const fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Nested notifications swallowed so far.
    pub const fn suppressed_count(&self) -> usize {
        self.suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SpanKind;

    #[test]
    fn test_nested_notifications_are_suppressed() {
        let host = MemoryHost::from_text("#a b\n@c");
        let mut highlighter = Highlighter::new(host);
        let outcome = highlighter.on_text_changed().unwrap();
        assert_eq!(outcome, EditOutcome::Applied { caret: None });
        // One nested notification per paragraph write.
        assert_eq!(highlighter.suppressed_count(), 2);
        assert_eq!(highlighter.host().replace_count(), 2);
    }

    #[test]
    fn test_runs_are_written_back_styled() {
        let mut highlighter = Highlighter::new(MemoryHost::from_text("hi #tag"));
        highlighter.on_text_changed().unwrap();
        let runs = highlighter.host().runs(0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].kind, SpanKind::HashTag);
        assert!(runs[1].highlighted);
    }

    #[test]
    fn test_caret_follows_the_same_character() {
        let text = "@you #hello there #welcome to @ our";
        let mut host = MemoryHost::from_text(text);
        host.set_plain_caret(0, 28);
        let mut highlighter = Highlighter::new(host);

        let outcome = highlighter.on_text_changed().unwrap();
        assert_eq!(
            outcome,
            EditOutcome::Applied {
                caret: Some(CaretPosition::new(0, 39))
            }
        );
        assert_eq!(highlighter.host().plain_caret(), Some(CaretPosition::new(0, 28)));
    }

    #[test]
    fn test_guard_released_after_each_cycle() {
        let mut highlighter = Highlighter::new(MemoryHost::from_text("x"));
        highlighter.on_text_changed().unwrap();
        let again = highlighter.on_text_changed().unwrap();
        assert!(matches!(again, EditOutcome::Applied { .. }));
    }
}
