use crate::caret::RunLayout;
use crate::document::CaretPosition;
use crate::formatter::StyledRun;
use crate::segment::SpanKind;

use super::{HostCaret, RichTextHost};

/// A rich text host kept entirely in memory.
///
/// Paragraphs hold styled runs the way a widget would. Every run replacement
/// reports a change notification, like a widget whose content setter fires
/// its changed event synchronously.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    paragraphs: Vec<Vec<StyledRun>>,
    caret: Option<HostCaret>,
    replace_count: usize,
}

impl MemoryHost {
    /// Load unstyled text: one plain run per non-empty line. Empty text is
    /// one empty paragraph, like a freshly created widget.
    pub fn from_text(text: &str) -> Self {
        let mut paragraphs: Vec<Vec<StyledRun>> = text
            .lines()
            .map(|line| {
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![unstyled(line)]
                }
            })
            .collect();
        if paragraphs.is_empty() {
            paragraphs.push(Vec::new());
        }
        Self {
            paragraphs,
            caret: None,
            replace_count: 0,
        }
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Runs currently shown in `paragraph`.
    pub fn runs(&self, paragraph: usize) -> &[StyledRun] {
        self.paragraphs.get(paragraph).map_or(&[], Vec::as_slice)
    }

    /// Number of `replace_runs` calls so far.
    pub const fn replace_count(&self) -> usize {
        self.replace_count
    }

    fn layout(&self, paragraph: usize) -> RunLayout {
        RunLayout::from_lengths(self.run_lengths(paragraph))
    }

    /// Place the caret at a plain offset, converted against the current runs.
    pub fn set_plain_caret(&mut self, paragraph: usize, plain_offset: usize) {
        let offset = self.layout(paragraph).plain_to_structured(plain_offset);
        self.caret = Some(HostCaret { paragraph, offset });
    }

    /// Current caret as a plain offset.
    pub fn plain_caret(&self) -> Option<CaretPosition> {
        let caret = self.caret?;
        let offset = self.layout(caret.paragraph).structured_to_plain(caret.offset);
        Some(CaretPosition::new(caret.paragraph, offset))
    }

    /// Insert `text` at the caret, inside the run that holds it, the way
    /// typing extends the surrounding run's style. The caret moves past the
    /// inserted text. `text` must not contain line breaks.
    ///
    /// Does nothing when there is no caret.
    pub fn type_text(&mut self, text: &str) {
        let Some(caret) = self.plain_caret() else {
            return;
        };
        let layout = self.layout(caret.line);
        let Some(runs) = self.paragraphs.get_mut(caret.line) else {
            return;
        };

        match layout.runs().find(|run| run.plain.end >= caret.offset) {
            Some(run) => {
                let target = &mut runs[run.index].text;
                let within = caret.offset - run.plain.start;
                let byte = target
                    .char_indices()
                    .nth(within)
                    .map_or(target.len(), |(b, _)| b);
                target.insert_str(byte, text);
            }
            None => match runs.last_mut() {
                Some(last) => last.text.push_str(text),
                None => runs.push(unstyled(text)),
            },
        }

        let offset = caret.offset + text.chars().count();
        self.set_plain_caret(caret.line, offset);
    }
}

fn unstyled(text: &str) -> StyledRun {
    StyledRun {
        text: text.to_string(),
        kind: SpanKind::PlainText,
        highlighted: false,
    }
}

impl RichTextHost for MemoryHost {
    fn paragraphs(&self) -> Vec<String> {
        self.paragraphs
            .iter()
            .map(|runs| runs.iter().map(|r| r.text.as_str()).collect())
            .collect()
    }

    fn caret(&self) -> Option<HostCaret> {
        self.caret
    }

    fn run_lengths(&self, paragraph: usize) -> Vec<usize> {
        self.runs(paragraph)
            .iter()
            .map(|r| r.text.chars().count())
            .collect()
    }

    fn replace_runs(&mut self, paragraph: usize, runs: &[StyledRun]) -> bool {
        if paragraph >= self.paragraphs.len() {
            self.paragraphs.resize_with(paragraph + 1, Vec::new);
        }
        self.paragraphs[paragraph] = runs.to_vec();
        self.replace_count += 1;
        true
    }

    fn set_caret(&mut self, paragraph: usize, offset: usize) {
        self.caret = Some(HostCaret { paragraph, offset });
    }
}
