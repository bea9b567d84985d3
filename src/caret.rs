//! Caret translation between plain and structured offsets.
//!
//! A rendered line is a sequence of runs, one per span. Each run occupies one
//! structural slot where it opens and one where it closes, in addition to its
//! characters. A caret inside run `k` therefore sits `2k + 1` positions
//! further along in the structured representation than in the plain string.

use std::ops::Range;

use crate::segment::Span;

/// Structural slots spent entering a run.
pub const RUN_OPEN: usize = 1;
/// Structural slots spent leaving a run.
pub const RUN_CLOSE: usize = 1;

/// Which way a caret offset should be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretDirection {
    /// The observed offset indexes the raw line.
    PlainToStructured,
    /// The observed offset indexes the run-annotated representation.
    StructuredToPlain,
}

/// One run's position in both coordinate systems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub index: usize,
    /// Characters covered in the plain line.
    pub plain: Range<usize>,
    /// Positions covered by the run's content in the structured line.
    pub structured: Range<usize>,
}

/// Character lengths of the runs in one paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunLayout {
    lengths: Vec<usize>,
}

impl RunLayout {
    pub fn from_spans(spans: &[Span]) -> Self {
        Self {
            lengths: spans.iter().map(Span::len).collect(),
        }
    }

    /// Layout reported by a host widget, which may not match any segmentation.
    pub fn from_lengths(lengths: impl IntoIterator<Item = usize>) -> Self {
        Self {
            lengths: lengths.into_iter().collect(),
        }
    }

    pub fn run_count(&self) -> usize {
        self.lengths.len()
    }

    /// Total plain length of the paragraph.
    pub fn plain_len(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// Iterate runs with their plain and structured ranges.
    pub fn runs(&self) -> impl Iterator<Item = Run> + '_ {
        self.lengths
            .iter()
            .scan(0usize, |plain_start, &len| {
                let start = *plain_start;
                *plain_start += len;
                Some((start, len))
            })
            .enumerate()
            .map(|(index, (start, len))| {
                let overhead = RUN_OPEN * (index + 1) + RUN_CLOSE * index;
                Run {
                    index,
                    plain: start..start + len,
                    structured: start + overhead..start + len + overhead,
                }
            })
    }

    /// Translate a plain offset to a structured one.
    ///
    /// The caret belongs to the first run whose end is at or past it; an
    /// offset past the last run is placed in the last run. With no runs the
    /// offset is returned unchanged.
    pub fn plain_to_structured(&self, plain_offset: usize) -> usize {
        let mut result = plain_offset;
        let mut consumed = 0;
        for (i, &len) in self.lengths.iter().enumerate() {
            let last = i + 1 == self.lengths.len();
            if consumed + len >= plain_offset || last {
                result += RUN_OPEN;
                break;
            }
            result += RUN_OPEN + RUN_CLOSE;
            consumed += len;
        }
        result
    }

    /// Translate a structured offset back to a plain one.
    ///
    /// The caret belongs to the first run whose structured end is at or past
    /// it, or to the last run. Offsets that land on a structural slot before
    /// the first run saturate at zero.
    pub fn structured_to_plain(&self, structured_offset: usize) -> usize {
        let mut result = structured_offset;
        let count = self.run_count();
        for run in self.runs() {
            if run.structured.end >= structured_offset || run.index + 1 == count {
                return result.saturating_sub(RUN_OPEN);
            }
            result = result.saturating_sub(RUN_OPEN + RUN_CLOSE);
        }
        result
    }
}

/// Translate a plain caret offset against the runs of `spans`.
pub fn plain_to_structured(spans: &[Span], plain_offset: usize) -> usize {
    RunLayout::from_spans(spans).plain_to_structured(plain_offset)
}

/// Translate a structured caret offset against the runs of `spans`.
pub fn structured_to_plain(spans: &[Span], structured_offset: usize) -> usize {
    RunLayout::from_spans(spans).structured_to_plain(structured_offset)
}

/// Translate an observed caret offset in the given direction.
pub fn remap_caret(spans: &[Span], observed: usize, direction: CaretDirection) -> usize {
    match direction {
        CaretDirection::PlainToStructured => plain_to_structured(spans, observed),
        CaretDirection::StructuredToPlain => structured_to_plain(spans, observed),
    }
}
