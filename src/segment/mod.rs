//! Line segmentation into plain text, hashtag and username spans.
//!
//! This module handles:
//! - Locating hashtag and username tokens
//! - Validating typed spans
//! - Splitting a line into spans that reconstruct it exactly

mod scanner;
mod span;

pub use span::{Span, SpanKind};

use scanner::Match;

use crate::error::{Error, Result};

/// Split one line into an ordered sequence of spans.
///
/// Concatenating the spans' full text gives back `line`. An empty line
/// yields no spans.
///
/// # Example
///
/// ```
/// use tagline::segment::{segment, SpanKind};
///
/// let spans = segment("hi @you #tag").unwrap();
/// assert_eq!(spans.len(), 4);
/// assert_eq!(spans[1].kind(), SpanKind::UserName);
/// assert_eq!(spans[3].full_text(), "#tag");
/// ```
///
/// # Errors
///
/// Returns [`Error::OverlappingMatches`] if the scanner produced overlapping
/// matches. Ordinary input never does this.
pub fn segment(line: &str) -> Result<Vec<Span>> {
    let mut matches = scanner::scan(line);
    matches.sort_by_key(|m| m.start);
    check_disjoint(&matches)?;

    let mut spans = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;
    for m in &matches {
        if m.bytes.start > cursor {
            spans.push(Span::plain(&line[cursor..m.bytes.start])?);
        }
        spans.push(Span::new(m.kind, &line[m.bytes.clone()])?);
        cursor = m.bytes.end;
    }
    if cursor < line.len() {
        spans.push(Span::plain(&line[cursor..])?);
    }

    tracing::debug!(
        chars = line.chars().count(),
        matches = matches.len(),
        spans = spans.len(),
        "segmented line"
    );
    Ok(spans)
}

fn check_disjoint(matches: &[Match]) -> Result<()> {
    for pair in matches.windows(2) {
        if pair[0].end >= pair[1].start {
            return Err(Error::OverlappingMatches {
                previous_end: pair[0].end,
                next_start: pair[1].start,
            });
        }
    }
    Ok(())
}
