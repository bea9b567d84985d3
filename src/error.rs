//! Error types for segmentation.

use thiserror::Error;

use crate::segment::SpanKind;

/// Result type alias for tagline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by span construction and line segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A span was built from an empty string, or from a bare marker.
    #[error("{kind} span cannot be empty")]
    EmptySpan { kind: SpanKind },

    /// A hashtag or username contained a non-word character.
    #[error("{kind} cannot contain non-word characters: {content:?}")]
    InvalidTag { kind: SpanKind, content: String },

    /// Two matches in the same line overlapped after sorting.
    ///
    /// Token classification makes matches disjoint, so this only fires if the
    /// scanner itself is broken.
    #[error("matches overlap: previous match ends at {previous_end}, next starts at {next_start}")]
    OverlappingMatches {
        previous_end: usize,
        next_start: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_span_kind() {
        let err = Error::InvalidTag {
            kind: SpanKind::HashTag,
            content: "hi!".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "hashtag cannot contain non-word characters: \"hi!\""
        );
    }

    #[test]
    fn test_overlap_reports_both_positions() {
        let err = Error::OverlappingMatches {
            previous_end: 4,
            next_start: 2,
        };
        assert_eq!(
            err.to_string(),
            "matches overlap: previous match ends at 4, next starts at 2"
        );
    }
}
