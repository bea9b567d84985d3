//! Typed, validated spans of line content.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};

/// Tag content: word characters only, as the scanner defines them.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("word pattern compiles"));

/// Kind of text a span holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// Unstyled text.
    PlainText,
    /// `#` followed by word characters.
    HashTag,
    /// `@` followed by word characters.
    UserName,
}

impl SpanKind {
    /// Marker character that starts a span of this kind, if any.
    pub const fn marker(self) -> Option<char> {
        match self {
            Self::PlainText => None,
            Self::HashTag => Some('#'),
            Self::UserName => Some('@'),
        }
    }

    /// Number of characters the marker adds to the full text.
    pub const fn prefix_len(self) -> usize {
        match self.marker() {
            Some(_) => 1,
            None => 0,
        }
    }

    /// Whether spans of this kind are rendered highlighted.
    pub const fn is_highlighted(self) -> bool {
        !matches!(self, Self::PlainText)
    }
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PlainText => "plain text",
            Self::HashTag => "hashtag",
            Self::UserName => "username",
        })
    }
}

/// An immutable, validated unit of line content.
///
/// The full text (marker included) is stored once; `content` is a view past
/// the marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    kind: SpanKind,
    full_text: String,
    char_len: usize,
}

impl Span {
    /// Build a span, accepting tagged text with or without its marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySpan`] when no content remains after stripping
    /// the marker, and [`Error::InvalidTag`] when tagged content holds any
    /// non-word character.
    pub fn new(kind: SpanKind, text: &str) -> Result<Self> {
        let content = match kind.marker() {
            Some(marker) => text.strip_prefix(marker).unwrap_or(text),
            None => text,
        };
        if content.is_empty() {
            return Err(Error::EmptySpan { kind });
        }
        if kind.marker().is_some() && !WORD.is_match(content) {
            return Err(Error::InvalidTag {
                kind,
                content: content.to_string(),
            });
        }

        let mut full_text = String::with_capacity(content.len() + kind.prefix_len());
        if let Some(marker) = kind.marker() {
            full_text.push(marker);
        }
        full_text.push_str(content);
        let char_len = full_text.chars().count();

        Ok(Self {
            kind,
            full_text,
            char_len,
        })
    }

    /// Plain text span.
    ///
    /// # Errors
    ///
    /// Fails if `text` is empty.
    pub fn plain(text: &str) -> Result<Self> {
        Self::new(SpanKind::PlainText, text)
    }

    /// Hashtag span. `text` may include the leading `#`.
    ///
    /// # Errors
    ///
    /// See [`Span::new`].
    pub fn hashtag(text: &str) -> Result<Self> {
        Self::new(SpanKind::HashTag, text)
    }

    /// Username span. `text` may include the leading `@`.
    ///
    /// # Errors
    ///
    /// See [`Span::new`].
    pub fn username(text: &str) -> Result<Self> {
        Self::new(SpanKind::UserName, text)
    }

    pub const fn kind(&self) -> SpanKind {
        self.kind
    }

    /// Content without the marker.
    pub fn content(&self) -> &str {
        &self.full_text[self.kind.prefix_len()..]
    }

    /// Content including the marker, exactly as it appeared in the line.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Length of the full text in characters.
    pub const fn len(&self) -> usize {
        self.char_len
    }

    /// Always false for a constructed span.
    pub const fn is_empty(&self) -> bool {
        self.char_len == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashtag_accepts_text_with_or_without_marker() {
        let with = Span::hashtag("#hello").unwrap();
        let without = Span::hashtag("hello").unwrap();
        assert_eq!(with, without);
        assert_eq!(with.content(), "hello");
        assert_eq!(with.full_text(), "#hello");
        assert_eq!(with.len(), 6);
    }

    #[test]
    fn test_username_full_text_has_at_sign() {
        let span = Span::username("@you").unwrap();
        assert_eq!(span.kind(), SpanKind::UserName);
        assert_eq!(span.content(), "you");
        assert_eq!(span.to_string(), "@you");
    }

    #[test]
    fn test_plain_text_keeps_markers_verbatim() {
        let span = Span::plain("#not a tag").unwrap();
        assert_eq!(span.content(), "#not a tag");
        assert_eq!(span.full_text(), "#not a tag");
    }

    #[test]
    fn test_empty_text_rejected_for_every_kind() {
        for kind in [SpanKind::PlainText, SpanKind::HashTag, SpanKind::UserName] {
            assert_eq!(Span::new(kind, ""), Err(Error::EmptySpan { kind }));
        }
    }

    #[test]
    fn test_bare_marker_rejected() {
        assert_eq!(
            Span::hashtag("#"),
            Err(Error::EmptySpan {
                kind: SpanKind::HashTag
            })
        );
        assert_eq!(
            Span::username("@"),
            Err(Error::EmptySpan {
                kind: SpanKind::UserName
            })
        );
    }

    #[test]
    fn test_partial_word_match_rejected() {
        let err = Span::hashtag("#hi!").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTag {
                kind: SpanKind::HashTag,
                content: "hi!".to_string()
            }
        );
        assert!(Span::username("a b").is_err());
        assert!(Span::username("@a-b").is_err());
    }

    #[test]
    fn test_only_one_marker_is_stripped() {
        assert!(Span::hashtag("##tag").is_err());
    }

    #[test]
    fn test_underscores_and_digits_are_word_chars() {
        let span = Span::username("_user_42").unwrap();
        assert_eq!(span.full_text(), "@_user_42");
    }

    #[test]
    fn test_len_counts_chars_not_bytes() {
        let span = Span::hashtag("#café").unwrap();
        assert_eq!(span.len(), 5);
        assert_eq!(span.content(), "café");
    }

    #[test]
    fn test_numeric_symbols_rejected_in_tags() {
        assert!(Span::hashtag("#½").is_err());
        assert!(Span::username("x²").is_err());
        assert!(Span::hashtag("no①").is_err());
    }

    #[test]
    fn test_combining_marks_accepted_in_tags() {
        let span = Span::hashtag("#cafe\u{301}").unwrap();
        assert_eq!(span.len(), 6);
    }

    #[test]
    fn test_highlighting_and_prefix_by_kind() {
        assert!(!SpanKind::PlainText.is_highlighted());
        assert!(SpanKind::HashTag.is_highlighted());
        assert!(SpanKind::UserName.is_highlighted());
        assert_eq!(SpanKind::PlainText.prefix_len(), 0);
        assert_eq!(SpanKind::HashTag.prefix_len(), 1);
    }
}
