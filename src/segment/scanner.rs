//! Token scanner that locates hashtag and username matches.
//!
//! Each whitespace-delimited token is classified once, so a token yields at
//! most one match and matches from different tokens never overlap.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::span::SpanKind;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("token pattern compiles"));

/// Whole token is `@` plus word characters.
static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\w+$").expect("username pattern compiles"));

/// Non-word prefix, then `#` plus word characters reaching the token's end.
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\W*(#\w+)$").expect("hashtag pattern compiles"));

/// A located hashtag or username occurrence.
///
/// `start` and `end` are inclusive character indices into the line;
/// `bytes` is the same range in bytes, for slicing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Match {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
    pub bytes: Range<usize>,
}

/// Find every match in `line`, in left-to-right order.
pub(crate) fn scan(line: &str) -> Vec<Match> {
    let mut matches = Vec::new();
    let mut chars_before = 0;
    let mut counted_to = 0;

    for token in TOKEN.find_iter(line) {
        chars_before += line[counted_to..token.start()].chars().count();
        counted_to = token.start();

        let text = token.as_str();
        if let Some((offset, kind)) = classify(text) {
            matches.push(Match {
                start: chars_before + text[..offset].chars().count(),
                end: chars_before + text.chars().count() - 1,
                kind,
                bytes: token.start() + offset..token.end(),
            });
        }
    }

    matches
}

/// Classify one token. Returns the byte offset of the match inside the token
/// (matches always run to the token's end) and its kind.
fn classify(token: &str) -> Option<(usize, SpanKind)> {
    if USERNAME.is_match(token) {
        return Some((0, SpanKind::UserName));
    }
    HASHTAG
        .captures(token)
        .and_then(|caps| caps.get(1))
        .map(|tag| (tag.start(), SpanKind::HashTag))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(usize, usize, SpanKind)> {
        scan(line)
            .into_iter()
            .map(|m| (m.start, m.end, m.kind))
            .collect()
    }

    #[test]
    fn test_whole_token_hashtag() {
        assert_eq!(kinds("#hello"), vec![(0, 5, SpanKind::HashTag)]);
    }

    #[test]
    fn test_hashtag_after_non_word_prefix() {
        assert_eq!(kinds("(#tag"), vec![(1, 4, SpanKind::HashTag)]);
        assert_eq!(kinds("##tag"), vec![(1, 4, SpanKind::HashTag)]);
        assert_eq!(kinds("@#tag"), vec![(1, 4, SpanKind::HashTag)]);
    }

    #[test]
    fn test_hashtag_with_word_prefix_is_not_a_match() {
        assert!(kinds("a#tag").is_empty());
        assert!(kinds("#a#b").is_empty());
    }

    #[test]
    fn test_hashtag_must_reach_token_end() {
        assert!(kinds("#hi!").is_empty());
        assert!(kinds("#hi#").is_empty());
        assert!(kinds("#").is_empty());
    }

    #[test]
    fn test_username_must_be_whole_token() {
        assert_eq!(kinds("@you"), vec![(0, 3, SpanKind::UserName)]);
        assert!(kinds("@").is_empty());
        assert!(kinds("x@you").is_empty());
        assert!(kinds("@you!").is_empty());
        assert!(kinds("@@you").is_empty());
    }

    #[test]
    fn test_tokens_split_on_any_whitespace() {
        assert_eq!(
            kinds("@a\t#b\u{a0}#c"),
            vec![
                (0, 1, SpanKind::UserName),
                (3, 4, SpanKind::HashTag),
                (6, 7, SpanKind::HashTag),
            ]
        );
    }

    #[test]
    fn test_numeric_symbols_are_not_word_chars() {
        assert!(kinds("#½").is_empty());
        assert!(kinds("@x²").is_empty());
        assert!(kinds("#no①").is_empty());
    }

    #[test]
    fn test_combining_marks_are_word_chars() {
        assert_eq!(kinds("#cafe\u{301}"), vec![(0, 5, SpanKind::HashTag)]);
        assert_eq!(kinds("@a\u{301}"), vec![(0, 2, SpanKind::UserName)]);
    }

    #[test]
    fn test_byte_range_tracks_multibyte_chars() {
        let line = "é #ü";
        let m = &scan(line)[0];
        assert_eq!((m.start, m.end), (2, 3));
        assert_eq!(&line[m.bytes.clone()], "#ü");
    }
}
