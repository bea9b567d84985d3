//! Building documents from raw text.

use crate::error::Result;
use crate::segment::segment;

use super::types::{Document, Line};

/// Parse text into a Document.
///
/// # Example
///
/// ```
/// use tagline::document::Document;
///
/// let doc = Document::parse("#hello\nplain @you\n").unwrap();
/// assert_eq!(doc.line_count(), 2);
/// assert_eq!(doc.lines()[1].spans().len(), 2);
/// ```
impl Document {
    /// Split `source` on line terminators and segment every line.
    ///
    /// # Errors
    ///
    /// Propagates segmentation failures.
    pub fn parse(source: &str) -> Result<Self> {
        Self::from_lines(source.lines())
    }

    /// Segment one line per host string.
    ///
    /// # Errors
    ///
    /// Propagates segmentation failures.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = lines
            .into_iter()
            .map(|line| parse_line(line.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_parsed(lines))
    }
}

/// Segment a single line.
///
/// # Errors
///
/// Propagates segmentation failures.
pub fn parse_line(raw: &str) -> Result<Line> {
    segment(raw).map(Line::from_spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caret::CaretDirection;
    use crate::document::CaretPosition;
    use crate::segment::SpanKind;

    #[test]
    fn test_parse_drops_trailing_terminator() {
        let doc = Document::parse("a\r\nb\n").unwrap();
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.text(), "a\nb");
    }

    #[test]
    fn test_from_lines_keeps_empty_lines() {
        let doc = Document::from_lines(["#one", "", "@two"]).unwrap();
        assert_eq!(doc.line_count(), 3);
        assert!(doc.lines()[1].is_empty());
        assert_eq!(doc.lines()[2].spans()[0].kind(), SpanKind::UserName);
    }

    #[test]
    fn test_remap_caret_uses_the_caret_line() {
        let doc = Document::from_lines(["plain", "#a b"]).unwrap();
        let caret = Some(CaretPosition::new(1, 4));
        assert_eq!(
            doc.remap_caret(caret, CaretDirection::PlainToStructured),
            Some(7)
        );
        assert_eq!(
            doc.remap_caret(Some(CaretPosition::new(5, 0)), CaretDirection::PlainToStructured),
            None
        );
    }

    #[test]
    fn test_parse_line_round_trips() {
        let raw = "x #y @z!";
        assert_eq!(parse_line(raw).unwrap().text(), raw);
    }
}
