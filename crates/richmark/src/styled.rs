//! Immutable attribute-tagged text.

use std::fmt;
use std::ops::Range;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::style::Attributes;

/// A stretch of text sharing one attribute set.
///
/// Runs without attributes come from separators inserted by
/// [`StyledText::join`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    text: String,
    attrs: Option<Attributes>,
}

impl Run {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        self.attrs.as_ref()
    }
}

/// Text tagged with an [`Attributes`] set per sub-run.
///
/// A `StyledText` is built either by wrapping a string with
/// [`new`](StyledText::new) or by concatenating existing values with
/// [`concat`](StyledText::concat) and [`join`](StyledText::join). There is
/// no other way to change one.
///
/// Adjacent runs with equal attributes are merged and empty runs dropped,
/// so concatenation is associative and the empty value is its identity.
///
/// # Example
///
/// ```rust
/// use richmark::{Attributes, StyledText};
///
/// let plain = Attributes::default();
/// let bold = plain.clone().with_bold(true);
///
/// let text = StyledText::concat([
///     StyledText::new("Hello ", plain.clone()),
///     StyledText::new("world", bold.clone()),
/// ]);
///
/// assert_eq!(text.to_string(), "Hello world");
/// assert_eq!(text.attributes_at(0), Some(&plain));
/// assert_eq!(text.attributes_at(6), Some(&bold));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyledText {
    runs: Vec<Run>,
}

impl StyledText {
    /// Wraps a string in a single run carrying `attrs`.
    pub fn new(text: impl Into<String>, attrs: Attributes) -> Self {
        let mut styled = Self::default();
        styled.push_run(Run {
            text: text.into(),
            attrs: Some(attrs),
        });
        styled
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenates values in order with nothing between them.
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = StyledText>,
    {
        Self::join(parts, "")
    }

    /// Concatenates values in order with an unstyled `separator` between
    /// each consecutive pair. No separator is added before the first or
    /// after the last value.
    pub fn join<I>(parts: I, separator: &str) -> Self
    where
        I: IntoIterator<Item = StyledText>,
    {
        let mut joined = Self::default();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                joined.push_run(Run {
                    text: separator.to_string(),
                    attrs: None,
                });
            }
            for run in part.runs {
                joined.push_run(run);
            }
        }
        joined
    }

    fn push_run(&mut self, run: Run) {
        if run.text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.attrs == run.attrs => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|run| run.text.len()).sum()
    }

    /// Terminal display width of the text, in columns.
    pub fn width(&self) -> usize {
        self.runs.iter().map(|run| run.text.width()).sum()
    }

    /// Iterates over byte ranges of the plain text and their attributes.
    pub fn spans(&self) -> impl Iterator<Item = (Range<usize>, Option<&Attributes>)> + '_ {
        self.runs.iter().scan(0, |offset, run| {
            let start = *offset;
            *offset += run.text.len();
            Some((start..*offset, run.attrs.as_ref()))
        })
    }

    /// Returns the attributes of the run containing byte `offset`.
    ///
    /// Returns `None` past the end of the text or inside a separator.
    pub fn attributes_at(&self, offset: usize) -> Option<&Attributes> {
        self.spans()
            .find(|(range, _)| range.contains(&offset))
            .and_then(|(_, attrs)| attrs)
    }
}

impl fmt::Display for StyledText {
    /// Writes the plain text, without attributes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            f.write_str(&run.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn red() -> Attributes {
        Attributes::default().with_color(Color::Red)
    }

    #[test]
    fn test_new_single_run() {
        let text = StyledText::new("hi", Attributes::default());
        assert_eq!(text.runs().len(), 1);
        assert_eq!(text.runs()[0].text(), "hi");
        assert_eq!(text.runs()[0].attributes(), Some(&Attributes::default()));
    }

    #[test]
    fn test_new_empty_string_is_empty() {
        let text = StyledText::new("", Attributes::default());
        assert!(text.is_empty());
        assert_eq!(text, StyledText::empty());
    }

    #[test]
    fn test_concat_zero_parts_is_empty() {
        assert!(StyledText::concat(Vec::new()).is_empty());
        assert!(StyledText::join(Vec::new(), "\n").is_empty());
    }

    #[test]
    fn test_concat_merges_equal_neighbours() {
        let text = StyledText::concat([
            StyledText::new("a", red()),
            StyledText::new("b", red()),
            StyledText::new("c", Attributes::default()),
        ]);
        assert_eq!(text.runs().len(), 2);
        assert_eq!(text.runs()[0].text(), "ab");
        assert_eq!(text.to_string(), "abc");
    }

    #[test]
    fn test_join_inserts_unstyled_separator() {
        let text = StyledText::join(
            [
                StyledText::new("a", red()),
                StyledText::new("b", red()),
            ],
            "\n",
        );
        assert_eq!(text.to_string(), "a\nb");
        assert_eq!(text.runs().len(), 3);
        assert_eq!(text.runs()[1].attributes(), None);
        assert_eq!(text.attributes_at(1), None);
    }

    #[test]
    fn test_only_separators_lack_attributes() {
        let text = StyledText::join(
            [
                StyledText::concat([
                    StyledText::new("a", red()),
                    StyledText::new("b", Attributes::default()),
                ]),
                StyledText::new("c", red()),
            ],
            " | ",
        );
        let bare: Vec<_> = text
            .runs()
            .iter()
            .filter(|run| run.attributes().is_none())
            .map(Run::text)
            .collect();
        assert_eq!(bare, vec![" | "]);
    }

    #[test]
    fn test_join_keeps_separator_around_empty_parts() {
        let text = StyledText::join(
            [StyledText::empty(), StyledText::new("b", red())],
            "\n",
        );
        assert_eq!(text.to_string(), "\nb");
    }

    #[test]
    fn test_len_and_width() {
        let text = StyledText::concat([
            StyledText::new("ab", red()),
            StyledText::new("日本", Attributes::default()),
        ]);
        assert_eq!(text.len(), 8);
        assert_eq!(text.width(), 6);
    }

    #[test]
    fn test_spans_cover_text() {
        let text = StyledText::concat([
            StyledText::new("Hello ", Attributes::default()),
            StyledText::new("world", red()),
        ]);
        let spans: Vec<_> = text.spans().map(|(range, _)| range).collect();
        assert_eq!(spans, vec![0..6, 6..11]);
        assert_eq!(text.attributes_at(10), Some(&red()));
        assert_eq!(text.attributes_at(11), None);
    }

    #[test]
    fn test_serializes_runs() {
        let text = StyledText::new("x", Attributes::default());
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json[0]["text"], "x");
        assert_eq!(json[0]["attrs"]["family"], "Helvetica");
        assert_eq!(json[0]["attrs"]["color"], "black");
    }
}
