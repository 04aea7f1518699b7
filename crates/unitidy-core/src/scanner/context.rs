//! Helpers for locating an issue within its surrounding text.
//!
//! All positions handed in are byte offsets that lie on a `char` boundary.

use std::ops::Range;

/// Width of the context window around a match, in characters
pub const CONTEXT_WINDOW: usize = 20;

/// Byte range of the characters in `[position - half, position + half)`,
/// where `half` is `CONTEXT_WINDOW / 2` and `position` is the character at
/// byte offset `at`, clipped to the text.
pub fn context_range(text: &str, at: usize) -> Range<usize> {
    let half = CONTEXT_WINDOW / 2;

    let start = text[..at]
        .char_indices()
        .rev()
        .take(half)
        .last()
        .map_or(at, |(offset, _)| offset);

    let end = text[at..]
        .char_indices()
        .nth(half)
        .map_or(text.len(), |(offset, _)| at + offset);

    start..end
}

/// 1-based line and column (in characters) of the byte offset `at`
pub fn line_column(text: &str, at: usize) -> (usize, usize) {
    let before = &text[..at];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Resolves line and column for a series of ascending byte offsets
///
/// Each call only walks the text between the previous offset and the new
/// one, so locating every issue of a file takes a single pass. An offset
/// before the previous one restarts from the beginning of the text.
#[derive(Debug, Clone)]
pub struct LineLocator<'a> {
    text: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> LineLocator<'a> {
    /// Creates a locator positioned at the start of `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// 1-based line and column (in characters) of the byte offset `at`
    pub fn locate(&mut self, at: usize) -> (usize, usize) {
        if at < self.offset {
            *self = Self::new(self.text);
        }

        for character in self.text[self.offset..at].chars() {
            if character == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = at;

        (self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_clipped_at_start() {
        let text = "ab\u{2013}cd";
        let at = text.find('\u{2013}').unwrap();
        assert_eq!(&text[context_range(text, at)], text);
    }

    #[test]
    fn test_context_window_width() {
        let text = format!("{}X{}", "a".repeat(30), "b".repeat(30));
        let at = 30;
        let context = &text[context_range(&text, at)];
        // ten before, the match itself, nine after
        assert_eq!(context, format!("{}X{}", "a".repeat(10), "b".repeat(9)));
        assert_eq!(context.chars().count(), CONTEXT_WINDOW);
    }

    #[test]
    fn test_context_counts_characters_not_bytes() {
        let text = format!("{}\u{00A0}{}", "é".repeat(12), "ü".repeat(12));
        let at = text.find('\u{00A0}').unwrap();
        let context = &text[context_range(&text, at)];
        assert_eq!(context.chars().count(), CONTEXT_WINDOW);
        assert!(context.starts_with(&format!("{}\u{00A0}", "é".repeat(10))));
    }

    #[test]
    fn test_line_column() {
        let text = "first\nsé\u{2014}cond\n";
        let at = text.find('\u{2014}').unwrap();
        assert_eq!(line_column(text, at), (2, 3));
        assert_eq!(line_column(text, 0), (1, 1));
    }

    #[test]
    fn test_locator_matches_line_column() {
        let text = "a\u{2014}b\n\nsé\u{00A0}x\n\u{200B}\u{200B}\nend\u{2026}";
        let offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();

        let mut locator = LineLocator::new(text);
        for &at in &offsets {
            assert_eq!(locator.locate(at), line_column(text, at), "offset {at}");
        }
        assert_eq!(locator.locate(text.len()), line_column(text, text.len()));
    }

    #[test]
    fn test_locator_restarts_on_earlier_offset() {
        let text = "one\ntwo\nthree";
        let mut locator = LineLocator::new(text);
        assert_eq!(locator.locate(9), (3, 2));
        assert_eq!(locator.locate(9), (3, 2));
        assert_eq!(locator.locate(4), (2, 1));
    }
}
