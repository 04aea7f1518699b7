//! Text scanning module for finding problematic characters.
//!
//! The scanner walks a text buffer one Unicode scalar value at a time and
//! reports every character found in the [`ClassificationTable`].
//!
//! ## Offsets
//!
//! [`UnicodeIssue::start`] and [`UnicodeIssue::end`] count `char`s from the
//! start of the buffer, so every issue spans exactly one position. The
//! matching UTF-8 span is kept in [`UnicodeIssue::byte_range`] for callers
//! that edit byte-addressed buffers, including the cleaner.
//!
//! ## Example
//!
//! ```
//! use unitidy_core::{CharacterCategory, Scanner};
//!
//! let text = "caf\u{e9}\u{2013}bar";
//! let issues = Scanner::new().detect(text, CharacterCategory::Dashes.into());
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].start, 4);
//! assert_eq!(issues[0].info.replacement, "-");
//! ```

mod context;

use crate::category::CategoryFilter;
use crate::error::{Error, Result};
use crate::table::{CharacterInfo, ClassificationTable};
use std::ops::Range;
use std::path::Path;
use tracing::{debug, trace};

pub use context::{context_range, line_column, LineLocator, CONTEXT_WINDOW};

/// A single problematic character found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeIssue<'t> {
    /// Character index of the match
    pub start: usize,
    /// Character index one past the match (always `start + 1`)
    pub end: usize,
    /// UTF-8 byte span of the match
    pub byte_range: Range<usize>,
    /// Table entry for the matched character
    pub info: &'t CharacterInfo,
    /// Up to [`CONTEXT_WINDOW`] characters around the match
    pub context: String,
}

impl UnicodeIssue<'_> {
    /// 1-based line and column of the match within `text`
    ///
    /// `text` must be the buffer this issue was detected in. Walks the text
    /// from the start; use a [`LineLocator`] for many issues of one buffer.
    pub fn line_column(&self, text: &str) -> (usize, usize) {
        line_column(text, self.byte_range.start)
    }
}

/// Finds tabled characters in text
#[derive(Debug, Clone, Copy)]
pub struct Scanner<'t> {
    table: &'t ClassificationTable,
}

impl Default for Scanner<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner<'static> {
    /// Creates a scanner over the process-wide table
    pub fn new() -> Self {
        Self {
            table: ClassificationTable::global(),
        }
    }
}

impl<'t> Scanner<'t> {
    /// Creates a scanner over the given table
    pub fn with_table(table: &'t ClassificationTable) -> Self {
        Self { table }
    }

    /// The table this scanner consults
    pub fn table(&self) -> &'t ClassificationTable {
        self.table
    }

    /// Returns every issue in `text` whose category passes `filter`,
    /// ordered by ascending position
    pub fn detect(&self, text: &str, filter: CategoryFilter) -> Vec<UnicodeIssue<'t>> {
        let issues: Vec<_> = self.matches(text, filter).collect();
        debug!(
            "Scanned {} bytes: found {} issue(s)",
            text.len(),
            issues.len()
        );
        issues
    }

    /// Lazily yields the issues in `text` in ascending order
    pub fn matches<'s>(
        &self,
        text: &'s str,
        filter: CategoryFilter,
    ) -> impl Iterator<Item = UnicodeIssue<'t>> + 's
    where
        't: 's,
    {
        let table = self.table;
        text.char_indices()
            .enumerate()
            .filter_map(move |(position, (offset, character))| {
                let info = table.lookup(character)?;
                if !filter.allows(info.category) {
                    return None;
                }
                trace!(
                    "Found {} ({}) at position {}",
                    info.unicode,
                    info.description,
                    position
                );
                Some(UnicodeIssue {
                    start: position,
                    end: position + 1,
                    byte_range: offset..offset + character.len_utf8(),
                    info,
                    context: text[context_range(text, offset)].to_string(),
                })
            })
    }

    /// Number of issues in `text`
    pub fn count(&self, text: &str, filter: CategoryFilter) -> usize {
        text.chars()
            .filter_map(|c| self.table.lookup(c))
            .filter(|info| filter.allows(info.category))
            .count()
    }

    /// Returns true if `text` holds at least one issue
    pub fn has_issues(&self, text: &str, filter: CategoryFilter) -> bool {
        text.chars()
            .filter_map(|c| self.table.lookup(c))
            .any(|info| filter.allows(info.category))
    }
}

/// Reads a file as UTF-8
pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    String::from_utf8(data).map_err(|e| Error::invalid_utf8(path, e.utf8_error().valid_up_to()))
}

/// Scan a file for problematic characters
///
/// This is a convenience function that reads the file and scans it. The
/// returned text is the file contents the issues refer to.
pub fn scan_file(
    path: impl AsRef<Path>,
    filter: CategoryFilter,
) -> Result<(String, Vec<UnicodeIssue<'static>>)> {
    let text = read_text(path)?;
    let issues = Scanner::new().detect(&text, filter);
    Ok((text, issues))
}
