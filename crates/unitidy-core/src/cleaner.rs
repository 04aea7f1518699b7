//! Rewriting text with problematic characters replaced.
//!
//! Replacements are applied from the end of the buffer toward the start, so
//! spans that have not been rewritten yet keep their original offsets even
//! when a replacement is longer or shorter than the character it replaces.
//!
//! An unfiltered clean ([`CategoryFilter::All`]) also tidies whitespace
//! afterwards; a category-scoped clean only substitutes characters.

use crate::category::CategoryFilter;
use crate::error::{Error, Result};
use crate::scanner::{read_text, Scanner, UnicodeIssue};
use crate::table::ClassificationTable;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

fn horizontal_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+").expect("valid whitespace pattern"))
}

fn excess_blank_lines() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{3,}").expect("valid blank line pattern"))
}

/// Collapses runs of spaces and tabs into one space, runs of three or more
/// newlines into two, and trims ASCII whitespace and control characters
/// from both ends
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = horizontal_whitespace().replace_all(text, " ");
    let collapsed = excess_blank_lines().replace_all(&collapsed, "\n\n");
    collapsed.trim_matches(|c: char| c <= ' ').to_string()
}

/// Replaces the span of every issue with its replacement
///
/// `issues` must have been detected in `text`; their order does not matter.
pub fn apply_issues(text: &str, issues: &[UnicodeIssue<'_>]) -> String {
    let mut ordered: Vec<&UnicodeIssue<'_>> = issues.iter().collect();
    ordered.sort_unstable_by_key(|issue| std::cmp::Reverse(issue.start));

    let mut cleaned = text.to_string();
    for issue in ordered {
        cleaned.replace_range(issue.byte_range.clone(), &issue.info.replacement);
    }
    cleaned
}

/// Produces cleaned text
#[derive(Debug, Clone, Copy)]
pub struct Cleaner<'t> {
    scanner: Scanner<'t>,
}

impl Default for Cleaner<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner<'static> {
    /// Creates a cleaner over the process-wide table
    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(),
        }
    }
}

impl<'t> Cleaner<'t> {
    /// Creates a cleaner over the given table
    pub fn with_table(table: &'t ClassificationTable) -> Self {
        Self {
            scanner: Scanner::with_table(table),
        }
    }

    /// The scanner this cleaner uses to find issues
    pub fn scanner(&self) -> Scanner<'t> {
        self.scanner
    }

    /// Returns `text` with every issue passing `filter` replaced
    pub fn clean(&self, text: &str, filter: CategoryFilter) -> String {
        self.clean_counted(text, filter).0
    }

    /// Like [`Cleaner::clean`], also returning how many issues were replaced
    pub fn clean_counted(&self, text: &str, filter: CategoryFilter) -> (String, usize) {
        let issues = self.scanner.detect(text, filter);
        let substituted = apply_issues(text, &issues);

        let cleaned = if filter.is_unfiltered() {
            normalize_whitespace(&substituted)
        } else {
            substituted
        };

        debug!(
            "Cleaned {} issue(s): {} -> {} bytes",
            issues.len(),
            text.len(),
            cleaned.len()
        );
        (cleaned, issues.len())
    }
}

/// Result of cleaning a file in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    /// File contents before cleaning
    pub original: String,
    /// File contents after cleaning
    pub cleaned: String,
    /// Number of issues that were replaced
    pub issues_fixed: usize,
}

impl CleanOutcome {
    /// Returns true if cleaning changed the contents
    pub fn is_changed(&self) -> bool {
        self.original != self.cleaned
    }

    /// Writes the cleaned contents to `path`
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.cleaned).map_err(|e| Error::file_write(path, e))
    }
}

/// Reads and cleans a file without writing it back
pub fn clean_file(path: impl AsRef<Path>, filter: CategoryFilter) -> Result<CleanOutcome> {
    let original = read_text(path)?;
    let (cleaned, issues_fixed) = Cleaner::new().clean_counted(&original, filter);
    Ok(CleanOutcome {
        original,
        cleaned,
        issues_fixed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{CategorySet, CharacterCategory};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("a   b\n\n\n\nc"), "a b\n\nc");
        assert_eq!(normalize_whitespace("a\t\t b"), "a b");
        assert_eq!(normalize_whitespace("  \n\n x \n\n\n"), "x");
        assert_eq!(normalize_whitespace("a\n\nb"), "a\n\nb");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_normalize_keeps_non_ascii_edges() {
        // only characters up to U+0020 are trimmed
        assert_eq!(
            normalize_whitespace("\u{2028}x\u{0085}"),
            "\u{2028}x\u{0085}"
        );
        assert_eq!(normalize_whitespace("\r\nx\r\n"), "x");
    }

    #[test]
    fn test_apply_issues_expanding_replacements() {
        let text = "\u{2026}\u{2034}\u{2026}";
        let issues = Scanner::new().detect(text, CategoryFilter::All);
        assert_eq!(apply_issues(text, &issues), "...'''...");
    }

    #[test]
    fn test_apply_issues_order_independent() {
        let text = "x\u{201C}y\u{200B}z\u{201D}";
        let mut issues = Scanner::new().detect(text, CategoryFilter::All);
        let forward = apply_issues(text, &issues);
        issues.reverse();
        assert_eq!(apply_issues(text, &issues), forward);
        assert_eq!(forward, "x\"yz\"");
    }

    #[test]
    fn test_full_clean_normalizes() {
        let text = "  one\u{00A0}\u{00A0}two\n\n\n\nthree  ";
        assert_eq!(
            Cleaner::new().clean(text, CategoryFilter::All),
            "one two\n\nthree"
        );
    }

    #[test]
    fn test_scoped_clean_does_not_normalize() {
        let text = "  one\u{00A0}\u{00A0}two\n\n\n\nthree  ";
        let cleaned = Cleaner::new().clean(text, CharacterCategory::Space.into());
        assert_eq!(cleaned, "  one  two\n\n\n\nthree  ");

        // every category selected explicitly still skips normalization
        let cleaned = Cleaner::new().clean(text, CategorySet::all().into());
        assert_eq!(cleaned, "  one  two\n\n\n\nthree  ");
    }

    #[test]
    fn test_scoped_clean_leaves_other_categories() {
        let text = "\u{201C}a\u{2014}b\u{201D}";
        assert_eq!(
            Cleaner::new().clean(text, CharacterCategory::Dashes.into()),
            "\u{201C}a-b\u{201D}"
        );
    }

    #[test]
    fn test_clean_counted() {
        let (cleaned, fixed) =
            Cleaner::new().clean_counted("\u{FEFF}hi\u{FE0F}", CategoryFilter::All);
        assert_eq!(cleaned, "hi");
        assert_eq!(fixed, 2);
    }

    #[test]
    fn test_clean_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "see \u{201C}docs\u{201D}\u{2026}\n").unwrap();

        let outcome = clean_file(&path, CharacterCategory::Quotes.into()).unwrap();
        assert!(outcome.is_changed());
        assert_eq!(outcome.issues_fixed, 2);
        assert_eq!(outcome.cleaned, "see \"docs\"\u{2026}\n");

        outcome.write_to(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), outcome.cleaned);
    }

    #[test]
    fn test_clean_file_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        std::fs::write(&path, "nothing to see").unwrap();

        let outcome = clean_file(&path, CharacterCategory::Quotes.into()).unwrap();
        assert!(!outcome.is_changed());
        assert_eq!(outcome.issues_fixed, 0);
    }
}
