//! Per-category issue counts.

use crate::category::CharacterCategory;
use crate::scanner::UnicodeIssue;
use std::fmt;

/// Issue counts by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueSummary {
    counts: [usize; CharacterCategory::COUNT],
}

impl IssueSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizes a list of issues
    pub fn from_issues(issues: &[UnicodeIssue<'_>]) -> Self {
        let mut summary = Self::new();
        summary.record_all(issues);
        summary
    }

    /// Counts one issue of the given category
    pub fn record(&mut self, category: CharacterCategory) {
        self.counts[category as usize] += 1;
    }

    /// Counts every issue in the list
    pub fn record_all(&mut self, issues: &[UnicodeIssue<'_>]) {
        for issue in issues {
            self.record(issue.info.category);
        }
    }

    /// Adds another summary's counts to this one
    pub fn merge(&mut self, other: &IssueSummary) {
        for (count, extra) in self.counts.iter_mut().zip(other.counts) {
            *count += extra;
        }
    }

    /// Number of issues of one category
    pub fn count(&self, category: CharacterCategory) -> usize {
        self.counts[category as usize]
    }

    /// Total number of issues
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Returns true if no issue was counted
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero counts in category order
    pub fn iter(&self) -> impl Iterator<Item = (CharacterCategory, usize)> + '_ {
        CharacterCategory::ALL
            .into_iter()
            .map(move |category| (category, self.count(category)))
            .filter(|&(_, count)| count > 0)
    }
}

impl fmt::Display for IssueSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, count) in self.iter() {
            writeln!(f, "{}: {}", category.display_name(), count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryFilter;
    use crate::scanner::Scanner;

    #[test]
    fn test_from_issues() {
        let text = "\u{201C}a\u{2014}b\u{201D}\u{200B}";
        let issues = Scanner::new().detect(text, CategoryFilter::All);
        let summary = IssueSummary::from_issues(&issues);

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.count(CharacterCategory::Quotes), 2);
        assert_eq!(summary.count(CharacterCategory::Dashes), 1);
        assert_eq!(summary.count(CharacterCategory::Space), 0);
        assert_eq!(
            summary.to_string(),
            "Hidden/Control Characters: 1\nQuotes & Apostrophes: 2\nDashes: 1\n"
        );
    }

    #[test]
    fn test_merge() {
        let mut a = IssueSummary::new();
        a.record(CharacterCategory::Space);
        let mut b = IssueSummary::new();
        b.record(CharacterCategory::Space);
        b.record(CharacterCategory::Variation);

        a.merge(&b);
        assert_eq!(a.count(CharacterCategory::Space), 2);
        assert_eq!(a.count(CharacterCategory::Variation), 1);
        assert!(!a.is_empty());
        assert!(IssueSummary::new().is_empty());
    }
}
