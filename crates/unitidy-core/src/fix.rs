//! Quick fixes offered for a detected issue.
//!
//! An editor or linter front end reports each [`UnicodeIssue`] with
//! [`problem_description`] and offers the three fixes from
//! [`QuickFix::for_issue`]: replace this character everywhere, clean the
//! whole file, or clean the issue's category.

use crate::category::{CategoryFilter, CharacterCategory};
use crate::cleaner::Cleaner;
use crate::scanner::UnicodeIssue;
use crate::table::CharacterInfo;
use std::fmt;

/// Family name shared by all quick fixes
pub const FAMILY_NAME: &str = "Unicode Character Fixes";

/// Describes the problem for an issue's character
pub fn problem_description(info: &CharacterInfo) -> String {
    format!(
        "Problematic Unicode character: {} ({}) - {}",
        info.unicode,
        info.category.display_name(),
        info.description
    )
}

/// A fix that can be applied to a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickFix<'t> {
    /// Replace every occurrence of one character with its replacement
    ReplaceCharacter(&'t CharacterInfo),
    /// Unfiltered clean of the whole text, whitespace normalization included
    CleanFile,
    /// Category-scoped clean for a single category
    CleanCategory(CharacterCategory),
}

impl<'t> QuickFix<'t> {
    /// The fixes offered for an issue, most specific first
    pub fn for_issue(issue: &UnicodeIssue<'t>) -> [QuickFix<'t>; 3] {
        [
            QuickFix::ReplaceCharacter(issue.info),
            QuickFix::CleanFile,
            QuickFix::CleanCategory(issue.info.category),
        ]
    }

    /// Label shown for this fix
    pub fn name(&self) -> String {
        match self {
            Self::ReplaceCharacter(info) if info.is_removal() => format!("Remove {}", info.unicode),
            Self::ReplaceCharacter(info) => format!("Replace with \"{}\"", info.replacement),
            Self::CleanFile => "Clean all Unicode issues in file".to_string(),
            Self::CleanCategory(category) => {
                format!("Clean all {} in file", category.display_name())
            }
        }
    }

    /// Family name, see [`FAMILY_NAME`]
    pub fn family_name(&self) -> &'static str {
        FAMILY_NAME
    }

    /// Applies the fix with the given cleaner
    pub fn apply_with(&self, cleaner: &Cleaner<'_>, text: &str) -> String {
        match self {
            Self::ReplaceCharacter(info) => text.replace(info.character, &info.replacement),
            Self::CleanFile => cleaner.clean(text, CategoryFilter::All),
            Self::CleanCategory(category) => cleaner.clean(text, (*category).into()),
        }
    }

    /// Applies the fix using the process-wide table
    pub fn apply(&self, text: &str) -> String {
        self.apply_with(&Cleaner::new(), text)
    }
}

impl fmt::Display for QuickFix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
