//! # unitidy-core
//!
//! A library for finding and replacing problematic Unicode characters in text.
//!
//! This crate provides the core functionality for:
//! - Classifying invisible controls, non-ASCII spaces, typographic quotes and
//!   dashes, full-width forms and variation selectors
//! - Scanning text for those characters with exact positions
//! - Rewriting text with ASCII-safe replacements
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`table`]: The character classification table
//! - [`scanner`]: Locating problematic characters in text
//! - [`cleaner`]: Rewriting text and whitespace normalization
//! - [`fix`]: Quick fixes offered for individual issues
//! - [`settings`]: Enabled categories and file selection
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use unitidy_core::{clean_text, detect_issues, CategoryFilter, CharacterCategory};
//!
//! let text = "\u{201C}Hello\u{201D}\u{200B} world";
//!
//! let issues = detect_issues(text, CharacterCategory::Quotes.into());
//! assert_eq!(issues.len(), 2);
//!
//! assert_eq!(clean_text(text, CategoryFilter::All), "\"Hello\" world");
//! ```
//!
//! ## Category filters
//!
//! [`CategoryFilter::All`] cleans every category and tidies whitespace
//! afterwards. [`CategoryFilter::Only`] substitutes characters of the chosen
//! categories and leaves everything else untouched.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod category;
pub mod cleaner;
pub mod error;
pub mod fix;
pub mod scanner;
pub mod settings;
pub mod summary;
pub mod table;

// Re-export primary types for convenience
pub use category::{CategoryFilter, CategorySet, CharacterCategory};
pub use cleaner::{clean_file, normalize_whitespace, CleanOutcome, Cleaner};
pub use error::{Error, Result};
pub use fix::{problem_description, QuickFix};
pub use scanner::{scan_file, LineLocator, Scanner, UnicodeIssue};
pub use settings::Settings;
pub use summary::IssueSummary;
pub use table::{CharacterInfo, ClassificationTable};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Finds every problematic character in `text` that passes `filter`
pub fn detect_issues(text: &str, filter: CategoryFilter) -> Vec<UnicodeIssue<'static>> {
    Scanner::new().detect(text, filter)
}

/// Returns `text` with problematic characters replaced
///
/// See [`CategoryFilter`] for how the filter affects whitespace handling.
pub fn clean_text(text: &str, filter: CategoryFilter) -> String {
    Cleaner::new().clean(text, filter)
}

/// Looks up a character in the process-wide table
pub fn lookup(character: char) -> Option<&'static CharacterInfo> {
    ClassificationTable::global().lookup(character)
}

/// Returns true if the character is in the process-wide table
pub fn is_problematic(character: char) -> bool {
    ClassificationTable::global().is_problematic(character)
}

/// Every character category
pub fn all_categories() -> CategorySet {
    CategorySet::all()
}
