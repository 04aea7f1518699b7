//! Character categories and category sets.
//!
//! Every tabled character belongs to exactly one [`CharacterCategory`].
//! Callers select which categories a scan or clean should consider with a
//! [`CategorySet`], wrapped in a [`CategoryFilter`].

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Closed set of problematic character categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharacterCategory {
    /// Invisible formatting and directional controls
    HiddenControl,
    /// Non-ASCII space characters
    Space,
    /// Typographic quotes, primes and guillemets
    Quotes,
    /// Typographic dashes and the minus sign
    Dashes,
    /// Ellipsis, bullets and similar punctuation
    Punctuation,
    /// Full-width forms of ASCII characters
    FullWidth,
    /// Variation selectors
    Variation,
}

impl CharacterCategory {
    /// Number of categories
    pub const COUNT: usize = 7;

    /// All categories in their stable order
    pub const ALL: [CharacterCategory; Self::COUNT] = [
        CharacterCategory::HiddenControl,
        CharacterCategory::Space,
        CharacterCategory::Quotes,
        CharacterCategory::Dashes,
        CharacterCategory::Punctuation,
        CharacterCategory::FullWidth,
        CharacterCategory::Variation,
    ];

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::HiddenControl => "Hidden/Control Characters",
            Self::Space => "Space Characters",
            Self::Quotes => "Quotes & Apostrophes",
            Self::Dashes => "Dashes",
            Self::Punctuation => "Punctuation",
            Self::FullWidth => "Full-Width Characters",
            Self::Variation => "Variation Selectors",
        }
    }

    /// Stable kebab-case key used on the command line and in settings
    pub fn key(self) -> &'static str {
        match self {
            Self::HiddenControl => "hidden-control",
            Self::Space => "space",
            Self::Quotes => "quotes",
            Self::Dashes => "dashes",
            Self::Punctuation => "punctuation",
            Self::FullWidth => "full-width",
            Self::Variation => "variation",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for CharacterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CharacterCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|category| category.key() == normalized)
            .ok_or_else(|| Error::unknown_category(s))
    }
}

/// A set of categories, iterated in [`CharacterCategory::ALL`] order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet {
    bits: u8,
}

impl CategorySet {
    /// The empty set
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Every category
    pub fn all() -> Self {
        CharacterCategory::ALL.into_iter().collect()
    }

    /// A set holding a single category
    pub fn only(category: CharacterCategory) -> Self {
        Self {
            bits: category.bit(),
        }
    }

    /// Adds a category; returns true if it was not already present
    pub fn insert(&mut self, category: CharacterCategory) -> bool {
        let added = !self.contains(category);
        self.bits |= category.bit();
        added
    }

    /// Removes a category; returns true if it was present
    pub fn remove(&mut self, category: CharacterCategory) -> bool {
        let present = self.contains(category);
        self.bits &= !category.bit();
        present
    }

    /// Returns true if the category is in the set
    pub fn contains(&self, category: CharacterCategory) -> bool {
        self.bits & category.bit() != 0
    }

    /// Returns true if no category is in the set
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Number of categories in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates the contained categories in stable order
    pub fn iter(&self) -> impl Iterator<Item = CharacterCategory> + '_ {
        CharacterCategory::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

impl FromIterator<CharacterCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = CharacterCategory>>(iter: I) -> Self {
        let mut set = Self::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl Extend<CharacterCategory> for CategorySet {
    fn extend<I: IntoIterator<Item = CharacterCategory>>(&mut self, iter: I) {
        for category in iter {
            self.insert(category);
        }
    }
}

/// Which categories a scan or clean considers
///
/// `All` and `Only(CategorySet::all())` match the same characters, but the
/// cleaner treats them differently: only an `All` clean normalizes
/// whitespace afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// No filter: every category, full clean
    #[default]
    All,
    /// Restrict to the given categories, substitutions only
    Only(CategorySet),
}

impl CategoryFilter {
    /// Returns true if characters of this category pass the filter
    pub fn allows(&self, category: CharacterCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => set.contains(category),
        }
    }

    /// Returns true if this is the unfiltered variant
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<CategorySet> for CategoryFilter {
    fn from(set: CategorySet) -> Self {
        Self::Only(set)
    }
}

impl From<CharacterCategory> for CategoryFilter {
    fn from(category: CharacterCategory) -> Self {
        Self::Only(CategorySet::only(category))
    }
}
