//! The classification table.
//!
//! Maps every problematic character to its ASCII-safe replacement, its
//! category and a short description. The table is built by a fixed sequence
//! of insertions and never changes afterwards. A process-wide instance is
//! available through [`ClassificationTable::global`].
//!
//! No replacement string contains a tabled character, so one pass of the
//! cleaner leaves nothing for a second pass to find.

use crate::category::{CategorySet, CharacterCategory};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// First code point of the full-width ASCII block
const FULL_WIDTH_START: u32 = 0xFF01;
/// Last code point of the full-width ASCII block
const FULL_WIDTH_END: u32 = 0xFF5E;
/// ASCII code point that [`FULL_WIDTH_START`] maps onto
const ASCII_PRINTABLE_START: u32 = 0x21;

/// Information about a single problematic character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterInfo {
    /// The problematic character
    pub character: char,
    /// Code point in `U+XXXX` notation
    pub unicode: String,
    /// ASCII-safe replacement; empty means the character is removed
    pub replacement: String,
    /// Category this character belongs to
    pub category: CharacterCategory,
    /// Short human-readable description
    pub description: String,
}

impl CharacterInfo {
    /// Creates a new entry; `unicode` is derived from `character`
    pub fn new(
        character: char,
        replacement: impl Into<String>,
        category: CharacterCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            character,
            unicode: format!("U+{:04X}", character as u32),
            replacement: replacement.into(),
            category,
            description: description.into(),
        }
    }

    /// Returns true if cleaning removes the character outright
    pub fn is_removal(&self) -> bool {
        self.replacement.is_empty()
    }
}

/// Read-only mapping from character to [`CharacterInfo`]
#[derive(Debug, Clone)]
pub struct ClassificationTable {
    entries: HashMap<char, CharacterInfo>,
}

impl Default for ClassificationTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationTable {
    /// Builds the table
    pub fn new() -> Self {
        let mut table = Self {
            entries: HashMap::with_capacity(200),
        };
        table.add_hidden_controls();
        table.add_variation_selectors();
        table.add_spaces();
        table.add_dashes();
        table.add_quotes();
        table.add_punctuation();
        table.add_full_width();

        debug!("Classification table built with {} entries", table.len());
        table
    }

    /// Process-wide table, built on first use
    pub fn global() -> &'static ClassificationTable {
        static TABLE: OnceLock<ClassificationTable> = OnceLock::new();
        TABLE.get_or_init(ClassificationTable::new)
    }

    /// Looks up a character
    pub fn lookup(&self, character: char) -> Option<&CharacterInfo> {
        self.entries.get(&character)
    }

    /// Returns true if the character is in the table
    pub fn is_problematic(&self, character: char) -> bool {
        self.entries.contains_key(&character)
    }

    /// Every category the table knows about
    pub fn all_categories(&self) -> CategorySet {
        CategorySet::all()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by code point
    pub fn iter(&self) -> impl Iterator<Item = &CharacterInfo> {
        let mut entries: Vec<&CharacterInfo> = self.entries.values().collect();
        entries.sort_unstable_by_key(|info| info.character);
        entries.into_iter()
    }

    /// Entries of one category, ordered by code point
    pub fn entries_in(&self, category: CharacterCategory) -> impl Iterator<Item = &CharacterInfo> {
        self.iter().filter(move |info| info.category == category)
    }

    fn add(
        &mut self,
        character: char,
        replacement: &str,
        category: CharacterCategory,
        description: impl Into<String>,
    ) {
        let previous = self.entries.insert(
            character,
            CharacterInfo::new(character, replacement, category, description),
        );
        debug_assert!(previous.is_none(), "duplicate table entry {character:?}");
    }

    fn add_hidden_controls(&mut self) {
        const ENTRIES: &[(char, &str)] = &[
            ('\u{00AD}', "Soft hyphen"),
            ('\u{180E}', "Mongolian vowel separator"),
            ('\u{200B}', "Zero width space"),
            ('\u{200C}', "Zero width non-joiner"),
            ('\u{200D}', "Zero width joiner"),
            ('\u{200E}', "Left-to-right mark"),
            ('\u{200F}', "Right-to-left mark"),
            ('\u{202A}', "Left-to-right embedding"),
            ('\u{202B}', "Right-to-left embedding"),
            ('\u{202C}', "Pop directional formatting"),
            ('\u{202D}', "Left-to-right override"),
            ('\u{202E}', "Right-to-left override"),
            ('\u{2060}', "Word joiner"),
            ('\u{2061}', "Function application"),
            ('\u{2062}', "Invisible times"),
            ('\u{2063}', "Invisible separator"),
            ('\u{2064}', "Invisible plus"),
            ('\u{206A}', "Inhibit symmetric swapping"),
            ('\u{206B}', "Activate symmetric swapping"),
            ('\u{206C}', "Inhibit Arabic form shaping"),
            ('\u{206D}', "Activate Arabic form shaping"),
            ('\u{206E}', "National digit shapes"),
            ('\u{206F}', "Nominal digit shapes"),
            ('\u{FEFF}', "Zero width no-break space (BOM)"),
        ];
        for &(character, description) in ENTRIES {
            self.add(character, "", CharacterCategory::HiddenControl, description);
        }
    }

    fn add_variation_selectors(&mut self) {
        for character in '\u{FE00}'..='\u{FE0F}' {
            self.add(
                character,
                "",
                CharacterCategory::Variation,
                "Variation selector",
            );
        }
    }

    fn add_spaces(&mut self) {
        const ENTRIES: &[(char, &str)] = &[
            ('\u{00A0}', "Non-breaking space"),
            ('\u{1680}', "Ogham space mark"),
            ('\u{2000}', "En quad"),
            ('\u{2001}', "Em quad"),
            ('\u{2002}', "En space"),
            ('\u{2003}', "Em space"),
            ('\u{2004}', "Three-per-em space"),
            ('\u{2005}', "Four-per-em space"),
            ('\u{2006}', "Six-per-em space"),
            ('\u{2007}', "Figure space"),
            ('\u{2008}', "Punctuation space"),
            ('\u{2009}', "Thin space"),
            ('\u{200A}', "Hair space"),
            ('\u{202F}', "Narrow no-break space"),
            ('\u{205F}', "Medium mathematical space"),
            ('\u{3000}', "Ideographic space"),
        ];
        for &(character, description) in ENTRIES {
            self.add(character, " ", CharacterCategory::Space, description);
        }
    }

    fn add_dashes(&mut self) {
        const ENTRIES: &[(char, &str)] = &[
            ('\u{2012}', "Figure dash"),
            ('\u{2013}', "En dash"),
            ('\u{2014}', "Em dash"),
            ('\u{2015}', "Horizontal bar"),
            ('\u{2212}', "Minus sign"),
        ];
        for &(character, description) in ENTRIES {
            self.add(character, "-", CharacterCategory::Dashes, description);
        }
    }

    fn add_quotes(&mut self) {
        const ENTRIES: &[(char, &str, &str)] = &[
            ('\u{2018}', "'", "Left single quotation mark"),
            ('\u{2019}', "'", "Right single quotation mark"),
            ('\u{201A}', "'", "Single low-9 quotation mark"),
            ('\u{201B}', "'", "Single high-reversed-9 quotation mark"),
            ('\u{201C}', "\"", "Left double quotation mark"),
            ('\u{201D}', "\"", "Right double quotation mark"),
            ('\u{201E}', "\"", "Double low-9 quotation mark"),
            ('\u{201F}', "\"", "Double high-reversed-9 quotation mark"),
            ('\u{2032}', "'", "Prime"),
            ('\u{2033}', "\"", "Double prime"),
            ('\u{2034}', "'''", "Triple prime"),
            ('\u{2035}', "'", "Reversed prime"),
            ('\u{2036}', "\"", "Reversed double prime"),
            (
                '\u{00AB}',
                "\"",
                "Left-pointing double angle quotation mark",
            ),
            (
                '\u{00BB}',
                "\"",
                "Right-pointing double angle quotation mark",
            ),
        ];
        for &(character, replacement, description) in ENTRIES {
            self.add(
                character,
                replacement,
                CharacterCategory::Quotes,
                description,
            );
        }
    }

    fn add_punctuation(&mut self) {
        const ENTRIES: &[(char, &str, &str)] = &[
            ('\u{2026}', "...", "Horizontal ellipsis"),
            ('\u{2022}', "*", "Bullet"),
            ('\u{00B7}', "*", "Middle dot"),
        ];
        for &(character, replacement, description) in ENTRIES {
            self.add(
                character,
                replacement,
                CharacterCategory::Punctuation,
                description,
            );
        }
    }

    fn add_full_width(&mut self) {
        for code in FULL_WIDTH_START..=FULL_WIDTH_END {
            let ascii = code - FULL_WIDTH_START + ASCII_PRINTABLE_START;
            // Both ranges lie inside the BMP outside the surrogate block.
            let (Some(full_width), Some(ascii)) = (char::from_u32(code), char::from_u32(ascii))
            else {
                continue;
            };
            self.add(
                full_width,
                &ascii.to_string(),
                CharacterCategory::FullWidth,
                format!("Full-width {}", ascii_symbol_name(ascii)),
            );
        }
    }
}

/// Name of a printable ASCII symbol; letters and digits are just "character"
fn ascii_symbol_name(c: char) -> &'static str {
    match c {
        '!' => "exclamation mark",
        '"' => "quotation mark",
        '#' => "number sign",
        '$' => "dollar sign",
        '%' => "percent sign",
        '&' => "ampersand",
        '\'' => "apostrophe",
        '(' => "left parenthesis",
        ')' => "right parenthesis",
        '*' => "asterisk",
        '+' => "plus sign",
        ',' => "comma",
        '-' => "hyphen-minus",
        '.' => "full stop",
        '/' => "solidus",
        ':' => "colon",
        ';' => "semicolon",
        '<' => "less-than sign",
        '=' => "equals sign",
        '>' => "greater-than sign",
        '?' => "question mark",
        '@' => "commercial at",
        '[' => "left square bracket",
        '\\' => "reverse solidus",
        ']' => "right square bracket",
        '^' => "circumflex accent",
        '_' => "low line",
        '`' => "grave accent",
        '{' => "left curly bracket",
        '|' => "vertical line",
        '}' => "right curly bracket",
        '~' => "tilde",
        _ => "character",
    }
}
