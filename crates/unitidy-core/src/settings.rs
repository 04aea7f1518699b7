//! User settings: which categories are enabled and which files to inspect.
//!
//! Settings are stored as TOML. Every key is optional and falls back to its
//! default, so an empty file yields [`Settings::default`].
//!
//! ```toml
//! [categories]
//! quotes = false
//!
//! [files]
//! extensions = ["md", "txt"]
//! max_file_size_kb = 512
//! ```

use crate::category::{CategorySet, CharacterCategory};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Default maximum size of an inspected file, in KiB
pub const DEFAULT_MAX_FILE_SIZE_KB: u64 = 10 * 1024;

/// Extensions inspected by default
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "txt",
    "md",
    "rst",
    "java",
    "js",
    "ts",
    "py",
    "cpp",
    "c",
    "h",
    "xml",
    "json",
    "yaml",
    "yml",
    "properties",
    "html",
    "css",
];

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enabled character categories
    pub categories: CategorySettings,
    /// File selection
    pub files: FileSettings,
}

/// Per-category switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorySettings {
    /// Hidden/control characters
    pub hidden_control: bool,
    /// Non-ASCII spaces
    pub spaces: bool,
    /// Quotes and apostrophes
    pub quotes: bool,
    /// Dashes
    pub dashes: bool,
    /// Punctuation
    pub punctuation: bool,
    /// Full-width characters
    pub full_width: bool,
    /// Variation selectors
    pub variation: bool,
}

impl Default for CategorySettings {
    fn default() -> Self {
        Self {
            hidden_control: true,
            spaces: true,
            quotes: true,
            dashes: true,
            punctuation: true,
            full_width: true,
            variation: true,
        }
    }
}

impl CategorySettings {
    fn flag_mut(&mut self, category: CharacterCategory) -> &mut bool {
        match category {
            CharacterCategory::HiddenControl => &mut self.hidden_control,
            CharacterCategory::Space => &mut self.spaces,
            CharacterCategory::Quotes => &mut self.quotes,
            CharacterCategory::Dashes => &mut self.dashes,
            CharacterCategory::Punctuation => &mut self.punctuation,
            CharacterCategory::FullWidth => &mut self.full_width,
            CharacterCategory::Variation => &mut self.variation,
        }
    }

    fn flag(&self, category: CharacterCategory) -> bool {
        match category {
            CharacterCategory::HiddenControl => self.hidden_control,
            CharacterCategory::Space => self.spaces,
            CharacterCategory::Quotes => self.quotes,
            CharacterCategory::Dashes => self.dashes,
            CharacterCategory::Punctuation => self.punctuation,
            CharacterCategory::FullWidth => self.full_width,
            CharacterCategory::Variation => self.variation,
        }
    }
}

/// Which files get inspected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Lower-case extensions without the leading dot
    pub extensions: BTreeSet<String>,
    /// Files larger than this many KiB are skipped
    pub max_file_size_kb: u64,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            max_file_size_kb: DEFAULT_MAX_FILE_SIZE_KB,
        }
    }
}

impl Settings {
    /// Parses settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut settings: Settings = toml::from_str(text)?;
        settings.files.extensions = settings
            .files
            .extensions
            .into_iter()
            .map(|ext| normalize_extension(&ext))
            .collect();
        Ok(settings)
    }

    /// Loads settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, e))?;
        let settings = Self::from_toml_str(&text)?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serializes the settings as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the settings to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|e| Error::file_write(path, e))
    }

    /// The set of enabled categories
    pub fn enabled_categories(&self) -> CategorySet {
        CharacterCategory::ALL
            .into_iter()
            .filter(|&category| self.categories.flag(category))
            .collect()
    }

    /// Returns true if the category is enabled
    pub fn is_category_enabled(&self, category: CharacterCategory) -> bool {
        self.categories.flag(category)
    }

    /// Enables or disables a category
    pub fn set_category_enabled(&mut self, category: CharacterCategory, enabled: bool) {
        *self.categories.flag_mut(category) = enabled;
    }

    /// Enables exactly the categories in `set`
    pub fn set_enabled_categories(&mut self, set: CategorySet) {
        for category in CharacterCategory::ALL {
            self.set_category_enabled(category, set.contains(category));
        }
    }

    /// Returns true if the file name carries an enabled extension
    pub fn should_check_file_type(&self, file_name: &str) -> bool {
        match file_name.rsplit_once('.') {
            Some((_, ext)) => self.files.extensions.contains(&ext.to_lowercase()),
            None => false,
        }
    }

    /// Returns true if the file has an enabled extension and is within the
    /// size limit
    pub fn should_inspect_file(&self, file_name: &str, size_bytes: u64) -> bool {
        self.should_check_file_type(file_name) && size_bytes / 1024 <= self.files.max_file_size_kb
    }

    /// Adds an extension (case-insensitive, leading dot optional)
    pub fn add_extension(&mut self, extension: &str) {
        self.files.extensions.insert(normalize_extension(extension));
    }

    /// Removes an extension (case-insensitive, leading dot optional)
    pub fn remove_extension(&mut self, extension: &str) -> bool {
        self.files
            .extensions
            .remove(&normalize_extension(extension))
    }

    /// Restores every setting to its default
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_lowercase()
}
