//! Error types for the unitidy-core library.
//!
//! Scanning and cleaning in-memory text cannot fail. Errors only arise at the
//! edges: reading and writing files, decoding them as UTF-8, and loading
//! settings.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unitidy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all fallible unitidy operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        /// Path to the file that failed to write
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File contents are not valid UTF-8
    #[error("file '{path}' is not valid UTF-8 (first invalid byte at offset {offset})")]
    InvalidUtf8 {
        /// Path to the offending file
        path: PathBuf,
        /// Byte offset of the first invalid sequence
        offset: usize,
    },

    /// Settings file could not be parsed
    #[error("failed to parse settings: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Settings could not be serialized
    #[error("failed to serialize settings: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Unknown character category key
    #[error("unknown character category '{key}'")]
    UnknownCategory {
        /// The key that did not match any category
        key: String,
    },
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new file write error
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// Creates a new UTF-8 decoding error
    pub fn invalid_utf8(path: impl Into<PathBuf>, offset: usize) -> Self {
        Self::InvalidUtf8 {
            path: path.into(),
            offset,
        }
    }

    /// Creates a new unknown category error
    pub fn unknown_category(key: impl Into<String>) -> Self {
        Self::UnknownCategory { key: key.into() }
    }

    /// Returns true if this error only affects a single file and a directory
    /// walk may skip it and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::InvalidUtf8 { .. })
    }
}
