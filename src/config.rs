//! Configuration types for extraction and batch runs.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - how message containers are read
//! - [`BatchConfig`] - how files are collected and where the table goes
//!
//! # Example
//!
//! ```rust
//! use tgarchive::config::{BatchConfig, ParserConfig};
//!
//! let parser = ParserConfig::new().with_strict_timestamp(true);
//! let batch = BatchConfig::new()
//!     .with_output_path("chat.csv")
//!     .with_skip_malformed(false);
//!
//! assert!(parser.strict_timestamp);
//! assert!(!batch.skip_malformed);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Default extension of export files picked up in directory mode.
pub const DEFAULT_EXTENSION: &str = ".html";

/// Configuration for the Telegram HTML record extractor.
///
/// # Example
///
/// ```rust
/// use tgarchive::config::ParserConfig;
///
/// let config = ParserConfig::new().with_reply_pattern_fallback(false);
/// assert!(!config.reply_pattern_fallback);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Treat a timestamp title with anything after `<date> <time>` as
    /// malformed (default: false)
    ///
    /// Newer exports append the UTC offset, e.g. `26.01.2021 14:32:10 UTC+01:00`;
    /// by default the extra tokens are ignored.
    pub strict_timestamp: bool,

    /// Scan the serialized reply block for a `message<digits>` token when no
    /// anchor points at the replied message (default: true)
    pub reply_pattern_fallback: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict_timestamp: false,
            reply_pattern_fallback: true,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict timestamp handling.
    #[must_use]
    pub fn with_strict_timestamp(mut self, strict: bool) -> Self {
        self.strict_timestamp = strict;
        self
    }

    /// Enables or disables the pattern fallback for reply references.
    #[must_use]
    pub fn with_reply_pattern_fallback(mut self, enabled: bool) -> Self {
        self.reply_pattern_fallback = enabled;
        self
    }
}

/// Configuration for a batch run over one file or one directory.
///
/// # Example
///
/// ```rust
/// use tgarchive::config::BatchConfig;
///
/// let config = BatchConfig::new().with_header(true);
/// assert_eq!(config.include_header, Some(true));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Force the header row on or off; `None` keeps the mode default
    /// (header in directory mode, none in single-file mode)
    pub include_header: Option<bool>,

    /// Skip files with malformed messages instead of aborting (default: true)
    pub skip_malformed: bool,

    /// Where the table is written (default: `output.csv`)
    pub output_path: PathBuf,

    /// File name suffix selected in directory mode (default: `.html`)
    pub extension: String,

    /// Extraction settings applied to every file
    pub parser: ParserConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            include_header: None,
            skip_malformed: true,
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            extension: DEFAULT_EXTENSION.to_string(),
            parser: ParserConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces the header row on or off regardless of input mode.
    #[must_use]
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = Some(include);
        self
    }

    /// Sets whether malformed files are skipped in directory mode.
    #[must_use]
    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    /// Sets the output path.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Sets the file name suffix used to select export files.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the extraction settings.
    #[must_use]
    pub fn with_parser(mut self, parser: ParserConfig) -> Self {
        self.parser = parser;
        self
    }
}
