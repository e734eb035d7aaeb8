//! Unified error types for tgarchive.
//!
//! This module provides a single [`ArchiveError`] enum that covers all error
//! cases in the library, following the same pattern as `csv` and `serde_json`:
//! typed variants callers can match on, readable messages, and source chains.
//!
//! # Error Categories
//!
//! - **Fatal for the run**: [`ArchiveError::InvalidArgument`] (bad CLI path)
//! - **Fatal for one file**: [`ArchiveError::NotFound`], [`ArchiveError::Utf8`],
//!   [`ArchiveError::MalformedRecord`]
//! - **Plumbing**: [`ArchiveError::Io`], [`ArchiveError::Csv`]

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for tgarchive operations.
///
/// # Example
///
/// ```rust
/// use tgarchive::error::Result;
/// use tgarchive::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// The error type for all tgarchive operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// An I/O error occurred.
    ///
    /// Typically raised while enumerating a directory or writing the output
    /// table.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input document does not exist or is not a regular file.
    #[error("File not found or not a regular file: {}", path.display())]
    NotFound {
        /// The path that was requested
        path: PathBuf,
    },

    /// A path supplied on the command line is missing or of the wrong kind.
    ///
    /// This aborts the whole run.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of what's wrong
        message: String,
    },

    /// A required field of a message container is missing or unparseable.
    ///
    /// Contains the field being extracted, the container id when it is
    /// known, and optionally the file path.
    #[error(
        "Malformed message{}: cannot read {field}: {reason}{}",
        id.as_ref().map(|id| format!(" '{}'", id)).unwrap_or_default(),
        path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default()
    )]
    MalformedRecord {
        /// Name of the field that could not be extracted (e.g. "date")
        field: &'static str,
        /// Identifier of the message container, if it could be read
        id: Option<String>,
        /// What was missing or wrong
        reason: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document is not valid UTF-8.
    #[error("UTF-8 encoding error in {}: {source}", path.display())]
    Utf8 {
        /// The file that failed to decode
        path: PathBuf,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ArchiveError {
    /// Creates a not-found error for a document path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ArchiveError::NotFound { path: path.into() }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ArchiveError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a malformed record error without file context.
    ///
    /// The path is attached later with [`ArchiveError::with_path`] by the
    /// caller that knows which file was being read.
    pub fn malformed(field: &'static str, id: Option<&str>, reason: impl Into<String>) -> Self {
        ArchiveError::MalformedRecord {
            field,
            id: id.map(ToString::to_string),
            reason: reason.into(),
            path: None,
        }
    }

    /// Attaches a file path to a [`MalformedRecord`](ArchiveError::MalformedRecord)
    /// error that does not carry one yet. Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ArchiveError::MalformedRecord {
                field,
                id,
                reason,
                path: None,
            } => ArchiveError::MalformedRecord {
                field,
                id,
                reason,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ArchiveError::Io(_))
    }

    /// Returns `true` if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::NotFound { .. })
    }

    /// Returns `true` if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ArchiveError::InvalidArgument { .. })
    }

    /// Returns `true` if this is a malformed record error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, ArchiveError::MalformedRecord { .. })
    }

    /// Returns the name of the offending field for malformed record errors.
    pub fn malformed_field(&self) -> Option<&'static str> {
        match self {
            ArchiveError::MalformedRecord { field, .. } => Some(field),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
