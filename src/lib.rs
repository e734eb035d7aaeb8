//! # tgarchive
//!
//! A Rust library for turning Telegram Desktop HTML chat exports into a flat
//! CSV table, one row per message.
//!
//! ## Overview
//!
//! Telegram Desktop can export a chat as a set of static HTML files
//! (`messages.html`, `messages2.html`, ...). For every message container in
//! those files tgarchive extracts:
//!
//! | Column | Source |
//! |--------|--------|
//! | `ID` | container `id`, e.g. `message101` |
//! | `Date`, `Time` | `title` of the date details element |
//! | `Sender` | author display name |
//! | `Message` | text body, or `NA` |
//! | `Attachment` | not-downloaded notice, list of images, or `NA` |
//! | `Responds_to` | id of the replied message, or `NA` |
//! | `Forward_from` | original author of a forwarded message, or `NA` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use tgarchive::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let parser = TelegramHtmlParser::new();
//!     let records = parser.parse(Path::new("ChatExport/messages.html"))?;
//!
//!     write_csv(&records, Path::new("output.csv"), true)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`document`] - loading export files and class-marker queries
//! - [`parsers`] - [`TelegramHtmlParser`](parsers::TelegramHtmlParser)
//! - [`record`] - [`MessageRecord`], [`Attachment`](record::Attachment)
//! - [`core`] - batch runs ([`core::batch`]) and CSV output ([`core::output`])
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`BatchConfig`](config::BatchConfig)
//! - [`cli`] - clap arguments (feature `cli`)
//! - [`error`] - [`ArchiveError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod parsers;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{ArchiveError, Result};
pub use record::MessageRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use tgarchive::prelude::*;
/// ```
pub mod prelude {
    pub use crate::MessageRecord;
    pub use crate::record::{Attachment, HEADER, ImageDescriptor, NA};

    pub use crate::error::{ArchiveError, Result};

    pub use crate::config::{BatchConfig, ParserConfig};
    pub use crate::document::{Document, Marker};
    pub use crate::parsers::TelegramHtmlParser;

    pub use crate::core::batch::{BatchReport, BatchRunner, InputSource};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
}
