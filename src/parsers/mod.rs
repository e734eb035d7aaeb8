//! Record extraction from chat exports.
//!
//! This module turns a parsed export [`Document`](crate::document::Document)
//! into [`MessageRecord`](crate::MessageRecord)s.
//!
//! # Available Parsers
//!
//! - [`TelegramHtmlParser`] - Parses Telegram Desktop HTML exports
//!
//! # Example
//!
//! ```rust
//! use tgarchive::parsers::TelegramHtmlParser;
//!
//! let html = r#"
//! <div class="message default clearfix" id="message101">
//!   <div class="pull_right date details" title="26.01.2021 14:32:10">14:32</div>
//!   <div class="from_name">Alice</div>
//!   <div class="text">Hello</div>
//! </div>"#;
//!
//! let records = TelegramHtmlParser::new().parse_str(html)?;
//! assert_eq!(records[0].sender(), "Alice");
//! assert_eq!(records[0].message(), Some("Hello"));
//! # Ok::<(), tgarchive::ArchiveError>(())
//! ```

mod telegram_html;

pub use telegram_html::{TelegramHtmlParser, markers};
