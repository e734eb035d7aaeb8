//! Telegram Desktop HTML export parser.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::config::ParserConfig;
use crate::document::{Document, Marker, descendant_elements, trimmed_text, trimmed_text_without};
use crate::error::{ArchiveError, Result};
use crate::record::{Attachment, ImageDescriptor, MessageRecord};

/// Class markers of the Telegram Desktop HTML layout.
pub mod markers {
    use crate::document::Marker;

    /// One regular message with its own sender header.
    pub const MESSAGE: Marker = Marker::new("div", "message default clearfix");
    /// Carries the full timestamp in its `title` attribute.
    pub const DATE_DETAILS: Marker = Marker::new("div", "pull_right date details");
    pub const FROM_NAME: Marker = Marker::new("div", "from_name");
    pub const TEXT: Marker = Marker::new("div", "text");
    pub const MEDIA_WRAP: Marker = Marker::new("div", "media_wrap clearfix");
    /// Notice left by the export when a file was not downloaded.
    pub const TITLE_BOLD: Marker = Marker::new("div", "title bold");
    pub const PHOTO_WRAP: Marker = Marker::new("a", "photo_wrap clearfix pull_left");
    pub const REPLY_TO: Marker = Marker::new("div", "reply_to details");
    pub const FORWARDED: Marker = Marker::new("div", "forwarded body");
}

static MESSAGE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"message[0-9]+").expect("valid message token pattern"));

/// Parser for Telegram Desktop HTML exports (`messages.html`, `messages2.html`, ...).
///
/// Each export file holds a list of message containers:
/// ```html
/// <div class="message default clearfix" id="message101">
///   <div class="body">
///     <div class="pull_right date details" title="26.01.2021 14:32:10">14:32</div>
///     <div class="from_name">Alice</div>
///     <div class="reply_to details">
///       In reply to <a href="#go_to_message99">this message</a>
///     </div>
///     <div class="text">Hello</div>
///   </div>
/// </div>
/// ```
///
/// Continuation messages (`message default clearfix joined`) and service
/// messages do not carry the container marker and are skipped.
#[derive(Debug, Clone, Default)]
pub struct TelegramHtmlParser {
    config: ParserConfig,
}

impl TelegramHtmlParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn name(&self) -> &'static str {
        "Telegram HTML"
    }

    /// Loads and extracts one export file.
    ///
    /// Malformed record errors carry `path`.
    pub fn parse(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        let document = Document::load(path)?;
        self.extract(&document)
    }

    /// Extracts records from in-memory markup.
    pub fn parse_str(&self, content: &str) -> Result<Vec<MessageRecord>> {
        self.extract(&Document::parse_str(content))
    }

    /// Extracts one record per message container, in document order.
    pub fn extract(&self, document: &Document) -> Result<Vec<MessageRecord>> {
        let records = markers::MESSAGE
            .find_all(document.root())
            .map(|container| self.extract_record(container))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| match document.path() {
                Some(path) => e.with_path(path),
                None => e,
            })?;

        tracing::debug!(
            path = ?document.path(),
            records = records.len(),
            "extracted message records"
        );
        Ok(records)
    }

    fn extract_record(&self, container: ElementRef<'_>) -> Result<MessageRecord> {
        let id = container
            .value()
            .attr("id")
            .ok_or_else(|| ArchiveError::malformed("id", None, "container has no id attribute"))?;

        let (date, time) = self.extract_timestamp(container, id)?;

        let sender = markers::FROM_NAME
            .find(container)
            .map(trimmed_text)
            .ok_or_else(|| ArchiveError::malformed("sender", Some(id), "no from_name element"))?;

        let mut record = MessageRecord::new(id, date, time, sender)
            .with_attachment(extract_attachment(container));

        if let Some(text) = markers::TEXT.find(container) {
            record = record.with_message(trimmed_text(text));
        }
        if let Some(reply_to) = self.extract_reply_to(container, id)? {
            record = record.with_reply_to(reply_to);
        }
        if let Some(origin) = extract_forwarded_from(container, id)? {
            record = record.with_forwarded_from(origin);
        }

        Ok(record)
    }

    /// Splits the `title` of the date details element into date and time.
    fn extract_timestamp(&self, container: ElementRef<'_>, id: &str) -> Result<(String, String)> {
        let title = markers::DATE_DETAILS
            .find(container)
            .ok_or_else(|| ArchiveError::malformed("date", Some(id), "no date details element"))?
            .value()
            .attr("title")
            .ok_or_else(|| {
                ArchiveError::malformed("date", Some(id), "date details have no title attribute")
            })?;

        let mut parts = title.split_whitespace();
        let (Some(date), Some(time)) = (parts.next(), parts.next()) else {
            return Err(ArchiveError::malformed(
                "time",
                Some(id),
                format!("expected '<date> <time>', got '{}'", title),
            ));
        };

        if self.config.strict_timestamp && parts.next().is_some() {
            return Err(ArchiveError::malformed(
                "time",
                Some(id),
                format!("unexpected text after '<date> <time>' in '{}'", title),
            ));
        }

        Ok((date.to_string(), time.to_string()))
    }

    /// Reads the id of the replied message from the reply block, if any.
    fn extract_reply_to(&self, container: ElementRef<'_>, id: &str) -> Result<Option<String>> {
        let Some(reply) = markers::REPLY_TO.find(container) else {
            return Ok(None);
        };

        let from_anchor = descendant_elements(reply)
            .filter(|el| el.value().name() == "a")
            .filter_map(|a| a.value().attr("href"))
            .find_map(message_token_from_href);
        if let Some(token) = from_anchor {
            return Ok(Some(token.to_string()));
        }

        if self.config.reply_pattern_fallback {
            if let Some(found) = MESSAGE_TOKEN.find(&reply.html()) {
                return Ok(Some(found.as_str().to_string()));
            }
        }

        Err(ArchiveError::malformed(
            "reply_to",
            Some(id),
            "reply block does not reference a message",
        ))
    }
}

/// Classifies the media wrapper of a container.
///
/// A bold title wins over a photo wrapper; any other media kind yields
/// [`Attachment::None`].
fn extract_attachment(container: ElementRef<'_>) -> Attachment {
    let Some(media) = markers::MEDIA_WRAP.find(container) else {
        return Attachment::None;
    };

    if let Some(title) = markers::TITLE_BOLD.find(media) {
        return Attachment::Placeholder(trimmed_text(title));
    }

    if let Some(photo) = markers::PHOTO_WRAP.find(media) {
        let images = descendant_elements(photo)
            .filter(|el| el.value().name() == "img")
            .map(image_descriptor)
            .collect();
        return Attachment::Photos(images);
    }

    Attachment::None
}

fn image_descriptor(img: ElementRef<'_>) -> ImageDescriptor {
    let value = img.value();
    ImageDescriptor {
        src: value.attr("src").unwrap_or_default().to_string(),
        attributes: value
            .attrs()
            .map(|(name, val)| (name.to_string(), val.to_string()))
            .collect(),
        markup: img.html(),
    }
}

/// Returns the name of the original author of a forwarded message, if any.
///
/// The nested name element also holds a `<span>` with the original date;
/// it is left out.
fn extract_forwarded_from(container: ElementRef<'_>, id: &str) -> Result<Option<String>> {
    let Some(forwarded) = markers::FORWARDED.find(container) else {
        return Ok(None);
    };

    let name = markers::FROM_NAME.find(forwarded).ok_or_else(|| {
        ArchiveError::malformed(
            "forwarded_from",
            Some(id),
            "forwarded body has no from_name element",
        )
    })?;

    Ok(Some(trimmed_text_without(name, "span")))
}

/// Extracts `message<digits>` from links such as `#go_to_message123` or
/// `messages2.html#go_to_message123`.
fn message_token_from_href(href: &str) -> Option<&str> {
    let (_, fragment) = href.rsplit_once('#')?;
    let token = fragment.strip_prefix("go_to_").unwrap_or(fragment);
    let digits = token.strip_prefix("message")?;

    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            r#"<html><body><div class="history">
<div class="message default clearfix" id="message101">
 <div class="body">
  <div class="pull_right date details" title="26.01.2021 14:32:10">14:32</div>
  <div class="from_name">
   Alice
  </div>
  {body}
 </div>
</div>
</div></body></html>"#
        )
    }

    fn parse_one(body: &str) -> MessageRecord {
        let mut records = TelegramHtmlParser::new().parse_str(&wrap(body)).unwrap();
        assert_eq!(records.len(), 1);
        records.remove(0)
    }

    #[test]
    fn test_parser_name() {
        assert_eq!(TelegramHtmlParser::new().name(), "Telegram HTML");
    }

    #[test]
    fn test_basic_text_message() {
        let record = parse_one(r#"<div class="text">  Hello  </div>"#);
        assert_eq!(
            record.fields(),
            ["message101", "26.01.2021", "14:32:10", "Alice", "Hello", "NA", "NA", "NA"]
        );
    }

    #[test]
    fn test_bold_title_wins_over_photo() {
        let record = parse_one(
            r#"<div class="media_wrap clearfix">
                 <a class="photo_wrap clearfix pull_left" href="photos/p.jpg"><img src="photos/p_thumb.jpg"></a>
                 <div class="title bold"> Photo not included </div>
               </div>"#,
        );
        assert_eq!(
            record.attachment(),
            &Attachment::Placeholder("Photo not included".into())
        );
    }

    #[test]
    fn test_photo_wrap_collects_images() {
        let record = parse_one(
            r#"<div class="media_wrap clearfix">
                 <a class="photo_wrap clearfix pull_left" href="photos/p.jpg">
                   <img class="photo" src="photos/p_thumb.jpg" style="width: 260px">
                 </a>
               </div>"#,
        );
        let Attachment::Photos(images) = record.attachment() else {
            panic!("expected photos, got {:?}", record.attachment());
        };
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].src, "photos/p_thumb.jpg");
        assert_eq!(images[0].attr("class"), Some("photo"));
        assert!(images[0].markup.starts_with("<img"));
        assert!(!images[0].markup.ends_with("/>"));
    }

    #[test]
    fn test_unsupported_media_is_na() {
        let record = parse_one(
            r#"<div class="media_wrap clearfix">
                 <a class="media clearfix pull_left block_link media_video" href="video.mp4"></a>
               </div>"#,
        );
        assert!(record.attachment().is_none());
    }

    #[test]
    fn test_reply_from_anchor() {
        let record = parse_one(
            r#"<div class="reply_to details">In reply to <a href="messages2.html#go_to_message42" onclick="return GoToMessage(42)">this message</a></div>"#,
        );
        assert_eq!(record.reply_to(), Some("message42"));
    }

    #[test]
    fn test_reply_pattern_fallback() {
        let record = parse_one(r#"<div class="reply_to details" data-ref="message77">In reply</div>"#);
        assert_eq!(record.reply_to(), Some("message77"));
    }

    #[test]
    fn test_reply_without_reference_is_malformed() {
        let html = wrap(r#"<div class="reply_to details">In reply to a deleted message</div>"#);
        let err = TelegramHtmlParser::new().parse_str(&html).unwrap_err();
        assert_eq!(err.malformed_field(), Some("reply_to"));
        assert!(err.to_string().contains("message101"));
    }

    #[test]
    fn test_reply_fallback_disabled() {
        let parser =
            TelegramHtmlParser::with_config(ParserConfig::new().with_reply_pattern_fallback(false));
        let html = wrap(r#"<div class="reply_to details" data-ref="message77">In reply</div>"#);
        assert!(parser.parse_str(&html).unwrap_err().is_malformed());
    }

    #[test]
    fn test_forwarded_from_drops_span() {
        let record = parse_one(
            r#"<div class="forwarded body">
                 <div class="from_name">
                   Daily News <span class="details"> 25.01.2021 09:00:00</span>
                 </div>
                 <div class="text">Breaking</div>
               </div>"#,
        );
        assert_eq!(record.forwarded_from(), Some("Daily News"));
        assert_eq!(record.message(), Some("Breaking"));
        assert_eq!(record.sender(), "Alice");
    }

    #[test]
    fn test_trailing_timestamp_tokens() {
        let html = wrap("").replace("14:32:10\"", "14:32:10 UTC+01:00\"");
        let records = TelegramHtmlParser::new().parse_str(&html).unwrap();
        assert_eq!(records[0].time(), "14:32:10");

        let strict = TelegramHtmlParser::with_config(ParserConfig::new().with_strict_timestamp(true));
        assert!(strict.parse_str(&html).unwrap_err().is_malformed());
    }

    #[test]
    fn test_message_token_from_href() {
        assert_eq!(message_token_from_href("#go_to_message12"), Some("message12"));
        assert_eq!(
            message_token_from_href("messages3.html#go_to_message9"),
            Some("message9")
        );
        assert_eq!(message_token_from_href("#message5"), Some("message5"));
        assert_eq!(message_token_from_href("#go_to_message"), None);
        assert_eq!(message_token_from_href("#go_to_message1a"), None);
        assert_eq!(message_token_from_href("photos/photo.jpg"), None);
    }
}
