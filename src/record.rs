//! Output record type for extracted chat messages.
//!
//! This module provides [`MessageRecord`], one row of the output table, plus
//! the [`Attachment`] and [`ImageDescriptor`] types it carries.
//!
//! # Overview
//!
//! A record consists of:
//! - **Required**: `id`, `date`, `time`, `sender`
//! - **Optional**: `message`, `attachment`, `reply_to`, `forwarded_from`
//!
//! Optional fields are stored as [`Option`] (or [`Attachment::None`]) and
//! only turn into the [`NA`] sentinel when the record is rendered through
//! [`MessageRecord::fields`].
//!
//! # Example
//!
//! ```
//! use tgarchive::MessageRecord;
//!
//! let record = MessageRecord::new("message101", "26.01.2021", "14:32:10", "Alice")
//!     .with_message("Hello");
//!
//! assert_eq!(
//!     record.fields(),
//!     ["message101", "26.01.2021", "14:32:10", "Alice", "Hello", "NA", "NA", "NA"]
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Placeholder written for optional fields that are absent.
pub const NA: &str = "NA";

/// Column names of the output table, in field order.
pub const HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Time",
    "Sender",
    "Message",
    "Attachment",
    "Responds_to",
    "Forward_from",
];

/// Date and time layout of the archive's timestamp titles.
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// One `<img>` element found inside a photo attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Value of the `src` attribute (empty when the element has none).
    pub src: String,

    /// All attributes of the element, in source order.
    #[serde(default)]
    pub attributes: Vec<(String, String)>,

    /// The element serialized back to markup.
    pub markup: String,
}

impl ImageDescriptor {
    /// Creates a descriptor with only a source path.
    pub fn new(src: impl Into<String>) -> Self {
        let src = src.into();
        let markup = format!("<img src=\"{}\">", escape_attribute(&src));
        Self {
            attributes: vec![("src".to_string(), src.clone())],
            src,
            markup,
        }
    }

    /// Returns the value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Escapes an attribute value for a double-quoted HTML attribute.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '"']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace('&', "&amp;").replace('"', "&quot;"))
}

/// What a message carries besides its text.
///
/// The three forms are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Attachment {
    /// No media wrapper, or one of an unsupported kind (video, voice, sticker).
    #[default]
    None,

    /// The export skipped the file and left a notice instead,
    /// e.g. "Photo not included, change data exporting settings to download".
    Placeholder(String),

    /// Exported images, in document order. May be empty.
    Photos(Vec<ImageDescriptor>),
}

impl Attachment {
    /// Returns `true` for [`Attachment::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Attachment::None)
    }

    /// Renders the attachment as a single table cell.
    ///
    /// Photos are written as a bracketed list of their markup:
    /// `[<img src="a.jpg">, <img src="b.jpg">]`.
    pub fn to_field(&self) -> Cow<'_, str> {
        match self {
            Attachment::None => Cow::Borrowed(NA),
            Attachment::Placeholder(text) => Cow::Borrowed(text),
            Attachment::Photos(images) => {
                let parts: Vec<&str> = images.iter().map(|img| img.markup.as_str()).collect();
                Cow::Owned(format!("[{}]", parts.join(", ")))
            }
        }
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_field())
    }
}

/// One extracted chat message, ready to be written as a table row.
///
/// Records are built once by the extractor and never modified afterwards;
/// fields are read through accessors.
///
/// | Field | Type | Rendered as |
/// |-------|------|-------------|
/// | `id` | `String` | verbatim |
/// | `date` | `String` | verbatim |
/// | `time` | `String` | verbatim |
/// | `sender` | `String` | verbatim |
/// | `message` | `Option<String>` | text or `NA` |
/// | `attachment` | [`Attachment`] | see [`Attachment::to_field`] |
/// | `reply_to` | `Option<String>` | message token or `NA` |
/// | `forwarded_from` | `Option<String>` | display name or `NA` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    id: String,
    date: String,
    time: String,
    sender: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    attachment: Attachment,
    #[serde(default)]
    reply_to: Option<String>,
    #[serde(default)]
    forwarded_from: Option<String>,
}

impl MessageRecord {
    /// Creates a record with the required fields; all optional fields absent.
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            time: time.into(),
            sender: sender.into(),
            message: None,
            attachment: Attachment::None,
            reply_to: None,
            forwarded_from: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Sets the text body.
    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    /// Sets the attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = attachment;
        self
    }

    /// Sets the id of the message being replied to.
    #[must_use]
    pub fn with_reply_to(mut self, reply_id: impl Into<String>) -> Self {
        self.reply_to = Some(reply_id.into());
        self
    }

    /// Sets the original sender of a forwarded message.
    #[must_use]
    pub fn with_forwarded_from(mut self, name: impl Into<String>) -> Self {
        self.forwarded_from = Some(name.into());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the container identifier, e.g. `message101`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the date part of the timestamp, e.g. `26.01.2021`.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the time part of the timestamp, e.g. `14:32:10`.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the display name of the author.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the text body, if the message has one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the attachment.
    pub fn attachment(&self) -> &Attachment {
        &self.attachment
    }

    /// Returns the id of the message being replied to, if any.
    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    /// Returns the original sender of a forwarded message, if any.
    pub fn forwarded_from(&self) -> Option<&str> {
        self.forwarded_from.as_deref()
    }

    /// Parses `date` and `time` into a timestamp.
    ///
    /// Returns `None` when the export uses a layout other than
    /// `DD.MM.YYYY HH:MM:SS`.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let combined = format!("{} {}", self.date, self.time);
        NaiveDateTime::parse_from_str(&combined, TIMESTAMP_FORMAT).ok()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Returns the eight table cells of this record, in [`HEADER`] order.
    ///
    /// Absent optional fields are rendered as [`NA`].
    pub fn fields(&self) -> [Cow<'_, str>; 8] {
        [
            Cow::Borrowed(self.id.as_str()),
            Cow::Borrowed(self.date.as_str()),
            Cow::Borrowed(self.time.as_str()),
            Cow::Borrowed(self.sender.as_str()),
            Cow::Borrowed(self.message.as_deref().unwrap_or(NA)),
            self.attachment.to_field(),
            Cow::Borrowed(self.reply_to.as_deref().unwrap_or(NA)),
            Cow::Borrowed(self.forwarded_from.as_deref().unwrap_or(NA)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_new_has_sentinels() {
        let record = MessageRecord::new("message1", "01.02.2021", "10:00:00", "Bob");
        let fields = record.fields();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[4], NA);
        assert_eq!(fields[5], NA);
        assert_eq!(fields[6], NA);
        assert_eq!(fields[7], NA);
        assert!(record.message().is_none());
        assert!(record.attachment().is_none());
    }

    #[test]
    fn test_record_builder() {
        let record = MessageRecord::new("message7", "01.02.2021", "10:00:00", "Bob")
            .with_message("see above")
            .with_reply_to("message5")
            .with_forwarded_from("News Channel");

        assert_eq!(record.message(), Some("see above"));
        assert_eq!(record.reply_to(), Some("message5"));
        assert_eq!(record.forwarded_from(), Some("News Channel"));
        assert_eq!(
            record.fields(),
            [
                "message7",
                "01.02.2021",
                "10:00:00",
                "Bob",
                "see above",
                "NA",
                "message5",
                "News Channel"
            ]
        );
    }

    #[test]
    fn test_attachment_placeholder_field() {
        let att = Attachment::Placeholder("Photo not included".into());
        assert_eq!(att.to_field(), "Photo not included");
        assert_eq!(att.to_string(), "Photo not included");
    }

    #[test]
    fn test_attachment_photos_field() {
        let att = Attachment::Photos(vec![
            ImageDescriptor::new("photos/a.jpg"),
            ImageDescriptor::new("photos/b.jpg"),
        ]);
        assert_eq!(
            att.to_field(),
            r#"[<img src="photos/a.jpg">, <img src="photos/b.jpg">]"#
        );
    }

    #[test]
    fn test_attachment_empty_photos_field() {
        let att = Attachment::Photos(Vec::new());
        assert_eq!(att.to_field(), "[]");
        assert!(!att.is_none());
    }

    #[test]
    fn test_image_descriptor_attr() {
        let img = ImageDescriptor::new("photos/a.jpg");
        assert_eq!(img.attr("src"), Some("photos/a.jpg"));
        assert_eq!(img.attr("alt"), None);
    }

    #[test]
    fn test_image_descriptor_escapes_src_in_markup() {
        let img = ImageDescriptor::new(r#"photos/"odd" & co.jpg"#);
        assert_eq!(img.src, r#"photos/"odd" & co.jpg"#);
        assert_eq!(img.attr("src"), Some(r#"photos/"odd" & co.jpg"#));
        assert_eq!(img.markup, r#"<img src="photos/&quot;odd&quot; &amp; co.jpg">"#);
    }

    #[test]
    fn test_timestamp_parsing() {
        let record = MessageRecord::new("message1", "26.01.2021", "14:32:10", "Alice");
        let ts = record.timestamp().unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2021-01-26 14:32:10");

        let odd = MessageRecord::new("message2", "2021-01-26", "14:32", "Alice");
        assert!(odd.timestamp().is_none());
    }

    #[test]
    fn test_record_serialization() {
        let record = MessageRecord::new("message3", "26.01.2021", "14:32:10", "Alice")
            .with_attachment(Attachment::Placeholder("Photo not included".into()));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"kind\":\"placeholder\""));
        assert!(json.contains("message3"));

        let parsed: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
