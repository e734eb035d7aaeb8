//! Loading and querying exported HTML documents.
//!
//! A [`Document`] wraps a parsed [`scraper::Html`] tree. Elements of interest
//! are located with [`Marker`]s: a tag name plus the class string Telegram
//! Desktop writes on that element.
//!
//! # Marker matching
//!
//! An element matches a marker when its tag equals the marker tag and either
//! its whole `class` attribute equals the marker class (whitespace
//! normalized), or the marker class is a single token present in the
//! element's class list.
//!
//! ```rust
//! use tgarchive::document::{Document, Marker};
//!
//! let doc = Document::parse_str(
//!     r#"<div class="message default clearfix" id="message1"></div>
//!        <div class="message default clearfix joined" id="message2"></div>"#,
//! );
//! let container = Marker::new("div", "message default clearfix");
//!
//! let ids: Vec<_> = container
//!     .find_all(doc.root())
//!     .filter_map(|el| el.value().attr("id"))
//!     .collect();
//! assert_eq!(ids, ["message1"]);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use scraper::{ElementRef, Html};

use crate::error::{ArchiveError, Result};

/// Tag name plus class string identifying one kind of element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Element name, e.g. `div`
    pub tag: &'static str,
    /// Class attribute, e.g. `pull_right date details`
    pub class: &'static str,
}

impl Marker {
    /// Creates a marker.
    pub const fn new(tag: &'static str, class: &'static str) -> Self {
        Self { tag, class }
    }

    /// Returns `true` if `element` carries this marker.
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if value.name() != self.tag {
            return false;
        }
        let Some(class_attr) = value.attr("class") else {
            return false;
        };

        if class_attr.split_whitespace().eq(self.class.split_whitespace()) {
            return true;
        }
        !self.class.contains(char::is_whitespace)
            && class_attr.split_whitespace().any(|c| c == self.class)
    }

    /// Returns the first descendant of `scope` carrying this marker,
    /// in document order. `scope` itself is not considered.
    pub fn find<'a>(self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.find_all(scope).next()
    }

    /// Returns all descendants of `scope` carrying this marker, in document order.
    pub fn find_all<'a>(self, scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
        descendant_elements(scope).filter(move |el| self.matches(el))
    }
}

/// Iterates over the element descendants of `scope`, excluding `scope`.
pub fn descendant_elements<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    scope.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// Returns the concatenated text of `element` with surrounding whitespace removed.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Returns the trimmed text of `element`, leaving out every `skip_tag`
/// sub-element and its contents.
pub fn trimmed_text_without(element: ElementRef<'_>, skip_tag: &str) -> String {
    let mut out = String::new();
    collect_text(element, skip_tag, &mut out);
    out.trim().to_string()
}

fn collect_text(element: ElementRef<'_>, skip_tag: &str, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            if child_el.value().name() != skip_tag {
                collect_text(child_el, skip_tag, out);
            }
        }
    }
}

/// One parsed export file.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
    path: Option<PathBuf>,
}

impl Document {
    /// Reads and parses the document at `path`.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::NotFound`] if `path` is missing, not a regular file,
    ///   or cannot be opened
    /// - [`ArchiveError::Utf8`] if the content is not valid UTF-8
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ArchiveError::not_found(path));
        }

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                ArchiveError::not_found(path)
            }
            _ => ArchiveError::Io(e),
        })?;
        let content = String::from_utf8(bytes).map_err(|source| ArchiveError::Utf8 {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "loaded document");

        Ok(Self {
            html: Html::parse_document(&content),
            path: Some(path.to_path_buf()),
        })
    }

    /// Parses in-memory markup.
    pub fn parse_str(content: &str) -> Self {
        Self {
            html: Html::parse_document(content),
            path: None,
        }
    }

    /// Returns the path the document was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the root `<html>` element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn first_div(doc: &Document) -> ElementRef<'_> {
        descendant_elements(doc.root())
            .find(|el| el.value().name() == "div")
            .unwrap()
    }

    #[test]
    fn test_marker_exact_class_string() {
        let doc = Document::parse_str(r#"<div class="media_wrap  clearfix"></div>"#);
        let el = first_div(&doc);
        assert!(Marker::new("div", "media_wrap clearfix").matches(&el));
        assert!(Marker::new("div", "media_wrap").matches(&el));
    }

    #[test]
    fn test_marker_single_class_token() {
        let doc = Document::parse_str(r#"<div class="text bold"></div>"#);
        let el = first_div(&doc);
        assert!(Marker::new("div", "text").matches(&el));
        assert!(Marker::new("div", "bold").matches(&el));
        assert!(!Marker::new("div", "title bold").matches(&el));
    }

    #[test]
    fn test_marker_rejects_extra_classes_and_wrong_tag() {
        let doc = Document::parse_str(
            r#"<div class="message default clearfix joined"></div><span class="from_name"></span>"#,
        );
        let container = Marker::new("div", "message default clearfix");
        assert_eq!(container.find_all(doc.root()).count(), 0);
        assert!(Marker::new("div", "from_name").find(doc.root()).is_none());
        assert!(Marker::new("span", "from_name").find(doc.root()).is_some());
    }

    #[test]
    fn test_marker_without_class_attribute() {
        let doc = Document::parse_str("<div>plain</div>");
        assert!(!Marker::new("div", "text").matches(&first_div(&doc)));
    }

    #[test]
    fn test_find_excludes_scope_and_keeps_order() {
        let doc = Document::parse_str(
            r#"<div class="text" id="outer"><div class="text" id="a"></div><div class="text" id="b"></div></div>"#,
        );
        let outer = Marker::new("div", "text").find(doc.root()).unwrap();
        assert_eq!(outer.value().attr("id"), Some("outer"));

        let inner: Vec<_> = Marker::new("div", "text")
            .find_all(outer)
            .filter_map(|el| el.value().attr("id"))
            .collect();
        assert_eq!(inner, ["a", "b"]);
    }

    #[test]
    fn test_trimmed_text() {
        let doc = Document::parse_str("<div>\n   Hello <b>world</b>  \n</div>");
        assert_eq!(trimmed_text(first_div(&doc)), "Hello world");
    }

    #[test]
    fn test_trimmed_text_without_spans() {
        let doc = Document::parse_str(
            r#"<div> Channel Name <span class="details"> 01.01.2021 10:00:00</span> </div>"#,
        );
        assert_eq!(trimmed_text_without(first_div(&doc), "span"), "Channel Name");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Document::load(Path::new("/definitely/not/here.html")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(dir.path()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_load_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x3c, 0x70, 0x3e, 0xff, 0xfe]).unwrap();
        let err = Document::load(file.path()).unwrap_err();
        assert!(matches!(err, ArchiveError::Utf8 { .. }));
    }

    #[test]
    fn test_load_records_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("<div class=\"text\">Привет</div>".as_bytes()).unwrap();
        let doc = Document::load(file.path()).unwrap();
        assert_eq!(doc.path(), Some(file.path()));
        let text = Marker::new("div", "text").find(doc.root()).unwrap();
        assert_eq!(trimmed_text(text), "Привет");
    }
}
