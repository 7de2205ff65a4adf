//! Markup helpers: fence stripping, data URIs, inert tokenization and export.
//!
//! Generated markup is untrusted. Nothing here interprets it beyond splitting
//! tags from text for display, and the export shell only ever embeds it inside
//! a sandboxed `srcdoc` frame.

use std::path::Path;
use std::sync::LazyLock;

use base64::Engine as _;
use regex::Regex;

use crate::error::{Error, Result};

/// Shown in place of a layout when image-to-layout generation fails
pub const LAYOUT_FALLBACK: &str = "<div class='p-10 text-center text-red-500'>Failed to generate layout from image. Ensure your API Key is valid and supports the model.</div>";

/// Default MIME type when a data URI or file extension gives no hint
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Inline error element used when widget generation fails
pub fn widget_fallback(error: impl std::fmt::Display) -> String {
    format!(
        "<div class=\"fixed top-4 right-4 z-50 bg-red-100 text-red-800 p-4 rounded shadow\">Failed to generate widget: {error}</div>"
    )
}

/// Remove markdown code-fence markers the model may wrap around markup.
///
/// This is a normalization step only; the rest of the text is untouched.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```html", "").replace("```", "")
}

// ─────────────────────────────────────────────────────────────────
// Data URIs
// ─────────────────────────────────────────────────────────────────

/// An image encoded as a `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    /// Base64 payload (everything after the first comma)
    pub payload: String,
}

impl DataUri {
    /// Split a data URI into MIME type and payload.
    ///
    /// Only the part after the comma is kept as payload. A header without a
    /// MIME type yields [`DEFAULT_IMAGE_MIME`].
    pub fn parse(uri: &str) -> Result<DataUri> {
        let (header, payload) = uri
            .split_once(',')
            .ok_or_else(|| Error::invalid_image("data URI has no ',' separator"))?;
        let mime = header
            .strip_prefix("data:")
            .map(|rest| rest.split(';').next().unwrap_or_default())
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);
        Ok(DataUri {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8], mime: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            payload: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Read an image file and encode it
    pub fn from_file(path: &Path) -> Result<DataUri> {
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(Error::invalid_image(format!(
                "{} is empty",
                path.display()
            )));
        }
        Ok(Self::from_bytes(&bytes, mime_for_path(path)))
    }

    /// Decoded size in bytes of a padded base64 payload
    pub fn decoded_len(&self) -> usize {
        let payload = self.payload.trim_end();
        let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
        (payload.len() / 4 * 3).saturating_sub(padding)
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

/// Infer an image MIME type from a file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => DEFAULT_IMAGE_MIME,
    }
}

// ─────────────────────────────────────────────────────────────────
// Inert tokenization
// ─────────────────────────────────────────────────────────────────

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid tag regex"));

/// A slice of markup classified for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupToken<'a> {
    Tag(&'a str),
    Comment(&'a str),
    Text(&'a str),
}

/// Split markup into tags, comments and text runs without interpreting it
pub fn tokenize(markup: &str) -> Vec<MarkupToken<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in TAG_RE.find_iter(markup) {
        if m.start() > last {
            tokens.push(MarkupToken::Text(&markup[last..m.start()]));
        }
        let s = m.as_str();
        if s.starts_with("<!--") {
            tokens.push(MarkupToken::Comment(s));
        } else {
            tokens.push(MarkupToken::Tag(s));
        }
        last = m.end();
    }
    if last < markup.len() {
        tokens.push(MarkupToken::Text(&markup[last..]));
    }
    tokens
}

/// Visible text of a markup fragment, whitespace-collapsed
pub fn visible_text(markup: &str) -> String {
    tokenize(markup)
        .into_iter()
        .filter_map(|t| match t {
            MarkupToken::Text(s) => Some(s),
            _ => None,
        })
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// ─────────────────────────────────────────────────────────────────
// Export
// ─────────────────────────────────────────────────────────────────

/// Escape text for use inside a double-quoted HTML attribute
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text content
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wrap a markup fragment in a standalone page.
///
/// The fragment is placed in an iframe sandboxed to an opaque origin. Scripts
/// may run inside the frame (Tailwind's CDN build needs them) but never with
/// access to the exporting page.
pub fn export_document(title: &str, fragment: &str) -> String {
    let inner = format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <script src=\"https://cdn.tailwindcss.com\"></script></head>\
         <body>{fragment}</body></html>"
    );
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
         <style>html,body{{margin:0;height:100%}}iframe{{border:0;width:100%;height:100%}}</style>\n\
         </head>\n<body>\n<iframe sandbox=\"allow-scripts\" srcdoc=\"{}\"></iframe>\n</body>\n</html>\n",
        escape_text(title),
        escape_attribute(&inner)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        let raw = "```html\n<div>hi</div>\n```";
        assert_eq!(strip_code_fences(raw), "\n<div>hi</div>\n");
        assert_eq!(strip_code_fences("<p>plain</p>"), "<p>plain</p>");
    }

    #[test]
    fn test_decoded_len_accounts_for_padding() {
        for len in [1usize, 2, 3, 4, 2048] {
            let uri = DataUri::from_bytes(&vec![7u8; len], "image/png");
            assert_eq!(uri.decoded_len(), len, "{} bytes", len);
        }
    }

    #[test]
    fn test_data_uri_forwards_only_payload() {
        let uri = DataUri::parse("data:image/png;base64,AAAA").unwrap();
        assert_eq!(uri.mime, "image/png");
        assert_eq!(uri.payload, "AAAA");
    }

    #[test]
    fn test_data_uri_without_mime_defaults_to_jpeg() {
        let uri = DataUri::parse("data:;base64,QUJD").unwrap();
        assert_eq!(uri.mime, DEFAULT_IMAGE_MIME);
        assert!(DataUri::parse("no separator").is_err());
    }

    #[test]
    fn test_data_uri_display_round_trips_header() {
        let uri = DataUri::from_bytes(b"abc", "image/gif");
        assert_eq!(uri.to_string(), "data:image/gif;base64,YWJj");
    }

    #[test]
    fn test_from_file_infers_mime_and_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("shot.PNG");
        std::fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(DataUri::from_file(&png).unwrap().mime, "image/png");

        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(
            DataUri::from_file(&empty),
            Err(Error::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_tokenize_splits_tags_and_text() {
        let tokens = tokenize("<div class=\"a\">Hi <b>there</b><!-- note --></div>");
        assert_eq!(
            tokens,
            vec![
                MarkupToken::Tag("<div class=\"a\">"),
                MarkupToken::Text("Hi "),
                MarkupToken::Tag("<b>"),
                MarkupToken::Text("there"),
                MarkupToken::Tag("</b>"),
                MarkupToken::Comment("<!-- note -->"),
                MarkupToken::Tag("</div>"),
            ]
        );
    }

    #[test]
    fn test_visible_text_collapses_whitespace() {
        assert_eq!(
            visible_text("<h3>Server   Error</h3>\n<p>Try\nlater</p>"),
            "Server Error Try later"
        );
    }

    #[test]
    fn test_export_document_sandboxes_fragment() {
        let doc = export_document("My <UI>", "<script>alert(\"x\")</script>");
        assert!(doc.contains("<iframe sandbox=\"allow-scripts\" srcdoc=\""));
        assert!(!doc.contains("allow-same-origin"));
        assert!(doc.contains("<title>My &lt;UI&gt;</title>"));
        assert!(!doc.contains("<script>alert"));
        assert!(doc.contains("&lt;script&gt;alert(&quot;x&quot;)"));
    }

    #[test]
    fn test_widget_fallback_embeds_error() {
        let html = widget_fallback("timeout");
        assert!(html.contains("Failed to generate widget: timeout"));
    }
}
