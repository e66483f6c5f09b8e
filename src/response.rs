//! Reply text normalization.
//!
//! WHOIS authorities reply in whatever encoding they like; the candidates
//! seen in practice are UTF-8, ISO-8859-1 and ISO-8859-15. Raw bytes are
//! detected best-effort, converted to UTF-8, and HTML-escaped so the result
//! is safe to embed. The escaped string is the canonical info text consumed
//! by callers and by the extractor.

use encoding_rs::{ISO_8859_15, WINDOWS_1252};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]*>").expect("valid tag pattern");
    static ref LINE_BREAK: Regex = Regex::new(r"(\r\n|\r|\n)").expect("valid break pattern");
}

/// Source encoding inferred from raw reply bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedEncoding {
    Utf8,
    Iso8859_1,
    Iso8859_15,
}

impl DetectedEncoding {
    /// Canonical label for the detected encoding.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Iso8859_15 => "ISO-8859-15",
        }
    }
}

/// Best-effort encoding detection over the candidate set.
///
/// Valid UTF-8 wins outright. Among the Latin fallbacks, a 0xA4 byte is the
/// euro sign in ISO-8859-15 and the rarely-used currency sign in ISO-8859-1,
/// so its presence tips detection to ISO-8859-15.
pub fn detect_encoding(bytes: &[u8]) -> DetectedEncoding {
    if std::str::from_utf8(bytes).is_ok() {
        DetectedEncoding::Utf8
    } else if bytes.contains(&0xA4) {
        DetectedEncoding::Iso8859_15
    } else {
        DetectedEncoding::Iso8859_1
    }
}

/// Convert raw reply bytes to a UTF-8 string using the detected encoding.
pub fn to_utf8(bytes: &[u8]) -> String {
    match detect_encoding(bytes) {
        DetectedEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        DetectedEncoding::Iso8859_15 => ISO_8859_15.decode(bytes).0.into_owned(),
        // encoding_rs follows the WHATWG mapping where the ISO-8859-1 label
        // resolves to windows-1252; identical for all printable Latin-1 bytes.
        DetectedEncoding::Iso8859_1 => WINDOWS_1252.decode(bytes).0.into_owned(),
    }
}

/// Escape text for safe HTML embedding: `&`, `<`, `>` and quotes. All other
/// characters pass through unchanged.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Remove markup tags from an HTTP reply body.
pub fn strip_tags(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Insert `<br />` before every newline sequence for display.
pub fn nl2br(text: &str) -> String {
    LINE_BREAK.replace_all(text, "<br />$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_utf8() {
        assert_eq!(detect_encoding(b"plain ascii"), DetectedEncoding::Utf8);
        assert_eq!(
            detect_encoding("Zürich €".as_bytes()),
            DetectedEncoding::Utf8
        );
    }

    #[test]
    fn test_detect_latin_variants() {
        // 0xFC is u-umlaut in both Latin charsets; no euro marker -> 8859-1
        assert_eq!(
            detect_encoding(b"Z\xFCrich"),
            DetectedEncoding::Iso8859_1
        );
        // 0xA4 is the euro sign in ISO-8859-15
        assert_eq!(
            detect_encoding(b"price \xA4 42 \xFC"),
            DetectedEncoding::Iso8859_15
        );
    }

    #[test]
    fn test_to_utf8_conversion() {
        assert_eq!(to_utf8(b"plain"), "plain");
        assert_eq!(to_utf8(b"Z\xFCrich"), "Z\u{fc}rich");
        assert_eq!(to_utf8(b"\xA4\xFC 10"), "\u{20ac}\u{fc} 10");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">R&D 'lab'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;R&amp;D &#39;lab&#39;&lt;/a&gt;"
        );
        // Non-ASCII passes through untouched
        assert_eq!(escape_html("Zürich €"), "Zürich €");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<html><body>Domain: <b>example.com</b></body></html>"),
            "Domain: example.com"
        );
        assert_eq!(strip_tags("no markup"), "no markup");
    }

    #[test]
    fn test_nl2br() {
        assert_eq!(nl2br("a\r\nb\nc"), "a<br />\r\nb<br />\nc");
        assert_eq!(nl2br("no breaks"), "no breaks");
    }
}
