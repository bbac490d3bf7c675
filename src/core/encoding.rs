//! XML Encoding Detection
//!
//! The reader only decodes UTF-8. This module sniffs the byte order mark at
//! the start of the stream and checks the encoding named by the XML
//! declaration so anything else is rejected up front instead of producing
//! garbage records.

/// Encoding detected from the first bytes of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

impl XmlEncoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        if input.len() < 2 {
            return XmlEncoding::Utf8;
        }

        match (input[0], input[1]) {
            (0xFF, 0xFE) => XmlEncoding::Utf16Le,
            (0xFE, 0xFF) => XmlEncoding::Utf16Be,
            // No BOM - '<' next to a NUL byte is UTF-16 without a mark
            (0x00, b'<') => XmlEncoding::Utf16Be,
            (b'<', 0x00) => XmlEncoding::Utf16Le,
            _ => XmlEncoding::Utf8,
        }
    }

    /// Length of a UTF-8 byte order mark at the start of `input`, if any
    pub fn bom_len(input: &[u8]) -> usize {
        if input.starts_with(UTF8_BOM) {
            UTF8_BOM.len()
        } else {
            0
        }
    }
}

/// Whether an `encoding="..."` label can be read as UTF-8 without conversion
pub fn is_utf8_compatible(label: &[u8]) -> bool {
    const LABELS: [&[u8]; 5] = [b"utf-8", b"utf8", b"us-ascii", b"ascii", b"unicode-1-1-utf-8"];
    let label = label.trim_ascii();
    LABELS.iter().any(|known| label.eq_ignore_ascii_case(known))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(XmlEncoding::detect(b"<?xml version=\"1.0\"?>"), XmlEncoding::Utf8);
        assert_eq!(XmlEncoding::detect(&[0xEF, 0xBB, 0xBF, b'<']), XmlEncoding::Utf8);
        assert_eq!(XmlEncoding::detect(&[0xFF, 0xFE, b'<', 0x00]), XmlEncoding::Utf16Le);
        assert_eq!(XmlEncoding::detect(&[0x00, b'<', 0x00, b'?']), XmlEncoding::Utf16Be);
    }

    #[test]
    fn test_bom_len() {
        assert_eq!(XmlEncoding::bom_len(&[0xEF, 0xBB, 0xBF, b'<']), 3);
        assert_eq!(XmlEncoding::bom_len(b"<urlset>"), 0);
    }

    #[test]
    fn test_labels() {
        assert!(is_utf8_compatible(b"UTF-8"));
        assert!(is_utf8_compatible(b"us-ascii"));
        assert!(!is_utf8_compatible(b"ISO-8859-1"));
        assert!(!is_utf8_compatible(b"UTF-16"));
    }
}
