//! XML Entity Decoding
//!
//! Handles decoding of XML entities:
//! - Built-in entities: &lt; &gt; &amp; &quot; &apos;
//! - Numeric character references: &#123; &#x7B;
//!
//! Uses Cow for zero-copy when no entities are present.

use memchr::memchr;
use std::borrow::Cow;

/// Decode text content, leaving anything unrecognized as literal text
///
/// Returns Borrowed if no entities present (zero-copy),
/// returns Owned if entities were decoded.
#[inline]
pub fn decode_text(input: &[u8]) -> Cow<'_, [u8]> {
    if memchr(b'&', input).is_none() {
        return Cow::Borrowed(input);
    }
    match decode_entities(input, false) {
        Ok(decoded) => Cow::Owned(decoded),
        // Lenient decoding keeps unknown references, it never fails
        Err(_) => Cow::Borrowed(input),
    }
}

/// Decode text content, rejecting bare '&' and unknown references
pub fn decode_text_strict(input: &[u8]) -> Result<Cow<'_, [u8]>, &'static str> {
    if memchr(b'&', input).is_none() {
        return Ok(Cow::Borrowed(input));
    }
    decode_entities(input, true).map(Cow::Owned)
}

fn decode_entities(input: &[u8], strict: bool) -> Result<Vec<u8>, &'static str> {
    let mut result = Vec::with_capacity(input.len());
    let mut pos = 0;

    while let Some(amp_offset) = memchr(b'&', &input[pos..]) {
        result.extend_from_slice(&input[pos..pos + amp_offset]);
        pos += amp_offset;

        let decoded = memchr(b';', &input[pos..]).and_then(|semi_offset| {
            let entity = &input[pos + 1..pos + semi_offset];
            decode_entity(entity, strict).map(|c| (c, semi_offset))
        });

        match decoded {
            Some((c, semi_offset)) => {
                let mut utf8 = [0u8; 4];
                result.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
                pos += semi_offset + 1;
            }
            None if strict => return Err("invalid character entity reference"),
            None => {
                result.push(b'&');
                pos += 1;
            }
        }
    }

    result.extend_from_slice(&input[pos..]);
    Ok(result)
}

/// Decode a single entity (without & and ;)
fn decode_entity(entity: &[u8], strict: bool) -> Option<char> {
    if let Some(numeric) = entity.strip_prefix(b"#") {
        return decode_numeric_entity(numeric);
    }

    match entity {
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"amp" => Some('&'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        _ if strict => None,
        // HTML named entities that show up in hand-written feeds
        b"nbsp" => Some('\u{00A0}'),
        b"copy" => Some('\u{00A9}'),
        b"reg" => Some('\u{00AE}'),
        b"trade" => Some('\u{2122}'),
        b"mdash" => Some('\u{2014}'),
        b"ndash" => Some('\u{2013}'),
        b"lsquo" => Some('\u{2018}'),
        b"rsquo" => Some('\u{2019}'),
        b"ldquo" => Some('\u{201C}'),
        b"rdquo" => Some('\u{201D}'),
        b"hellip" => Some('\u{2026}'),
        _ => None,
    }
}

fn decode_numeric_entity(entity: &[u8]) -> Option<char> {
    let codepoint = match entity.first()? {
        b'x' | b'X' => u32::from_str_radix(std::str::from_utf8(&entity[1..]).ok()?, 16).ok()?,
        _ => std::str::from_utf8(entity).ok()?.parse::<u32>().ok()?,
    };

    if !is_valid_xml_char(codepoint) {
        return None;
    }
    char::from_u32(codepoint)
}

/// Check if a code point is a valid XML 1.0 Char
/// Char ::= #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
#[inline]
pub fn is_valid_xml_char(codepoint: u32) -> bool {
    matches!(codepoint,
        0x9 | 0xA | 0xD |
        0x20..=0xD7FF |
        0xE000..=0xFFFD |
        0x10000..=0x10FFFF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities() {
        let result = decode_text(b"https://example.com/page");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), b"https://example.com/page");
    }

    #[test]
    fn test_basic_entities() {
        let result = decode_text(b"&lt;hello&gt; &amp; &quot;world&quot;");
        assert_eq!(result.as_ref(), b"<hello> & \"world\"");
    }

    #[test]
    fn test_query_string_ampersand() {
        let result = decode_text_strict(b"https://example.com/?a=1&amp;b=2").unwrap();
        assert_eq!(result.as_ref(), b"https://example.com/?a=1&b=2");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_text(b"&#65;&#x42;&#X43;").as_ref(), b"ABC");
        let smiley = decode_text(b"&#x1F600;");
        assert_eq!(std::str::from_utf8(smiley.as_ref()).unwrap(), "😀");
    }

    #[test]
    fn test_unknown_entity_lenient() {
        assert_eq!(decode_text(b"&unknown;").as_ref(), b"&unknown;");
        assert_eq!(decode_text(b"?a=1&b=2").as_ref(), b"?a=1&b=2");
        assert_eq!(decode_text(b"a&nbsp;b").as_ref(), "a\u{00A0}b".as_bytes());
    }

    #[test]
    fn test_strict_rejects_bare_ampersand() {
        assert!(decode_text_strict(b"?a=1&b=2").is_err());
        assert!(decode_text_strict(b"&nbsp;").is_err());
        assert!(decode_text_strict(b"&#0;").is_err());
    }
}
