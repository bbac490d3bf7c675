//! XML Attribute Parsing
//!
//! Parses XML attributes from tag content. Sitemap records carry their data in
//! child elements, so attributes matter mostly for `xmlns` declarations.

use super::entities::{decode_text, decode_text_strict};
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use std::borrow::Cow;

/// A parsed XML attribute
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    /// Attribute name (may include namespace prefix)
    pub name: &'a [u8],
    /// Attribute value (entities decoded)
    pub value: Cow<'a, [u8]>,
}

/// Parse attributes from raw tag content (between the element name and `>` or `/>`)
///
/// Lenient mode skips garbage and accepts unquoted values; strict mode reports
/// the first problem.
pub fn parse_attributes(input: &[u8], strict: bool) -> Result<Vec<Attribute<'_>>, &'static str> {
    let mut attrs = Vec::new();
    let mut pos = 0;

    loop {
        let before_ws = pos;
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            break;
        }

        if !is_name_start_char(input[pos]) {
            if strict {
                return Err("attribute name must start with a letter, underscore, or colon");
            }
            pos += 1;
            continue;
        }
        if strict && pos == before_ws && !attrs.is_empty() {
            return Err("attributes must be separated by whitespace");
        }

        let name_start = pos;
        while pos < input.len() && is_name_char(input[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() || input[pos] != b'=' {
            if strict {
                return Err("attribute value required");
            }
            attrs.push(Attribute { name, value: Cow::Borrowed(b"") });
            continue;
        }
        pos += 1;
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            if strict {
                return Err("attribute value required");
            }
            attrs.push(Attribute { name, value: Cow::Borrowed(b"") });
            break;
        }

        let quote = input[pos];
        if quote != b'"' && quote != b'\'' {
            if strict {
                return Err("attribute value must be quoted");
            }
            let value_start = pos;
            while pos < input.len() && !is_whitespace(input[pos]) {
                pos += 1;
            }
            attrs.push(Attribute { name, value: decode_text(&input[value_start..pos]) });
            continue;
        }

        pos += 1;
        let value_start = pos;
        while pos < input.len() && input[pos] != quote {
            pos += 1;
        }
        if strict && pos >= input.len() {
            return Err("attribute value has mismatched quotes");
        }

        let raw = &input[value_start..pos];
        let value = if strict {
            if raw.contains(&b'<') {
                return Err("attribute value cannot contain '<'");
            }
            decode_text_strict(raw)?
        } else {
            decode_text(raw)
        };
        attrs.push(Attribute { name, value });

        // Skip closing quote
        pos = (pos + 1).min(input.len());
    }

    Ok(attrs)
}
