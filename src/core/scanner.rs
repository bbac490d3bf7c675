//! SIMD-accelerated delimiter scanning over the read window
//!
//! Uses memchr for byte searching. Every `find_*` returns an absolute
//! position inside the window, or `None` when the delimiter has not arrived
//! yet (the caller decides whether that means "read more" or "truncated").

use memchr::{memchr, memmem};

/// Cursor over the currently buffered bytes
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Next '<' at or after the cursor
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', self.remaining()).map(|i| self.pos + i)
    }

    /// Next '>' that is not inside a quoted attribute value
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut quote: Option<u8> = None;
        for (i, &b) in self.remaining().iter().enumerate() {
            match (quote, b) {
                (None, b'"' | b'\'') => quote = Some(b),
                (Some(q), _) if q == b => quote = None,
                (None, b'>') => return Some(self.pos + i),
                _ => {}
            }
        }
        None
    }

    /// Start of the next occurrence of `needle`
    #[inline]
    pub fn find_sequence(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(self.remaining(), needle).map(|i| self.pos + i)
    }

    /// Closing '>' of a DOCTYPE, skipping quoted literals and the internal subset
    pub fn find_doctype_end(&self) -> Option<usize> {
        let mut quote: Option<u8> = None;
        let mut depth = 0usize;
        for (i, &b) in self.remaining().iter().enumerate() {
            match (quote, b) {
                (Some(q), _) if q == b => quote = None,
                (Some(_), _) => {}
                (None, b'"' | b'\'') => quote = Some(b),
                (None, b'[') => depth += 1,
                (None, b']') => depth = depth.saturating_sub(1),
                (None, b'>') if depth == 0 => return Some(self.pos + i),
                _ => {}
            }
        }
        None
    }

    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.remaining().starts_with(needle)
    }

    /// True when the remaining bytes are a strict prefix of `needle`,
    /// i.e. more input could still complete it
    #[inline]
    pub fn is_prefix_of(&self, needle: &[u8]) -> bool {
        let rest = self.remaining();
        rest.len() < needle.len() && needle.starts_with(rest)
    }

    /// Read an XML name and advance past it
    pub fn read_name(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        if !is_name_start_char(self.peek()?) {
            return None;
        }
        self.pos += 1;
        while self.peek().is_some_and(is_name_char) {
            self.pos += 1;
        }
        Some(&self.input[start..self.pos])
    }
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Letters, underscore, colon, and any non-ASCII byte (UTF-8 encoded letters)
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tag_start() {
        let scanner = Scanner::new(b"hello <world>");
        assert_eq!(scanner.find_tag_start(), Some(6));
    }

    #[test]
    fn test_find_tag_end_quoted() {
        let scanner = Scanner::new(b"<a attr=\">test\">content");
        assert_eq!(scanner.find_tag_end_quoted(), Some(15));

        let scanner = Scanner::new(b"<a attr='it\"s'>");
        assert_eq!(scanner.find_tag_end_quoted(), Some(14));
    }

    #[test]
    fn test_unterminated_tag_has_no_end() {
        let scanner = Scanner::new(b"<url attr=\"x>");
        assert_eq!(scanner.find_tag_end_quoted(), None);
    }

    #[test]
    fn test_find_doctype_end() {
        let scanner = Scanner::new(b"<!DOCTYPE urlset [<!ENTITY a \"x>y\">]>rest");
        assert_eq!(scanner.find_doctype_end(), Some(36));
    }

    #[test]
    fn test_read_name() {
        let mut scanner = Scanner::new(b"news:publication_date>");
        assert_eq!(scanner.read_name(), Some(b"news:publication_date" as &[u8]));
        assert_eq!(scanner.position(), 21);

        let mut scanner = Scanner::new(b"1abc");
        assert_eq!(scanner.read_name(), None);
    }

    #[test]
    fn test_is_prefix_of() {
        let mut scanner = Scanner::new(b"<![CD");
        scanner.set_position(2);
        assert!(scanner.is_prefix_of(b"[CDATA["));
        assert!(!scanner.is_prefix_of(b"--"));
    }
}
