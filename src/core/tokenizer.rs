//! XML Tokenizer - extracts one token at a time from the read window
//!
//! The window is whatever the buffered reader currently holds, so a token may
//! be cut off at its end. `next_token` distinguishes three outcomes:
//! - `Ok(Some(token))`: a complete token; `span.1` bytes may be consumed
//! - `Ok(None)`: the window ends mid-token and more input is needed
//! - `Err(_)`: the markup is malformed (strict mode only)
//!
//! Once the source is exhausted (`at_eof`), a cut-off token is malformed in
//! strict mode and literal text in lenient mode.

use super::attributes::{parse_attributes, Attribute};
use super::entities::{decode_text, decode_text_strict};
use super::scanner::{is_whitespace, Scanner};
use std::borrow::Cow;

/// Type of XML token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    /// Text content, entities decoded
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    /// DOCTYPE declaration
    DocType,
}

/// A parsed XML token borrowing from the window
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in the window (start, end)
    pub span: (usize, usize),
    /// Element name or PI target
    pub name: Option<&'a [u8]>,
    /// Text, CDATA, comment, PI data or DOCTYPE body
    pub content: Option<Cow<'a, [u8]>>,
    /// Attributes of start tags and the XML declaration's pseudo-attributes
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
            attributes: Vec::new(),
        }
    }

    fn with_name(mut self, name: &'a [u8]) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: Cow<'a, [u8]>) -> Self {
        self.content = Some(content);
        self
    }

    fn with_attributes(mut self, attributes: Vec<Attribute<'a>>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Malformed markup at a window-relative position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenError {
    pub message: &'static str,
    pub position: usize,
}

impl TokenError {
    fn new(message: &'static str, position: usize) -> Self {
        TokenError { message, position }
    }
}

type TokenResult<'a> = Result<Option<Token<'a>>, TokenError>;

/// Pull tokenizer over one read window
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    at_eof: bool,
    strict: bool,
}

impl<'a> Tokenizer<'a> {
    /// `at_eof` tells the tokenizer no more bytes will follow `input`
    pub fn new(input: &'a [u8], at_eof: bool, strict: bool) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            at_eof,
            strict,
        }
    }

    pub fn next_token(&mut self) -> TokenResult<'a> {
        match self.scanner.peek() {
            None => Ok(None),
            Some(b'<') => self.parse_markup(),
            Some(_) => self.parse_text(),
        }
    }

    /// The window ends inside the construct starting at `start`
    fn incomplete(&mut self, start: usize, message: &'static str) -> TokenResult<'a> {
        if !self.at_eof {
            return Ok(None);
        }
        if self.strict {
            return Err(TokenError::new(message, start));
        }
        let end = self.scanner.len();
        self.scanner.set_position(end);
        let content = decode_text(self.scanner.slice(start, end));
        Ok(Some(Token::new(TokenKind::Text, (start, end)).with_content(content)))
    }

    /// The construct at `start` is not valid markup; lenient mode keeps its '<' as text
    fn malformed(&mut self, start: usize, message: &'static str) -> TokenResult<'a> {
        if self.strict {
            return Err(TokenError::new(message, start));
        }
        self.scanner.set_position(start + 1);
        Ok(Some(
            Token::new(TokenKind::Text, (start, start + 1)).with_content(Cow::Borrowed(b"<")),
        ))
    }

    fn parse_markup(&mut self) -> TokenResult<'a> {
        let start = self.scanner.position();
        match self.scanner.peek_at(1) {
            Some(b'/') => self.parse_end_tag(start),
            Some(b'!') => self.parse_bang_markup(start),
            Some(b'?') => self.parse_pi(start),
            Some(_) => self.parse_start_tag(start),
            None => self.incomplete(start, "unexpected end of input in markup"),
        }
    }

    fn parse_start_tag(&mut self, start: usize) -> TokenResult<'a> {
        self.scanner.set_position(start + 1);
        let Some(end) = self.scanner.find_tag_end_quoted() else {
            return self.incomplete(start, "unterminated start tag");
        };
        let Some(name) = self.scanner.read_name() else {
            return self.malformed(start, "invalid element name");
        };

        let is_empty = self.scanner.slice(start, end).ends_with(b"/");
        let attr_end = if is_empty { end - 1 } else { end };
        let name_end = self.scanner.position();
        if name_end > attr_end {
            return self.malformed(start, "invalid element name");
        }

        let rest = self.scanner.slice(name_end, attr_end);
        if rest.first().is_some_and(|&b| !is_whitespace(b)) {
            return self.malformed(start, "invalid character in element name");
        }
        let attributes = match parse_attributes(rest, self.strict) {
            Ok(attributes) => attributes,
            Err(message) => return self.malformed(start, message),
        };

        self.scanner.set_position(end + 1);
        let kind = if is_empty { TokenKind::EmptyTag } else { TokenKind::StartTag };
        Ok(Some(
            Token::new(kind, (start, end + 1))
                .with_name(name)
                .with_attributes(attributes),
        ))
    }

    fn parse_end_tag(&mut self, start: usize) -> TokenResult<'a> {
        self.scanner.set_position(start + 2);
        let Some(end) = self.scanner.find_tag_end_quoted() else {
            return self.incomplete(start, "unterminated end tag");
        };
        let Some(name) = self.scanner.read_name() else {
            return self.malformed(start, "invalid element name in end tag");
        };
        let name_end = self.scanner.position();
        if !self.scanner.slice(name_end, end).iter().all(|&b| is_whitespace(b)) {
            return self.malformed(start, "end tag cannot have attributes");
        }

        self.scanner.set_position(end + 1);
        Ok(Some(Token::new(TokenKind::EndTag, (start, end + 1)).with_name(name)))
    }

    /// Markup starting with '<!' (comment, CDATA, DOCTYPE)
    fn parse_bang_markup(&mut self, start: usize) -> TokenResult<'a> {
        self.scanner.set_position(start + 2);

        if self.scanner.starts_with(b"--") {
            self.parse_delimited(start, 4, b"-->", TokenKind::Comment, "unterminated comment")
        } else if self.scanner.starts_with(b"[CDATA[") {
            self.parse_delimited(start, 9, b"]]>", TokenKind::CData, "unterminated CDATA section")
        } else if self.scanner.starts_with(b"DOCTYPE") {
            self.parse_doctype(start)
        } else if self.scanner.is_prefix_of(b"--")
            || self.scanner.is_prefix_of(b"[CDATA[")
            || self.scanner.is_prefix_of(b"DOCTYPE")
        {
            self.incomplete(start, "unexpected end of input in markup declaration")
        } else {
            self.malformed(start, "invalid markup declaration")
        }
    }

    /// Comment or CDATA: content runs from `start + open_len` up to `close`
    fn parse_delimited(
        &mut self,
        start: usize,
        open_len: usize,
        close: &[u8],
        kind: TokenKind,
        message: &'static str,
    ) -> TokenResult<'a> {
        let content_start = start + open_len;
        self.scanner.set_position(content_start);
        let Some(end) = self.scanner.find_sequence(close) else {
            return self.incomplete(start, message);
        };

        let content = self.scanner.slice(content_start, end);
        let token_end = end + close.len();
        self.scanner.set_position(token_end);
        Ok(Some(
            Token::new(kind, (start, token_end)).with_content(Cow::Borrowed(content)),
        ))
    }

    fn parse_doctype(&mut self, start: usize) -> TokenResult<'a> {
        let body_start = start + 9; // "<!DOCTYPE"
        self.scanner.set_position(body_start);
        let Some(end) = self.scanner.find_doctype_end() else {
            return self.incomplete(start, "unterminated DOCTYPE");
        };

        let body = self.scanner.slice(body_start, end).trim_ascii();
        self.scanner.set_position(end + 1);
        Ok(Some(
            Token::new(TokenKind::DocType, (start, end + 1)).with_content(Cow::Borrowed(body)),
        ))
    }

    fn parse_pi(&mut self, start: usize) -> TokenResult<'a> {
        self.scanner.set_position(start + 2);
        let Some(end) = self.scanner.find_sequence(b"?>") else {
            return self.incomplete(start, "unterminated processing instruction");
        };
        let Some(target) = self.scanner.read_name() else {
            return self.malformed(start, "invalid processing instruction target");
        };

        let data_start = self.scanner.position();
        if data_start > end {
            return self.malformed(start, "invalid processing instruction target");
        }
        let data = self.scanner.slice(data_start, end);
        if data.first().is_some_and(|&b| !is_whitespace(b)) {
            return self.malformed(start, "invalid character after processing instruction target");
        }
        let data = data.trim_ascii();

        let token_end = end + 2;
        self.scanner.set_position(token_end);

        if target == b"xml" {
            let attributes = match parse_attributes(data, self.strict) {
                Ok(attributes) => attributes,
                Err(message) => return self.malformed(start, message),
            };
            return Ok(Some(
                Token::new(TokenKind::XmlDeclaration, (start, token_end))
                    .with_name(target)
                    .with_attributes(attributes),
            ));
        }

        let mut token = Token::new(TokenKind::ProcessingInstruction, (start, token_end)).with_name(target);
        if !data.is_empty() {
            token = token.with_content(Cow::Borrowed(data));
        }
        Ok(Some(token))
    }

    fn parse_text(&mut self) -> TokenResult<'a> {
        let start = self.scanner.position();
        let end = match self.scanner.find_tag_start() {
            Some(end) => end,
            None if self.at_eof => self.scanner.len(),
            // The text run may continue in the next read
            None => return Ok(None),
        };

        let raw = self.scanner.slice(start, end);
        let content = if self.strict {
            decode_text_strict(raw).map_err(|message| TokenError::new(message, start))?
        } else {
            decode_text(raw)
        };

        self.scanner.set_position(end);
        Ok(Some(Token::new(TokenKind::Text, (start, end)).with_content(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(input: &[u8]) -> Vec<Token<'_>> {
        let mut tokenizer = Tokenizer::new(input, true, true);
        let mut tokens = Vec::new();
        while let Some(token) = tokenizer.next_token().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_simple_element() {
        let tokens = complete(b"<loc>https://example.com/</loc>");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::StartTag);
        assert_eq!(tokens[0].name, Some(b"loc" as &[u8]));
        assert_eq!(tokens[1].kind, TokenKind::Text);
        assert_eq!(tokens[1].content.as_deref(), Some(b"https://example.com/" as &[u8]));
        assert_eq!(tokens[2].kind, TokenKind::EndTag);
        assert_eq!(tokens[2].span, (25, 31));
    }

    #[test]
    fn test_empty_element_with_attributes() {
        let tokens = complete(b"<image:image href=\"a.png\"/>");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EmptyTag);
        assert_eq!(tokens[0].name, Some(b"image:image" as &[u8]));
        assert_eq!(tokens[0].attributes.len(), 1);
        assert_eq!(tokens[0].attributes[0].value.as_ref(), b"a.png");
    }

    #[test]
    fn test_declaration_comment_cdata_doctype() {
        let tokens = complete(
            b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE urlset><!-- note --><t><![CDATA[a < b]]></t>",
        );
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::XmlDeclaration,
                TokenKind::DocType,
                TokenKind::Comment,
                TokenKind::StartTag,
                TokenKind::CData,
                TokenKind::EndTag,
            ]
        );
        assert_eq!(tokens[0].attributes[1].value.as_ref(), b"UTF-8");
        assert_eq!(tokens[1].content.as_deref(), Some(b"urlset" as &[u8]));
        assert_eq!(tokens[2].content.as_deref(), Some(b" note " as &[u8]));
        assert_eq!(tokens[4].content.as_deref(), Some(b"a < b" as &[u8]));
    }

    #[test]
    fn test_processing_instruction() {
        let tokens = complete(b"<?xml-stylesheet type=\"text/xsl\" href=\"s.xsl\"?>");
        assert_eq!(tokens[0].kind, TokenKind::ProcessingInstruction);
        assert_eq!(tokens[0].name, Some(b"xml-stylesheet" as &[u8]));
        assert!(tokens[0].content.is_some());
    }

    #[test]
    fn test_incomplete_tokens_need_more_input() {
        for input in [
            &b"<url"[..],
            &b"<"[..],
            &b"<!-"[..],
            &b"<!-- x -"[..],
            &b"<![CDATA[x]]"[..],
            &b"<?xml "[..],
            &b"text"[..],
        ] {
            let mut tokenizer = Tokenizer::new(input, false, true);
            assert!(tokenizer.next_token().unwrap().is_none(), "{:?}", input);
        }
    }

    #[test]
    fn test_truncated_at_eof_is_an_error() {
        let mut tokenizer = Tokenizer::new(b"<url", true, true);
        let err = tokenizer.next_token().unwrap_err();
        assert_eq!(err.message, "unterminated start tag");
        assert_eq!(err.position, 0);
    }

    #[test]
    fn test_trailing_text_at_eof() {
        let tokens = complete(b"<a/>\n");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].content.as_deref(), Some(b"\n" as &[u8]));
    }

    #[test]
    fn test_strict_rejects_malformed_markup() {
        for input in [
            &b"<1url>"[..],
            &b"</loc attr=\"x\">"[..],
            &b"<!ELEMENT x>"[..],
            &b"<a>&b</a>"[..],
        ] {
            let mut tokenizer = Tokenizer::new(input, true, true);
            let result = (0..3).try_for_each(|_| tokenizer.next_token().map(|_| ()));
            assert!(result.is_err(), "{:?}", input);
        }
    }

    #[test]
    fn test_lenient_keeps_stray_markup_as_text() {
        let mut tokenizer = Tokenizer::new(b"a < b<c/>", true, false);
        let first = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(first.content.as_deref(), Some(b"a " as &[u8]));
        let second = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(second.kind, TokenKind::Text);
        assert_eq!(second.content.as_deref(), Some(b"<" as &[u8]));
        let third = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(third.content.as_deref(), Some(b" b" as &[u8]));
        let fourth = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(fourth.kind, TokenKind::EmptyTag);
    }

    #[test]
    fn test_lenient_truncated_tail_is_text() {
        let mut tokenizer = Tokenizer::new(b"<loc", true, false);
        let token = tokenizer.next_token().unwrap().unwrap();
        assert_eq!(token.kind, TokenKind::Text);
        assert_eq!(token.content.as_deref(), Some(b"<loc" as &[u8]));
        assert_eq!(token.span, (0, 4));
    }
}
