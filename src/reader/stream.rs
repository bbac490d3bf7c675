//! Streaming pull reader
//!
//! Turns any `Read` source into a sequence of owned [`XmlEvent`]s while only
//! holding the current token in memory. On top of the tokenizer it tracks the
//! open element stack and namespace scopes, so end tags are checked against
//! their start tags and every start element carries its resolved namespace.
//!
//! In lenient mode structural problems are repaired instead of reported:
//! mismatched end tags close the elements in between, stray end tags are
//! dropped and elements still open at end of input are closed implicitly.

use std::collections::VecDeque;
use std::io::Read;

use tracing::debug;

use super::buffered::BufferedReader;
use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::encoding::{is_utf8_compatible, XmlEncoding};
use crate::core::namespace::NamespaceResolver;
use crate::core::tokenizer::{Token, TokenKind, Tokenizer};
use crate::error::{ReadError, SyntaxError};
use crate::options::DecoderOptions;

pub struct StreamReader<R: Read> {
    source: BufferedReader<R>,
    options: DecoderOptions,
    /// Absolute offset of the first buffered byte
    offset: u64,
    open: Vec<String>,
    namespaces: NamespaceResolver,
    /// End events owed before the next token is read
    pending: VecDeque<EndElement>,
    started: bool,
    finished: bool,
}

impl<R: Read> StreamReader<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    pub fn with_options(source: R, options: DecoderOptions) -> Self {
        StreamReader {
            source: BufferedReader::with_capacity(source, options.buffer_capacity),
            options,
            offset: 0,
            open: Vec::new(),
            namespaces: NamespaceResolver::new(),
            pending: VecDeque::new(),
            started: false,
            finished: false,
        }
    }

    /// Byte offset of the next unread token
    pub fn position(&self) -> u64 {
        self.offset
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Pull the next event
    ///
    /// After `EndDocument` every further call returns `EndDocument` again.
    pub fn next_event(&mut self) -> Result<XmlEvent, ReadError> {
        if let Some(event) = self.pop_pending() {
            return Ok(event);
        }
        if self.finished {
            return self.finish();
        }
        if !self.started {
            self.start()?;
        }

        loop {
            let at_eof = self.source.reached_eof();
            let window = self.source.buffered();
            if window.is_empty() {
                if at_eof {
                    self.finished = true;
                    return self.finish();
                }
                self.fill()?;
                continue;
            }

            let strict = self.options.strict;
            let parsed = match Tokenizer::new(window, at_eof, strict).next_token() {
                Ok(Some(token)) => {
                    let start = self.offset + token.span.0 as u64;
                    let consumed = token.span.1;
                    let is_empty = token.kind == TokenKind::EmptyTag;
                    let event = convert(token, strict).map_err(|message| SyntaxError::new(message, start))?;
                    Some((event, consumed, is_empty, start))
                }
                Ok(None) => None,
                Err(err) => {
                    return Err(SyntaxError::new(err.message, self.offset + err.position as u64).into());
                }
            };

            let Some((event, consumed, is_empty, start)) = parsed else {
                if at_eof {
                    return Err(SyntaxError::new("unexpected end of input", self.offset).into());
                }
                self.fill()?;
                continue;
            };

            self.source.consume(consumed);
            self.offset += consumed as u64;

            if let Some(event) = self.track(event, is_empty, start)? {
                return Ok(event);
            }
        }
    }

    /// Next child element of the element whose start was read last
    ///
    /// Text, comments and processing instructions in between are skipped.
    /// Returns `None` once the parent's end tag has been consumed.
    pub fn next_child(&mut self) -> Result<Option<StartElement>, ReadError> {
        loop {
            match self.next_event()? {
                XmlEvent::StartElement(start) => return Ok(Some(start)),
                XmlEvent::EndElement(_) | XmlEvent::EndDocument => return Ok(None),
                _ => {}
            }
        }
    }

    /// Character data of the element whose start was read last, up to and
    /// including its end tag
    ///
    /// Text and CDATA directly inside the element are concatenated; nested
    /// elements are skipped together with their content.
    pub fn read_text(&mut self) -> Result<String, ReadError> {
        let mut text = String::new();
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                XmlEvent::Text(chunk) | XmlEvent::CData(chunk) if depth == 0 => text.push_str(&chunk),
                XmlEvent::StartElement(_) => depth += 1,
                XmlEvent::EndElement(_) if depth == 0 => return Ok(text),
                XmlEvent::EndElement(_) => depth -= 1,
                XmlEvent::EndDocument => return Ok(text),
                _ => {}
            }
        }
    }

    /// Discard the rest of the element whose start was read last
    pub fn skip_element(&mut self) -> Result<(), ReadError> {
        let mut depth = 0usize;
        loop {
            match self.next_event()? {
                XmlEvent::StartElement(_) => depth += 1,
                XmlEvent::EndElement(_) if depth == 0 => return Ok(()),
                XmlEvent::EndElement(_) => depth -= 1,
                XmlEvent::EndDocument => return Ok(()),
                _ => {}
            }
        }
    }

    /// Sniff the encoding and drop a UTF-8 byte order mark
    fn start(&mut self) -> Result<(), ReadError> {
        self.started = true;
        while self.source.buffered().len() < 4 && self.source.fill_buffer()? {}

        let head = self.source.buffered();
        let encoding = XmlEncoding::detect(head);
        if encoding != XmlEncoding::Utf8 {
            if self.options.strict {
                return Err(SyntaxError::new(format!("unsupported encoding {:?}", encoding), 0).into());
            }
            debug!(?encoding, "reading non UTF-8 input lossily");
        }

        let bom = XmlEncoding::bom_len(head);
        self.source.consume(bom);
        self.offset += bom as u64;
        Ok(())
    }

    /// Read more input for a token that does not fit in the window yet
    fn fill(&mut self) -> Result<(), ReadError> {
        let limit = self.options.max_token_size;
        if self.source.buffered().len() >= limit {
            return Err(SyntaxError::new(format!("token exceeds {limit} bytes"), self.offset).into());
        }
        self.source.fill_buffer()?;
        Ok(())
    }

    /// Update element and namespace state for an event about to be returned
    ///
    /// Returns `None` for events lenient mode drops.
    fn track(&mut self, event: XmlEvent, is_empty: bool, start: u64) -> Result<Option<XmlEvent>, ReadError> {
        match event {
            XmlEvent::StartElement(mut element) => {
                self.namespaces.push_scope();
                for (name, value) in &element.attributes {
                    self.namespaces.declare_from_attribute(name.as_bytes(), value.as_bytes());
                }
                let prefix = element.prefix().unwrap_or("");
                let namespace = self
                    .namespaces
                    .resolve(prefix.as_bytes())
                    .map(|uri| String::from_utf8_lossy(uri).into_owned());
                element.namespace = namespace;

                self.open.push(element.name.clone());
                if is_empty {
                    self.pending.push_back(EndElement::new(element.name.clone()));
                }
                Ok(Some(XmlEvent::StartElement(element)))
            }
            XmlEvent::EndElement(end) => self.match_end(end, start),
            XmlEvent::XmlDeclaration { encoding: Some(ref label), .. }
                if self.options.strict && !is_utf8_compatible(label.as_bytes()) =>
            {
                Err(SyntaxError::new(format!("unsupported encoding {label:?}"), start).into())
            }
            event => Ok(Some(event)),
        }
    }

    fn match_end(&mut self, end: EndElement, start: u64) -> Result<Option<XmlEvent>, ReadError> {
        if self.open.last() == Some(&end.name) {
            self.close();
            return Ok(Some(XmlEvent::EndElement(end)));
        }

        if self.options.strict {
            let message = match self.open.last() {
                Some(expected) => format!("mismatched end tag: expected </{expected}>, found </{}>", end.name),
                None => format!("unexpected end tag </{}>", end.name),
            };
            return Err(SyntaxError::new(message, start).into());
        }

        let Some(index) = self.open.iter().rposition(|name| *name == end.name) else {
            debug!(name = %end.name, position = start, "dropping stray end tag");
            return Ok(None);
        };
        debug!(name = %end.name, position = start, "closing elements left open before end tag");
        let implied: Vec<EndElement> = self.open[index..]
            .iter()
            .rev()
            .map(|name| EndElement::new(name.clone()))
            .collect();
        self.pending.extend(implied);
        Ok(self.pop_pending())
    }

    /// Called once the source is exhausted
    fn finish(&mut self) -> Result<XmlEvent, ReadError> {
        let Some(innermost) = self.open.last() else {
            return Ok(XmlEvent::EndDocument);
        };
        if self.options.strict {
            let message = format!("unexpected end of input: <{innermost}> is not closed");
            return Err(SyntaxError::new(message, self.offset).into());
        }

        debug!(open = self.open.len(), "closing elements still open at end of input");
        let implied: Vec<EndElement> = self.open.iter().rev().map(|name| EndElement::new(name.clone())).collect();
        self.pending.extend(implied);
        Ok(self.pop_pending().unwrap_or(XmlEvent::EndDocument))
    }

    fn pop_pending(&mut self) -> Option<XmlEvent> {
        let end = self.pending.pop_front()?;
        self.close();
        Some(XmlEvent::EndElement(end))
    }

    fn close(&mut self) {
        self.open.pop();
        self.namespaces.pop_scope();
    }
}

/// Build an owned event from a window token
fn convert(token: Token<'_>, strict: bool) -> Result<XmlEvent, &'static str> {
    let content = token.content.as_deref().unwrap_or_default();
    let name = token.name.unwrap_or_default();

    let event = match token.kind {
        TokenKind::StartTag | TokenKind::EmptyTag => {
            let mut element = StartElement::new(utf8(name, strict)?);
            element.attributes = token
                .attributes
                .iter()
                .map(|attr| Ok((utf8(attr.name, strict)?, utf8(&attr.value, strict)?)))
                .collect::<Result<_, &'static str>>()?;
            XmlEvent::StartElement(element)
        }
        TokenKind::EndTag => XmlEvent::EndElement(EndElement::new(utf8(name, strict)?)),
        TokenKind::Text => XmlEvent::Text(utf8(content, strict)?),
        TokenKind::CData => XmlEvent::CData(utf8(content, strict)?),
        TokenKind::Comment => XmlEvent::Comment(utf8(content, strict)?),
        TokenKind::DocType => XmlEvent::DocType(utf8(content, strict)?),
        TokenKind::ProcessingInstruction => XmlEvent::ProcessingInstruction {
            target: utf8(name, strict)?,
            data: token.content.as_deref().map(|data| utf8(data, strict)).transpose()?,
        },
        TokenKind::XmlDeclaration => {
            let mut version = String::from("1.0");
            let mut encoding = None;
            let mut standalone = None;
            for attr in &token.attributes {
                match attr.name {
                    b"version" => version = utf8(&attr.value, strict)?,
                    b"encoding" => encoding = Some(utf8(&attr.value, strict)?),
                    b"standalone" => standalone = Some(attr.value.as_ref() == b"yes"),
                    _ => {}
                }
            }
            XmlEvent::XmlDeclaration {
                version,
                encoding,
                standalone,
            }
        }
    };
    Ok(event)
}

fn utf8(bytes: &[u8], strict: bool) -> Result<String, &'static str> {
    if strict {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| "invalid UTF-8")
    } else {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
