//! Streaming record decoder
//!
//! Scans the event stream for record elements (`<url>` or `<sitemap>`),
//! decodes each one into a fresh record and hands it to the caller's handler
//! before reading any further. Everything outside a record is skipped, so
//! memory use is bounded by the largest single record.

use std::io::Read;

use tracing::{debug, trace};

use crate::error::{ParseError, ReadError};
use crate::model::{Entry, IndexEntry};
use crate::options::DecoderOptions;
use crate::reader::{StartElement, StreamReader, XmlEvent};

/// A record type the decoder can produce
///
/// `Default` supplies the values of fields the source omits; `decode_child`
/// then overwrites whatever the record element contains.
pub trait Record: Default {
    /// Local name of the record element
    const TAG: &'static str;

    /// Decode one child element whose start tag was just read
    ///
    /// Must consume the child through its end tag, skipping it if unknown.
    fn decode_child<R: Read>(&mut self, child: &StartElement, reader: &mut StreamReader<R>) -> Result<(), ReadError>;
}

pub struct Decoder<R: Read> {
    reader: StreamReader<R>,
}

impl<R: Read> Decoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, DecoderOptions::default())
    }

    pub fn with_options(source: R, options: DecoderOptions) -> Self {
        Decoder {
            reader: StreamReader::with_options(source, options),
        }
    }

    /// Decode `<url>` records of a sitemap or news sitemap
    pub fn entries<F, E>(&mut self, handler: F) -> Result<(), ParseError<E>>
    where
        F: FnMut(&Entry) -> Result<(), E>,
    {
        self.decode(handler)
    }

    /// Decode `<sitemap>` records of a sitemap index
    pub fn index_entries<F, E>(&mut self, handler: F) -> Result<(), ParseError<E>>
    where
        F: FnMut(&IndexEntry) -> Result<(), E>,
    {
        self.decode(handler)
    }

    /// Decode every `T::TAG` element, calling `handler` once per record in
    /// document order
    ///
    /// The first `Err` from the handler stops decoding and is returned as
    /// [`ParseError::Handler`] without further reads.
    pub fn decode<T, F, E>(&mut self, mut handler: F) -> Result<(), ParseError<E>>
    where
        T: Record,
        F: FnMut(&T) -> Result<(), E>,
    {
        let mut count = 0usize;
        loop {
            match self.reader.next_event()? {
                XmlEvent::EndDocument => {
                    debug!(records = count, tag = T::TAG, "finished decoding");
                    return Ok(());
                }
                XmlEvent::StartElement(start) if start.local_name() == T::TAG => {
                    let record = self.decode_record::<T>()?;
                    count += 1;
                    trace!(index = count, tag = T::TAG, position = self.reader.position(), "decoded record");
                    handler(&record).map_err(ParseError::Handler)?;
                }
                _ => {}
            }
        }
    }

    fn decode_record<T: Record>(&mut self) -> Result<T, ReadError> {
        let mut record = T::default();
        while let Some(child) = self.reader.next_child()? {
            record.decode_child(&child, &mut self.reader)?;
        }
        Ok(record)
    }
}
