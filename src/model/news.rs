//! Google News sitemap extension
//!
//! ```xml
//! <news:news>
//!   <news:publication>
//!     <news:name>The Example Times</news:name>
//!     <news:language>en</news:language>
//!   </news:publication>
//!   <news:publication_date>2008-12-23</news:publication_date>
//!   <news:title>Companies A, B in Merger Talks</news:title>
//! </news:news>
//! ```

use std::io::Read;

use chrono::{DateTime, FixedOffset};

use super::{non_empty, read_trimmed};
use crate::datetime;
use crate::error::ReadError;
use crate::reader::StreamReader;

pub const NEWS_NAMESPACE: &str = "http://www.google.com/schemas/sitemap-news/0.9";

/// Contents of a `<news:news>` block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsPayload {
    publication_name: String,
    publication_language: String,
    publication_date: Option<String>,
    title: String,
}

impl NewsPayload {
    pub fn publication_name(&self) -> &str {
        &self.publication_name
    }

    pub fn publication_language(&self) -> &str {
        &self.publication_language
    }

    /// Publication date, parsed on every call; `None` if missing or unparseable
    pub fn publication_date(&self) -> Option<DateTime<FixedOffset>> {
        self.publication_date.as_deref().and_then(datetime::normalize)
    }

    pub fn publication_date_raw(&self) -> Option<&str> {
        self.publication_date.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Decode the block whose start tag was just read, through its end tag
    pub(crate) fn decode<R: Read>(reader: &mut StreamReader<R>) -> Result<Self, ReadError> {
        let mut news = NewsPayload::default();
        while let Some(child) = reader.next_child()? {
            match child.local_name() {
                "publication" => news.decode_publication(reader)?,
                "publication_date" => news.publication_date = non_empty(read_trimmed(reader)?),
                "title" => news.title = read_trimmed(reader)?,
                _ => reader.skip_element()?,
            }
        }
        Ok(news)
    }

    fn decode_publication<R: Read>(&mut self, reader: &mut StreamReader<R>) -> Result<(), ReadError> {
        while let Some(child) = reader.next_child()? {
            match child.local_name() {
                "name" => self.publication_name = read_trimmed(reader)?,
                "language" => self.publication_language = read_trimmed(reader)?,
                _ => reader.skip_element()?,
            }
        }
        Ok(())
    }
}
