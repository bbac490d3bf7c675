use std::io::Read;

use chrono::{DateTime, FixedOffset};

use super::{non_empty, read_trimmed};
use crate::datetime;
use crate::decoder::Record;
use crate::error::ReadError;
use crate::reader::{StartElement, StreamReader};

/// One `<sitemap>` of a sitemap index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexEntry {
    location: String,
    last_modified: Option<String>,
}

impl IndexEntry {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn last_modified(&self) -> Option<DateTime<FixedOffset>> {
        self.last_modified.as_deref().and_then(datetime::normalize)
    }

    pub fn last_modified_raw(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }
}

impl Record for IndexEntry {
    const TAG: &'static str = "sitemap";

    fn decode_child<R: Read>(&mut self, child: &StartElement, reader: &mut StreamReader<R>) -> Result<(), ReadError> {
        match child.local_name() {
            "loc" => self.location = read_trimmed(reader)?,
            "lastmod" => self.last_modified = non_empty(read_trimmed(reader)?),
            _ => reader.skip_element()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_index_entry() {
        let mut reader = StreamReader::new(
            &b"<sitemap><loc>https://example.com/sitemap1.xml.gz</loc><lastmod>2004-10-01T18:23:17+00:00</lastmod></sitemap>"[..],
        );
        reader.next_event().unwrap();
        let mut entry = IndexEntry::default();
        while let Some(child) = reader.next_child().unwrap() {
            entry.decode_child(&child, &mut reader).unwrap();
        }
        assert_eq!(entry.location(), "https://example.com/sitemap1.xml.gz");
        assert_eq!(entry.last_modified().map(|dt| dt.timestamp()), Some(1096654997));
    }
}
