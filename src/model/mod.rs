//! Sitemap record types
//!
//! - Entry: one `<url>` of a sitemap or news sitemap
//! - IndexEntry: one `<sitemap>` of a sitemap index
//! - NewsPayload: the `<news:news>` block of a news sitemap entry
//! - ChangeFrequency: the `<changefreq>` token

pub mod entry;
pub mod frequency;
pub mod index;
pub mod news;

pub use entry::{Entry, DEFAULT_PRIORITY};
pub use frequency::{ChangeFrequency, UnknownFrequency};
pub use index::IndexEntry;
pub use news::{NewsPayload, NEWS_NAMESPACE};

use std::io::Read;

use crate::error::ReadError;
use crate::reader::StreamReader;

/// Text of the current field element, surrounding whitespace removed
pub(crate) fn read_trimmed<R: Read>(reader: &mut StreamReader<R>) -> Result<String, ReadError> {
    let text = reader.read_text()?;
    let trimmed = text.trim();
    if trimmed.len() == text.len() {
        Ok(text)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Empty text means the field is absent
pub(crate) fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
