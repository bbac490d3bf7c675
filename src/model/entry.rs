use std::io::Read;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use super::frequency::ChangeFrequency;
use super::news::{NewsPayload, NEWS_NAMESPACE};
use super::{non_empty, read_trimmed};
use crate::datetime;
use crate::decoder::Record;
use crate::error::ReadError;
use crate::reader::{StartElement, StreamReader};

/// Priority of an entry without a `<priority>` element
pub const DEFAULT_PRIORITY: f32 = 0.5;

/// One `<url>` of a sitemap or news sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    location: String,
    last_modified: Option<String>,
    change_frequency: ChangeFrequency,
    priority: f32,
    news: Option<NewsPayload>,
}

impl Default for Entry {
    fn default() -> Self {
        Entry {
            location: String::new(),
            last_modified: None,
            change_frequency: ChangeFrequency::Always,
            priority: DEFAULT_PRIORITY,
            news: None,
        }
    }
}

impl Entry {
    pub fn location(&self) -> &str {
        &self.location
    }

    /// `<lastmod>`, parsed on every call; `None` if missing or unparseable
    pub fn last_modified(&self) -> Option<DateTime<FixedOffset>> {
        self.last_modified.as_deref().and_then(datetime::normalize)
    }

    pub fn last_modified_raw(&self) -> Option<&str> {
        self.last_modified.as_deref()
    }

    pub fn change_frequency(&self) -> ChangeFrequency {
        self.change_frequency
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }

    /// The news block, if the `<url>` carried one
    pub fn news(&self) -> Option<&NewsPayload> {
        self.news.as_ref()
    }
}

/// A news block in the news namespace, or with an undeclared `news:` prefix
fn is_news_block(child: &StartElement) -> bool {
    if child.local_name() != "news" {
        return false;
    }
    match child.namespace() {
        Some(uri) => uri == NEWS_NAMESPACE,
        None => child.prefix() == Some("news"),
    }
}

impl Record for Entry {
    const TAG: &'static str = "url";

    fn decode_child<R: Read>(&mut self, child: &StartElement, reader: &mut StreamReader<R>) -> Result<(), ReadError> {
        if is_news_block(child) {
            self.news = Some(NewsPayload::decode(reader)?);
            return Ok(());
        }

        match child.local_name() {
            "loc" => self.location = read_trimmed(reader)?,
            "lastmod" => self.last_modified = non_empty(read_trimmed(reader)?),
            "changefreq" => {
                let text = read_trimmed(reader)?;
                self.change_frequency = text.parse().unwrap_or_else(|err| {
                    debug!(location = %self.location, %err, "using default change frequency");
                    ChangeFrequency::default()
                });
            }
            "priority" => {
                let text = read_trimmed(reader)?;
                match text.parse::<f32>() {
                    Ok(priority) => self.priority = priority,
                    Err(err) => {
                        debug!(location = %self.location, value = %text, %err, "ignoring unparseable priority")
                    }
                }
            }
            _ => reader.skip_element()?,
        }
        Ok(())
    }
}
