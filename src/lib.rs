//! sitemap-stream - streaming decoder for XML sitemaps
//!
//! Reads plain sitemaps, sitemap indexes and news sitemaps from any `Read`
//! source and calls a handler once per record, without building the document
//! in memory. Returning `Err` from the handler stops decoding and hands that
//! exact value back as [`ParseError::Handler`].
//!
//! ```no_run
//! use std::convert::Infallible;
//!
//! sitemap_stream::parse_from_file("sitemap.xml", |entry| {
//!     println!("{} {}", entry.location(), entry.change_frequency());
//!     Ok::<_, Infallible>(())
//! })?;
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Layers:
//! - core: byte scanner, tokenizer, entities, attributes, namespaces
//! - reader: buffered pull reader producing owned events
//! - decoder: record boundaries and handler dispatch
//! - model: Entry, IndexEntry, NewsPayload, ChangeFrequency

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

mod core;
pub mod datetime;
pub mod decoder;
pub mod error;
pub mod model;
pub mod options;
pub mod reader;

pub use decoder::{Decoder, Record};
pub use error::{ParseError, ReadError, SyntaxError};
pub use model::{ChangeFrequency, Entry, IndexEntry, NewsPayload, UnknownFrequency};
pub use options::DecoderOptions;

// ============================================================================
// Sitemaps
// ============================================================================

/// Decode every `<url>` of a sitemap or news sitemap read from `source`
///
/// Pass `&mut source` to keep using the source afterwards.
pub fn parse<R, F, E>(source: R, handler: F) -> Result<(), ParseError<E>>
where
    R: Read,
    F: FnMut(&Entry) -> Result<(), E>,
{
    Decoder::new(source).entries(handler)
}

/// Open `path` and decode every `<url>` in it
///
/// The file is closed before this returns, whatever the outcome.
pub fn parse_from_file<P, F, E>(path: P, handler: F) -> Result<(), ParseError<E>>
where
    P: AsRef<Path>,
    F: FnMut(&Entry) -> Result<(), E>,
{
    let file = open(path.as_ref())?;
    parse(file, handler)
}

// ============================================================================
// Sitemap indexes
// ============================================================================

/// Decode every `<sitemap>` of a sitemap index read from `source`
pub fn parse_index<R, F, E>(source: R, handler: F) -> Result<(), ParseError<E>>
where
    R: Read,
    F: FnMut(&IndexEntry) -> Result<(), E>,
{
    Decoder::new(source).index_entries(handler)
}

/// Open `path` and decode every `<sitemap>` in it
pub fn parse_index_from_file<P, F, E>(path: P, handler: F) -> Result<(), ParseError<E>>
where
    P: AsRef<Path>,
    F: FnMut(&IndexEntry) -> Result<(), E>,
{
    let file = open(path.as_ref())?;
    parse_index(file, handler)
}

fn open<E>(path: &Path) -> Result<File, ParseError<E>> {
    debug!(path = %path.display(), "opening sitemap");
    File::open(path).map_err(|source| ParseError::Open {
        path: path.to_path_buf(),
        source,
    })
}
