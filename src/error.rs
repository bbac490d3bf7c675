//! Error types
//!
//! Three layers:
//! - SyntaxError: the token stream is structurally broken
//! - ReadError: what the pull reader can fail with (I/O or syntax)
//! - ParseError: what the entry points return, including the handler's own error

use std::io;
use std::path::PathBuf;

/// Malformed XML at a given byte offset of the source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at byte {position}")]
pub struct SyntaxError {
    pub message: String,
    pub position: u64,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: u64) -> Self {
        SyntaxError {
            message: message.into(),
            position,
        }
    }
}

/// Failure while pulling events from a stream
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("failed to read XML source: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

/// Terminal outcome of a parse call
///
/// `Handler` carries the value the handler returned, untouched, so callers can
/// tell "I asked to stop" apart from "the document was broken".
#[derive(Debug, thiserror::Error)]
pub enum ParseError<E> {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read sitemap: {0}")]
    Read(#[source] io::Error),

    #[error("malformed sitemap XML: {0}")]
    Syntax(#[source] SyntaxError),

    #[error("handler stopped parsing: {0}")]
    Handler(E),
}

impl<E> ParseError<E> {
    /// True if parsing stopped because the handler returned an error
    pub fn is_handler(&self) -> bool {
        matches!(self, ParseError::Handler(_))
    }

    /// Take back the handler's error, if that is why parsing stopped
    pub fn into_handler_error(self) -> Option<E> {
        match self {
            ParseError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl<E> From<ReadError> for ParseError<E> {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Io(err) => ParseError::Read(err),
            ReadError::Syntax(err) => ParseError::Syntax(err),
        }
    }
}
