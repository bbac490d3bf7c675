//! XML Reader Module
//!
//! - BufferedReader: growable read window over any `Read` source
//! - StreamReader: pull parser producing owned events with element and
//!   namespace tracking
//! - Events: XML event types for pull parsing

pub mod buffered;
pub mod events;
pub mod stream;

pub use events::{EndElement, StartElement, XmlEvent};
pub use stream::StreamReader;
