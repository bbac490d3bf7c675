//! XML Event Types
//!
//! Owned events produced by the stream reader. The read window is compacted
//! between events, so nothing here borrows from it.

use memchr::memchr;

/// XML parsing event
#[derive(Debug, Clone, PartialEq)]
pub enum XmlEvent {
    /// Start of an element. `<name/>` is reported as a start followed by an end.
    StartElement(StartElement),
    /// End of an element: </name>
    EndElement(EndElement),
    /// Text content between tags, entities decoded
    Text(String),
    /// CDATA section content
    CData(String),
    /// Comment content
    Comment(String),
    /// Processing instruction: <?target data?>
    ProcessingInstruction { target: String, data: Option<String> },
    /// XML declaration: <?xml version="1.0"?>
    XmlDeclaration {
        version: String,
        encoding: Option<String>,
        standalone: Option<bool>,
    },
    /// DOCTYPE declaration body
    DocType(String),
    /// End of document
    EndDocument,
}

/// Start element event data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement {
    /// Full element name (may include prefix)
    pub name: String,
    /// Namespace URI the prefix (or default namespace) resolved to, if any
    pub namespace: Option<String>,
    /// Element attributes as (name, value) pairs, values entity-decoded
    pub attributes: Vec<(String, String)>,
}

impl StartElement {
    pub fn new(name: impl Into<String>) -> Self {
        StartElement {
            name: name.into(),
            namespace: None,
            attributes: Vec::new(),
        }
    }

    /// Local name (after colon)
    pub fn local_name(&self) -> &str {
        split_name(&self.name).1
    }

    /// Namespace prefix (before colon), if any
    pub fn prefix(&self) -> Option<&str> {
        split_name(&self.name).0
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Get an attribute value by its full name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// End element event data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndElement {
    /// Full element name
    pub name: String,
}

impl EndElement {
    pub fn new(name: impl Into<String>) -> Self {
        EndElement { name: name.into() }
    }

    pub fn local_name(&self) -> &str {
        split_name(&self.name).1
    }
}

/// Split a name into prefix and local name at the colon
fn split_name(name: &str) -> (Option<&str>, &str) {
    match memchr(b':', name.as_bytes()) {
        Some(pos) => (Some(&name[..pos]), &name[pos + 1..]),
        None => (None, name),
    }
}

impl XmlEvent {
    pub fn is_start_element(&self) -> bool {
        matches!(self, XmlEvent::StartElement(_))
    }

    pub fn is_end_element(&self) -> bool {
        matches!(self, XmlEvent::EndElement(_))
    }

    pub fn as_start_element(&self) -> Option<&StartElement> {
        match self {
            XmlEvent::StartElement(e) => Some(e),
            _ => None,
        }
    }

    /// Text or CDATA content
    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlEvent::Text(t) | XmlEvent::CData(t) => Some(t),
            _ => None,
        }
    }
}
