//! Namespace Resolution
//!
//! Stack-based namespace resolver. The reader pushes a scope per start tag and
//! pops it on the matching end tag, so bindings declared on an element vanish
//! with it.

/// Well-known namespace URIs
pub mod ns {
    pub const XML: &[u8] = b"http://www.w3.org/XML/1998/namespace";
    pub const XMLNS: &[u8] = b"http://www.w3.org/2000/xmlns/";
}

/// Namespace binding (prefix -> URI); the empty prefix is the default namespace
#[derive(Debug, Clone)]
struct NsBinding {
    prefix: Vec<u8>,
    uri: Vec<u8>,
    depth: usize,
}

#[derive(Debug)]
pub struct NamespaceResolver {
    bindings: Vec<NsBinding>,
    depth: usize,
}

impl NamespaceResolver {
    /// Create a resolver with the `xml` and `xmlns` prefixes pre-bound
    pub fn new() -> Self {
        let mut bindings = Vec::with_capacity(8);
        bindings.push(NsBinding {
            prefix: b"xml".to_vec(),
            uri: ns::XML.to_vec(),
            depth: 0,
        });
        bindings.push(NsBinding {
            prefix: b"xmlns".to_vec(),
            uri: ns::XMLNS.to_vec(),
            depth: 0,
        });
        NamespaceResolver { bindings, depth: 0 }
    }

    /// Enter a new element scope
    pub fn push_scope(&mut self) {
        self.depth += 1;
    }

    /// Leave an element scope, removing any bindings declared in it
    pub fn pop_scope(&mut self) {
        while let Some(binding) = self.bindings.last() {
            if binding.depth < self.depth {
                break;
            }
            self.bindings.pop();
        }
        self.depth = self.depth.saturating_sub(1);
    }

    /// Declare a binding for the current scope from an attribute, if it is one
    ///
    /// Returns true when the attribute was a namespace declaration.
    pub fn declare_from_attribute(&mut self, name: &[u8], value: &[u8]) -> bool {
        let prefix: &[u8] = match name {
            b"xmlns" => b"",
            _ => match name.strip_prefix(b"xmlns:") {
                Some(prefix) => prefix,
                None => return false,
            },
        };
        // xml and xmlns cannot be redeclared
        if prefix != b"xml" && prefix != b"xmlns" {
            self.bindings.push(NsBinding {
                prefix: prefix.to_vec(),
                uri: value.to_vec(),
                depth: self.depth,
            });
        }
        true
    }

    /// Resolve a prefix (empty for the default namespace) to its URI
    ///
    /// An empty URI (`xmlns=""`) undeclares the default namespace.
    pub fn resolve(&self, prefix: &[u8]) -> Option<&[u8]> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.prefix == prefix)
            .map(|b| b.uri.as_slice())
            .filter(|uri| !uri.is_empty())
    }
}

impl Default for NamespaceResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITEMAP: &[u8] = b"http://www.sitemaps.org/schemas/sitemap/0.9";
    const NEWS: &[u8] = b"http://www.google.com/schemas/sitemap-news/0.9";

    #[test]
    fn test_default_namespaces() {
        let resolver = NamespaceResolver::new();
        assert_eq!(resolver.resolve(b"xml"), Some(ns::XML));
        assert_eq!(resolver.resolve(b""), None);
    }

    #[test]
    fn test_declare_and_resolve() {
        let mut resolver = NamespaceResolver::new();
        resolver.push_scope();
        assert!(resolver.declare_from_attribute(b"xmlns", SITEMAP));
        assert!(resolver.declare_from_attribute(b"xmlns:news", NEWS));
        assert!(!resolver.declare_from_attribute(b"version", b"1.0"));

        assert_eq!(resolver.resolve(b""), Some(SITEMAP));
        assert_eq!(resolver.resolve(b"news"), Some(NEWS));
    }

    #[test]
    fn test_scope_pop() {
        let mut resolver = NamespaceResolver::new();
        resolver.push_scope();
        resolver.declare_from_attribute(b"xmlns:foo", b"http://example.com/foo");
        resolver.push_scope();
        assert_eq!(resolver.resolve(b"foo"), Some(b"http://example.com/foo" as &[u8]));

        resolver.pop_scope();
        resolver.pop_scope();
        assert_eq!(resolver.resolve(b"foo"), None);
    }

    #[test]
    fn test_shadow_binding() {
        let mut resolver = NamespaceResolver::new();
        resolver.push_scope();
        resolver.declare_from_attribute(b"xmlns:ns", b"http://example.com/ns1");
        resolver.push_scope();
        resolver.declare_from_attribute(b"xmlns:ns", b"http://example.com/ns2");
        assert_eq!(resolver.resolve(b"ns"), Some(b"http://example.com/ns2" as &[u8]));

        resolver.pop_scope();
        assert_eq!(resolver.resolve(b"ns"), Some(b"http://example.com/ns1" as &[u8]));
    }

    #[test]
    fn test_undeclare_default() {
        let mut resolver = NamespaceResolver::new();
        resolver.push_scope();
        resolver.declare_from_attribute(b"xmlns", SITEMAP);
        resolver.push_scope();
        resolver.declare_from_attribute(b"xmlns", b"");
        assert_eq!(resolver.resolve(b""), None);
    }
}
