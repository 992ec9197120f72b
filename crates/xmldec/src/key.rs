//! Coding keys and coding paths
//!
//! A coding key identifies the XML node a field is decoded from. Keys that
//! carry XML metadata ([`XmlKeyInfo`]) match nodes by namespace and node
//! kind; plain keys match non-namespaced elements by local name only.

use std::fmt;

use crate::node::{Namespace, Node};

/// The kind of node a coding key is satisfied by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// The value is coded as an element.
    Element,
    /// The value is coded as an attribute.
    Attribute,
}

/// Namespace and node-kind metadata attached to a coding key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlKeyInfo {
    /// The namespace where the key's associated element or attribute type is
    /// defined, or `None` if the type doesn't belong to any namespace.
    pub namespace: Option<Namespace>,
    /// The kind of node the key is coded by.
    pub node_kind: NodeKind,
}

/// A coding key used to locate a field's corresponding XML node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Key {
    string_value: String,
    index: Option<usize>,
    xml: Option<XmlKeyInfo>,
}

impl Key {
    /// A key without XML metadata.
    ///
    /// Plain keys match non-namespaced element children by local name;
    /// attributes and namespaced elements never match plain keys.
    pub fn plain(string_value: impl Into<String>) -> Self {
        Self {
            string_value: string_value.into(),
            index: None,
            xml: None,
        }
    }

    /// A key matching a non-namespaced element.
    pub fn element(string_value: impl Into<String>) -> Self {
        Self::with_info(string_value, None, NodeKind::Element)
    }

    /// A key matching an element in the given namespace.
    pub fn element_in(string_value: impl Into<String>, namespace: Namespace) -> Self {
        Self::with_info(string_value, Some(namespace), NodeKind::Element)
    }

    /// A key matching a non-namespaced attribute.
    pub fn attribute(string_value: impl Into<String>) -> Self {
        Self::with_info(string_value, None, NodeKind::Attribute)
    }

    /// A key matching an attribute in the given namespace.
    pub fn attribute_in(string_value: impl Into<String>, namespace: Namespace) -> Self {
        Self::with_info(string_value, Some(namespace), NodeKind::Attribute)
    }

    /// A numeric key, used for positions within a sequence.
    pub fn index(index: usize) -> Self {
        Self {
            string_value: index.to_string(),
            index: Some(index),
            xml: None,
        }
    }

    fn with_info(
        string_value: impl Into<String>,
        namespace: Option<Namespace>,
        node_kind: NodeKind,
    ) -> Self {
        Self {
            string_value: string_value.into(),
            index: None,
            xml: Some(XmlKeyInfo {
                namespace,
                node_kind,
            }),
        }
    }

    pub fn string_value(&self) -> &str {
        &self.string_value
    }

    pub fn int_value(&self) -> Option<usize> {
        self.index
    }

    /// The key's XML metadata, if it carries any.
    pub fn xml_info(&self) -> Option<&XmlKeyInfo> {
        self.xml.as_ref()
    }

    /// Returns true iff the given node satisfies this key.
    ///
    /// The configured key transform is applied to the node's local name
    /// before comparison. Namespaces must be equal on both sides (both
    /// absent, or both present and equal); there is no default-namespace
    /// fallback.
    pub(crate) fn matches(&self, node: &Node, transform: &dyn Fn(&str) -> String) -> bool {
        let Some((node_type, node_kind)) = node.typed() else {
            return false;
        };
        if transform(&node_type.local_name) != self.string_value {
            return false;
        }
        match &self.xml {
            Some(info) => info.namespace == node_type.namespace && info.node_kind == node_kind,
            None => node_kind == NodeKind::Element && node_type.namespace.is_none(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(index) = self.index {
            return write!(f, "[{index}]");
        }
        match &self.xml {
            Some(info) if info.node_kind == NodeKind::Attribute => {
                write!(f, "@{}", self.string_value)
            }
            _ => write!(f, "{}", self.string_value),
        }
    }
}

/// The ordered list of coding keys from the document root to the current
/// decode point, used for error localisation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodingPath(Vec<Key>);

impl CodingPath {
    /// The path at the document root.
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a copy of the path with the given key appended.
    pub(crate) fn appending(&self, key: &Key) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.clone());
        Self(keys)
    }

    pub fn keys(&self) -> &[Key] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (position, key) in self.0.iter().enumerate() {
            if position > 0 && key.int_value().is_none() {
                write!(f, ".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Attribute, Element, NodeType, Text};

    fn identity(name: &str) -> String {
        name.to_owned()
    }

    fn element_node(name: &str, namespace: Option<&str>) -> Node {
        Node::Element(Element::new(NodeType::new(
            namespace.map(Namespace::new),
            name,
        )))
    }

    fn attribute_node(name: &str, namespace: Option<&str>) -> Node {
        Node::Attribute(Attribute {
            node_type: NodeType::new(namespace.map(Namespace::new), name),
            value: String::new(),
        })
    }

    #[test]
    fn test_plain_key_matches_plain_elements_only() {
        let key = Key::plain("person");
        assert!(key.matches(&element_node("person", None), &identity));
        assert!(!key.matches(&element_node("person", Some("urn:c")), &identity));
        assert!(!key.matches(&attribute_node("person", None), &identity));
        assert!(!key.matches(&Node::Text(Text::new("person")), &identity));
    }

    #[test]
    fn test_namespaced_key_requires_equal_namespace_and_kind() {
        let key = Key::element_in("person", Namespace::new("urn:c"));
        assert!(key.matches(&element_node("person", Some("urn:c")), &identity));
        assert!(!key.matches(&element_node("person", Some("urn:other")), &identity));
        assert!(!key.matches(&element_node("person", None), &identity));
        assert!(!key.matches(&attribute_node("person", Some("urn:c")), &identity));
    }

    #[test]
    fn test_attribute_key_matches_attributes() {
        let key = Key::attribute("id");
        assert!(key.matches(&attribute_node("id", None), &identity));
        assert!(!key.matches(&element_node("id", None), &identity));
    }

    #[test]
    fn test_key_transform_applied_to_node_name() {
        let strip_dashes = |name: &str| name.replace('-', "");
        let key = Key::element("firstname");
        assert!(key.matches(&element_node("first-name", None), &strip_dashes));
    }

    #[test]
    fn test_path_display() {
        let path = CodingPath::root()
            .appending(&Key::element("person"))
            .appending(&Key::index(0))
            .appending(&Key::attribute("firstName"));
        assert_eq!(path.to_string(), "person[0].@firstName");
        assert_eq!(CodingPath::root().to_string(), "$");
    }
}
