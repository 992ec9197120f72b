//! Node tree model for parsed XML documents
//!
//! The tree is built once by [`crate::tree::TreeBuilder`] and is immutable
//! afterwards; decoders hold borrowed views into it.

use indexmap::IndexMap;

use crate::key::NodeKind;
use crate::scope::Scope;

/// An XML namespace, identified solely by its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Namespace {
    /// The namespace's name, a URI-like string.
    pub name: String,
}

impl Namespace {
    /// Defines a namespace with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The type of a node: what kind of element or attribute it is, independent
/// of where it sits in the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeType {
    /// The type's namespace, or `None` if the type isn't assigned to any
    /// namespace.
    pub namespace: Option<Namespace>,
    /// The name of the type, localised to its namespace if applicable.
    pub local_name: String,
}

impl NodeType {
    pub fn new(namespace: Option<Namespace>, local_name: impl Into<String>) -> Self {
        Self {
            namespace,
            local_name: local_name.into(),
        }
    }
}

/// A node in an XML tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),
    Attribute(Attribute),
    Text(Text),
}

impl Node {
    /// The node's type and coding kind, or `None` for text nodes.
    pub fn typed(&self) -> Option<(&NodeType, NodeKind)> {
        match self {
            Self::Element(element) => Some((&element.node_type, NodeKind::Element)),
            Self::Attribute(attribute) => Some((&attribute.node_type, NodeKind::Attribute)),
            Self::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(attribute) => Some(attribute),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// An element node.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub node_type: NodeType,
    /// The element's children.
    ///
    /// Every attribute node, if any, precedes every non-attribute node.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element of the given type.
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            children: Vec::new(),
        }
    }

    /// Creates an element from a start-element parse event.
    ///
    /// The raw attribute map is converted into attribute children, resolving
    /// prefixed names against the given scope.
    pub(crate) fn from_start_event(
        namespace: Option<String>,
        local_name: String,
        attributes: &IndexMap<String, String>,
        scope: &Scope,
    ) -> Self {
        Self {
            node_type: NodeType {
                namespace: namespace.map(Namespace::new),
                local_name,
            },
            children: attributes
                .iter()
                .map(|(name, value)| Node::Attribute(Attribute::from_raw(name, value, scope)))
                .collect(),
        }
    }

    /// Returns true iff the element has both a non-whitespace text child and
    /// an element child.
    ///
    /// Mixed content cannot be decoded as a primitive value; a keyed decode
    /// over a mixed element ignores the text entirely.
    pub fn has_mixed_content(&self) -> bool {
        let has_text = self
            .children
            .iter()
            .any(|child| matches!(child, Node::Text(text) if !text.string_value.trim().is_empty()));
        let has_elements = self
            .children
            .iter()
            .any(|child| matches!(child, Node::Element(_)));
        has_text && has_elements
    }

    /// The element children in document order, attributes and text excluded.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

/// An attribute node. Attributes have no children and do not nest.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub node_type: NodeType,
    /// The raw attribute value.
    pub value: String,
}

impl Attribute {
    /// Creates an attribute node from an unprocessed attribute name.
    ///
    /// Two-part names (`prefix:local`) resolve the prefix against the scope;
    /// one-part names get no namespace. Per XML semantics an unprefixed
    /// attribute never consults the default namespace.
    pub(crate) fn from_raw(unprocessed_name: &str, value: &str, scope: &Scope) -> Self {
        let node_type = match unprocessed_name.split_once(':') {
            Some((prefix, local_name)) => NodeType {
                namespace: scope.namespace_for_prefix(prefix).cloned(),
                local_name: local_name.to_owned(),
            },
            None => NodeType {
                namespace: None,
                local_name: unprocessed_name.to_owned(),
            },
        };
        Self {
            node_type,
            value: value.to_owned(),
        }
    }
}

/// A text node.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// The node's string value.
    ///
    /// Adjacent text and CDATA runs under one element are stored as separate
    /// nodes and concatenated at decode time.
    pub string_value: String,
}

impl Text {
    pub fn new(string_value: impl Into<String>) -> Self {
        Self {
            string_value: string_value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Node {
        Node::Text(Text::new(value))
    }

    fn element(name: &str) -> Node {
        Node::Element(Element::new(NodeType::new(None, name)))
    }

    #[test]
    fn test_namespace_equality() {
        assert_eq!(Namespace::new("urn:a"), Namespace::new("urn:a"));
        assert_ne!(Namespace::new("urn:a"), Namespace::new("urn:b"));
    }

    #[test]
    fn test_mixed_content_requires_both() {
        let mut parent = Element::new(NodeType::new(None, "p"));
        assert!(!parent.has_mixed_content());

        parent.children.push(text("hello"));
        assert!(!parent.has_mixed_content());

        parent.children.push(element("child"));
        assert!(parent.has_mixed_content());
    }

    #[test]
    fn test_whitespace_text_is_not_mixed_content() {
        let mut parent = Element::new(NodeType::new(None, "p"));
        parent.children.push(text("\n  "));
        parent.children.push(element("child"));
        assert!(!parent.has_mixed_content());
    }

    #[test]
    fn test_attribute_name_splitting() {
        let mut scope = Scope::default();
        scope.begin_scope("c", Namespace::new("urn:contacts"));

        let prefixed = Attribute::from_raw("c:firstName", "Jake", &scope);
        assert_eq!(prefixed.node_type.local_name, "firstName");
        assert_eq!(
            prefixed.node_type.namespace,
            Some(Namespace::new("urn:contacts"))
        );

        let plain = Attribute::from_raw("firstName", "Jake", &scope);
        assert_eq!(plain.node_type.local_name, "firstName");
        assert_eq!(plain.node_type.namespace, None);
    }

    #[test]
    fn test_unbound_prefix_yields_no_namespace() {
        let scope = Scope::default();
        let attribute = Attribute::from_raw("x:name", "v", &scope);
        assert_eq!(attribute.node_type.namespace, None);
        assert_eq!(attribute.node_type.local_name, "name");
    }

    #[test]
    fn test_unprefixed_attribute_ignores_default_namespace() {
        let mut scope = Scope::default();
        scope.begin_default_scope(Namespace::new("urn:default"));
        let attribute = Attribute::from_raw("id", "1", &scope);
        assert_eq!(attribute.node_type.namespace, None);
    }
}
