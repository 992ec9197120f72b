//! Decoding from a single element

use indexmap::IndexSet;

use crate::config::DecodingConfiguration;
use crate::decode::attribute::AttributeDecoder;
use crate::decode::sequence::{ElementSequenceDecoder, UnkeyedContainer};
use crate::decode::value::{FromXml, SingleValueContainer};
use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::key::{CodingPath, Key};
use crate::node::{Element, Node};

/// A decoder over a single element.
///
/// An element decoder is used whenever decoding from one element: at the
/// document root, and derived whenever exactly one node matches a key during
/// keyed decoding. When zero or more than one node matches, an element
/// sequence decoder is derived instead.
#[derive(Clone, Debug)]
pub struct ElementDecoder<'a> {
    element: &'a Element,
    coding_path: CodingPath,
    configuration: &'a DecodingConfiguration,
}

impl<'a> ElementDecoder<'a> {
    /// Creates a decoder over the given element with a root coding path.
    pub fn new(element: &'a Element, configuration: &'a DecodingConfiguration) -> Self {
        Self {
            element,
            coding_path: CodingPath::root(),
            configuration,
        }
    }

    pub(crate) fn with_path(
        element: &'a Element,
        coding_path: CodingPath,
        configuration: &'a DecodingConfiguration,
    ) -> Self {
        Self {
            element,
            coding_path,
            configuration,
        }
    }

    /// The element being decoded.
    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    pub fn configuration(&self) -> &'a DecodingConfiguration {
        self.configuration
    }

    /// Decodes the root value: `self.single_value().decode()`.
    pub fn decode_root_value<T: FromXml>(&self) -> Result<T> {
        self.single_value().decode()
    }

    /// Returns a keyed container resolving fields against this element's
    /// children.
    pub fn keyed(&self) -> KeyedContainer<'a> {
        KeyedContainer {
            decoder: self.clone(),
        }
    }

    /// Returns an unkeyed container over this element.
    ///
    /// When sequences use container elements, the members are this element's
    /// element children in document order, attributes excluded. Otherwise
    /// this element is itself the sole member: its collection is formed by
    /// siblings that were matched elsewhere.
    pub fn unkeyed(&self) -> UnkeyedContainer<'a> {
        let elements: Vec<&'a Element> = if self.configuration.sequences_use_container_elements {
            self.element.child_elements().collect()
        } else {
            vec![self.element]
        };
        UnkeyedContainer::new(elements, self.coding_path.clone(), self.configuration)
    }

    /// Returns a single-value container over this element's contents.
    pub fn single_value(&self) -> SingleValueContainer<'a> {
        SingleValueContainer::new(Decoder::Element(self.clone()))
    }
}

/// A keyed decoding container resolving coding keys against an element's
/// children.
#[derive(Clone, Debug)]
pub struct KeyedContainer<'a> {
    decoder: ElementDecoder<'a>,
}

impl<'a> KeyedContainer<'a> {
    pub fn coding_path(&self) -> &CodingPath {
        self.decoder.coding_path()
    }

    /// The distinct coding-key string values satisfiable by this element's
    /// children, in first-seen order.
    ///
    /// The configured key transform is applied to each child's local name.
    pub fn all_keys(&self) -> Vec<String> {
        let transform = &self.decoder.configuration.key_transform;
        let mut keys: IndexSet<String> = IndexSet::new();
        for child in &self.decoder.element.children {
            if let Some((node_type, _)) = child.typed() {
                keys.insert(transform(&node_type.local_name));
            }
        }
        keys.into_iter().collect()
    }

    /// Returns true iff at least one node matches the key.
    pub fn contains(&self, key: &Key) -> bool {
        !self.matching_nodes(key).is_empty()
    }

    /// Decodes the value for the given key.
    pub fn decode<T: FromXml>(&self, key: &Key) -> Result<T> {
        self.decoder_for_key(key)?.single_value().decode()
    }

    /// Decodes the value for the given key, or `None` if the key matches no
    /// node or the matched node decodes as nil.
    pub fn decode_if_present<T: FromXml>(&self, key: &Key) -> Result<Option<T>> {
        if !self.contains(key) {
            return Ok(None);
        }
        if self.decode_nil(key)? {
            return Ok(None);
        }
        self.decode(key).map(Some)
    }

    /// Returns whether the node matched by the key decodes as nil.
    pub fn decode_nil(&self, key: &Key) -> Result<bool> {
        self.decoder_for_key(key)?.single_value().decode_nil()
    }

    /// Returns a keyed container for a nested aggregate under the key.
    pub fn nested_keyed(&self, key: &Key) -> Result<KeyedContainer<'a>> {
        self.decoder_for_key(key)?.keyed()
    }

    /// Returns an unkeyed container for a nested sequence under the key.
    pub fn nested_unkeyed(&self, key: &Key) -> Result<UnkeyedContainer<'a>> {
        self.decoder_for_key(key)?.unkeyed()
    }

    fn matching_nodes(&self, key: &Key) -> Vec<&'a Node> {
        let transform = &self.decoder.configuration.key_transform;
        self.decoder
            .element
            .children
            .iter()
            .filter(|child| key.matches(child, transform.as_ref()))
            .collect()
    }

    /// Returns a decoder for the node or nodes matching the given key.
    ///
    /// Exactly one match derives an element- or attribute-scoped decoder.
    /// Plural matches derive an element sequence decoder when sequences are
    /// flat, and are an error when sequences use container elements. Zero
    /// matches derive an empty sequence decoder when sequences are flat, and
    /// are a key-not-found error otherwise.
    pub(crate) fn decoder_for_key(&self, key: &Key) -> Result<Decoder<'a>> {
        let path = self.decoder.coding_path.appending(key);
        let matched = self.matching_nodes(key);
        let wrapped = self.decoder.configuration.sequences_use_container_elements;

        match matched.as_slice() {
            [] if wrapped => Err(Error::KeyNotFound { path }),
            [] => Ok(Decoder::Sequence(ElementSequenceDecoder::new(
                Vec::new(),
                path,
                self.decoder.configuration,
            ))),
            [Node::Element(element)] => Ok(Decoder::Element(ElementDecoder::with_path(
                element,
                path,
                self.decoder.configuration,
            ))),
            [Node::Attribute(attribute)] => Ok(Decoder::Attribute(AttributeDecoder::new(
                attribute,
                path,
                self.decoder.configuration,
            ))),
            [Node::Text(_)] => unreachable!("text nodes never match a coding key"),
            _ if wrapped => Err(Error::MultipleNodesForKey { path }),
            _ => Ok(Decoder::Sequence(ElementSequenceDecoder::new(
                matched
                    .iter()
                    .filter_map(|node| node.as_element())
                    .collect(),
                path,
                self.decoder.configuration,
            ))),
        }
    }
}
