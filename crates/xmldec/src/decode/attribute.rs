//! Decoding from a single attribute

use crate::config::DecodingConfiguration;
use crate::decode::value::SingleValueContainer;
use crate::decode::Decoder;
use crate::key::CodingPath;
use crate::node::Attribute;

/// A decoder over a single attribute.
///
/// Attributes carry exactly one string value, so this decoder supports only
/// single-value decoding. Requesting a keyed or unkeyed container over it
/// fails with a container-kind error.
#[derive(Clone, Debug)]
pub struct AttributeDecoder<'a> {
    attribute: &'a Attribute,
    coding_path: CodingPath,
    configuration: &'a DecodingConfiguration,
}

impl<'a> AttributeDecoder<'a> {
    pub(crate) fn new(
        attribute: &'a Attribute,
        coding_path: CodingPath,
        configuration: &'a DecodingConfiguration,
    ) -> Self {
        Self {
            attribute,
            coding_path,
            configuration,
        }
    }

    /// The attribute being decoded.
    pub fn attribute(&self) -> &'a Attribute {
        self.attribute
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    pub fn configuration(&self) -> &'a DecodingConfiguration {
        self.configuration
    }

    /// Returns a single-value container over this attribute's value.
    pub fn single_value(&self) -> SingleValueContainer<'a> {
        SingleValueContainer::new(Decoder::Attribute(self.clone()))
    }
}
