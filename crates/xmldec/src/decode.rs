//! The decoding engine
//!
//! Three cooperating decoder kinds traverse the node tree top-down, driven
//! by the shape of the target type. An [`ElementDecoder`] decodes a single
//! element and is derived whenever exactly one node matches a key during
//! keyed decoding. An [`AttributeDecoder`] decodes a single attribute and
//! supports only single-value decoding. An [`ElementSequenceDecoder`] holds
//! the zero or several elements arising from a plural key match and supports
//! only unkeyed iteration.
//!
//! Each decoder is created fresh for one level of the traversal and holds a
//! borrowed subtree view, its own coding path, and the shared configuration.

pub mod attribute;
pub mod element;
pub mod sequence;
pub mod value;

pub use attribute::AttributeDecoder;
pub use element::{ElementDecoder, KeyedContainer};
pub use sequence::{ElementSequenceDecoder, UnkeyedContainer};
pub use value::{FromXml, SingleValueContainer};

use crate::config::DecodingConfiguration;
use crate::error::{Error, Result};
use crate::key::CodingPath;

/// A decoder over one point in the node tree.
#[derive(Clone, Debug)]
pub enum Decoder<'a> {
    Element(ElementDecoder<'a>),
    Attribute(AttributeDecoder<'a>),
    Sequence(ElementSequenceDecoder<'a>),
}

impl<'a> Decoder<'a> {
    /// The path from the document root to this decoder.
    pub fn coding_path(&self) -> &CodingPath {
        match self {
            Self::Element(decoder) => decoder.coding_path(),
            Self::Attribute(decoder) => decoder.coding_path(),
            Self::Sequence(decoder) => decoder.coding_path(),
        }
    }

    /// The configuration threaded through the decode operation.
    pub fn configuration(&self) -> &'a DecodingConfiguration {
        match self {
            Self::Element(decoder) => decoder.configuration(),
            Self::Attribute(decoder) => decoder.configuration(),
            Self::Sequence(decoder) => decoder.configuration(),
        }
    }

    /// Returns a keyed container for resolving named fields.
    ///
    /// Only legal over an element.
    pub fn keyed(&self) -> Result<KeyedContainer<'a>> {
        match self {
            Self::Element(decoder) => Ok(decoder.keyed()),
            Self::Attribute(decoder) => Err(Error::KeyedContainerOverAttribute {
                path: decoder.coding_path().clone(),
            }),
            Self::Sequence(decoder) => Err(decoder.plural_access_error()),
        }
    }

    /// Returns an unkeyed container for iterating a sequence.
    ///
    /// Illegal over an attribute. Over a sequence decoder this is only legal
    /// when sequences are not represented by container elements.
    pub fn unkeyed(&self) -> Result<UnkeyedContainer<'a>> {
        match self {
            Self::Element(decoder) => Ok(decoder.unkeyed()),
            Self::Attribute(decoder) => Err(Error::UnkeyedContainerOverAttribute {
                path: decoder.coding_path().clone(),
            }),
            Self::Sequence(decoder) => decoder.unkeyed(),
        }
    }

    /// Returns a single-value container for decoding one scalar or
    /// delegating to a nested type's own decode logic.
    pub fn single_value(&self) -> SingleValueContainer<'a> {
        SingleValueContainer::new(self.clone())
    }
}
