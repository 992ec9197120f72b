//! Decoding from an element sequence

use crate::config::DecodingConfiguration;
use crate::decode::element::ElementDecoder;
use crate::decode::value::FromXml;
use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::key::{CodingPath, Key};
use crate::node::Element;

/// A decoder over the zero or several elements matched by a plural key.
///
/// Derived during keyed decoding when a key matches anything other than
/// exactly one node and sequences are not represented by container elements.
/// It supports only unkeyed iteration; keyed and single-value access report
/// the plural match instead.
#[derive(Clone, Debug)]
pub struct ElementSequenceDecoder<'a> {
    elements: Vec<&'a Element>,
    coding_path: CodingPath,
    configuration: &'a DecodingConfiguration,
}

impl<'a> ElementSequenceDecoder<'a> {
    pub(crate) fn new(
        elements: Vec<&'a Element>,
        coding_path: CodingPath,
        configuration: &'a DecodingConfiguration,
    ) -> Self {
        // A single match derives an element decoder instead.
        debug_assert!(elements.len() != 1, "one-element sequence decoder");
        Self {
            elements,
            coding_path,
            configuration,
        }
    }

    /// The matched elements, in document order.
    pub fn elements(&self) -> &[&'a Element] {
        &self.elements
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    pub fn configuration(&self) -> &'a DecodingConfiguration {
        self.configuration
    }

    /// The error reported when a caller needs a single node here.
    pub(crate) fn plural_access_error(&self) -> Error {
        if self.elements.len() > 1 {
            Error::MultipleNodesForKey {
                path: self.coding_path.clone(),
            }
        } else {
            Error::KeyNotFound {
                path: self.coding_path.clone(),
            }
        }
    }

    /// Returns an unkeyed container iterating the matched elements.
    ///
    /// Only legal when sequences are not represented by container elements;
    /// otherwise a plural match can only be a mistake.
    pub fn unkeyed(&self) -> Result<UnkeyedContainer<'a>> {
        if self.configuration.sequences_use_container_elements {
            return Err(Error::MultipleNodesForKey {
                path: self.coding_path.clone(),
            });
        }
        Ok(UnkeyedContainer::new(
            self.elements.clone(),
            self.coding_path.clone(),
            self.configuration,
        ))
    }
}

/// An unkeyed decoding container iterating a sequence of elements.
///
/// The cursor advances only when a member decodes successfully, so a caller
/// can probe the next member and recover without losing its position.
#[derive(Clone, Debug)]
pub struct UnkeyedContainer<'a> {
    elements: Vec<&'a Element>,
    coding_path: CodingPath,
    configuration: &'a DecodingConfiguration,
    cursor: usize,
}

impl<'a> UnkeyedContainer<'a> {
    pub(crate) fn new(
        elements: Vec<&'a Element>,
        coding_path: CodingPath,
        configuration: &'a DecodingConfiguration,
    ) -> Self {
        Self {
            elements,
            coding_path,
            configuration,
            cursor: 0,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.coding_path
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The position of the next member to decode.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_at_end(&self) -> bool {
        self.cursor >= self.elements.len()
    }

    /// Returns a decoder for the member at the cursor without advancing.
    pub fn decoder_for_next(&self) -> Result<ElementDecoder<'a>> {
        let path = self.coding_path.appending(&Key::index(self.cursor));
        match self.elements.get(self.cursor) {
            Some(element) => Ok(ElementDecoder::with_path(
                element,
                path,
                self.configuration,
            )),
            None => Err(Error::KeyNotFound { path }),
        }
    }

    /// Decodes the member at the cursor, advancing past it on success.
    pub fn decode_next<T: FromXml>(&mut self) -> Result<T> {
        let decoder = self.decoder_for_next()?;
        let value = Decoder::Element(decoder).single_value().decode()?;
        self.cursor += 1;
        Ok(value)
    }

    /// Returns whether the member at the cursor decodes as nil, advancing
    /// past it only when it does.
    pub fn decode_nil_next(&mut self) -> Result<bool> {
        let decoder = self.decoder_for_next()?;
        let is_nil = Decoder::Element(decoder).single_value().decode_nil()?;
        if is_nil {
            self.cursor += 1;
        }
        Ok(is_nil)
    }
}
