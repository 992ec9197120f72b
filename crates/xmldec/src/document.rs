//! Parsed documents and decoding entry points

use crate::config::DecodingConfiguration;
use crate::decode::{ElementDecoder, FromXml};
use crate::error::Result;
use crate::node::Element;
use crate::reader::Reader;
use crate::tree::TreeBuilder;

/// A parsed XML document, holding the root element of its node tree.
///
/// A document is immutable once parsed; any number of decode operations may
/// run over it, concurrently and with differing configurations.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Parses a document from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(xml: &str) -> Result<Self> {
        Self::from_bytes(xml.as_bytes())
    }

    /// Parses a document from raw bytes. The input must be UTF-8.
    pub fn from_bytes(xml: &[u8]) -> Result<Self> {
        let mut builder = TreeBuilder::new();
        Reader::new(xml).parse_into(&mut builder);
        Ok(Self {
            root: builder.finish()?,
        })
    }

    /// The document's root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Returns a decoder positioned at the root element.
    pub fn decoder<'a>(&'a self, configuration: &'a DecodingConfiguration) -> ElementDecoder<'a> {
        ElementDecoder::new(&self.root, configuration)
    }

    /// Decodes a value of the given type from the root element.
    pub fn decode<T: FromXml>(&self, configuration: &DecodingConfiguration) -> Result<T> {
        self.decoder(configuration).decode_root_value()
    }
}

impl std::str::FromStr for Document {
    type Err = crate::error::Error;

    fn from_str(xml: &str) -> Result<Self> {
        Self::from_bytes(xml.as_bytes())
    }
}
