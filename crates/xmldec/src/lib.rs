//! xmldec - Namespace-aware XML decoding onto strongly-typed values
//!
//! Parsing and decoding are two separate phases: a document is parsed once
//! into an immutable node tree, then any number of decode operations map
//! subtrees onto Rust types, driven by coding keys that select children by
//! local name, namespace, and node kind.
//!
//! # Quick Start
//!
//! ```
//! use xmldec::{Decoder, FromXml, Key, Result};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl FromXml for Person {
//!     fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
//!         let keyed = decoder.keyed()?;
//!         Ok(Self {
//!             name: keyed.decode(&Key::attribute("name"))?,
//!             age: keyed.decode(&Key::element("age"))?,
//!         })
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let person: Person = xmldec::from_str(r#"<person name="Ji-su"><age>30</age></person>"#)?;
//! assert_eq!(person.name, "Ji-su");
//! assert_eq!(person.age, 30);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, Pos, Result};

pub mod node;
pub use node::{Attribute, Element, Namespace, Node, NodeType, Text};

pub mod scope;
pub use scope::Scope;

pub mod reader;
pub use reader::{Event, EventSink, Reader};

pub mod tree;
pub use tree::TreeBuilder;

pub mod key;
pub use key::{CodingPath, Key, NodeKind, XmlKeyInfo};

pub mod config;
pub use config::{
    element_nil_from_xsi_attribute, element_nil_when_empty, DecodingConfiguration, Formatter,
    KeyTransform, NilCheckFailure, NilPredicate, XSI_NAMESPACE,
};

pub mod decode;
pub use decode::{
    AttributeDecoder, Decoder, ElementDecoder, ElementSequenceDecoder, FromXml, KeyedContainer,
    SingleValueContainer, UnkeyedContainer,
};

pub mod document;
pub use document::Document;

/// Parse a document and decode a value from its root element, using the
/// default configuration.
pub fn from_str<T: FromXml>(xml: &str) -> Result<T> {
    from_str_with_config(xml, &DecodingConfiguration::default())
}

/// Parse a document from bytes and decode a value from its root element,
/// using the default configuration.
pub fn from_bytes<T: FromXml>(xml: &[u8]) -> Result<T> {
    from_bytes_with_config(xml, &DecodingConfiguration::default())
}

/// Parse a document and decode a value with a custom configuration.
pub fn from_str_with_config<T: FromXml>(
    xml: &str,
    configuration: &DecodingConfiguration,
) -> Result<T> {
    Document::from_str(xml)?.decode(configuration)
}

/// Parse a document from bytes and decode a value with a custom
/// configuration.
pub fn from_bytes_with_config<T: FromXml>(
    xml: &[u8],
    configuration: &DecodingConfiguration,
) -> Result<T> {
    Document::from_bytes(xml)?.decode(configuration)
}
