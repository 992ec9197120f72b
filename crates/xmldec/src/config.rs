//! Decoding configuration
//!
//! The configuration is an explicit, immutable value threaded through every
//! derived decoder, so concurrent decodes of the same tree with different
//! configurations need no coordination.

use std::fmt;
use std::sync::Arc;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::key::CodingPath;
use crate::node::{Attribute, Element, Node};

/// A function that maps string values to values of some type, returning
/// `None` for strings that do not represent valid values of that type.
pub type Formatter<T> = Arc<dyn Fn(&str) -> Option<T> + Send + Sync>;

/// A function that maps tag and attribute local names to coding key string
/// values, applied before key matching.
pub type KeyTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// A predicate deciding whether a node encodes `nil`.
pub type NilPredicate<N> = Arc<dyn Fn(&N) -> Result<bool> + Send + Sync>;

/// The XML Schema Instance namespace, home of the `xsi:nil` attribute.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// How a failed conversion inside a nil predicate is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NilCheckFailure {
    /// The value is not nil; the conversion error is swallowed.
    #[default]
    TreatAsNotNil,
    /// The conversion error is propagated to the caller.
    Propagate,
}

/// Configuration for a decode operation.
#[derive(Clone)]
pub struct DecodingConfiguration {
    /// Maps string values to Boolean values.
    ///
    /// The default maps "0" and "false" to `false`, and "1" and "true" to
    /// `true`, after trimming surrounding whitespace.
    pub bool_formatter: Formatter<bool>,

    /// Maps string values to numbers. Integer decoding goes through this
    /// formatter as well and rejects fractional or out-of-range results.
    pub number_formatter: Formatter<f64>,

    /// Maps string values to dates. The default parses RFC 3339 timestamps.
    pub date_formatter: Formatter<OffsetDateTime>,

    /// Determines whether a given element encodes `nil`.
    ///
    /// The default returns `true` iff the element carries an `xsi:nil`
    /// attribute with a true value. See [`element_nil_when_empty`] for the
    /// empty-element variant.
    pub element_represents_nil: NilPredicate<Element>,

    /// Determines whether a given attribute encodes `nil`.
    ///
    /// The default always returns `false`.
    pub attribute_represents_nil: NilPredicate<Attribute>,

    /// Maps tag and attribute local names to coding key string values before
    /// matching. The default returns the name unchanged.
    pub key_transform: KeyTransform,

    /// Whether unkeyed decoding containers use container elements.
    ///
    /// When `true` (the default), a sequence is represented by a wrapping
    /// element whose element children are the members, as in
    /// `<hobbies><hobby/><hobby/></hobbies>`, and a plural match for a
    /// scalar key is an error. When `false`, repeated sibling elements such
    /// as bare `<hobby/>` elements form the sequence directly. Common XML
    /// formats like RSS and Atom use the latter structure.
    pub sequences_use_container_elements: bool,

    /// Whether a conversion failure inside a nil predicate is swallowed or
    /// propagated.
    pub nil_check_failure: NilCheckFailure,
}

impl Default for DecodingConfiguration {
    fn default() -> Self {
        Self {
            bool_formatter: Arc::new(|s| parse_bool(s.trim())),
            number_formatter: Arc::new(|s| s.trim().parse().ok()),
            date_formatter: Arc::new(|s| OffsetDateTime::parse(s.trim(), &Rfc3339).ok()),
            element_represents_nil: Arc::new(element_nil_from_xsi_attribute),
            attribute_represents_nil: Arc::new(|_| Ok(false)),
            key_transform: Arc::new(str::to_owned),
            sequences_use_container_elements: true,
            nil_check_failure: NilCheckFailure::default(),
        }
    }
}

impl fmt::Debug for DecodingConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodingConfiguration")
            .field(
                "sequences_use_container_elements",
                &self.sequences_use_container_elements,
            )
            .field("nil_check_failure", &self.nil_check_failure)
            .finish_non_exhaustive()
    }
}

fn parse_bool(trimmed: &str) -> Option<bool> {
    match trimmed {
        "0" | "false" => Some(false),
        "1" | "true" => Some(true),
        _ => None,
    }
}

/// The default element nil predicate: an element is nil iff it carries an
/// `xsi:nil` attribute with a true value.
///
/// A present but malformed `xsi:nil` value is a conversion failure, handled
/// according to [`DecodingConfiguration::nil_check_failure`].
pub fn element_nil_from_xsi_attribute(element: &Element) -> Result<bool> {
    for child in &element.children {
        let Node::Attribute(attribute) = child else {
            continue;
        };
        let in_xsi = attribute
            .node_type
            .namespace
            .as_ref()
            .is_some_and(|namespace| namespace.name == XSI_NAMESPACE);
        if in_xsi && attribute.node_type.local_name == "nil" {
            return parse_bool(attribute.value.trim()).ok_or_else(|| Error::TypeMismatch {
                attempted_type: "bool",
                path: CodingPath::root(),
            });
        }
    }
    Ok(false)
}

/// An alternative element nil predicate: an element is nil iff it has no
/// attributes, no element children, and only whitespace text.
pub fn element_nil_when_empty(element: &Element) -> Result<bool> {
    let empty = element.children.iter().all(|child| match child {
        Node::Text(text) => text.string_value.trim().is_empty(),
        Node::Element(_) | Node::Attribute(_) => false,
    });
    Ok(empty)
}
