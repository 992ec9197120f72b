//! Single-value decoding and the `FromXml` conversion trait

use time::OffsetDateTime;

use crate::config::{Formatter, NilCheckFailure};
use crate::decode::Decoder;
use crate::error::{Error, Result};
use crate::key::CodingPath;
use crate::node::Node;

/// A trait for types that decode themselves from an XML node.
///
/// Scalar implementations go through the matching single-value method;
/// aggregate types request a keyed or unkeyed container from the decoder and
/// recurse.
pub trait FromXml: Sized {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self>;
}

/// A container decoding exactly one value from the current node.
#[derive(Clone, Debug)]
pub struct SingleValueContainer<'a> {
    decoder: Decoder<'a>,
}

impl<'a> SingleValueContainer<'a> {
    pub(crate) fn new(decoder: Decoder<'a>) -> Self {
        Self { decoder }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.decoder.coding_path()
    }

    /// The raw string value of the current node.
    ///
    /// For an element this is the concatenation of its text children; an
    /// element mixing non-whitespace text with element children has no
    /// string value. For an attribute it is the attribute value verbatim.
    pub fn string_value(&self) -> Result<String> {
        match &self.decoder {
            Decoder::Element(decoder) => {
                let element = decoder.element();
                if element.has_mixed_content() {
                    return Err(Error::MixedElementContent {
                        path: decoder.coding_path().clone(),
                    });
                }
                let mut value = String::new();
                for child in &element.children {
                    if let Node::Text(text) = child {
                        value.push_str(&text.string_value);
                    }
                }
                Ok(value)
            }
            Decoder::Attribute(decoder) => Ok(decoder.attribute().value.clone()),
            Decoder::Sequence(decoder) => Err(decoder.plural_access_error()),
        }
    }

    /// Returns whether the current node decodes as nil, consulting the
    /// configured predicate for its node kind.
    ///
    /// A conversion failure inside the predicate is swallowed or propagated
    /// according to the configured [`NilCheckFailure`] policy. A sequence is
    /// never nil: an empty sequence is an empty collection, not an absent
    /// one.
    pub fn decode_nil(&self) -> Result<bool> {
        let configuration = self.decoder.configuration();
        let checked = match &self.decoder {
            Decoder::Element(decoder) => {
                (configuration.element_represents_nil)(decoder.element())
            }
            Decoder::Attribute(decoder) => {
                (configuration.attribute_represents_nil)(decoder.attribute())
            }
            Decoder::Sequence(_) => Ok(false),
        };
        match checked {
            Ok(is_nil) => Ok(is_nil),
            Err(_) if configuration.nil_check_failure == NilCheckFailure::TreatAsNotNil => {
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    pub fn decode_string(&self) -> Result<String> {
        self.string_value()
    }

    pub fn decode_bool(&self) -> Result<bool> {
        self.decode_with(&self.decoder.configuration().bool_formatter, "bool")
    }

    pub fn decode_f64(&self) -> Result<f64> {
        self.decode_with(&self.decoder.configuration().number_formatter, "f64")
    }

    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    pub fn decode_f32(&self) -> Result<f32> {
        let number = self.decode_with(&self.decoder.configuration().number_formatter, "f32")?;
        Ok(number as f32)
    }

    pub fn decode_date(&self) -> Result<OffsetDateTime> {
        self.decode_with(&self.decoder.configuration().date_formatter, "date")
    }

    /// Decodes the string value through the given formatter, reporting a
    /// type mismatch with the given type name when the formatter rejects it.
    pub fn decode_with<T>(
        &self,
        formatter: &Formatter<T>,
        attempted_type: &'static str,
    ) -> Result<T> {
        let string_value = self.string_value()?;
        formatter(&string_value).ok_or_else(|| Error::TypeMismatch {
            attempted_type,
            path: self.decoder.coding_path().clone(),
        })
    }

    /// Decodes a value of any `FromXml` type from the current node.
    pub fn decode<T: FromXml>(&self) -> Result<T> {
        T::from_xml(&self.decoder)
    }

    fn decode_integer<T: TryFrom<i128>>(&self, attempted_type: &'static str) -> Result<T> {
        let number = self.decode_with(&self.decoder.configuration().number_formatter, attempted_type)?;
        integer_from_f64(number).ok_or_else(|| Error::TypeMismatch {
            attempted_type,
            path: self.decoder.coding_path().clone(),
        })
    }
}

macro_rules! integer_decoders {
    ($(($method:ident, $ty:ty)),+ $(,)?) => {
        impl SingleValueContainer<'_> {
            $(
                pub fn $method(&self) -> Result<$ty> {
                    self.decode_integer(stringify!($ty))
                }
            )+
        }
    };
}

integer_decoders! {
    (decode_i8, i8),
    (decode_i16, i16),
    (decode_i32, i32),
    (decode_i64, i64),
    (decode_u8, u8),
    (decode_u16, u16),
    (decode_u32, u32),
    (decode_u64, u64),
}

/// Narrows a formatter-produced number to an integer type, rejecting
/// non-finite, fractional, and out-of-range values.
#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
fn integer_from_f64<T: TryFrom<i128>>(number: f64) -> Option<T> {
    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    // f64 integers this large are exactly representable as i128.
    if !(-1.0e30..=1.0e30).contains(&number) {
        return None;
    }
    T::try_from(number as i128).ok()
}

macro_rules! from_xml_scalars {
    ($(($ty:ty, $method:ident)),+ $(,)?) => {
        $(
            impl FromXml for $ty {
                fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
                    decoder.single_value().$method()
                }
            }
        )+
    };
}

from_xml_scalars! {
    (String, decode_string),
    (bool, decode_bool),
    (f64, decode_f64),
    (f32, decode_f32),
    (i8, decode_i8),
    (i16, decode_i16),
    (i32, decode_i32),
    (i64, decode_i64),
    (u8, decode_u8),
    (u16, decode_u16),
    (u32, decode_u32),
    (u64, decode_u64),
    (OffsetDateTime, decode_date),
}

impl<T: FromXml> FromXml for Option<T> {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        if decoder.single_value().decode_nil()? {
            return Ok(None);
        }
        T::from_xml(decoder).map(Some)
    }
}

impl<T: FromXml> FromXml for Vec<T> {
    fn from_xml(decoder: &Decoder<'_>) -> Result<Self> {
        let mut members = decoder.unkeyed()?;
        let mut values = Vec::with_capacity(members.len());
        while !members.is_at_end() {
            values.push(members.decode_next()?);
        }
        Ok(values)
    }
}
