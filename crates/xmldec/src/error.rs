//! Error types for xmldec

use std::fmt;
use thiserror::Error;

use crate::key::CodingPath;

/// Position in the source document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.offset, self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }
}

/// Main error type for xmldec
///
/// Every decoding variant carries the coding path at the point of failure.
/// `Syntax` is produced by the tokenizer and carries a source position
/// instead.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// The document has no top-level element.
    #[error("document has no root element")]
    NoRootElement,

    /// A leaf string could not be converted into the requested type.
    #[error("cannot decode {attempted_type} at {path}")]
    TypeMismatch {
        attempted_type: &'static str,
        path: CodingPath,
    },

    /// A required key matched zero nodes.
    #[error("no node matches key at {path}")]
    KeyNotFound { path: CodingPath },

    /// A scalar key matched more than one node, or a keyed or single-value
    /// operation was attempted on a sequence of nodes.
    #[error("multiple nodes match key at {path}")]
    MultipleNodesForKey { path: CodingPath },

    /// A primitive value was requested from an element containing elements.
    #[error("element at {path} has mixed content")]
    MixedElementContent { path: CodingPath },

    /// A keyed decoding container was requested over an attribute node.
    ///
    /// Attributes cannot contain structured data.
    #[error("keyed decoding attempted over attribute at {path}")]
    KeyedContainerOverAttribute { path: CodingPath },

    /// An unkeyed decoding container was requested over an attribute node.
    ///
    /// Attributes cannot contain plural data.
    #[error("unkeyed decoding attempted over attribute at {path}")]
    UnkeyedContainerOverAttribute { path: CodingPath },

    /// The document is not well-formed XML.
    #[error("syntax error at {pos}: {message}")]
    Syntax { pos: Pos, message: String },
}

impl Error {
    /// Create a syntax error at a specific position.
    pub fn syntax(pos: Pos, message: impl Into<String>) -> Self {
        Self::Syntax {
            pos,
            message: message.into(),
        }
    }

    /// The coding path carried by the error, if any.
    pub fn coding_path(&self) -> Option<&CodingPath> {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::KeyNotFound { path }
            | Self::MultipleNodesForKey { path }
            | Self::MixedElementContent { path }
            | Self::KeyedContainerOverAttribute { path }
            | Self::UnkeyedContainerOverAttribute { path } => Some(path),
            Self::NoRootElement | Self::Syntax { .. } => None,
        }
    }
}

/// Result type alias for xmldec
pub type Result<T> = std::result::Result<T, Error>;
