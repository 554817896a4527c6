//! Error types for document encoding and decoding.

use std::fmt;

use stencil_core::{Extent, Offset};

/// The serialized document is missing, malformed, or violates the
/// document invariants.
///
/// Fatal to the decode call; no partial document is ever returned.
#[derive(Debug)]
pub enum FormatError {
    /// The bytes are not a syntactically valid document (bad JSON,
    /// missing required fields, unknown fields, wrong types).
    Syntax {
        /// Parser-reported detail.
        detail: String,
    },
    /// A dimension component is zero or negative.
    InvalidDimensions {
        /// The dimensions as they appeared on the wire.
        dimensions: [i64; 3],
    },
    /// A block key is not the exact `"dx,dy,dz"` 3-component form.
    BadBlockKey {
        /// The offending key text.
        key: String,
    },
    /// A block key parses but lies outside the bounding box.
    KeyOutOfRange {
        /// The parsed offset.
        offset: Offset,
        /// The document's dimensions.
        dimensions: Extent,
    },
    /// A block record carries both `lines` and `inventory`.
    ConflictingPayload {
        /// The offending key text.
        key: String,
    },
    /// A block record carries more text lines than a sign supports.
    TooManyLines {
        /// The offending key text.
        key: String,
        /// Number of lines found.
        count: usize,
    },
    /// A material token does not have the shape of a material identifier.
    BadMaterial {
        /// The offending token.
        token: String,
    },
    /// The same key appeared more than once.
    DuplicateKey {
        /// The offending key text.
        key: String,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { detail } => write!(f, "malformed document: {detail}"),
            Self::InvalidDimensions { dimensions } => {
                let [w, h, l] = dimensions;
                write!(f, "invalid dimensions {w}x{h}x{l}: every component must be >= 1")
            }
            Self::BadBlockKey { key } => {
                write!(f, "block key '{key}' is not of the form \"dx,dy,dz\"")
            }
            Self::KeyOutOfRange { offset, dimensions } => {
                write!(f, "block key {offset} outside dimensions {dimensions}")
            }
            Self::ConflictingPayload { key } => {
                write!(f, "block '{key}' carries both lines and inventory")
            }
            Self::TooManyLines { key, count } => {
                write!(f, "block '{key}' carries {count} text lines (max 4)")
            }
            Self::BadMaterial { token } => write!(f, "invalid material token '{token}'"),
            Self::DuplicateKey { key } => write!(f, "duplicate block key '{key}'"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Syntax {
            detail: e.to_string(),
        }
    }
}
