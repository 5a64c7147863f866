//! Error types for TLV decoding

use std::error::Error as StdError;

use iso7816_tlv::TlvError;

/// Result type for TLV decoding
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error raised while decoding BER-TLV data into a schema
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed BER-TLV encoding
    #[error("BER-TLV error: {0}")]
    Ber(TlvError),

    /// A constructed data object was expected
    #[error("tag {0} is primitive, expected a constructed data object")]
    UnexpectedPrimitive(String),

    /// A primitive data object was expected
    #[error("tag {0} is constructed, expected a primitive data object")]
    UnexpectedConstructed(String),

    /// Integer value wider than its target type
    #[error("tag {tag}: {len} bytes do not fit in a {bits}-bit integer")]
    IntegerOverflow {
        /// Tag of the data object
        tag: String,
        /// Length of the value
        len: usize,
        /// Width of the target type
        bits: u32,
    },

    /// A required tag was absent
    #[error("missing required tag {0}")]
    MissingTag(String),

    /// Malformed data object list
    #[error("data object list truncated at offset {0}")]
    TruncatedDol(usize),

    /// DOL length field that is neither short form nor `81`/`82` long form
    #[error("data object list has an unsupported length field at offset {0}")]
    InvalidDolLength(usize),

    /// The value violates the structure of its data object
    #[error("tag {tag}: {source}")]
    InvalidValue {
        /// Tag of the data object
        tag: String,
        /// Underlying decode error
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Error decoding a named schema field
    #[error("field `{field}`: {source}")]
    Field {
        /// Field name
        field: &'static str,
        /// Underlying error
        source: Box<Self>,
    },
}

impl From<TlvError> for Error {
    fn from(error: TlvError) -> Self {
        Self::Ber(error)
    }
}

impl Error {
    /// Wrap a domain specific decode error for `tag`
    pub fn invalid_value<E>(tag: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::InvalidValue {
            tag: tag.into(),
            source: Box::new(source),
        }
    }

    /// Attach the name of the schema field being decoded
    pub fn in_field(self, field: &'static str) -> Self {
        Self::Field {
            field,
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping field context
    pub fn root(&self) -> &Self {
        match self {
            Self::Field { source, .. } => source.root(),
            other => other,
        }
    }
}
