//! Core error type for all APDU operations
//!
//! Module specific errors are aggregated here so callers can propagate any
//! failure of an exchange with `?`.

use crate::command::error::FramingError;
use crate::executor::error::ProtocolError;
use crate::response::error::{ResponseError, TrailerError};
use crate::transport::error::TransportError;

/// Result type for APDU operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Core error type that encompasses all possible errors in the crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Command could not be framed
    #[error(transparent)]
    Framing(#[from] FramingError),

    /// Raw reply could not be parsed
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Driver level failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Continuation protocol violation
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Card reported an application level error
    #[error(transparent)]
    Trailer(#[from] TrailerError),
}

impl Error {
    /// Trailer error carried by this error, if any
    pub const fn trailer(&self) -> Option<TrailerError> {
        match self {
            Self::Trailer(err) => Some(*err),
            _ => None,
        }
    }

    /// Whether the card answered 6A 83
    pub const fn is_record_not_found(&self) -> bool {
        matches!(self, Self::Trailer(TrailerError::RecordNotFound))
    }
}
