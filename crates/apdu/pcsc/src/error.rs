//! Error types for PC/SC transport

use paycard_apdu_core::TransportError;

/// PC/SC-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PcscError {
    /// PC/SC error
    #[error("PC/SC error: {0}")]
    Pcsc(#[from] pcsc::Error),

    /// No readers available
    #[error("No readers available")]
    NoReadersAvailable,

    /// Reader not found
    #[error("Reader not found: {0}")]
    ReaderNotFound(String),

    /// No card present in reader
    #[error("No card present in reader: {0}")]
    NoCard(String),
}

impl From<PcscError> for TransportError {
    fn from(error: PcscError) -> Self {
        match error {
            PcscError::NoReadersAvailable
            | PcscError::ReaderNotFound(_)
            | PcscError::NoCard(_) => Self::Connection,
            PcscError::Pcsc(pcsc::Error::Timeout) => Self::Timeout,
            PcscError::Pcsc(pcsc::Error::Cancelled) => Self::Cancelled,
            other => Self::backend(other),
        }
    }
}
