//! Error types for EMV operations

use paycard_apdu_core::TrailerError;

/// Result type for EMV operations
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error raised by EMV commands and decoders
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Framing, transport, protocol or trailer error from the APDU layer
    #[error(transparent)]
    Apdu(#[from] paycard_apdu_core::Error),

    /// Malformed BER-TLV payload
    #[error(transparent)]
    Tlv(#[from] paycard_tlv::Error),

    /// Structural violation in an EMV sub-decoder or PIN block
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The card has no record at this address
    #[error("record {record} not found in SFI {sfi}")]
    RecordNotFound {
        /// Short file identifier
        sfi: u8,
        /// Record number
        record: u8,
    },
}

impl From<TrailerError> for Error {
    fn from(error: TrailerError) -> Self {
        Self::Apdu(error.into())
    }
}

impl Error {
    /// Whether this error means "record not found", either as reported by
    /// [`HighLevelCommands::read_record`](crate::HighLevelCommands::read_record)
    /// or as a raw `6A83` trailer
    pub const fn is_record_not_found(&self) -> bool {
        match self {
            Self::RecordNotFound { .. } => true,
            Self::Apdu(error) => error.is_record_not_found(),
            _ => false,
        }
    }

    /// The card's trailer error, if that is what failed
    pub const fn trailer(&self) -> Option<TrailerError> {
        match self {
            Self::Apdu(error) => error.trailer(),
            _ => None,
        }
    }
}

/// Structural decode errors in EMV data elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The application file locator is not a whole number of entries
    #[error("AFL entry is too short ({0} bytes)")]
    AflTruncated(usize),

    /// CVM list shorter than the first amount
    #[error("CVM list does not contain amount")]
    CvmMissingAmount,

    /// CVM list shorter than the second amount
    #[error("CVM list does not contain second amount")]
    CvmMissingSecondAmount,

    /// Odd byte left over after the CV rules
    #[error("CVM list has {0} bytes remaining after the CV rules")]
    CvmTrailingBytes(usize),

    /// Fewer than four PIN digits
    #[error("PIN is too short ({0} digits, at least 4 required)")]
    PinTooShort(usize),

    /// More than twelve PIN digits
    #[error("PIN is too long ({0} digits, at most 12 allowed)")]
    PinTooLong(usize),

    /// A PIN digit outside 0..=9
    #[error("PIN digit {0} is out of range")]
    PinDigitOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::*;
    use paycard_apdu_core::StatusWord;

    #[test]
    fn test_record_not_found_detection() {
        let high = Error::RecordNotFound { sfi: 1, record: 3 };
        assert!(high.is_record_not_found());
        assert_eq!(high.to_string(), "record 3 not found in SFI 1");

        let raw = Error::from(TrailerError::RecordNotFound);
        assert!(raw.is_record_not_found());
        assert_eq!(raw.trailer(), Some(TrailerError::RecordNotFound));

        let other = Error::from(TrailerError::from_status(StatusWord::from_u16(0x6A82)));
        assert!(!other.is_record_not_found());

        assert!(!Error::from(DecodeError::AflTruncated(3)).is_record_not_found());
    }
}
