//! Error types specific to APDU responses

use super::status::StatusWord;

/// Error for raw APDU response parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// Fewer than the two trailer bytes were received
    #[error("response too short: {0} bytes, at least 2 required")]
    TooShort(usize),
}

/// Application level card error derived from a non-success trailer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TrailerError {
    /// 6A 00
    #[error("invalid trailer [6A 00]: no information given")]
    NoInformation,
    /// 6A 80
    #[error("invalid trailer [6A 80]: incorrect parameters in the command data field")]
    IncorrectDataField,
    /// 6A 81
    #[error("invalid trailer [6A 81]: function not supported")]
    FunctionNotSupported,
    /// 6A 82
    #[error("invalid trailer [6A 82]: file or application not found")]
    FileNotFound,
    /// 6A 83
    #[error("invalid trailer [6A 83]: record not found")]
    RecordNotFound,
    /// 6A 84
    #[error("invalid trailer [6A 84]: not enough memory space in the file")]
    NotEnoughMemory,
    /// 6A 85
    #[error("invalid trailer [6A 85]: Nc inconsistent with TLV structure")]
    LcInconsistentWithTlv,
    /// 6A 86
    #[error("invalid trailer [6A 86]: incorrect parameters P1-P2")]
    IncorrectP1P2,
    /// 6A 87
    #[error("invalid trailer [6A 87]: Nc inconsistent with parameters P1-P2")]
    LcInconsistentWithP1P2,
    /// 6A 88
    #[error("invalid trailer [6A 88]: referenced data or reference data not found")]
    ReferencedDataNotFound,
    /// 6A 89
    #[error("invalid trailer [6A 89]: file already exists")]
    FileAlreadyExists,
    /// 6A 8A
    #[error("invalid trailer [6A 8A]: DF name already exists")]
    DfNameAlreadyExists,
    /// Any other non-success status word
    #[error("invalid trailer [{0}]: {desc}", desc = .0.description())]
    Other(StatusWord),
}

impl TrailerError {
    /// Classify a non-success status word
    pub const fn from_status(status: StatusWord) -> Self {
        match (status.sw1, status.sw2) {
            (0x6A, 0x00) => Self::NoInformation,
            (0x6A, 0x80) => Self::IncorrectDataField,
            (0x6A, 0x81) => Self::FunctionNotSupported,
            (0x6A, 0x82) => Self::FileNotFound,
            (0x6A, 0x83) => Self::RecordNotFound,
            (0x6A, 0x84) => Self::NotEnoughMemory,
            (0x6A, 0x85) => Self::LcInconsistentWithTlv,
            (0x6A, 0x86) => Self::IncorrectP1P2,
            (0x6A, 0x87) => Self::LcInconsistentWithP1P2,
            (0x6A, 0x88) => Self::ReferencedDataNotFound,
            (0x6A, 0x89) => Self::FileAlreadyExists,
            (0x6A, 0x8A) => Self::DfNameAlreadyExists,
            _ => Self::Other(status),
        }
    }

    /// Status word this error was derived from
    pub const fn status(&self) -> StatusWord {
        match self {
            Self::NoInformation => StatusWord::new(0x6A, 0x00),
            Self::IncorrectDataField => StatusWord::new(0x6A, 0x80),
            Self::FunctionNotSupported => StatusWord::new(0x6A, 0x81),
            Self::FileNotFound => StatusWord::new(0x6A, 0x82),
            Self::RecordNotFound => StatusWord::new(0x6A, 0x83),
            Self::NotEnoughMemory => StatusWord::new(0x6A, 0x84),
            Self::LcInconsistentWithTlv => StatusWord::new(0x6A, 0x85),
            Self::IncorrectP1P2 => StatusWord::new(0x6A, 0x86),
            Self::LcInconsistentWithP1P2 => StatusWord::new(0x6A, 0x87),
            Self::ReferencedDataNotFound => StatusWord::new(0x6A, 0x88),
            Self::FileAlreadyExists => StatusWord::new(0x6A, 0x89),
            Self::DfNameAlreadyExists => StatusWord::new(0x6A, 0x8A),
            Self::Other(status) => *status,
        }
    }

    /// Raw 16-bit status word
    pub const fn code(&self) -> u16 {
        self.status().to_u16()
    }
}

impl From<StatusWord> for TrailerError {
    fn from(status: StatusWord) -> Self {
        Self::from_status(status)
    }
}
