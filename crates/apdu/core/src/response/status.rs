//! Status word definitions for APDU responses

use std::fmt;

use tracing::Level;

use super::error::TrailerError;

/// Status Word (SW1-SW2) terminating every APDU response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusWord {
    /// First status byte (SW1)
    pub sw1: u8,
    /// Second status byte (SW2)
    pub sw2: u8,
}

/// Outcome class of a status word as seen by the continuation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 90 00
    Success,
    /// 61 XX, XX bytes can be fetched with GET RESPONSE
    MoreDataAvailable {
        /// Number of bytes available
        available: u8,
    },
    /// 6C XX, the command must be resent with Le = XX
    WrongExpectedLength {
        /// Correct expected length
        correct: u8,
    },
    /// Anything else
    Failure,
}

impl StatusWord {
    /// Create a new status word
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Create from a u16 value (SW1 | SW2)
    pub const fn from_u16(status: u16) -> Self {
        Self {
            sw1: (status >> 8) as u8,
            sw2: status as u8,
        }
    }

    /// Convert to a u16 value (SW1 | SW2)
    pub const fn to_u16(&self) -> u16 {
        ((self.sw1 as u16) << 8) | (self.sw2 as u16)
    }

    /// Classify this status word
    pub const fn class(&self) -> StatusClass {
        match (self.sw1, self.sw2) {
            (0x90, 0x00) => StatusClass::Success,
            (0x61, available) => StatusClass::MoreDataAvailable { available },
            (0x6C, correct) => StatusClass::WrongExpectedLength { correct },
            _ => StatusClass::Failure,
        }
    }

    /// Check if this status word indicates success (90 00)
    pub const fn is_success(&self) -> bool {
        self.sw1 == 0x90 && self.sw2 == 0x00
    }

    /// Number of bytes available through GET RESPONSE when SW1 = 61
    pub const fn more_data_available(&self) -> Option<u8> {
        if self.sw1 == 0x61 {
            Some(self.sw2)
        } else {
            None
        }
    }

    /// Correct expected length when SW1 = 6C
    pub const fn wrong_length(&self) -> Option<u8> {
        if self.sw1 == 0x6C {
            Some(self.sw2)
        } else {
            None
        }
    }

    /// Check if this status word indicates a warning (62 XX or 63 XX)
    pub const fn is_warning(&self) -> bool {
        self.sw1 == 0x62 || self.sw1 == 0x63
    }

    /// Check if this status word indicates a record not found (6A 83)
    pub const fn is_record_not_found(&self) -> bool {
        self.sw1 == 0x6A && self.sw2 == 0x83
    }

    /// Check if this status word indicates a file not found (6A 82)
    pub const fn is_file_not_found(&self) -> bool {
        self.sw1 == 0x6A && self.sw2 == 0x82
    }

    /// Error carried by this status word, `None` for 90 00
    pub const fn as_error(&self) -> Option<TrailerError> {
        if self.is_success() {
            None
        } else {
            Some(TrailerError::from_status(*self))
        }
    }

    /// `Ok` for 90 00, the matching [`TrailerError`] otherwise
    pub const fn to_result(&self) -> Result<(), TrailerError> {
        match self.as_error() {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// Get the appropriate tracing level for this status word
    pub const fn tracing_level(&self) -> Level {
        if self.is_success() || self.sw1 == 0x61 {
            Level::DEBUG
        } else if self.is_warning() || self.is_record_not_found() {
            // Warnings and the expected end of a record scan
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Get a description of this status word
    pub const fn description(&self) -> &'static str {
        match (self.sw1, self.sw2) {
            (0x90, 0x00) => "Command normally completed",
            (0x61, _) => "More data available",
            (0x62, 0x00) => "No information given",
            (0x62, 0x81) => "Part of returned data may be corrupted",
            (0x62, 0x82) => "End of file/record reached before reading Le bytes",
            (0x62, 0x83) => "Selected file invalidated",
            (0x62, 0x84) => "FCI not formatted according to specification",
            (0x63, 0x00) => "No information given",
            (0x63, 0x81) => "File filled up by the last write",
            (0x63, n) if (n & 0xF0) == 0xC0 => "Counter value",
            (0x64, 0x00) => "State of non-volatile memory unchanged",
            (0x65, 0x00) => "State of non-volatile memory changed",
            (0x65, 0x81) => "Memory failure",
            (0x67, 0x00) => "Wrong length",
            (0x68, 0x81) => "Logical channel not supported",
            (0x68, 0x82) => "Secure messaging not supported",
            (0x69, 0x81) => "Command incompatible with file structure",
            (0x69, 0x82) => "Security status not satisfied",
            (0x69, 0x83) => "Authentication method blocked",
            (0x69, 0x84) => "Referenced data invalidated",
            (0x69, 0x85) => "Conditions of use not satisfied",
            (0x69, 0x86) => "Command not allowed",
            (0x69, 0x87) => "Expected SM data objects missing",
            (0x69, 0x88) => "SM data objects incorrect",
            (0x6A, 0x00) => "No information given",
            (0x6A, 0x80) => "Incorrect parameters in the data field",
            (0x6A, 0x81) => "Function not supported",
            (0x6A, 0x82) => "File or application not found",
            (0x6A, 0x83) => "Record not found",
            (0x6A, 0x84) => "Not enough memory space in the file",
            (0x6A, 0x85) => "Lc inconsistent with TLV structure",
            (0x6A, 0x86) => "Incorrect parameters P1-P2",
            (0x6A, 0x87) => "Lc inconsistent with P1-P2",
            (0x6A, 0x88) => "Referenced data not found",
            (0x6A, 0x89) => "File already exists",
            (0x6A, 0x8A) => "DF name already exists",
            (0x6B, 0x00) => "Wrong parameters P1-P2",
            (0x6C, _) => "Wrong Le field",
            (0x6D, 0x00) => "Instruction code not supported or invalid",
            (0x6E, 0x00) => "Class not supported",
            (0x6F, 0x00) => "No precise diagnosis",
            _ => "Unknown status word",
        }
    }
}

impl From<(u8, u8)> for StatusWord {
    fn from(tuple: (u8, u8)) -> Self {
        Self::new(tuple.0, tuple.1)
    }
}

impl From<u16> for StatusWord {
    fn from(status: u16) -> Self {
        Self::from_u16(status)
    }
}

impl From<StatusWord> for u16 {
    fn from(status: StatusWord) -> Self {
        status.to_u16()
    }
}

impl fmt::Display for StatusWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X}", self.sw1, self.sw2)
    }
}

/// Common status words
pub mod common {
    use super::StatusWord;

    /// Success (90 00)
    pub const SUCCESS: StatusWord = StatusWord::new(0x90, 0x00);

    /// More data available (61 XX) - XX is the number of remaining bytes
    pub const MORE_DATA: StatusWord = StatusWord::new(0x61, 0x00);

    /// Wrong Le field (6C XX) - XX is the correct length
    pub const WRONG_LE: StatusWord = StatusWord::new(0x6C, 0x00);

    /// Wrong length (67 00)
    pub const WRONG_LENGTH: StatusWord = StatusWord::new(0x67, 0x00);

    /// Security condition not satisfied (69 82)
    pub const SECURITY_CONDITION_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x82);

    /// Conditions of use not satisfied (69 85)
    pub const CONDITIONS_NOT_SATISFIED: StatusWord = StatusWord::new(0x69, 0x85);

    /// Function not supported (6A 81)
    pub const FUNCTION_NOT_SUPPORTED: StatusWord = StatusWord::new(0x6A, 0x81);

    /// File not found (6A 82)
    pub const FILE_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x82);

    /// Record not found (6A 83)
    pub const RECORD_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x83);

    /// Incorrect parameters P1-P2 (6A 86)
    pub const INCORRECT_P1P2: StatusWord = StatusWord::new(0x6A, 0x86);

    /// Referenced data not found (6A 88)
    pub const REFERENCED_DATA_NOT_FOUND: StatusWord = StatusWord::new(0x6A, 0x88);

    /// Invalid instruction (6D 00)
    pub const INVALID_INSTRUCTION: StatusWord = StatusWord::new(0x6D, 0x00);

    /// Class not supported (6E 00)
    pub const CLASS_NOT_SUPPORTED: StatusWord = StatusWord::new(0x6E, 0x00);
}
