//! APDU instruction byte (INS)
//!
//! Interindustry instructions from ISO/IEC 7816-4 table 4.1 and the EMV
//! proprietary instructions used by payment applications.

use std::fmt;

use derive_more::From;

/// APDU instruction byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, From)]
pub struct Instruction(pub u8);

macro_rules! instructions {
    ($($(#[$doc:meta])* $name:ident = $value:literal, $label:literal;)+) => {
        impl Instruction {
            $(
                $(#[$doc])*
                pub const $name: Self = Self($value);
            )+

            /// Human readable name of a known instruction
            pub const fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some($label),)+
                    _ => None,
                }
            }
        }
    };
}

instructions! {
    /// DEACTIVATE FILE
    DEACTIVATE_FILE = 0x04, "DEACTIVATE FILE";
    /// ERASE RECORD(S)
    ERASE_RECORDS = 0x0C, "ERASE RECORD(S)";
    /// ERASE BINARY
    ERASE_BINARY = 0x0E, "ERASE BINARY";
    /// ERASE BINARY, odd instruction
    ERASE_BINARY_ODD = 0x0F, "ERASE BINARY";
    /// PERFORM SCQL OPERATION
    PERFORM_SCQL_OPERATION = 0x10, "PERFORM SCQL OPERATION";
    /// PERFORM TRANSACTION OPERATION
    PERFORM_TRANSACTION_OPERATION = 0x12, "PERFORM TRANSACTION OPERATION";
    /// PERFORM USER OPERATION
    PERFORM_USER_OPERATION = 0x14, "PERFORM USER OPERATION";
    /// VERIFY
    VERIFY = 0x20, "VERIFY";
    /// VERIFY, odd instruction
    VERIFY_ODD = 0x21, "VERIFY";
    /// MANAGE SECURITY ENVIRONMENT
    MANAGE_SECURITY_ENVIRONMENT = 0x22, "MANAGE SECURITY ENVIRONMENT";
    /// CHANGE REFERENCE DATA
    CHANGE_REFERENCE_DATA = 0x24, "CHANGE REFERENCE DATA";
    /// DISABLE VERIFICATION REQUIREMENT
    DISABLE_VERIFICATION_REQUIREMENT = 0x26, "DISABLE VERIFICATION REQUIREMENT";
    /// ENABLE VERIFICATION REQUIREMENT
    ENABLE_VERIFICATION_REQUIREMENT = 0x28, "ENABLE VERIFICATION REQUIREMENT";
    /// PERFORM SECURITY OPERATION
    PERFORM_SECURITY_OPERATION = 0x2A, "PERFORM SECURITY OPERATION";
    /// RESET RETRY COUNTER
    RESET_RETRY_COUNTER = 0x2C, "RESET RETRY COUNTER";
    /// ACTIVATE FILE
    ACTIVATE_FILE = 0x44, "ACTIVATE FILE";
    /// GENERATE ASYMMETRIC KEY PAIR
    GENERATE_ASYMMETRIC_KEY_PAIR = 0x46, "GENERATE ASYMMETRIC KEY PAIR";
    /// MANAGE CHANNEL
    MANAGE_CHANNEL = 0x70, "MANAGE CHANNEL";
    /// EXTERNAL (/ MUTUAL) AUTHENTICATE
    EXTERNAL_AUTHENTICATE = 0x82, "EXTERNAL AUTHENTICATE";
    /// GET CHALLENGE
    GET_CHALLENGE = 0x84, "GET CHALLENGE";
    /// GENERAL AUTHENTICATE
    GENERAL_AUTHENTICATE = 0x86, "GENERAL AUTHENTICATE";
    /// GENERAL AUTHENTICATE, odd instruction
    GENERAL_AUTHENTICATE_ODD = 0x87, "GENERAL AUTHENTICATE";
    /// INTERNAL AUTHENTICATE
    INTERNAL_AUTHENTICATE = 0x88, "INTERNAL AUTHENTICATE";
    /// SEARCH BINARY
    SEARCH_BINARY = 0xA0, "SEARCH BINARY";
    /// SEARCH BINARY, odd instruction
    SEARCH_BINARY_ODD = 0xA1, "SEARCH BINARY";
    /// SEARCH RECORD
    SEARCH_RECORD = 0xA2, "SEARCH RECORD";
    /// SELECT
    SELECT = 0xA4, "SELECT";
    /// GET PROCESSING OPTIONS (EMV, proprietary class)
    GET_PROCESSING_OPTIONS = 0xA8, "GET PROCESSING OPTIONS";
    /// GENERATE APPLICATION CRYPTOGRAM (EMV, proprietary class)
    GENERATE_AC = 0xAE, "GENERATE AC";
    /// READ BINARY
    READ_BINARY = 0xB0, "READ BINARY";
    /// READ BINARY, odd instruction
    READ_BINARY_ODD = 0xB1, "READ BINARY";
    /// READ RECORD(S)
    READ_RECORD = 0xB2, "READ RECORD";
    /// READ RECORD(S), odd instruction
    READ_RECORD_ODD = 0xB3, "READ RECORD";
    /// GET RESPONSE
    GET_RESPONSE = 0xC0, "GET RESPONSE";
    /// ENVELOPE
    ENVELOPE = 0xC2, "ENVELOPE";
    /// ENVELOPE, odd instruction
    ENVELOPE_ODD = 0xC3, "ENVELOPE";
    /// GET DATA
    GET_DATA = 0xCA, "GET DATA";
    /// GET DATA, odd instruction
    GET_DATA_ODD = 0xCB, "GET DATA";
    /// WRITE BINARY
    WRITE_BINARY = 0xD0, "WRITE BINARY";
    /// WRITE BINARY, odd instruction
    WRITE_BINARY_ODD = 0xD1, "WRITE BINARY";
    /// WRITE RECORD
    WRITE_RECORD = 0xD2, "WRITE RECORD";
    /// UPDATE BINARY
    UPDATE_BINARY = 0xD6, "UPDATE BINARY";
    /// UPDATE BINARY, odd instruction
    UPDATE_BINARY_ODD = 0xD7, "UPDATE BINARY";
    /// PUT DATA
    PUT_DATA = 0xDA, "PUT DATA";
    /// PUT DATA, odd instruction
    PUT_DATA_ODD = 0xDB, "PUT DATA";
    /// UPDATE RECORD
    UPDATE_RECORD = 0xDC, "UPDATE RECORD";
    /// UPDATE RECORD, odd instruction
    UPDATE_RECORD_ODD = 0xDD, "UPDATE RECORD";
    /// CREATE FILE
    CREATE_FILE = 0xE0, "CREATE FILE";
    /// APPEND RECORD
    APPEND_RECORD = 0xE2, "APPEND RECORD";
    /// DELETE FILE
    DELETE_FILE = 0xE4, "DELETE FILE";
    /// TERMINATE DF
    TERMINATE_DF = 0xE6, "TERMINATE DF";
    /// TERMINATE EF
    TERMINATE_EF = 0xE8, "TERMINATE EF";
    /// TERMINATE CARD USAGE
    TERMINATE_CARD_USAGE = 0xFE, "TERMINATE CARD USAGE";
}

impl Instruction {
    /// Raw instruction byte
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl From<Instruction> for u8 {
    fn from(ins: Instruction) -> Self {
        ins.0
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({:02X})", self.0),
            None => write!(f, "{:02X}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(Instruction::SELECT.name(), Some("SELECT"));
        assert_eq!(Instruction(0xB2).name(), Some("READ RECORD"));
        assert_eq!(Instruction(0xA8).name(), Some("GET PROCESSING OPTIONS"));
        assert_eq!(Instruction(0x00).name(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::GET_RESPONSE.to_string(), "GET RESPONSE (C0)");
        assert_eq!(Instruction(0x01).to_string(), "01");
    }
}
