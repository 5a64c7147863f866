//! APDU command definitions
//!
//! This module provides the command descriptor and its framing according to
//! ISO/IEC 7816-4: `CLA INS P1 P2 [Lc DATA] Le`.

pub mod error;
pub mod length;

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Class, Instruction};
use error::FramingError;
use length::LengthEncoder;

/// Expected length type for APDU commands
pub type ExpectedLength = u8;

/// A structured APDU command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    /// Class byte (CLA)
    pub class: Class,
    /// Instruction byte (INS)
    pub instruction: Instruction,
    /// First parameter (P1)
    pub p1: u8,
    /// Second parameter (P2)
    pub p2: u8,
    /// Command payload, empty when there is none
    pub data: Bytes,
    /// Maximum number of response bytes expected (Le)
    pub le: ExpectedLength,
}

impl Command {
    /// Create a new command without data and with `Le = 00`
    pub const fn new(class: Class, instruction: Instruction, p1: u8, p2: u8) -> Self {
        Self {
            class,
            instruction,
            p1,
            p2,
            data: Bytes::new(),
            le: 0,
        }
    }

    /// GET RESPONSE for `le` pending bytes
    pub const fn get_response(class: Class, le: ExpectedLength) -> Self {
        Self::new(class, Instruction::GET_RESPONSE, 0x00, 0x00).with_le(le)
    }

    /// Set the command payload
    pub fn with_data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    /// Set the expected response length
    pub const fn with_le(mut self, le: ExpectedLength) -> Self {
        self.le = le;
        self
    }

    /// Number of bytes the framed command occupies
    pub fn command_length(&self, encoder: &dyn LengthEncoder) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;
        if !self.data.is_empty() {
            length += encoder.encoded_len(self.data.len()) + self.data.len();
        }
        length + encoder.encoded_len(self.le as usize)
    }

    /// Frame the command into transmittable bytes.
    ///
    /// Lc and the payload are omitted entirely when there is no data; Le is
    /// always appended.
    pub fn to_bytes(&self, encoder: &dyn LengthEncoder) -> Result<Bytes, FramingError> {
        if self.data.len() > encoder.max_length() {
            return Err(FramingError::out_of_range(
                self.data.len(),
                encoder.max_length(),
            ));
        }

        let mut buffer = BytesMut::with_capacity(self.command_length(encoder));
        buffer.put_u8(self.class.0);
        buffer.put_u8(self.instruction.0);
        buffer.put_u8(self.p1);
        buffer.put_u8(self.p2);

        if !self.data.is_empty() {
            encoder.encode(self.data.len(), &mut buffer)?;
            buffer.put_slice(&self.data);
        }

        encoder.encode(self.le as usize, &mut buffer)?;

        Ok(buffer.freeze())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CLA={} INS={:02X} P1={:02X} P2={:02X}",
            self.class, self.instruction.0, self.p1, self.p2
        )?;
        if !self.data.is_empty() {
            write!(f, " DATA=[{}]", hex::encode_upper(&self.data))?;
        }
        write!(f, " Le={:02X}", self.le)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::length::{BerLength, ShortLength};
    use hex_literal::hex;

    #[test]
    fn test_frame_without_data() {
        let cmd = Command::new(Class::INTERINDUSTRY, Instruction::READ_RECORD, 0x01, 0x0C);
        let bytes = cmd.to_bytes(&ShortLength).unwrap();
        assert_eq!(bytes.as_ref(), hex!("00B2010C00"));
        assert_eq!(cmd.command_length(&ShortLength), bytes.len());
    }

    #[test]
    fn test_frame_with_data() {
        let cmd = Command::new(Class::INTERINDUSTRY, Instruction::SELECT, 0x04, 0x00)
            .with_data(hex!("A0000000031010").to_vec());
        let bytes = cmd.to_bytes(&ShortLength).unwrap();
        assert_eq!(bytes.as_ref(), hex!("00A4040007A000000003101000"));
    }

    #[test]
    fn test_frame_with_le() {
        let cmd = Command::get_response(Class::INTERINDUSTRY, 0x1C);
        assert_eq!(cmd.to_bytes(&ShortLength).unwrap().as_ref(), hex!("00C000001C"));
    }

    #[test]
    fn test_data_too_long_for_short_form() {
        let cmd = Command::new(Class::PROPRIETARY, Instruction::GENERATE_AC, 0x80, 0x00)
            .with_data(vec![0u8; 256]);
        assert_eq!(
            cmd.to_bytes(&ShortLength).unwrap_err(),
            FramingError::LengthOutOfRange {
                length: 256,
                max: 255
            }
        );

        let bytes = cmd.to_bytes(&BerLength).unwrap();
        assert_eq!(&bytes[..7], hex!("80AE8000820100"));
        assert_eq!(bytes.len(), 4 + 3 + 256 + 1);
    }

    #[test]
    fn test_ber_le() {
        let cmd = Command::get_response(Class::INTERINDUSTRY, 0x90);
        assert_eq!(cmd.to_bytes(&BerLength).unwrap().as_ref(), hex!("00C000008190"));
    }

    #[test]
    fn test_display() {
        let cmd = Command::new(Class::INTERINDUSTRY, Instruction::SELECT, 0x04, 0x00)
            .with_data(hex!("A000").to_vec());
        assert_eq!(cmd.to_string(), "CLA=00 INS=A4 P1=04 P2=00 DATA=[A000] Le=00");
    }
}
