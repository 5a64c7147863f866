//! Length field encoding strategies for Lc and Le

use std::fmt;

use bytes::{BufMut, BytesMut};

use super::error::FramingError;

/// Strategy used to encode the Lc and Le fields of a command
pub trait LengthEncoder: Send + Sync + fmt::Debug {
    /// Largest length this strategy can represent
    fn max_length(&self) -> usize;

    /// Number of bytes the encoded form of `length` occupies
    fn encoded_len(&self, length: usize) -> usize;

    /// Append the encoded form of `length` to `buf`
    fn encode(&self, length: usize, buf: &mut BytesMut) -> Result<(), FramingError>;
}

/// Single byte short form, 0..=255
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortLength;

impl LengthEncoder for ShortLength {
    fn max_length(&self) -> usize {
        u8::MAX as usize
    }

    fn encoded_len(&self, _length: usize) -> usize {
        1
    }

    fn encode(&self, length: usize, buf: &mut BytesMut) -> Result<(), FramingError> {
        let byte = u8::try_from(length)
            .map_err(|_| FramingError::out_of_range(length, self.max_length()))?;
        buf.put_u8(byte);
        Ok(())
    }
}

/// BER definite length form
///
/// Lengths below `0x80` take one byte, larger ones are prefixed with `81` or
/// `82` followed by one or two big endian length bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BerLength;

impl LengthEncoder for BerLength {
    fn max_length(&self) -> usize {
        u16::MAX as usize
    }

    fn encoded_len(&self, length: usize) -> usize {
        match length {
            0..=0x7F => 1,
            0x80..=0xFF => 2,
            _ => 3,
        }
    }

    fn encode(&self, length: usize, buf: &mut BytesMut) -> Result<(), FramingError> {
        match length {
            0..=0x7F => buf.put_u8(length as u8),
            0x80..=0xFF => {
                buf.put_u8(0x81);
                buf.put_u8(length as u8);
            }
            0x100..=0xFFFF => {
                buf.put_u8(0x82);
                buf.put_u16(length as u16);
            }
            _ => return Err(FramingError::out_of_range(length, self.max_length())),
        }
        Ok(())
    }
}
