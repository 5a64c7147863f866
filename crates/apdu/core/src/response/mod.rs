//! APDU response definitions
//!
//! A raw reply is `DATA SW1 SW2`: the trailing two bytes are always the
//! status word, everything before them is payload.

pub mod error;
pub mod status;

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use error::{ResponseError, TrailerError};
use status::StatusWord;

/// Parsed APDU response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    data: Bytes,
    status: StatusWord,
}

impl Response {
    /// Create a new response with payload and status
    pub fn new(data: impl Into<Bytes>, status: impl Into<StatusWord>) -> Self {
        Self {
            data: data.into(),
            status: status.into(),
        }
    }

    /// Parse a response from raw bytes (including the status word)
    pub fn from_bytes(raw: &[u8]) -> Result<Self, ResponseError> {
        let (status, payload) = extract_status_and_payload(raw)?;

        trace!(
            sw1 = format_args!("{:#04x}", status.sw1),
            sw2 = format_args!("{:#04x}", status.sw2),
            payload_len = payload.len(),
            "Parsed APDU response"
        );

        Ok(Self {
            data: Bytes::copy_from_slice(payload),
            status,
        })
    }

    /// Response payload without the status word
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    /// Take the payload
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Status word (trailer)
    pub const fn status(&self) -> StatusWord {
        self.status
    }

    /// Check if the response indicates success
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Split into payload and the error carried by the trailer, if any
    pub fn into_parts(self) -> (Bytes, Option<TrailerError>) {
        let err = self.status.as_error();
        (self.data, err)
    }

    /// Payload on 90 00, the trailer error otherwise
    pub fn into_result(self) -> Result<Bytes, TrailerError> {
        self.status.to_result().map(|()| self.data)
    }

    /// Serialize back to `DATA SW1 SW2`
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.data.len() + 2);
        buf.put_slice(&self.data);
        buf.put_u8(self.status.sw1);
        buf.put_u8(self.status.sw2);
        buf.freeze()
    }
}

/// Split raw response bytes into status word and payload
///
/// # Errors
/// Returns [`ResponseError::TooShort`] if fewer than two bytes are present.
pub fn extract_status_and_payload(raw: &[u8]) -> Result<(StatusWord, &[u8]), ResponseError> {
    match raw {
        [payload @ .., sw1, sw2] => Ok((StatusWord::new(*sw1, *sw2), payload)),
        _ => Err(ResponseError::TooShort(raw.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_from_bytes() {
        let response = Response::from_bytes(&hex!("0102039000")).unwrap();
        assert_eq!(response.data().as_ref(), hex!("010203"));
        assert_eq!(response.status(), StatusWord::new(0x90, 0x00));
        assert!(response.is_success());

        let response = Response::from_bytes(&hex!("6A83")).unwrap();
        assert!(response.data().is_empty());
        assert_eq!(response.status(), status::common::RECORD_NOT_FOUND);
    }

    #[test]
    fn test_too_short() {
        assert_eq!(Response::from_bytes(&[]), Err(ResponseError::TooShort(0)));
        assert_eq!(Response::from_bytes(&[0x90]), Err(ResponseError::TooShort(1)));
    }

    #[test]
    fn test_into_result() {
        let response = Response::new(hex!("AABB").to_vec(), (0x90, 0x00));
        assert_eq!(response.into_result().unwrap().as_ref(), hex!("AABB"));

        let response = Response::new(Bytes::new(), (0x6A, 0x82));
        assert_eq!(response.into_result(), Err(TrailerError::FileNotFound));
    }

    #[test]
    fn test_to_bytes_reconstructs_trailer() {
        let raw = hex!("6F0A840E315041592E5359532E44444630316C10");
        let response = Response::from_bytes(&raw).unwrap();
        assert_eq!(response.to_bytes().as_ref(), raw);
        assert_eq!(response.status().wrong_length(), Some(0x10));
    }
}
