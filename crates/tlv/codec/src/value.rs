//! Decoding of single data objects into field values

use std::collections::BTreeMap;

use iso7816_tlv::ber::{Tlv, Value};
use tracing::debug;

use crate::{Error, Result, tag_hex};

/// A type that can be decoded from one BER-TLV data object
pub trait TlvValue: Sized {
    /// Decode from a parsed data object
    fn decode_tlv(tlv: &Tlv) -> Result<Self>;
}

/// Value bytes of a primitive data object
pub fn primitive(tlv: &Tlv) -> Result<&[u8]> {
    match tlv.value() {
        Value::Primitive(bytes) => Ok(bytes.as_slice()),
        Value::Constructed(_) => Err(Error::UnexpectedConstructed(tag_hex(tlv))),
    }
}

/// Child data objects of a constructed data object
pub fn constructed(tlv: &Tlv) -> Result<&[Tlv]> {
    match tlv.value() {
        Value::Constructed(children) => Ok(children.as_slice()),
        Value::Primitive(_) => Err(Error::UnexpectedPrimitive(tag_hex(tlv))),
    }
}

/// Value bytes of any data object; constructed values are re-encoded
pub fn value_bytes(tlv: &Tlv) -> Vec<u8> {
    match tlv.value() {
        Value::Primitive(bytes) => bytes.clone(),
        Value::Constructed(children) => children.iter().flat_map(Tlv::to_vec).collect(),
    }
}

/// Upper case hex rendering of the value bytes
pub fn hex_value(tlv: &Tlv) -> Result<String> {
    Ok(hex::encode_upper(value_bytes(tlv)))
}

impl TlvValue for Vec<u8> {
    fn decode_tlv(tlv: &Tlv) -> Result<Self> {
        Ok(value_bytes(tlv))
    }
}

/// Bytes that are not UTF-8 are replaced, 9F12 may use an ISO 8859 code table
impl TlvValue for String {
    fn decode_tlv(tlv: &Tlv) -> Result<Self> {
        let bytes = primitive(tlv)?;
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_owned()),
            Err(error) => {
                debug!(
                    tag = %tag_hex(tlv),
                    value = %hex::encode_upper(bytes),
                    %error,
                    "Text value is not UTF-8, replacing invalid bytes"
                );
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

macro_rules! impl_unsigned {
    ($($ty:ty),+) => {
        $(
            impl TlvValue for $ty {
                fn decode_tlv(tlv: &Tlv) -> Result<Self> {
                    let bytes = primitive(tlv)?;
                    if bytes.len() > size_of::<$ty>() {
                        return Err(Error::IntegerOverflow {
                            tag: tag_hex(tlv),
                            len: bytes.len(),
                            bits: <$ty>::BITS,
                        });
                    }
                    let mut buf = [0u8; size_of::<$ty>()];
                    buf[size_of::<$ty>() - bytes.len()..].copy_from_slice(bytes);
                    Ok(<$ty>::from_be_bytes(buf))
                }
            }
        )+
    };
}

impl_unsigned!(u8, u16, u32, u64);

impl TlvValue for BTreeMap<String, Vec<u8>> {
    /// Children keyed by upper case hex tag; the first occurrence wins
    fn decode_tlv(tlv: &Tlv) -> Result<Self> {
        let mut map = Self::new();
        for child in constructed(tlv)? {
            map.entry(tag_hex(child)).or_insert_with(|| value_bytes(child));
        }
        Ok(map)
    }
}

/// Encoded form of a data object, kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawTlv(pub Vec<u8>);

impl RawTlv {
    /// Concatenated encoding of a sequence of data objects
    pub fn from_children(children: &[Tlv]) -> Self {
        Self(children.iter().flat_map(Tlv::to_vec).collect())
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the captured bytes back into data objects
    pub fn parse(&self) -> Result<Vec<Tlv>> {
        crate::parse_all(&self.0)
    }
}

impl TlvValue for RawTlv {
    fn decode_tlv(tlv: &Tlv) -> Result<Self> {
        Ok(Self(tlv.to_vec()))
    }
}

impl AsRef<[u8]> for RawTlv {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn parse(bytes: &[u8]) -> Tlv {
        Tlv::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_integers() {
        assert_eq!(u8::decode_tlv(&parse(&hex!("870101"))).unwrap(), 1);
        assert_eq!(u16::decode_tlv(&parse(&hex!("9F36020123"))).unwrap(), 0x0123);
        assert_eq!(u32::decode_tlv(&parse(&hex!("9F3600"))).unwrap(), 0);
        assert!(matches!(
            u8::decode_tlv(&parse(&hex!("9F36020123"))),
            Err(Error::IntegerOverflow { bits: 8, len: 2, .. })
        ));
    }

    #[test]
    fn test_string_and_bytes() {
        let tlv = parse(&hex!("500A4D415354455243415244"));
        assert_eq!(String::decode_tlv(&tlv).unwrap(), "MASTERCARD");
        assert_eq!(Vec::<u8>::decode_tlv(&tlv).unwrap(), b"MASTERCARD".to_vec());
        assert_eq!(hex_value(&parse(&hex!("5A021234"))).unwrap(), "1234");
    }

    #[test]
    fn test_string_latin1_is_replaced() {
        // "JOSÉ" in ISO 8859-1
        let tlv = parse(&hex!("9F12044A4F53C9"));
        assert_eq!(String::decode_tlv(&tlv).unwrap(), "JOS\u{FFFD}");
    }

    #[test]
    fn test_constructed_as_bytes() {
        let tlv = parse(&hex!("A506880101500141"));
        assert!(matches!(String::decode_tlv(&tlv), Err(Error::UnexpectedConstructed(_))));
        assert_eq!(Vec::<u8>::decode_tlv(&tlv).unwrap(), hex!("880101500141").to_vec());
    }

    #[test]
    fn test_map() {
        let tlv = parse(&hex!("BF0C099F4D020B0A5F5501AA"));
        let map = BTreeMap::<String, Vec<u8>>::decode_tlv(&tlv).unwrap();
        assert_eq!(map.get("9F4D"), Some(&vec![0x0B, 0x0A]));
        assert_eq!(map.get("5F55"), Some(&vec![0xAA]));

        assert!(matches!(
            BTreeMap::<String, Vec<u8>>::decode_tlv(&parse(&hex!("5A021234"))),
            Err(Error::UnexpectedPrimitive(_))
        ));
    }

    #[test]
    fn test_raw() {
        let raw = RawTlv::decode_tlv(&parse(&hex!("9F2701 80"))).unwrap();
        assert_eq!(raw.as_bytes(), hex!("9F270180"));
        assert_eq!(raw.parse().unwrap().len(), 1);
    }
}
