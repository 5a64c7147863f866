//! Schema driven decoding of data object sequences

use iso7816_tlv::ber::Tlv;
use tracing::trace;

use crate::Result;

/// A struct whose fields map to tagged data objects
///
/// Usually derived with `#[derive(TlvSchema)]`, which also implements
/// [`TlvValue`](crate::TlvValue) so the schema can nest inside another one
/// as a constructed data object.
pub trait TlvSchema: Sized {
    /// Decode from the data objects found at one nesting level
    fn decode_fields(children: &[Tlv]) -> Result<Self>;

    /// Decode from BER-TLV encoded bytes
    fn from_ber(bytes: &[u8]) -> Result<Self> {
        let tlvs = parse_all(bytes)?;
        Self::decode_fields(&tlvs)
    }
}

/// Parse every data object in `input`.
///
/// `00` and `FF` bytes between data objects are padding and are skipped.
pub fn parse_all(mut input: &[u8]) -> Result<Vec<Tlv>> {
    let mut tlvs = Vec::new();
    loop {
        while let [0x00 | 0xFF, rest @ ..] = input {
            input = rest;
        }
        if input.is_empty() {
            break;
        }

        let (tlv, rest) = Tlv::parse(input);
        tlvs.push(tlv?);
        input = rest;
    }
    trace!(count = tlvs.len(), "Parsed data objects");
    Ok(tlvs)
}

/// First data object carrying `tag`
pub fn find<'a>(tlvs: &'a [Tlv], tag: &[u8]) -> Option<&'a Tlv> {
    tlvs.iter().find(|tlv| tlv.tag().to_bytes() == tag)
}

/// Every data object carrying `tag`, in order
pub fn find_all<'a>(tlvs: &'a [Tlv], tag: &'a [u8]) -> impl Iterator<Item = &'a Tlv> + 'a {
    tlvs.iter().filter(move |tlv| tlv.tag().to_bytes() == tag)
}

/// Upper case hex rendering of a data object's tag
pub fn tag_hex(tlv: &Tlv) -> String {
    hex::encode_upper(tlv.tag().to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_parse_all_skips_padding() {
        let tlvs = parse_all(&hex!("00 5A021234 FFFF 9F360100 00")).unwrap();
        assert_eq!(tlvs.len(), 2);
        assert_eq!(tag_hex(&tlvs[0]), "5A");
        assert_eq!(tag_hex(&tlvs[1]), "9F36");
    }

    #[test]
    fn test_parse_all_empty() {
        assert!(parse_all(&[]).unwrap().is_empty());
        assert!(parse_all(&hex!("0000")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_all_truncated() {
        assert!(parse_all(&hex!("5A051234")).is_err());
    }

    #[test]
    fn test_find() {
        let tlvs = parse_all(&hex!("5001415001425A0199")).unwrap();
        assert_eq!(find(&tlvs, &[0x5A]).map(tag_hex).as_deref(), Some("5A"));
        assert_eq!(find_all(&tlvs, &[0x50]).count(), 2);
        assert!(find(&tlvs, &[0x9F, 0x12]).is_none());
    }
}
