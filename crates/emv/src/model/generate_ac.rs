//! GENERATE AC response

use std::fmt;

use derive_more::{Deref, From};
use paycard_tlv::{RawTlv, Tlv, TlvSchema, TlvValue, value_bytes};

/// Kind of cryptogram returned by the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CryptogramKind {
    /// Application Authentication Cryptogram
    Aac,
    /// Transaction Certificate
    Tc,
    /// Authorisation Request Cryptogram
    Arqc,
    /// Reserved for future use
    Rfu,
}

/// Cryptogram Information Data (tag `9F27`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, From)]
pub struct CryptogramInformationData(pub u8);

impl CryptogramInformationData {
    /// Kind of cryptogram, from the top two bits
    pub const fn kind(self) -> CryptogramKind {
        match self.0 >> 6 {
            0b00 => CryptogramKind::Aac,
            0b01 => CryptogramKind::Tc,
            0b10 => CryptogramKind::Arqc,
            _ => CryptogramKind::Rfu,
        }
    }

    /// Transaction declined
    pub const fn is_aac(self) -> bool {
        matches!(self.kind(), CryptogramKind::Aac)
    }

    /// Transaction approved offline
    pub const fn is_tc(self) -> bool {
        matches!(self.kind(), CryptogramKind::Tc)
    }

    /// Online authorisation requested
    pub const fn is_arqc(self) -> bool {
        matches!(self.kind(), CryptogramKind::Arqc)
    }

    /// Reserved combination
    pub const fn is_rfu(self) -> bool {
        matches!(self.kind(), CryptogramKind::Rfu)
    }
}

impl TlvValue for CryptogramInformationData {
    fn decode_tlv(tlv: &Tlv) -> paycard_tlv::Result<Self> {
        u8::decode_tlv(tlv).map(Self)
    }
}

impl fmt::Display for CryptogramInformationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}

/// Response message template format 1 (tag `80`): fixed offsets
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, From)]
pub struct GenerateAcFormat1(pub Vec<u8>);

impl GenerateAcFormat1 {
    const ATC: usize = 1;
    const CRYPTOGRAM: usize = 3;
    const ISSUER_DATA: usize = 11;

    /// Cryptogram information data, byte 0
    pub fn cryptogram_information_data(&self) -> CryptogramInformationData {
        CryptogramInformationData(self.0.first().copied().unwrap_or_default())
    }

    /// Application transaction counter, bytes 1..3, as hex
    pub fn application_transaction_counter(&self) -> String {
        self.0
            .get(Self::ATC..Self::CRYPTOGRAM)
            .map(hex::encode_upper)
            .unwrap_or_default()
    }

    /// Application cryptogram, bytes 3..11, as hex
    pub fn application_cryptogram(&self) -> String {
        self.0
            .get(Self::CRYPTOGRAM..Self::ISSUER_DATA)
            .map(hex::encode_upper)
            .unwrap_or_default()
    }

    /// Issuer application data, bytes 11 onwards
    pub fn issuer_application_data(&self) -> Vec<u8> {
        self.0
            .get(Self::ISSUER_DATA..)
            .map(<[u8]>::to_vec)
            .unwrap_or_default()
    }
}

impl TlvValue for GenerateAcFormat1 {
    fn decode_tlv(tlv: &Tlv) -> paycard_tlv::Result<Self> {
        Ok(Self(value_bytes(tlv)))
    }
}

/// Response message template format 2 (tag `77`)
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct GenerateAcFormat2 {
    /// Cryptogram information data
    #[tlv(tag = "9F27")]
    pub cryptogram_information_data: Option<CryptogramInformationData>,
    /// Application transaction counter
    #[tlv(tag = "9F36", hex)]
    pub application_transaction_counter: String,
    /// Application cryptogram
    #[tlv(tag = "9F26", hex)]
    pub application_cryptogram: String,
    /// Issuer application data
    #[tlv(tag = "9F10")]
    pub issuer_application_data: Vec<u8>,
    /// Signed dynamic application data, when CDA was requested
    #[tlv(tag = "9F4B", hex)]
    pub signed_dynamic_application_data: String,
    /// Every data object of the template
    #[tlv(raw)]
    pub raw: RawTlv,
}

/// Decoded GENERATE AC response in either format
///
/// Accessors prefer format 2 values and fall back to format 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct GenerateAcResponse {
    /// Format 1
    #[tlv(tag = "80")]
    pub format1: GenerateAcFormat1,
    /// Format 2
    #[tlv(tag = "77")]
    pub format2: GenerateAcFormat2,
    /// Every data object of the response
    #[tlv(raw)]
    pub raw: RawTlv,
}

impl GenerateAcResponse {
    /// Cryptogram information data
    pub fn cryptogram_information_data(&self) -> CryptogramInformationData {
        self.format2
            .cryptogram_information_data
            .unwrap_or_else(|| self.format1.cryptogram_information_data())
    }

    /// Application transaction counter, as hex
    pub fn application_transaction_counter(&self) -> String {
        prefer(
            &self.format2.application_transaction_counter,
            || self.format1.application_transaction_counter(),
        )
    }

    /// Application cryptogram, as hex
    pub fn application_cryptogram(&self) -> String {
        prefer(&self.format2.application_cryptogram, || {
            self.format1.application_cryptogram()
        })
    }

    /// Issuer application data
    pub fn issuer_application_data(&self) -> Vec<u8> {
        if self.format2.issuer_application_data.is_empty() {
            self.format1.issuer_application_data()
        } else {
            self.format2.issuer_application_data.clone()
        }
    }
}

fn prefer(value: &str, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        fallback()
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_cryptogram_kinds() {
        assert_eq!(CryptogramInformationData(0x00).kind(), CryptogramKind::Aac);
        assert!(CryptogramInformationData(0x40).is_tc());
        assert!(CryptogramInformationData(0x80).is_arqc());
        assert!(CryptogramInformationData(0xC0).is_rfu());
        assert!(CryptogramInformationData(0x3F).is_aac());
        assert_eq!(CryptogramInformationData(0x80).to_string(), "80");
    }

    #[test]
    fn test_format1_offsets() {
        let response = GenerateAcResponse::from_ber(&hex!(
            "8012 80 0012 1122334455667788 06010A03A00000"
        ))
        .unwrap();

        assert!(response.cryptogram_information_data().is_arqc());
        assert_eq!(response.application_transaction_counter(), "0012");
        assert_eq!(response.application_cryptogram(), "1122334455667788");
        assert_eq!(response.issuer_application_data(), hex!("06010A03A00000"));
    }

    #[test]
    fn test_format2_fields() {
        let response = GenerateAcResponse::from_ber(&hex!(
            "771E 9F270180 9F360200 2A 9F2608 0102030405060708 9F1007 06010A03A4B800"
        ))
        .unwrap();

        assert!(response.format1.is_empty());
        assert!(response.cryptogram_information_data().is_arqc());
        assert_eq!(response.application_transaction_counter(), "002A");
        assert_eq!(response.application_cryptogram(), "0102030405060708");
        assert_eq!(response.issuer_application_data(), hex!("06010A03A4B800"));
        assert!(response.format2.signed_dynamic_application_data.is_empty());
        assert_eq!(response.format2.raw.as_bytes().len(), 0x1E);
    }

    #[test]
    fn test_short_format1() {
        let format1 = GenerateAcFormat1(hex!("4000").to_vec());
        assert!(format1.cryptogram_information_data().is_tc());
        assert!(format1.application_transaction_counter().is_empty());
        assert!(format1.application_cryptogram().is_empty());
        assert!(format1.issuer_application_data().is_empty());
    }
}
