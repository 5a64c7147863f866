//! GET PROCESSING OPTIONS response

use derive_more::{Deref, From};
use paycard_tlv::{Tlv, TlvSchema, TlvValue, value_bytes};

use super::Afl;

/// Application Interchange Profile (tag `82`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, From)]
pub struct Aip(pub Vec<u8>);

impl Aip {
    fn bit(&self, byte: usize, mask: u8) -> bool {
        self.0.get(byte).is_some_and(|b| b & mask != 0)
    }

    /// Static data authentication is supported
    pub fn sda_supported(&self) -> bool {
        self.bit(0, 0x40)
    }

    /// Dynamic data authentication is supported
    pub fn dda_supported(&self) -> bool {
        self.bit(0, 0x20)
    }

    /// Cardholder verification is supported
    pub fn cardholder_verification_supported(&self) -> bool {
        self.bit(0, 0x10)
    }

    /// Terminal risk management is to be performed
    pub fn terminal_risk_management(&self) -> bool {
        self.bit(0, 0x08)
    }

    /// Issuer authentication is supported
    pub fn issuer_authentication_supported(&self) -> bool {
        self.bit(0, 0x04)
    }

    /// Combined DDA/application cryptogram generation is supported
    pub fn cda_supported(&self) -> bool {
        self.bit(0, 0x01)
    }
}

impl TlvValue for Aip {
    fn decode_tlv(tlv: &Tlv) -> paycard_tlv::Result<Self> {
        Ok(Self(value_bytes(tlv)))
    }
}

/// Response template format 2 (tag `77`)
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct GpoFormat2 {
    /// Application Interchange Profile
    #[tlv(tag = "82")]
    pub interchange_profile: Aip,
    /// Application File Locator
    #[tlv(tag = "94")]
    pub file_locator: Afl,
}

/// Decoded GET PROCESSING OPTIONS response in either format
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct GetProcessingOptionsResponse {
    /// Format 1 (tag `80`): AIP followed by the AFL
    #[tlv(tag = "80")]
    pub format1: Vec<u8>,
    /// Format 2 (tag `77`)
    #[tlv(tag = "77")]
    pub format2: Option<GpoFormat2>,
}

impl GetProcessingOptionsResponse {
    /// Application Interchange Profile
    pub fn interchange_profile(&self) -> Aip {
        if self.format1.len() >= 2 {
            return Aip(self.format1[..2].to_vec());
        }
        self.format2
            .as_ref()
            .map(|f| f.interchange_profile.clone())
            .unwrap_or_default()
    }

    /// Application File Locator
    pub fn file_locator(&self) -> Afl {
        if self.format1.len() >= 2 {
            return Afl(self.format1[2..].to_vec());
        }
        self.format2
            .as_ref()
            .map(|f| f.file_locator.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_format1() {
        let gpo = GetProcessingOptionsResponse::from_ber(&hex!("800A 1980 08010100 10010301")).unwrap();
        let aip = gpo.interchange_profile();
        assert_eq!(aip.as_slice(), hex!("1980"));
        assert!(aip.cardholder_verification_supported());
        assert!(aip.terminal_risk_management());
        assert!(aip.cda_supported());
        assert!(!aip.dda_supported());
        assert_eq!(gpo.file_locator().entries().unwrap().len(), 2);
    }

    #[test]
    fn test_format2() {
        let gpo = GetProcessingOptionsResponse::from_ber(&hex!("770A 82025800 940408010400")).unwrap();
        assert!(gpo.format1.is_empty());
        let aip = gpo.interchange_profile();
        assert!(aip.sda_supported());
        assert!(aip.cardholder_verification_supported());
        assert!(aip.terminal_risk_management());
        let entries = gpo.file_locator().entries().unwrap();
        assert_eq!(entries[0].sfi, 1);
        assert_eq!(entries[0].last_record, 4);
    }

    #[test]
    fn test_empty_response() {
        let gpo = GetProcessingOptionsResponse::default();
        assert!(gpo.interchange_profile().is_empty());
        assert!(gpo.file_locator().is_empty());
    }
}
