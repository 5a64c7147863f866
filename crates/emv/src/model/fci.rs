//! File Control Information returned by SELECT

use std::collections::BTreeMap;

use paycard_tlv::{DataObjectList, TlvSchema};

/// File control parameters and information returned by SELECT
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct FileControlInformation {
    /// File control parameters template
    #[tlv(tag = "62")]
    pub fcp_template: Vec<u8>,
    /// File management data template
    #[tlv(tag = "64")]
    pub fmd_template: Vec<u8>,
    /// File control information template
    #[tlv(tag = "6F")]
    pub fci_template: Option<FciTemplate>,
    /// Value of the FCI template as hex
    #[tlv(tag = "6F", hex)]
    pub raw_6f: String,
}

impl FileControlInformation {
    /// Proprietary template of the FCI, if any
    pub fn proprietary(&self) -> Option<&ProprietaryFciTemplate> {
        self.fci_template.as_ref()?.proprietary.as_ref()
    }

    /// Short file identifier of the directory elementary file
    pub fn sfi(&self) -> Option<u8> {
        self.proprietary()?.sfi
    }
}

/// FCI template (tag `6F`)
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct FciTemplate {
    /// DF name, as hex
    #[tlv(tag = "84", hex)]
    pub df_name: Option<String>,
    /// FCI proprietary template
    #[tlv(tag = "A5")]
    pub proprietary: Option<ProprietaryFciTemplate>,
    /// Value of the proprietary template as hex
    #[tlv(tag = "A5", hex)]
    pub raw_a5: String,
}

/// FCI proprietary template (tag `A5`)
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct ProprietaryFciTemplate {
    /// Application label
    #[tlv(tag = "50")]
    pub label: Option<String>,
    /// Application priority indicator
    #[tlv(tag = "87")]
    pub priority: Option<u8>,
    /// SFI of the directory elementary file
    #[tlv(tag = "88")]
    pub sfi: Option<u8>,
    /// Language preference, as ISO 639 codes
    #[tlv(tag = "5F2D")]
    pub language_preference: Option<String>,
    /// Issuer code table index for the preferred name
    #[tlv(tag = "9F11")]
    pub issuer_code_table_index: Option<u8>,
    /// Application preferred name
    #[tlv(tag = "9F12")]
    pub preferred_name: Option<String>,
    /// Processing options data object list
    #[tlv(tag = "9F38")]
    pub pdol: DataObjectList,
    /// FCI issuer discretionary data, keyed by hex tag
    #[tlv(tag = "BF0C")]
    pub issuer_discretionary_data: BTreeMap<String, Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_select_pse_response() {
        let fci = FileControlInformation::from_ber(&hex!(
            "6F20 840E315041592E5359532E4444463031 A50E 880101 5F2D04656E6672 9F110101"
        ))
        .unwrap();

        let template = fci.fci_template.as_ref().unwrap();
        assert_eq!(template.df_name.as_deref(), Some("315041592E5359532E4444463031"));
        assert_eq!(fci.sfi(), Some(1));

        let proprietary = fci.proprietary().unwrap();
        assert_eq!(proprietary.language_preference.as_deref(), Some("enfr"));
        assert_eq!(proprietary.issuer_code_table_index, Some(1));
        assert!(proprietary.pdol.is_empty());
        assert_eq!(template.raw_a5, "8801015F2D04656E66729F110101");
        assert!(fci.raw_6f.starts_with("840E315041592E"));
    }

    #[test]
    fn test_select_application_response() {
        let fci = FileControlInformation::from_ber(&hex!(
            "6F2E 8407A0000000041010 A523 500A4D617374657243617264 870101
             9F3809 9F66049F02069F3704 BF0C05 9F4D020B0A"
        ))
        .unwrap();

        let proprietary = fci.proprietary().unwrap();
        assert_eq!(proprietary.label.as_deref(), Some("MasterCard"));
        assert_eq!(proprietary.priority, Some(1));
        assert_eq!(proprietary.sfi, None);
        assert_eq!(proprietary.pdol.to_string(), "9F66(04) 9F02(06) 9F37(04)");
        assert_eq!(proprietary.pdol.total_length(), 14);
        assert_eq!(
            proprietary.issuer_discretionary_data.get("9F4D").map(Vec::as_slice),
            Some(hex!("0B0A").as_slice())
        );
        assert_eq!(fci.sfi(), None);
    }

    #[test]
    fn test_without_fci_template() {
        let fci = FileControlInformation::from_ber(&hex!("6203 820101")).unwrap();
        assert!(fci.fci_template.is_none());
        assert_eq!(fci.fcp_template, hex!("820101"));
        assert!(fci.raw_6f.is_empty());
        assert_eq!(fci.sfi(), None);
    }
}
