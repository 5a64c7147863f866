//! Records read from the card's elementary files

use paycard_tlv::{DataObjectList, RawTlv, TlvSchema};

use super::CvmList;

/// Record template (tag `70`)
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct RecordTemplate {
    /// Every `70` template of the record
    #[tlv(tag = "70", repeated)]
    pub emv_proprietary_templates: Vec<EmvProprietaryTemplate>,
}

impl RecordTemplate {
    /// Fold every proprietary template of `records` into one with [`Merge`],
    /// earlier values winning
    pub fn merged<'a>(records: impl IntoIterator<Item = &'a Self>) -> EmvProprietaryTemplate {
        records
            .into_iter()
            .flat_map(|record| record.emv_proprietary_templates.iter().cloned())
            .fold(EmvProprietaryTemplate::default(), <EmvProprietaryTemplate as Merge>::merge)
    }

    /// Directory entries of every template in the record
    pub fn applications(&self) -> impl Iterator<Item = &ApplicationTemplate> {
        self.emv_proprietary_templates
            .iter()
            .flat_map(|template| template.application_templates.iter())
    }
}

/// Application template (tag `61`), an entry of a payment system directory
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct ApplicationTemplate {
    /// Application identifier (ADF name)
    #[tlv(tag = "4F")]
    pub id: Vec<u8>,
    /// Application label
    #[tlv(tag = "50")]
    pub label: Option<String>,
    /// Application priority indicator
    #[tlv(tag = "87")]
    pub priority: Option<u8>,
    /// Application preferred name
    #[tlv(tag = "9F12")]
    pub preferred_name: Option<String>,
}

impl ApplicationTemplate {
    /// Application identifier as upper case hex
    pub fn aid_hex(&self) -> String {
        hex::encode_upper(&self.id)
    }

    /// Preferred name, falling back to the label
    pub fn display_name(&self) -> Option<&str> {
        self.preferred_name.as_deref().or(self.label.as_deref())
    }
}

/// Directory entry of the payment system environment
pub type PseFile = ApplicationTemplate;

/// Data objects of an EMV proprietary record template
///
/// Fields rendered as `hex` keep the value bytes as an upper case hex
/// string. Data objects appearing twice (`8C`, `8D`, `8E`) are exposed both
/// decoded and raw.
#[derive(Debug, Clone, Default, PartialEq, Eq, TlvSchema)]
pub struct EmvProprietaryTemplate {
    /// Directory entries, present in payment system directory records
    #[tlv(tag = "61", repeated)]
    pub application_templates: Vec<ApplicationTemplate>,

    /// Track 1 discretionary data
    #[tlv(tag = "9F1F")]
    pub track1_discretionary_data: String,
    /// Track 2 equivalent data
    #[tlv(tag = "57")]
    pub track2_equivalent_data: Vec<u8>,
    /// Cardholder name
    #[tlv(tag = "5F20")]
    pub cardholder_name: String,
    /// Primary account number
    #[tlv(tag = "5A", hex)]
    pub pan: String,
    /// PAN sequence number
    #[tlv(tag = "5F34", hex)]
    pub pan_sequence_number: String,
    /// Expiration date, `YYMMDD`
    #[tlv(tag = "5F24", hex)]
    pub expiration_date: String,
    /// Application usage control
    #[tlv(tag = "9F07", hex)]
    pub usage_control: String,
    /// Issuer country code
    #[tlv(tag = "5F28", hex)]
    pub issuer_country_code: String,
    /// Effective date, `YYMMDD`
    #[tlv(tag = "5F25", hex)]
    pub effective_date: String,
    /// Service code
    #[tlv(tag = "5F30", hex)]
    pub service_code: String,

    /// Issuer action code, denial
    #[tlv(tag = "9F0E", hex)]
    pub issuer_action_code_denial: String,
    /// Issuer action code, online
    #[tlv(tag = "9F0F", hex)]
    pub issuer_action_code_online: String,
    /// Issuer action code, default
    #[tlv(tag = "9F0D", hex)]
    pub issuer_action_code_default: String,

    /// Certification authority public key index
    #[tlv(tag = "8F", hex)]
    pub ca_public_key_index: String,
    /// Issuer public key exponent
    #[tlv(tag = "9F32", hex)]
    pub issuer_public_key_exponent: String,
    /// Issuer public key certificate
    #[tlv(tag = "90", hex)]
    pub issuer_public_key_certificate: String,
    /// Application currency code
    #[tlv(tag = "9F42", hex)]
    pub currency_code: String,
    /// Application currency exponent
    #[tlv(tag = "9F44", hex)]
    pub currency_exponent: String,

    /// Card risk management data object list 1
    #[tlv(tag = "8C")]
    pub cdol1: DataObjectList,
    /// CDOL1 as hex
    #[tlv(tag = "8C", hex)]
    pub cdol1_hex: String,
    /// Card risk management data object list 2
    #[tlv(tag = "8D")]
    pub cdol2: DataObjectList,
    /// CDOL2 as hex
    #[tlv(tag = "8D", hex)]
    pub cdol2_hex: String,

    /// Application version number
    #[tlv(tag = "9F08", hex)]
    pub version_number: String,
    /// ICC public key certificate
    #[tlv(tag = "9F46", hex)]
    pub icc_public_key_certificate: String,
    /// ICC public key exponent
    #[tlv(tag = "9F47", hex)]
    pub icc_public_key_exponent: String,
    /// Dynamic data authentication data object list, as hex
    #[tlv(tag = "9F49", hex)]
    pub ddol: String,

    /// Cardholder verification method list
    #[tlv(tag = "8E")]
    pub cvm_list: Option<CvmList>,
    /// CVM list value bytes
    #[tlv(tag = "8E")]
    pub cvm_list_bytes: Vec<u8>,

    /// Card additional processes, seen on some contactless profiles
    #[tlv(tag = "9F69")]
    pub tag_9f69: Vec<u8>,

    /// Every data object of the template
    #[tlv(raw)]
    pub raw: RawTlv,
}

/// Field by field coalescing of two partial views of the same data
pub trait Merge {
    /// Keep every non-empty field of `self`, fill empty ones from `other`
    fn merge(self, other: Self) -> Self;
}

/// Emptiness as seen by [`Merge`]
trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Option<T> {
    fn is_blank(&self) -> bool {
        self.is_none()
    }
}

impl Blank for DataObjectList {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for RawTlv {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! coalesce {
    ($this:ident, $other:ident; $($field:ident),+ $(,)?) => {
        $(
            if $this.$field.is_blank() {
                $this.$field = $other.$field;
            }
        )+
    };
}

impl Merge for EmvProprietaryTemplate {
    fn merge(mut self, other: Self) -> Self {
        coalesce!(self, other;
            application_templates,
            track1_discretionary_data,
            track2_equivalent_data,
            cardholder_name,
            pan,
            pan_sequence_number,
            expiration_date,
            usage_control,
            issuer_country_code,
            effective_date,
            service_code,
            issuer_action_code_denial,
            issuer_action_code_online,
            issuer_action_code_default,
            ca_public_key_index,
            issuer_public_key_exponent,
            issuer_public_key_certificate,
            currency_code,
            currency_exponent,
            cdol1,
            cdol1_hex,
            cdol2,
            cdol2_hex,
            version_number,
            icc_public_key_certificate,
            icc_public_key_exponent,
            ddol,
            cvm_list,
            cvm_list_bytes,
            tag_9f69,
            raw,
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use paycard_tlv::DataObject;

    fn template_with_pan(pan: &str) -> EmvProprietaryTemplate {
        EmvProprietaryTemplate {
            pan: pan.into(),
            ..Default::default()
        }
    }

    fn populated() -> EmvProprietaryTemplate {
        EmvProprietaryTemplate {
            application_templates: vec![ApplicationTemplate {
                id: hex!("A0000000041010").to_vec(),
                ..Default::default()
            }],
            track1_discretionary_data: "0000".into(),
            track2_equivalent_data: hex!("5413330089600010D25120").to_vec(),
            cardholder_name: "DOE/JOHN".into(),
            pan: "5413330089600010".into(),
            pan_sequence_number: "01".into(),
            expiration_date: "251231".into(),
            usage_control: "FF00".into(),
            issuer_country_code: "0076".into(),
            effective_date: "200101".into(),
            service_code: "0201".into(),
            issuer_action_code_denial: "0000000000".into(),
            issuer_action_code_online: "FC50BCF800".into(),
            issuer_action_code_default: "FC50BCA000".into(),
            ca_public_key_index: "05".into(),
            issuer_public_key_exponent: "03".into(),
            issuer_public_key_certificate: "AABB".into(),
            currency_code: "0986".into(),
            currency_exponent: "02".into(),
            cdol1: DataObjectList(vec![DataObject {
                tag: hex!("9F02").to_vec(),
                length: 6,
            }]),
            cdol1_hex: "9F0206".into(),
            cdol2: DataObjectList(vec![DataObject {
                tag: hex!("8A").to_vec(),
                length: 2,
            }]),
            cdol2_hex: "8A02".into(),
            version_number: "0002".into(),
            icc_public_key_certificate: "CCDD".into(),
            icc_public_key_exponent: "03".into(),
            ddol: "9F3704".into(),
            cvm_list: Some(CvmList::default()),
            cvm_list_bytes: vec![0; 8],
            tag_9f69: vec![0x01],
            raw: RawTlv(vec![0x5A, 0x00]),
        }
    }

    #[test]
    fn test_merge_identities() {
        let full = populated();
        let empty = EmvProprietaryTemplate::default();

        assert_eq!(full.clone().merge(empty.clone()), full);
        assert_eq!(empty.merge(full.clone()), full);
    }

    #[test]
    fn test_merge_prefers_left() {
        let mut other = populated();
        other.pan = "4111111111111111".into();
        other.cardholder_name = "ROE/JANE".into();

        assert_eq!(populated().merge(other), populated());
    }

    #[test]
    fn test_merge_fills_gaps() {
        let mut left = template_with_pan("4111111111111111");
        left.cvm_list = None;
        let right = populated();

        let merged = left.merge(right.clone());
        assert_eq!(merged.pan, "4111111111111111");
        assert_eq!(merged.cardholder_name, right.cardholder_name);
        assert_eq!(merged.cdol1, right.cdol1);
        assert_eq!(merged.cvm_list, right.cvm_list);
        assert_eq!(merged.tag_9f69, right.tag_9f69);
        assert_eq!(merged.application_templates, right.application_templates);
    }

    #[test]
    fn test_decode_record() {
        let record = RecordTemplate::from_ber(&hex!(
            "702F 5A085413330089600010 5F2403251231 5F340101
             8C069F02069F1A02 8E0A00000000000000001F00 5F2004444F4520"
        ))
        .unwrap();

        let template = &record.emv_proprietary_templates[0];
        assert_eq!(template.pan, "5413330089600010");
        assert_eq!(template.expiration_date, "251231");
        assert_eq!(template.pan_sequence_number, "01");
        assert_eq!(template.cdol1.total_length(), 8);
        assert_eq!(template.cdol1_hex, "9F02069F1A02");
        assert_eq!(template.cvm_list.as_ref().unwrap().rules.len(), 1);
        assert_eq!(template.cvm_list_bytes.len(), 10);
        assert_eq!(template.cardholder_name, "DOE ");
        assert_eq!(template.raw.as_bytes().len(), 0x2F);
    }

    #[test]
    fn test_malformed_cvm_list_fails_record() {
        let err = RecordTemplate::from_ber(&hex!("7005 8E03000000")).unwrap_err();
        assert!(matches!(err.root(), paycard_tlv::Error::InvalidValue { tag, .. } if tag == "8E"));
    }

    #[test]
    fn test_directory_record() {
        let record = RecordTemplate::from_ber(&hex!(
            "701A 6118 4F07A0000000041010 500A4D617374657243617264 870101"
        ))
        .unwrap();

        let apps: Vec<_> = record.applications().collect();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].aid_hex(), "A0000000041010");
        assert_eq!(apps[0].display_name(), Some("MasterCard"));
        assert_eq!(apps[0].priority, Some(1));
    }

    #[test]
    fn test_merged_records() {
        let first = RecordTemplate {
            emv_proprietary_templates: vec![template_with_pan("5413330089600010")],
        };
        let second = RecordTemplate {
            emv_proprietary_templates: vec![
                template_with_pan("4111111111111111"),
                EmvProprietaryTemplate {
                    cardholder_name: "DOE/JOHN".into(),
                    ..Default::default()
                },
            ],
        };

        let merged = RecordTemplate::merged([&first, &second]);
        assert_eq!(merged.pan, "5413330089600010");
        assert_eq!(merged.cardholder_name, "DOE/JOHN");
    }
}
