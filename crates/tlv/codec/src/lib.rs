//! Schema driven BER-TLV decoding
//!
//! Structures are described once with tag annotations and decoded with
//! [`TlvSchema::from_ber`]:
//!
//! ```
//! use paycard_tlv::TlvSchema;
//!
//! #[derive(Debug, Default, TlvSchema)]
//! struct Application {
//!     #[tlv(tag = "4F")]
//!     aid: Vec<u8>,
//!     #[tlv(tag = "50")]
//!     label: Option<String>,
//!     #[tlv(tag = "87")]
//!     priority: Option<u8>,
//! }
//!
//! let app = Application::from_ber(&[0x4F, 0x02, 0xA0, 0x00, 0x87, 0x01, 0x01]).unwrap();
//! assert_eq!(app.aid, vec![0xA0, 0x00]);
//! assert_eq!(app.label, None);
//! assert_eq!(app.priority, Some(1));
//! ```
//!
//! Field attributes:
//!
//! - `tag = "9F12"`: hex tag of the data object
//! - `hex`: render the value bytes as upper case hex into a `String`
//! - `repeated`: collect every occurrence into a `Vec`
//! - `required`: fail with [`Error::MissingTag`] when absent
//! - `raw`: capture the encoding of every data object at this level
//! - `skip`: leave the field at its default
//!
//! `Option<T>` fields are `None` when absent, other fields fall back to
//! `Default`. When a tag occurs more than once, singular fields take the
//! first occurrence.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Generated code refers to this crate by name
#[allow(unused_extern_crates)]
extern crate self as paycard_tlv;

mod dol;
mod error;
mod schema;
mod value;

pub use dol::{DataObject, DataObjectList};
pub use error::{Error, Result};
pub use schema::{TlvSchema, find, find_all, parse_all, tag_hex};
pub use value::{RawTlv, TlvValue, constructed, hex_value, primitive, value_bytes};

pub use iso7816_tlv::ber::{Tag, Tlv, Value};

#[cfg(feature = "derive")]
pub use paycard_tlv_macros::TlvSchema;

#[cfg(all(test, feature = "derive"))]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use hex_literal::hex;

    #[derive(Debug, Default, PartialEq, TlvSchema)]
    struct Proprietary {
        #[tlv(tag = "88")]
        sfi: Option<u8>,
        #[tlv(tag = "5F2D")]
        language: String,
        #[tlv(tag = "9F38")]
        pdol: DataObjectList,
        #[tlv(tag = "BF0C")]
        discretionary: BTreeMap<String, Vec<u8>>,
    }

    #[derive(Debug, Default, PartialEq, TlvSchema)]
    struct Template {
        #[tlv(tag = "84", hex)]
        df_name: Option<String>,
        #[tlv(tag = "A5")]
        proprietary: Option<Proprietary>,
        #[tlv(tag = "A5", hex)]
        proprietary_hex: String,
    }

    #[derive(Debug, Default, PartialEq, TlvSchema)]
    struct Fci {
        #[tlv(tag = "6F", required)]
        template: Template,
    }

    #[derive(Debug, Default, PartialEq, TlvSchema)]
    struct Directory {
        #[tlv(tag = "61", repeated)]
        entries: Vec<Entry>,
        #[tlv(raw)]
        raw: RawTlv,
        #[tlv(skip)]
        note: String,
    }

    #[derive(Debug, Default, PartialEq, TlvSchema)]
    struct Entry {
        #[tlv(tag = "4F")]
        aid: Vec<u8>,
    }

    const SELECT_PSE: [u8; 31] = hex!(
        "6F1D 840E315041592E5359532E4444463031 A50B 880101 5F2D02656E 9F3800"
    );

    #[test]
    fn test_nested_schema() {
        let fci = Fci::from_ber(&hex!(
            "6F20 840E315041592E5359532E4444463031 A50E 880101 5F2D02656E 9F38039F1A02"
        ))
        .unwrap();

        assert_eq!(fci.template.df_name.as_deref(), Some("315041592E5359532E4444463031"));
        let proprietary = fci.template.proprietary.as_ref().unwrap();
        assert_eq!(proprietary.sfi, Some(1));
        assert_eq!(proprietary.language, "en");
        assert_eq!(proprietary.pdol.to_string(), "9F1A(02)");
        assert!(proprietary.discretionary.is_empty());
        assert_eq!(fci.template.proprietary_hex, "8801015F2D02656E9F38039F1A02");
    }

    #[test]
    fn test_required_missing() {
        let err = Fci::from_ber(&hex!("5A021234")).unwrap_err();
        assert!(matches!(err.root(), Error::MissingTag(tag) if tag == "6F"));
    }

    #[test]
    fn test_repeated_and_raw() {
        let bytes = hex!("6103 4F01A1 6103 4F01A2 5001 41");
        let directory = Directory::from_ber(&bytes).unwrap();

        assert_eq!(directory.entries.len(), 2);
        assert_eq!(directory.entries[1].aid, vec![0xA2]);
        assert_eq!(directory.raw.as_bytes(), bytes);
        assert!(directory.note.is_empty());
    }

    #[test]
    fn test_field_error_context() {
        let err = Template::from_ber(&hex!("A504 88020101")).unwrap_err();
        assert!(err.to_string().starts_with("field `proprietary`"));
        assert!(matches!(err.root(), Error::IntegerOverflow { .. }));
    }

    #[test]
    fn test_padding_between_objects() {
        let mut padded = SELECT_PSE.to_vec();
        padded.extend_from_slice(&[0x00, 0x00]);
        let fci = Fci::from_ber(&padded).unwrap();
        assert!(fci.template.proprietary.is_some());
    }
}
