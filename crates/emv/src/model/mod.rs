//! EMV data model
//!
//! Schemas for the BER-TLV payloads returned by the card, decoded with
//! [`TlvSchema::from_ber`](paycard_tlv::TlvSchema::from_ber), and the
//! sub-decoders for data elements with their own binary layout.

mod afl;
mod cvm;
mod fci;
mod generate_ac;
mod gpo;
mod record;

pub use afl::{Afl, AflEntry};
pub use cvm::{CvRule, CvmList};
pub use fci::{FciTemplate, FileControlInformation, ProprietaryFciTemplate};
pub use generate_ac::{
    CryptogramInformationData, CryptogramKind, GenerateAcFormat1, GenerateAcFormat2,
    GenerateAcResponse,
};
pub use gpo::{Aip, GetProcessingOptionsResponse, GpoFormat2};
pub use record::{ApplicationTemplate, EmvProprietaryTemplate, Merge, PseFile, RecordTemplate};
