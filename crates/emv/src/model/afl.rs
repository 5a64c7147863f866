//! Application File Locator (tag `94`)

use std::fmt;
use std::ops::RangeInclusive;

use derive_more::{Deref, From};
use paycard_tlv::{Tlv, TlvValue, value_bytes};

use crate::DecodeError;

/// Raw Application File Locator, a sequence of four byte entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, From)]
pub struct Afl(pub Vec<u8>);

/// Location of records to read during application initiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AflEntry {
    /// Short file identifier
    pub sfi: u8,
    /// First record number
    pub first_record: u8,
    /// Last record number
    pub last_record: u8,
    /// Records, from the first one, that take part in offline data authentication
    pub records_in_offline_auth: u8,
}

impl AflEntry {
    /// Record numbers covered by this entry
    pub const fn records(&self) -> RangeInclusive<u8> {
        self.first_record..=self.last_record
    }
}

impl Afl {
    /// Decode the entries
    ///
    /// Fails when the length is not a multiple of four.
    pub fn entries(&self) -> Result<Vec<AflEntry>, DecodeError> {
        let chunks = self.0.chunks_exact(4);
        if !chunks.remainder().is_empty() {
            return Err(DecodeError::AflTruncated(chunks.remainder().len()));
        }
        Ok(chunks
            .map(|entry| AflEntry {
                sfi: entry[0] >> 3,
                first_record: entry[1],
                last_record: entry[2],
                records_in_offline_auth: entry[3],
            })
            .collect())
    }
}

impl TlvValue for Afl {
    fn decode_tlv(tlv: &Tlv) -> paycard_tlv::Result<Self> {
        Ok(Self(value_bytes(tlv)))
    }
}

impl fmt::Display for Afl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = match self.entries() {
            Ok(entries) => entries,
            Err(err) => return write!(f, "invalid: {err}"),
        };
        if entries.is_empty() {
            return f.write_str("[]");
        }
        writeln!(f, "[")?;
        for entry in entries {
            writeln!(f, "  - SFI: {}", entry.sfi)?;
            writeln!(f, "    Records: {}-{}", entry.first_record, entry.last_record)?;
            writeln!(f, "    RecordsInDataAuth: {}", entry.records_in_offline_auth)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_single_entry() {
        let afl = Afl(hex!("08010301").to_vec());
        let entries = afl.entries().unwrap();
        assert_eq!(
            entries,
            vec![AflEntry {
                sfi: 1,
                first_record: 1,
                last_record: 3,
                records_in_offline_auth: 1,
            }]
        );
        assert_eq!(entries[0].records().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_truncated() {
        assert_eq!(Afl(hex!("0801030110").to_vec()).entries(), Err(DecodeError::AflTruncated(1)));
        assert_eq!(Afl(hex!("080103").to_vec()).entries(), Err(DecodeError::AflTruncated(3)));
        assert!(Afl::default().entries().unwrap().is_empty());
    }

    #[test]
    fn test_display() {
        let afl = Afl(hex!("08010100 10010301").to_vec());
        assert_eq!(
            afl.to_string(),
            "[\n  - SFI: 1\n    Records: 1-1\n    RecordsInDataAuth: 0\n  - SFI: 2\n    Records: 1-3\n    RecordsInDataAuth: 1\n]"
        );
        assert_eq!(Afl::default().to_string(), "[]");
        assert_eq!(Afl(vec![0x08]).to_string(), "invalid: AFL entry is too short (1 bytes)");
    }
}
