//! Data object lists (PDOL, CDOL, DDOL)
//!
//! A DOL is a concatenation of tag and length pairs without values. The
//! terminal answers it with the concatenated values, each exactly the
//! requested length.

use std::fmt;

use iso7816_tlv::ber::Tlv;
use tracing::debug;

use crate::{Error, Result, TlvValue, primitive};

/// One requested data object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataObject {
    /// BER tag bytes
    pub tag: Vec<u8>,
    /// Number of value bytes requested
    pub length: usize,
}

/// Ordered list of requested data objects
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DataObjectList(pub Vec<DataObject>);

impl DataObjectList {
    /// Parse the tag and length pairs of a DOL
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut objects = Vec::new();
        let mut offset = 0;

        while offset < bytes.len() {
            let tag_start = offset;
            let first = bytes[offset];
            offset += 1;
            // Low five bits set: subsequent tag bytes follow while b8 is set
            if first & 0x1F == 0x1F {
                loop {
                    let byte = *bytes.get(offset).ok_or(Error::TruncatedDol(offset))?;
                    offset += 1;
                    if byte & 0x80 == 0 {
                        break;
                    }
                }
            }
            let tag = bytes[tag_start..offset].to_vec();

            let first_len = *bytes.get(offset).ok_or(Error::TruncatedDol(offset))?;
            offset += 1;
            let length = match first_len {
                0x00..=0x7F => first_len as usize,
                // 81 xx and 82 xx xx, nothing longer fits in a response
                0x81 | 0x82 => {
                    let count = (first_len & 0x7F) as usize;
                    let len_bytes = bytes
                        .get(offset..offset + count)
                        .ok_or(Error::TruncatedDol(offset))?;
                    offset += count;
                    len_bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize)
                }
                _ => {
                    debug!(length = first_len, offset = offset - 1, "rejecting DOL length field");
                    return Err(Error::InvalidDolLength(offset - 1));
                }
            };

            objects.push(DataObject { tag, length });
        }

        Ok(Self(objects))
    }

    /// Requested data objects in order
    pub fn iter(&self) -> impl Iterator<Item = &DataObject> {
        self.0.iter()
    }

    /// Whether the list requests nothing
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the requested value lengths
    pub fn total_length(&self) -> usize {
        self.0.iter().fold(0, |total, object| total.saturating_add(object.length))
    }

    /// Build the concatenated values answering this list.
    ///
    /// Objects the lookup does not know are zero filled; values longer than
    /// requested are truncated and shorter ones are padded with zeros on the
    /// right.
    pub fn build<F>(&self, mut lookup: F) -> Vec<u8>
    where
        F: FnMut(&DataObject) -> Option<Vec<u8>>,
    {
        let mut out = Vec::with_capacity(self.total_length());
        for object in &self.0 {
            let mut value = lookup(object).unwrap_or_default();
            value.resize(object.length, 0);
            out.extend_from_slice(&value);
        }
        out
    }
}

impl TlvValue for DataObjectList {
    fn decode_tlv(tlv: &Tlv) -> Result<Self> {
        Self::parse(primitive(tlv)?)
    }
}

impl fmt::Display for DataObjectList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, object) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}({:02X})", hex::encode_upper(&object.tag), object.length)?;
        }
        Ok(())
    }
}
