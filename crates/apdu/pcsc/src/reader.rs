//! Reader listing entries

use std::fmt;

use bytes::Bytes;
use pcsc::{ReaderState, State};

/// A card reader seen by [`PcscDeviceManager::list_readers`](crate::PcscDeviceManager::list_readers)
///
/// The answer to reset is only recorded while a card sits in the reader,
/// so [`has_card`](Self::has_card) and [`atr`](Self::atr) always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcscReader {
    name: String,
    atr: Option<Bytes>,
}

impl PcscReader {
    /// Reader holding a card that answered reset with `atr`
    pub fn with_card(name: impl Into<String>, atr: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            atr: Some(atr.into()),
        }
    }

    /// Reader that is empty or whose status could not be read
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            atr: None,
        }
    }

    pub(crate) fn from_reader_state(state: &ReaderState) -> Self {
        let event = state.event_state();
        let name = state.name().to_string_lossy().into_owned();
        if event.contains(State::PRESENT) && !event.contains(State::EMPTY) {
            Self::with_card(name, Bytes::copy_from_slice(state.atr()))
        } else {
            Self::empty(name)
        }
    }

    /// Reader name as reported by the PC/SC service
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a card is present
    pub const fn has_card(&self) -> bool {
        self.atr.is_some()
    }

    /// Answer to reset of the inserted card
    pub const fn atr(&self) -> Option<&Bytes> {
        self.atr.as_ref()
    }
}

/// `name (no card)` or `name (ATR 3B...)`
impl fmt::Display for PcscReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.atr {
            Some(atr) => write!(f, "{} (ATR {})", self.name, hex::encode_upper(atr)),
            None => write!(f, "{} (no card)", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_card_presence_follows_atr() {
        let reader =
            PcscReader::with_card("ACS ACR39U 00 00", hex!("3B6800000073C84013009000").to_vec());
        assert!(reader.has_card());
        assert_eq!(reader.atr().map(|atr| atr.len()), Some(12));
        assert_eq!(reader.to_string(), "ACS ACR39U 00 00 (ATR 3B6800000073C84013009000)");

        let empty = PcscReader::empty("ACS ACR39U 00 00");
        assert!(!empty.has_card());
        assert_eq!(empty.atr(), None);
        assert_eq!(empty.to_string(), "ACS ACR39U 00 00 (no card)");
    }
}
