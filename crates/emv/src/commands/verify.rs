//! VERIFY with a plaintext PIN

use paycard_apdu_core::{Class, Command, Instruction};

use crate::DecodeError;

/// Plaintext PIN, format as defined by EMV
const P2_PLAINTEXT_PIN: u8 = 0x80;
/// Control field of a plaintext PIN block
const CONTROL_PLAINTEXT: u8 = 0x2;
/// Nibbles available for digits and filler
const PIN_NIBBLES: usize = 14;
const FILLER: u8 = 0xF;

/// Minimum number of PIN digits
pub const MIN_PIN_DIGITS: usize = 4;
/// Maximum number of PIN digits
pub const MAX_PIN_DIGITS: usize = 12;

/// Eight byte plaintext PIN block
///
/// Nibbles are `C N P P P P P/F ... F`: control field `2`, number of digits,
/// one nibble per digit and `F` filler.
#[derive(Clone, PartialEq, Eq)]
pub struct PinBlock([u8; 8]);

impl PinBlock {
    /// Build a PIN block from digit values
    pub fn new(digits: &[u8]) -> Result<Self, DecodeError> {
        if digits.len() < MIN_PIN_DIGITS {
            return Err(DecodeError::PinTooShort(digits.len()));
        }
        if digits.len() > MAX_PIN_DIGITS {
            return Err(DecodeError::PinTooLong(digits.len()));
        }
        if let Some(&digit) = digits.iter().find(|&&d| d > 9) {
            return Err(DecodeError::PinDigitOutOfRange(digit));
        }

        let nibbles = [CONTROL_PLAINTEXT, digits.len() as u8]
            .into_iter()
            .chain(digits.iter().copied())
            .chain(std::iter::repeat_n(FILLER, PIN_NIBBLES - digits.len()));

        let mut block = [0u8; 8];
        for (i, nibble) in nibbles.enumerate() {
            block[i / 2] |= if i % 2 == 0 { nibble << 4 } else { nibble };
        }
        Ok(Self(block))
    }

    /// Parse a PIN given as ASCII digits
    pub fn from_ascii(pin: &str) -> Result<Self, DecodeError> {
        let digits = pin
            .bytes()
            .map(|b| b.checked_sub(b'0').filter(|d| *d <= 9).ok_or(DecodeError::PinDigitOutOfRange(b)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(&digits)
    }

    /// The block bytes
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

// Never print the PIN
impl std::fmt::Debug for PinBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PinBlock(..)")
    }
}

/// VERIFY the plaintext `pin`
pub fn verify_plaintext_pin(pin: &PinBlock) -> Command {
    Command::new(Class::INTERINDUSTRY, Instruction::VERIFY, 0x00, P2_PLAINTEXT_PIN)
        .with_data(pin.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use paycard_apdu_core::ShortLength;

    #[test]
    fn test_pin_block_layout() {
        let block = PinBlock::new(&[1, 2, 3, 4]).unwrap();
        assert_eq!(block.as_bytes(), &hex!("241234FFFFFFFFFF"));

        let block = PinBlock::new(&[9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 1, 2]).unwrap();
        assert_eq!(block.as_bytes(), &hex!("2C987654321012FF"));

        assert_eq!(PinBlock::from_ascii("1234").unwrap(), PinBlock::new(&[1, 2, 3, 4]).unwrap());
    }

    #[test]
    fn test_pin_validation() {
        assert_eq!(PinBlock::new(&[1, 2, 3]), Err(DecodeError::PinTooShort(3)));
        assert_eq!(PinBlock::new(&[0; 13]), Err(DecodeError::PinTooLong(13)));
        assert_eq!(PinBlock::new(&[1, 2, 10, 4]), Err(DecodeError::PinDigitOutOfRange(10)));
        assert_eq!(PinBlock::from_ascii("12a4"), Err(DecodeError::PinDigitOutOfRange(b'a')));
    }

    #[test]
    fn test_verify_framing() {
        let block = PinBlock::new(&[1, 2, 3, 4]).unwrap();
        let cmd = verify_plaintext_pin(&block);
        assert_eq!(
            cmd.to_bytes(&ShortLength).unwrap().as_ref(),
            hex!("002000800824 1234FFFFFFFFFF 00")
        );
        assert_eq!(format!("{block:?}"), "PinBlock(..)");
    }
}
