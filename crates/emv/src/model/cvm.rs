//! Cardholder Verification Method list (tag `8E`)

use std::fmt;

use paycard_tlv::{Tlv, TlvValue, primitive, tag_hex};

use crate::DecodeError;

/// Cardholder verification rules with their amount thresholds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CvmList {
    /// Amount X, in the application currency
    pub amount: u32,
    /// Amount Y, in the application currency
    pub second_amount: u32,
    /// Rules in order of preference
    pub rules: Vec<CvRule>,
}

impl CvmList {
    /// Decode the value bytes of a CVM list
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let (amount, rest) = split_u32(data).ok_or(DecodeError::CvmMissingAmount)?;
        let (second_amount, rest) = split_u32(rest).ok_or(DecodeError::CvmMissingSecondAmount)?;

        let pairs = rest.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return Err(DecodeError::CvmTrailingBytes(pairs.remainder().len()));
        }
        let rules = pairs
            .map(|pair| CvRule {
                cvm_code: pair[0],
                condition_code: pair[1],
            })
            .collect();

        Ok(Self {
            amount,
            second_amount,
            rules,
        })
    }

    /// Whether the list holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn split_u32(data: &[u8]) -> Option<(u32, &[u8])> {
    let (head, rest) = data.split_first_chunk::<4>()?;
    Some((u32::from_be_bytes(*head), rest))
}

impl TlvValue for CvmList {
    fn decode_tlv(tlv: &Tlv) -> paycard_tlv::Result<Self> {
        Self::decode(primitive(tlv)?).map_err(|e| paycard_tlv::Error::invalid_value(tag_hex(tlv), e))
    }
}

impl fmt::Display for CvmList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Amount X: {}, Amount Y: {}", self.amount, self.second_amount)?;
        for rule in &self.rules {
            writeln!(
                f,
                "  - {} ({}){}",
                rule.description(),
                rule.condition(self.amount, self.second_amount),
                if rule.fails_if_unsuccessful() {
                    ""
                } else {
                    ", apply next if unsuccessful"
                }
            )?;
        }
        Ok(())
    }
}

/// One cardholder verification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CvRule {
    /// Method code, with the "apply next rule" flag in bit 7
    pub cvm_code: u8,
    /// Condition under which the method applies
    pub condition_code: u8,
}

impl CvRule {
    const APPLY_NEXT: u8 = 0x40;
    const METHOD_MASK: u8 = 0x3F;

    /// Method bits, without the "apply next rule" flag
    pub const fn method(&self) -> u8 {
        self.cvm_code & Self::METHOD_MASK
    }

    /// Cardholder verification fails when this rule is unsuccessful, rather
    /// than moving on to the next rule
    pub const fn fails_if_unsuccessful(&self) -> bool {
        self.cvm_code & Self::APPLY_NEXT == 0
    }

    /// Description of the verification method
    pub const fn description(&self) -> &'static str {
        match self.method() {
            0b00_0000 => "Fail CVM processing",
            0b00_0001 => "Plaintext PIN verification performed by ICC",
            0b00_0010 => "Enciphered PIN verified online",
            0b00_0011 => "Plaintext PIN verification performed by ICC and signature",
            0b00_0100 => "Enciphered PIN verification performed by ICC",
            0b00_0101 => "Enciphered PIN verification performed by ICC and signature",
            0b00_0110 => "Facial biometric verified offline (by ICC)",
            0b00_0111 => "Facial biometric verified online",
            0b00_1000 => "Finger biometric verified offline (by ICC)",
            0b00_1001 => "Finger biometric verified online",
            0b00_1010 => "Palm biometric verified offline (by ICC)",
            0b00_1011 => "Palm biometric verified online",
            0b00_1100 => "Iris biometric verified offline (by ICC)",
            0b00_1101 => "Iris biometric verified online",
            0b00_1110 => "Voice biometric verified offline (by ICC)",
            0b00_1111 => "Voice biometric verified online",
            0b01_1110 => "Signature",
            0b01_1111 => "No CVM required",
            0b01_0000..=0b01_1101 => "Reserved for use by EMV",
            0b10_0000..=0b10_1111 => "Reserved for use by the individual payment systems",
            0b11_0000..=0b11_1110 => "Reserved for use by the issuer",
            _ => "This value is not available for use",
        }
    }

    /// Description of the condition code, with amounts X and Y filled in
    pub fn condition(&self, amount: u32, second_amount: u32) -> String {
        match self.condition_code {
            0x00 => "Always".into(),
            0x01 => "If unattended cash".into(),
            0x02 => {
                "If not unattended cash and not manual cash and not purchase with cashback".into()
            }
            0x03 => "If terminal supports the CVM".into(),
            0x04 => "If manual cash".into(),
            0x05 => "If purchase with cashback".into(),
            0x06 => format!("If transaction is in the application currency and is under {amount}"),
            0x07 => format!("If transaction is in the application currency and is over {amount}"),
            0x08 => format!(
                "If transaction is in the application currency and is under {second_amount}"
            ),
            0x09 => format!(
                "If transaction is in the application currency and is over {second_amount}"
            ),
            0x0A..=0x7F => "RFU".into(),
            0x80..=0xFF => "Reserved for use by individual payment systems".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_decode_rules() {
        let list = CvmList::decode(&hex!("000003E8 00000000 4103 1E03 1F00")).unwrap();
        assert_eq!(list.amount, 1000);
        assert_eq!(list.second_amount, 0);
        assert_eq!(list.rules.len(), 3);

        let pin = list.rules[0];
        assert_eq!(pin.description(), "Plaintext PIN verification performed by ICC");
        assert!(!pin.fails_if_unsuccessful());
        assert_eq!(pin.condition(list.amount, 0), "If terminal supports the CVM");

        let signature = list.rules[1];
        assert_eq!(signature.description(), "Signature");
        assert!(signature.fails_if_unsuccessful());

        assert_eq!(list.rules[2].description(), "No CVM required");
    }

    #[test]
    fn test_amounts_only() {
        let list = CvmList::decode(&hex!("0000000000000000")).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_malformed_lists() {
        assert_eq!(CvmList::decode(&hex!("000000")), Err(DecodeError::CvmMissingAmount));
        assert_eq!(
            CvmList::decode(&hex!("00000000 0000")),
            Err(DecodeError::CvmMissingSecondAmount)
        );
        assert_eq!(
            CvmList::decode(&hex!("00000000 00000000 4103 1E")),
            Err(DecodeError::CvmTrailingBytes(1))
        );
    }

    #[test]
    fn test_conditions() {
        let rule = CvRule {
            cvm_code: 0x02,
            condition_code: 0x06,
        };
        assert_eq!(
            rule.condition(500, 0),
            "If transaction is in the application currency and is under 500"
        );
        let rule = CvRule {
            cvm_code: 0x3F,
            condition_code: 0x0A,
        };
        assert_eq!(rule.condition(0, 0), "RFU");
        assert_eq!(rule.description(), "This value is not available for use");
    }
}
