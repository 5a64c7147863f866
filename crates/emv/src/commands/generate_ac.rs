//! GENERATE APPLICATION CRYPTOGRAM

use bytes::Bytes;
use derive_more::Display;
use paycard_apdu_core::{Class, Command, Instruction};

/// Cryptogram requested from the card, carried in the top two bits of P1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[repr(u8)]
pub enum CryptogramType {
    /// Application Authentication Cryptogram, transaction declined
    #[display("AAC")]
    Aac = 0b00,
    /// Transaction Certificate, transaction approved
    #[display("TC")]
    Tc = 0b01,
    /// Authorisation Request Cryptogram, online authorisation requested
    #[display("ARQC")]
    Arqc = 0b10,
}

impl CryptogramType {
    /// Reference control parameter for P1
    pub const fn p1(self) -> u8 {
        (self as u8) << 6
    }
}

/// GENERATE AC for `cryptogram` over the CDOL related `transaction_data`
pub fn generate_ac(cryptogram: CryptogramType, transaction_data: impl Into<Bytes>) -> Command {
    Command::new(Class::PROPRIETARY, Instruction::GENERATE_AC, cryptogram.p1(), 0x00)
        .with_data(transaction_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use paycard_apdu_core::ShortLength;

    #[test]
    fn test_reference_control_parameter() {
        assert_eq!(CryptogramType::Aac.p1(), 0x00);
        assert_eq!(CryptogramType::Tc.p1(), 0x40);
        assert_eq!(CryptogramType::Arqc.p1(), 0x80);
        assert_eq!(CryptogramType::Arqc.to_string(), "ARQC");
    }

    #[test]
    fn test_generate_arqc_framing() {
        let cmd = generate_ac(CryptogramType::Arqc, hex!("000000001000").to_vec());
        assert_eq!(
            cmd.to_bytes(&ShortLength).unwrap().as_ref(),
            hex!("80AE80000600000000100000")
        );
    }
}
