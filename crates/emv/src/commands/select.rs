//! SELECT by DF name

use bytes::Bytes;
use paycard_apdu_core::{Class, Command, Instruction};

/// Payment System Environment for contact cards
pub const PSE_CONTACT: &[u8] = b"1PAY.SYS.DDF01";

/// Proximity Payment System Environment for contactless cards
pub const PSE_CONTACTLESS: &[u8] = b"2PAY.SYS.DDF01";

/// Select by DF name
const P1_BY_NAME: u8 = 0x04;
/// First or only occurrence
const P2_FIRST: u8 = 0x00;

/// SELECT the application or directory named `df_name`
pub fn select_by_name(df_name: impl Into<Bytes>) -> Command {
    Command::new(Class::INTERINDUSTRY, Instruction::SELECT, P1_BY_NAME, P2_FIRST).with_data(df_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use paycard_apdu_core::ShortLength;

    #[test]
    fn test_select_pse() {
        let cmd = select_by_name(PSE_CONTACT);
        assert_eq!(
            cmd.to_bytes(&ShortLength).unwrap().as_ref(),
            hex!("00A404000E315041592E5359532E444446303100")
        );
    }

    #[test]
    fn test_select_aid() {
        let cmd = select_by_name(hex!("A0000000041010").to_vec());
        assert_eq!(cmd.p1, 0x04);
        assert_eq!(cmd.p2, 0x00);
        assert_eq!(
            cmd.to_bytes(&ShortLength).unwrap().as_ref(),
            hex!("00A4040007A000000004101000")
        );
    }
}
