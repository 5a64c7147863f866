//! READ RECORD

use paycard_apdu_core::{Class, Command, Instruction};

/// P2 low bits: P1 is a record number
const P2_RECORD_NUMBER: u8 = 0b100;

/// READ RECORD `record` of the file with short identifier `sfi`
///
/// The SFI occupies the upper five bits of P2.
pub const fn read_record(sfi: u8, record: u8) -> Command {
    Command::new(
        Class::INTERINDUSTRY,
        Instruction::READ_RECORD,
        record,
        (sfi << 3) | P2_RECORD_NUMBER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use paycard_apdu_core::ShortLength;

    #[test]
    fn test_read_record_addressing() {
        let cmd = read_record(1, 1);
        assert_eq!(cmd.to_bytes(&ShortLength).unwrap().as_ref(), hex!("00B2010C00"));

        let cmd = read_record(2, 5);
        assert_eq!(cmd.p1, 5);
        assert_eq!(cmd.p2, 0x14);
    }
}
