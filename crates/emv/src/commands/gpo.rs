//! GET PROCESSING OPTIONS

use bytes::Bytes;
use paycard_apdu_core::{Class, Command, Instruction};

/// Tag of the command template wrapping PDOL related data
const COMMAND_TEMPLATE: u8 = 0x83;

/// GET PROCESSING OPTIONS carrying `data`, usually a [`command_template`]
pub fn get_processing_options(data: impl Into<Bytes>) -> Command {
    Command::new(Class::PROPRIETARY, Instruction::GET_PROCESSING_OPTIONS, 0x00, 0x00).with_data(data)
}

/// Wrap PDOL related data in the command template (tag `83`)
///
/// An empty PDOL yields `83 00`.
pub fn command_template(pdol_data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pdol_data.len() + 3);
    out.push(COMMAND_TEMPLATE);
    // BER definite length
    match pdol_data.len() {
        len @ 0..=0x7F => out.push(len as u8),
        len @ 0x80..=0xFF => out.extend_from_slice(&[0x81, len as u8]),
        len => out.extend_from_slice(&[0x82, (len >> 8) as u8, len as u8]),
    }
    out.extend_from_slice(pdol_data);
    out
}
