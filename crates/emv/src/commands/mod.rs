//! Command builders for the EMV payment application
//!
//! Each builder returns the fixed shape [`Command`](paycard_apdu_core::Command)
//! for one card operation. Sending is left to
//! [`LowLevelCommands`](crate::LowLevelCommands).

pub mod generate_ac;
pub mod gpo;
pub mod read_record;
pub mod select;
pub mod verify;

pub use generate_ac::{CryptogramType, generate_ac};
pub use gpo::{command_template, get_processing_options};
pub use read_record::read_record;
pub use select::{PSE_CONTACT, PSE_CONTACTLESS, select_by_name};
pub use verify::{PinBlock, verify_plaintext_pin};
