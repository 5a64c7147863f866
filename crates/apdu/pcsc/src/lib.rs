//! PC/SC transport implementation for APDU operations
//!
//! This crate provides an implementation of the `CardTransport` trait from
//! `paycard-apdu-core` using the PC/SC API for communication with smart cards.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use paycard_apdu_core::prelude::*;
//! use paycard_apdu_transport_pcsc::PcscDeviceManager;
//!
//! let manager = PcscDeviceManager::new()?;
//! let readers = manager.list_readers()?;
//!
//! let transport = manager.open_reader(readers[0].name())?;
//! let executor = CardExecutor::new(transport);
//!
//! let select = Command::new(Class::INTERINDUSTRY, Instruction::SELECT, 0x04, 0x00)
//!     .with_data(b"1PAY.SYS.DDF01".to_vec());
//! let response = executor.send_command(&select)?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;
mod reader;
mod transport;

pub use config::{ConnectStrategy, PcscConfig, ShareMode};
pub use error::PcscError;
pub use manager::PcscDeviceManager;
pub use reader::PcscReader;
pub use transport::PcscTransport;

// Re-export some pcsc types for convenience
pub use pcsc::{Protocol, Protocols};
