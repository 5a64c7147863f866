//! EMV payment application support
//!
//! Command builders, a data model for the BER-TLV payloads of EMV cards and
//! two layers of clients over a [`RawExchange`](paycard_apdu_core::RawExchange):
//!
//! - [`LowLevelCommands`]: one card command in, raw payload out
//! - [`HighLevelCommands`]: decoded structures and composite flows such as
//!   reading the payment system directory
//!
//! ```no_run
//! use paycard_apdu_core::MockTransport;
//! use paycard_emv::{Client, HighLevelCommands};
//!
//! # fn main() -> paycard_emv::Result<()> {
//! let client = Client::new(MockTransport::new([vec![0x90, 0x00]]));
//! for record in client.get_pse(false)? {
//!     for app in record.applications() {
//!         println!("{} {:?}", app.aid_hex(), app.display_name());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]

pub mod commands;
pub mod model;

mod client;
mod error;
mod high_level;
mod low_level;

pub use client::Client;
pub use error::{DecodeError, Error, Result};
pub use high_level::{HighLevelClient, HighLevelCommands};
pub use low_level::{LowLevelClient, LowLevelCommands};

pub use commands::CryptogramType;
pub use model::Merge;

// Dependencies of the emv-tool binary
#[cfg(feature = "cli")]
use clap as _;
#[cfg(feature = "cli")]
use paycard_apdu_transport_pcsc as _;
#[cfg(feature = "cli")]
use tracing_subscriber as _;
