//! Core traits and types for APDU (Application Protocol Data Unit) operations
//!
//! This crate provides the foundational types for talking to smart cards
//! according to ISO/IEC 7816-4.
//!
//! ## Overview
//!
//! - Framing commands into bytes with a pluggable length encoding
//! - Parsing responses into payload and status word (trailer)
//! - Driving the continuation protocol: `61xx` (GET RESPONSE) and `6Cxx`
//!   (resend with corrected Le) are resolved inside [`CardExecutor`]
//! - Interpreting status words as typed errors
//!
//! The physical driver is supplied by the caller through [`CardTransport`].
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

// Re-export bytes for convenience
pub use bytes::{Bytes, BytesMut};

pub mod class;
pub mod command;
pub mod executor;
pub mod instruction;
pub mod response;
pub mod transport;

mod error;
pub use error::{Error, Result};

pub use class::Class;
pub use command::error::FramingError;
pub use command::length::{BerLength, LengthEncoder, ShortLength};
pub use command::{Command, ExpectedLength};
pub use executor::config::{ContinuationMode, ExecutorConfig};
pub use executor::error::ProtocolError;
pub use executor::{CardExecutor, RawExchange};
pub use instruction::Instruction;
pub use response::error::{ResponseError, TrailerError};
pub use response::status::{StatusClass, StatusWord};
pub use response::Response;
pub use transport::{CardTransport, TransportError};
#[cfg(any(test, feature = "mock"))]
pub use transport::{MockLog, MockTransport};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        Bytes, CardExecutor, CardTransport, Class, Command, Error, Instruction, RawExchange,
        Response, Result, StatusWord, TrailerError,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        let cmd = Command::new(Class::INTERINDUSTRY, Instruction::SELECT, 0x04, 0x00);
        assert_eq!(cmd.class, Class(0x00));
        assert_eq!(cmd.instruction, Instruction(0xA4));
        assert_eq!(cmd.p1, 0x04);
        assert_eq!(cmd.p2, 0x00);

        let resp = Response::new(Bytes::from_static(&[0x01, 0x02, 0x03]), (0x90, 0x00));
        assert!(resp.is_success());
        assert_eq!(resp.data().as_ref(), &[0x01, 0x02, 0x03]);
        assert_eq!(resp.status(), StatusWord::new(0x90, 0x00));
    }
}
