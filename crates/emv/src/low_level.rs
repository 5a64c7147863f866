//! Protocol level EMV commands
//!
//! Each command is framed by a builder from [`commands`](crate::commands),
//! sent through a [`RawExchange`] and answered with the raw payload. A
//! non-success trailer becomes [`Error::Apdu`](crate::Error::Apdu) carrying
//! the [`TrailerError`](paycard_apdu_core::TrailerError).

use std::fmt;

use bytes::Bytes;
use paycard_apdu_core::{Command, RawExchange};
use tracing::{debug, instrument};

use crate::Result;
use crate::commands::{self, CryptogramType, PinBlock};

/// Card operations returning undecoded payloads
pub trait LowLevelCommands: Send + Sync + fmt::Debug {
    /// SELECT by DF name
    fn select_by_name(&self, df_name: &[u8]) -> Result<Bytes>;

    /// READ RECORD `record` of file `sfi`
    fn read_record(&self, sfi: u8, record: u8) -> Result<Bytes>;

    /// GET PROCESSING OPTIONS with `data` as the command payload
    fn get_processing_options(&self, data: &[u8]) -> Result<Bytes>;

    /// GENERATE AC requesting `cryptogram` over `transaction_data`
    fn generate_ac(&self, cryptogram: CryptogramType, transaction_data: &[u8]) -> Result<Bytes>;

    /// VERIFY a plaintext PIN given as digit values
    ///
    /// Fails before anything is sent when the PIN has fewer than 4 or more
    /// than 12 digits, or a digit above 9.
    fn verify_plaintext_pin(&self, digits: &[u8]) -> Result<Bytes>;
}

impl<L: LowLevelCommands + ?Sized> LowLevelCommands for &L {
    fn select_by_name(&self, df_name: &[u8]) -> Result<Bytes> {
        (**self).select_by_name(df_name)
    }

    fn read_record(&self, sfi: u8, record: u8) -> Result<Bytes> {
        (**self).read_record(sfi, record)
    }

    fn get_processing_options(&self, data: &[u8]) -> Result<Bytes> {
        (**self).get_processing_options(data)
    }

    fn generate_ac(&self, cryptogram: CryptogramType, transaction_data: &[u8]) -> Result<Bytes> {
        (**self).generate_ac(cryptogram, transaction_data)
    }

    fn verify_plaintext_pin(&self, digits: &[u8]) -> Result<Bytes> {
        (**self).verify_plaintext_pin(digits)
    }
}

/// [`LowLevelCommands`] over any [`RawExchange`]
#[derive(Debug, Clone)]
pub struct LowLevelClient<E> {
    exchange: E,
}

impl<E: RawExchange> LowLevelClient<E> {
    /// Create a client sending through `exchange`
    pub const fn new(exchange: E) -> Self {
        Self { exchange }
    }

    /// The underlying exchange
    pub const fn exchange(&self) -> &E {
        &self.exchange
    }

    fn transmit(&self, command: &Command) -> Result<Bytes> {
        let (data, error) = self.exchange.send_command(command)?.into_parts();
        match error {
            None => Ok(data),
            Some(error) => {
                debug!(%error, "Command rejected by the card");
                Err(error.into())
            }
        }
    }
}

impl<E: RawExchange> LowLevelCommands for LowLevelClient<E> {
    #[instrument(level = "debug", skip_all, fields(df_name = %hex::encode_upper(df_name)))]
    fn select_by_name(&self, df_name: &[u8]) -> Result<Bytes> {
        self.transmit(&commands::select_by_name(df_name.to_vec()))
    }

    #[instrument(level = "debug", skip(self))]
    fn read_record(&self, sfi: u8, record: u8) -> Result<Bytes> {
        self.transmit(&commands::read_record(sfi, record))
    }

    #[instrument(level = "debug", skip_all)]
    fn get_processing_options(&self, data: &[u8]) -> Result<Bytes> {
        self.transmit(&commands::get_processing_options(data.to_vec()))
    }

    #[instrument(level = "debug", skip_all, fields(%cryptogram))]
    fn generate_ac(&self, cryptogram: CryptogramType, transaction_data: &[u8]) -> Result<Bytes> {
        self.transmit(&commands::generate_ac(cryptogram, transaction_data.to_vec()))
    }

    #[instrument(level = "debug", skip_all)]
    fn verify_plaintext_pin(&self, digits: &[u8]) -> Result<Bytes> {
        let block = PinBlock::new(digits)?;
        self.transmit(&commands::verify_plaintext_pin(&block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DecodeError, Error};
    use hex_literal::hex;
    use paycard_apdu_core::{CardExecutor, MockTransport, TrailerError};

    #[test]
    fn test_payload_on_success() {
        let transport = MockTransport::new([hex!("6F009000").to_vec()]);
        let log = transport.log();
        let client = LowLevelClient::new(CardExecutor::new(transport));

        let data = client.select_by_name(b"1PAY.SYS.DDF01").unwrap();
        assert_eq!(data.as_ref(), hex!("6F00"));
        assert_eq!(log.commands()[0][..5], hex!("00A404000E"));
    }

    #[test]
    fn test_trailer_error() {
        let transport = MockTransport::new([hex!("6A83").to_vec()]);
        let client = LowLevelClient::new(CardExecutor::new(transport));

        let err = client.read_record(1, 9).unwrap_err();
        assert!(err.is_record_not_found());
        assert_eq!(err.trailer(), Some(TrailerError::RecordNotFound));
    }

    #[test]
    fn test_verify_framing() {
        let transport = MockTransport::new([hex!("9000").to_vec()]);
        let log = transport.log();
        let client = LowLevelClient::new(CardExecutor::new(transport));

        client.verify_plaintext_pin(&[1, 2, 3, 4]).unwrap();
        assert_eq!(log.commands()[0].as_ref(), hex!("00200080 08 241234FFFFFFFFFF 00"));
    }

    #[test]
    fn test_invalid_pin_is_not_sent() {
        let transport = MockTransport::new(Vec::<Vec<u8>>::new());
        let log = transport.log();
        let client = LowLevelClient::new(CardExecutor::new(transport));

        let err = client.verify_plaintext_pin(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::PinTooShort(3))));
        assert!(log.is_empty());
    }

    #[test]
    fn test_generate_ac_through_reference() {
        let transport = MockTransport::new([hex!("80 0B 80 0001 1122334455667788 9000").to_vec()]);
        let log = transport.log();
        let executor = CardExecutor::new(transport);
        let client = LowLevelClient::new(&executor);

        let data = client.generate_ac(CryptogramType::Tc, &hex!("0102")).unwrap();
        assert_eq!(data.len(), 13);
        assert_eq!(log.commands()[0].as_ref(), hex!("80AE4000020102 00"));
    }
}
