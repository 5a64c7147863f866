//! Continuation engine
//!
//! [`CardExecutor`] turns one logical command into as many physical
//! exchanges as the ISO 7816-4 continuation protocol requires:
//!
//! - `6Cxx`: the command is resent once with `Le = xx`; a second `6Cxx` is
//!   [`ProtocolError::UnresolvedLength`]
//! - `61xx`: GET RESPONSE is issued with `Le = xx` until the card stops
//!   answering `61xx`, bounded by [`ExecutorConfig::max_response_chain`]
//!
//! Any other status word is terminal and returned to the caller as-is.

pub mod config;
pub mod error;

use std::fmt;
use std::sync::Arc;

use bytes::BytesMut;
use parking_lot::Mutex;
use tracing::{Level, debug, info, instrument, warn};

use crate::command::Command;
use crate::response::Response;
use crate::response::status::StatusWord;
use crate::transport::CardTransport;
use crate::{Error, Result};
use config::{ContinuationMode, ExecutorConfig};
use error::ProtocolError;

/// Capability to exchange one logical command with a card
pub trait RawExchange: Send + Sync + fmt::Debug {
    /// Send a command and resolve every continuation condition.
    ///
    /// The returned response never carries `61xx` or `6Cxx`; other
    /// non-success trailers are left for the caller to interpret.
    fn send_command(&self, command: &Command) -> Result<Response>;
}

impl<R: RawExchange + ?Sized> RawExchange for &R {
    fn send_command(&self, command: &Command) -> Result<Response> {
        (**self).send_command(command)
    }
}

impl<R: RawExchange + ?Sized> RawExchange for Arc<R> {
    fn send_command(&self, command: &Command) -> Result<Response> {
        (**self).send_command(command)
    }
}

/// Card executor owning one transport
///
/// The transport sits behind a mutex that is held for the whole of
/// [`RawExchange::send_command`], continuation exchanges included, so
/// concurrent callers never interleave on the card channel.
#[derive(Debug)]
pub struct CardExecutor<T: CardTransport> {
    transport: Mutex<T>,
    config: ExecutorConfig,
}

impl<T: CardTransport> CardExecutor<T> {
    /// Create a new card executor with the default configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ExecutorConfig::default())
    }

    /// Create a new card executor with the given configuration
    pub fn with_config(transport: T, config: ExecutorConfig) -> Self {
        Self {
            transport: Mutex::new(transport),
            config,
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Whether the underlying transport reports a connected card
    pub fn is_connected(&self) -> bool {
        self.transport.lock().is_connected()
    }

    /// Reset the underlying transport
    pub fn reset(&self) -> Result<()> {
        self.transport
            .lock()
            .reset()
            .map_err(|e| Error::Transport(e.into()))
    }

    /// Take ownership of the transport and return it
    pub fn into_transport(self) -> T {
        self.transport.into_inner()
    }

    /// Frame, transmit and parse a single physical exchange
    fn exchange(&self, transport: &mut T, command: &Command) -> Result<Response> {
        let bytes = command.to_bytes(self.config.length_encoder.as_ref())?;
        let raw = transport
            .transmit_raw(&bytes)
            .map_err(|e| Error::Transport(e.into()))?;
        Ok(Response::from_bytes(&raw)?)
    }

    /// Exchange, resending once with the corrected Le on `6Cxx`
    fn exchange_with_length_retry(&self, transport: &mut T, command: &Command) -> Result<Response> {
        let response = self.exchange(transport, command)?;
        let Some(correct) = response.status().wrong_length() else {
            return Ok(response);
        };

        debug!(
            previous = command.le,
            correct, "Wrong expected length, resending command"
        );
        let retry = command.clone().with_le(correct);
        let response = self.exchange(transport, &retry)?;

        match response.status().wrong_length() {
            Some(reported) => Err(ProtocolError::UnresolvedLength {
                requested: correct,
                reported,
            }
            .into()),
            None => Ok(response),
        }
    }
}

impl<T: CardTransport> RawExchange for CardExecutor<T> {
    #[instrument(level = "trace", skip_all, fields(ins = %command.instruction))]
    fn send_command(&self, command: &Command) -> Result<Response> {
        let mut transport = self.transport.lock();
        debug!(%command, "Sending command");

        let mut response = self.exchange_with_length_retry(&mut transport, command)?;
        let mut chained = 0;

        while let Some(available) = response.status().more_data_available() {
            if chained == self.config.max_response_chain {
                return Err(ProtocolError::ChainLimitExceeded(chained).into());
            }
            chained += 1;

            debug!(available, chained, "More data available, issuing GET RESPONSE");
            let get_response = Command::get_response(self.config.get_response_class, available);
            let next = self.exchange_with_length_retry(&mut transport, &get_response)?;

            response = match self.config.continuation {
                ContinuationMode::Replace => next,
                ContinuationMode::Concatenate => {
                    let mut data = BytesMut::from(response.data().as_ref());
                    data.extend_from_slice(next.data());
                    Response::new(data.freeze(), next.status())
                }
            };
        }

        log_status(response.status(), response.data().len());
        Ok(response)
    }
}

fn log_status(status: StatusWord, len: usize) {
    let level = status.tracing_level();
    if level == Level::DEBUG {
        debug!(%status, len, "{}", status.description());
    } else if level == Level::INFO {
        info!(%status, len, "{}", status.description());
    } else {
        warn!(%status, len, "{}", status.description());
    }
}
