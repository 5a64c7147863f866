//! PC/SC transport implementation

use std::ffi::CString;
use std::fmt;

use bytes::Bytes;
use paycard_apdu_core::CardTransport;
use pcsc::{Card, Context, Disposition};
use tracing::{debug, warn};

use crate::config::PcscConfig;
use crate::error::PcscError;

/// Transport implementation using PC/SC
pub struct PcscTransport {
    context: Context,
    card: Option<Card>,
    reader_name: String,
    config: PcscConfig,
}

impl fmt::Debug for PcscTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PcscTransport")
            .field("reader_name", &self.reader_name)
            .field("has_card", &self.card.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl PcscTransport {
    /// Create a new PC/SC transport for the specified reader
    ///
    /// A missing card is not an error here; the connection is retried on
    /// the first transmission.
    pub(crate) fn new(
        context: Context,
        reader_name: &str,
        config: PcscConfig,
    ) -> Result<Self, PcscError> {
        let mut transport = Self {
            context,
            card: None,
            reader_name: reader_name.to_string(),
            config,
        };

        match transport.connect_card() {
            Ok(()) | Err(PcscError::NoCard(_)) => Ok(transport),
            Err(e) => Err(e),
        }
    }

    fn connect_card(&mut self) -> Result<(), PcscError> {
        if self.card.is_some() {
            return Ok(());
        }

        let reader = CString::new(self.reader_name.clone())
            .map_err(|_| PcscError::ReaderNotFound(self.reader_name.clone()))?;

        match self
            .context
            .connect(&reader, self.config.share_mode.into(), self.config.protocols)
        {
            Ok(card) => {
                debug!(reader = %self.reader_name, "Connected to card");
                self.card = Some(card);
                Ok(())
            }
            Err(pcsc::Error::NoSmartcard) => Err(PcscError::NoCard(self.reader_name.clone())),
            Err(pcsc::Error::UnknownReader) => {
                Err(PcscError::ReaderNotFound(self.reader_name.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get the ATR of the current card
    pub fn atr(&self) -> Result<Vec<u8>, PcscError> {
        let card = self
            .card
            .as_ref()
            .ok_or_else(|| PcscError::NoCard(self.reader_name.clone()))?;
        Ok(card.get_attribute_owned(pcsc::Attribute::AtrString)?)
    }

    /// Get the reader name
    pub fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn transmit_once(&mut self, command: &[u8]) -> Result<Bytes, pcsc::Error> {
        let Some(card) = self.card.as_ref() else {
            return Err(pcsc::Error::NoSmartcard);
        };

        let mut buffer = vec![0u8; pcsc::MAX_BUFFER_SIZE_EXTENDED];
        let response = card.transmit(command, &mut buffer)?;
        Ok(Bytes::copy_from_slice(response))
    }
}

impl CardTransport for PcscTransport {
    type Error = PcscError;

    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error> {
        self.connect_card()?;

        match self.transmit_once(command) {
            Ok(response) => Ok(response),
            Err(e @ (pcsc::Error::ResetCard | pcsc::Error::RemovedCard)) => {
                self.card = None;
                if !(self.config.auto_reconnect && e == pcsc::Error::ResetCard) {
                    return Err(e.into());
                }

                warn!(reader = %self.reader_name, "Card was reset, reconnecting");
                self.connect_card()?;
                Ok(self.transmit_once(command)?)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn is_connected(&self) -> bool {
        self.card.is_some()
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        if let Some(card) = self.card.take() {
            if let Err((_, e)) = card.disconnect(Disposition::ResetCard) {
                debug!(error = %e, "Disconnect during reset failed");
            }
        }
        self.connect_card()
    }
}

impl Drop for PcscTransport {
    fn drop(&mut self) {
        if let Some(card) = self.card.take() {
            let _ = card.disconnect(Disposition::LeaveCard);
        }
    }
}
