//! Transport traits for APDU communication with cards
//!
//! A transport is the physical driver: it exchanges raw byte buffers with a
//! card and has no knowledge of command structure or continuation.

pub mod error;

use std::fmt;

use bytes::Bytes;
pub use error::TransportError;
use tracing::{debug, trace};

/// Trait for basic card transports
pub trait CardTransport: Send + fmt::Debug {
    /// Error type returned by the transport
    type Error: Into<TransportError> + fmt::Debug;

    /// Send raw APDU bytes to card and return response bytes
    ///
    /// One call is one physical transmission. Implementations must not
    /// interpret the reply or issue follow-up commands such as GET RESPONSE.
    fn transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error> {
        trace!(command = %hex::encode(command), "Transmitting raw command");
        let result = self.do_transmit_raw(command);
        match &result {
            Ok(response) => {
                trace!(response = %hex::encode(response), "Received raw response");
            }
            Err(e) => {
                debug!(error = ?e, "Transport error during transmission");
            }
        }
        result
    }

    /// Internal implementation of transmit_raw
    /// This is the method that concrete implementations should override
    fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error>;

    /// Check if the transport is connected to a physical card
    fn is_connected(&self) -> bool;

    /// Reset the transport connection
    fn reset(&mut self) -> Result<(), Self::Error>;
}

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockLog, MockTransport};

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use bytes::Bytes;
    use parking_lot::Mutex;

    use super::{CardTransport, TransportError};

    /// Shared record of every command a [`MockTransport`] received
    #[derive(Debug, Clone, Default)]
    pub struct MockLog(Arc<Mutex<Vec<Bytes>>>);

    impl MockLog {
        /// Commands sent so far, in order
        pub fn commands(&self) -> Vec<Bytes> {
            self.0.lock().clone()
        }

        /// Number of physical transmissions so far
        pub fn len(&self) -> usize {
            self.0.lock().len()
        }

        /// Whether nothing was transmitted yet
        pub fn is_empty(&self) -> bool {
            self.0.lock().is_empty()
        }
    }

    /// Scripted transport replaying canned replies in order
    #[derive(Debug, Default)]
    pub struct MockTransport {
        /// Replies still to be returned
        pub responses: VecDeque<Bytes>,
        /// Whether the transport is connected
        pub connected: bool,
        log: MockLog,
    }

    impl MockTransport {
        /// Create a new mock transport with the given replies
        pub fn new<I, B>(responses: I) -> Self
        where
            I: IntoIterator<Item = B>,
            B: Into<Bytes>,
        {
            Self {
                responses: responses.into_iter().map(Into::into).collect(),
                connected: true,
                log: MockLog::default(),
            }
        }

        /// Queue one more reply
        pub fn push_response(&mut self, response: impl Into<Bytes>) {
            self.responses.push_back(response.into());
        }

        /// Handle to the command log, usable after the transport is moved
        pub fn log(&self) -> MockLog {
            self.log.clone()
        }
    }

    impl CardTransport for MockTransport {
        type Error = TransportError;

        fn do_transmit_raw(&mut self, command: &[u8]) -> Result<Bytes, Self::Error> {
            if !self.connected {
                return Err(TransportError::Connection);
            }

            self.log.0.lock().push(Bytes::copy_from_slice(command));
            self.responses
                .pop_front()
                .ok_or(TransportError::Transmission)
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        fn reset(&mut self) -> Result<(), Self::Error> {
            self.connected = true;
            self.log.0.lock().clear();
            Ok(())
        }
    }
}
