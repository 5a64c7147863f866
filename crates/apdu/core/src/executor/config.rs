//! Configuration for the continuation engine

use std::sync::Arc;

use crate::Class;
use crate::command::length::{LengthEncoder, ShortLength};

/// How payloads from successive GET RESPONSE exchanges are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContinuationMode {
    /// Each GET RESPONSE reply replaces the previous response
    #[default]
    Replace,
    /// Payloads are appended to those already received
    Concatenate,
}

/// Configuration for a [`CardExecutor`](super::CardExecutor)
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Encoding used for Lc and Le
    pub length_encoder: Arc<dyn LengthEncoder>,
    /// Handling of `61xx` continuation payloads
    pub continuation: ContinuationMode,
    /// Maximum GET RESPONSE exchanges for one command
    pub max_response_chain: usize,
    /// Class byte used for GET RESPONSE
    pub get_response_class: Class,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            length_encoder: Arc::new(ShortLength),
            continuation: ContinuationMode::Replace,
            max_response_chain: 32,
            get_response_class: Class::INTERINDUSTRY,
        }
    }
}

impl ExecutorConfig {
    /// Set the length encoding strategy
    pub fn with_length_encoder(mut self, encoder: impl LengthEncoder + 'static) -> Self {
        self.length_encoder = Arc::new(encoder);
        self
    }

    /// Set the continuation mode
    pub const fn with_continuation(mut self, mode: ContinuationMode) -> Self {
        self.continuation = mode;
        self
    }

    /// Set the GET RESPONSE chain limit
    pub const fn with_max_response_chain(mut self, max: usize) -> Self {
        self.max_response_chain = max;
        self
    }

    /// Set the class byte used for GET RESPONSE
    pub const fn with_get_response_class(mut self, class: Class) -> Self {
        self.get_response_class = class;
        self
    }
}
