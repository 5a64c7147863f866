//! Client wiring the continuation engine to the EMV command layers

use std::sync::Arc;

use paycard_apdu_core::{
    CardExecutor, CardTransport, Command, ExecutorConfig, RawExchange, Response,
};

use crate::model::{
    FileControlInformation, GenerateAcResponse, GetProcessingOptionsResponse, RecordTemplate,
};
use crate::{HighLevelClient, HighLevelCommands, LowLevelClient, Result};

type SharedExecutor<T> = Arc<CardExecutor<T>>;

/// EMV client over one card transport
///
/// Raw commands, low level commands and decoded commands all go through the
/// same [`CardExecutor`], so they are serialized on the card channel.
#[derive(Debug)]
pub struct Client<T: CardTransport> {
    executor: SharedExecutor<T>,
    high: HighLevelClient<LowLevelClient<SharedExecutor<T>>>,
}

impl<T: CardTransport> Client<T> {
    /// Create a client with the default executor configuration
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ExecutorConfig::default())
    }

    /// Create a client with a custom executor configuration
    pub fn with_config(transport: T, config: ExecutorConfig) -> Self {
        let executor = Arc::new(CardExecutor::with_config(transport, config));
        let high = HighLevelClient::new(LowLevelClient::new(executor.clone()));
        Self { executor, high }
    }

    /// Commands returning undecoded payloads
    pub const fn low_level(&self) -> &LowLevelClient<SharedExecutor<T>> {
        self.high.low_level()
    }

    /// The continuation engine
    pub fn executor(&self) -> &CardExecutor<T> {
        &self.executor
    }
}

impl<T: CardTransport> RawExchange for Client<T> {
    fn send_command(&self, command: &Command) -> paycard_apdu_core::Result<Response> {
        self.executor.send_command(command)
    }
}

impl<T: CardTransport> HighLevelCommands for Client<T> {
    fn select_by_name(&self, df_name: &[u8]) -> Result<FileControlInformation> {
        self.high.select_by_name(df_name)
    }

    fn read_record(&self, sfi: u8, record: u8) -> Result<RecordTemplate> {
        self.high.read_record(sfi, record)
    }

    fn get_processing_options(&self, pdol_data: &[u8]) -> Result<GetProcessingOptionsResponse> {
        self.high.get_processing_options(pdol_data)
    }

    fn generate_arqc(&self, cdol_data: &[u8]) -> Result<GenerateAcResponse> {
        self.high.generate_arqc(cdol_data)
    }

    fn verify_plaintext_pin(&self, digits: &[u8]) -> Result<()> {
        self.high.verify_plaintext_pin(digits)
    }
}
