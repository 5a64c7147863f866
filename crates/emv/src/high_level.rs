//! Decoded EMV commands and composite flows

use paycard_tlv::TlvSchema;
use tracing::{debug, instrument};

use crate::commands::{CryptogramType, PSE_CONTACT, PSE_CONTACTLESS};
use crate::model::{
    Afl, FileControlInformation, GenerateAcResponse, GetProcessingOptionsResponse, RecordTemplate,
};
use crate::{Error, LowLevelCommands, Result};

/// Card operations returning decoded EMV structures
///
/// Implementors provide the single command operations; the composite flows
/// are built on top of them.
pub trait HighLevelCommands {
    /// SELECT by DF name and decode the FCI
    fn select_by_name(&self, df_name: &[u8]) -> Result<FileControlInformation>;

    /// READ RECORD and decode the record template
    ///
    /// Fails with [`Error::RecordNotFound`] when the card answers `6A83` or
    /// returns an empty record.
    fn read_record(&self, sfi: u8, record: u8) -> Result<RecordTemplate>;

    /// GET PROCESSING OPTIONS with `pdol_data` as the command payload
    fn get_processing_options(&self, pdol_data: &[u8]) -> Result<GetProcessingOptionsResponse>;

    /// GENERATE AC requesting an ARQC over `cdol_data`
    fn generate_arqc(&self, cdol_data: &[u8]) -> Result<GenerateAcResponse>;

    /// VERIFY a plaintext PIN given as digit values
    fn verify_plaintext_pin(&self, digits: &[u8]) -> Result<()>;

    /// Read records 1, 2, ... of `sfi` until the card reports the record
    /// as not found
    ///
    /// Any other error aborts the whole read.
    fn read_all_records(&self, sfi: u8) -> Result<Vec<RecordTemplate>> {
        let mut records = Vec::new();
        for record in 1..u8::MAX {
            match self.read_record(sfi, record) {
                Ok(template) => records.push(template),
                Err(err) if err.is_record_not_found() => break,
                Err(err) => return Err(err),
            }
        }
        debug!(sfi, count = records.len(), "Read all records");
        Ok(records)
    }

    /// Select the payment system environment and read its directory
    ///
    /// Returns no records when the FCI names no directory file.
    fn get_pse(&self, contactless: bool) -> Result<Vec<RecordTemplate>> {
        let name = if contactless {
            PSE_CONTACTLESS
        } else {
            PSE_CONTACT
        };
        match self.select_by_name(name)?.sfi() {
            Some(sfi) => self.read_all_records(sfi),
            None => {
                debug!("PSE has no directory SFI");
                Ok(Vec::new())
            }
        }
    }

    /// Read every record an AFL points to, in order
    fn read_afl_records(&self, afl: &Afl) -> Result<Vec<RecordTemplate>> {
        let mut records = Vec::new();
        for entry in afl.entries()? {
            for record in entry.records() {
                records.push(self.read_record(entry.sfi, record)?);
            }
        }
        Ok(records)
    }
}

/// [`HighLevelCommands`] over any [`LowLevelCommands`]
#[derive(Debug, Clone)]
pub struct HighLevelClient<L> {
    low: L,
}

impl<L: LowLevelCommands> HighLevelClient<L> {
    /// Create a client decoding the payloads of `low`
    pub const fn new(low: L) -> Self {
        Self { low }
    }

    /// The low level commands this client decodes
    pub const fn low_level(&self) -> &L {
        &self.low
    }
}

impl<L: LowLevelCommands> HighLevelCommands for HighLevelClient<L> {
    fn select_by_name(&self, df_name: &[u8]) -> Result<FileControlInformation> {
        let data = self.low.select_by_name(df_name)?;
        Ok(FileControlInformation::from_ber(&data)?)
    }

    #[instrument(level = "trace", skip(self))]
    fn read_record(&self, sfi: u8, record: u8) -> Result<RecordTemplate> {
        let data = match self.low.read_record(sfi, record) {
            Ok(data) if !data.is_empty() => data,
            Ok(_) => return Err(Error::RecordNotFound { sfi, record }),
            Err(err) if err.is_record_not_found() => {
                return Err(Error::RecordNotFound { sfi, record });
            }
            Err(err) => return Err(err),
        };
        Ok(RecordTemplate::from_ber(&data)?)
    }

    fn get_processing_options(&self, pdol_data: &[u8]) -> Result<GetProcessingOptionsResponse> {
        let data = self.low.get_processing_options(pdol_data)?;
        Ok(GetProcessingOptionsResponse::from_ber(&data)?)
    }

    fn generate_arqc(&self, cdol_data: &[u8]) -> Result<GenerateAcResponse> {
        let data = self.low.generate_ac(CryptogramType::Arqc, cdol_data)?;
        Ok(GenerateAcResponse::from_ber(&data)?)
    }

    fn verify_plaintext_pin(&self, digits: &[u8]) -> Result<()> {
        self.low.verify_plaintext_pin(digits).map(drop)
    }
}
