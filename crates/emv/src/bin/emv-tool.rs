//! Command-line tool for exploring EMV payment cards
//!
//! Lists readers, walks the payment system directory, selects applications
//! and runs GET PROCESSING OPTIONS through a PC/SC reader.

use clap::{Parser, Subcommand};
use paycard_apdu_transport_pcsc::{ConnectStrategy, PcscConfig, PcscDeviceManager, PcscTransport};
use paycard_emv::commands::command_template;
use paycard_emv::model::{FileControlInformation, RecordTemplate};
use paycard_emv::{Client, HighLevelCommands};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Reader to use, defaults to the first reader holding a card
    #[arg(short, long)]
    reader: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List detected readers
    Readers,

    /// Read the payment system directory
    Pse {
        /// Use the proximity payment system environment
        #[arg(long)]
        contactless: bool,
    },

    /// Select an application and print its FCI
    Select {
        /// Application identifier (hex)
        aid: String,
    },

    /// Select an application, get its processing options and read its records
    Gpo {
        /// Application identifier (hex)
        aid: String,

        /// PDOL related data (hex), zero filled from the PDOL when omitted
        #[arg(long)]
        pdol: Option<String>,
    },

    /// Read every record of a file
    Records {
        /// Short file identifier
        sfi: u8,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the tracing logger with env_format and ansi
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .init();

    let cli = Cli::parse();
    let manager = PcscDeviceManager::new()?;

    if let Commands::Readers = cli.command {
        let readers = manager.list_readers()?;
        if readers.is_empty() {
            println!("No readers found.");
            return Ok(());
        }
        println!("Available readers:");
        for (i, reader) in readers.iter().enumerate() {
            println!("{}. {reader}", i + 1);
        }
        return Ok(());
    }

    let strategy = cli
        .reader
        .map_or(ConnectStrategy::AnyCard, ConnectStrategy::Reader);
    let transport = manager.connect_strategy(strategy, PcscConfig::default())?;
    println!("Using reader: {}", transport.reader_name());
    let client = Client::new(transport);

    match cli.command {
        Commands::Readers => unreachable!("handled above"),
        Commands::Pse { contactless } => pse(&client, contactless)?,
        Commands::Select { aid } => {
            let fci = client.select_by_name(&hex::decode(aid)?)?;
            print_fci(&fci);
        }
        Commands::Gpo { aid, pdol } => gpo(&client, &aid, pdol.as_deref())?,
        Commands::Records { sfi } => {
            let records = client.read_all_records(sfi)?;
            println!("{} record(s) in SFI {sfi}", records.len());
            print_records(&records);
        }
    }

    Ok(())
}

fn pse(client: &Client<PcscTransport>, contactless: bool) -> Result<(), Box<dyn std::error::Error>> {
    let records = client.get_pse(contactless)?;
    if records.is_empty() {
        println!("No payment system directory found.");
        return Ok(());
    }

    println!("Applications:");
    for app in records.iter().flat_map(|record| record.applications()) {
        println!(
            "  - {} {} (priority {})",
            app.aid_hex(),
            app.display_name().unwrap_or("<unnamed>"),
            app.priority.map_or_else(|| "-".to_string(), |p| p.to_string()),
        );
    }
    Ok(())
}

fn gpo(
    client: &Client<PcscTransport>,
    aid: &str,
    pdol: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let fci = client.select_by_name(&hex::decode(aid)?)?;
    print_fci(&fci);

    let pdol_data = match pdol {
        Some(data) => hex::decode(data)?,
        None => fci
            .proprietary()
            .map(|p| p.pdol.build(|_| None))
            .unwrap_or_default(),
    };

    let response = client.get_processing_options(&command_template(&pdol_data))?;
    let aip = response.interchange_profile();
    let afl = response.file_locator();
    println!("AIP: {}", hex::encode_upper(aip.as_slice()));
    println!(
        "  SDA: {}, DDA: {}, CDA: {}",
        aip.sda_supported(),
        aip.dda_supported(),
        aip.cda_supported()
    );
    println!("AFL: {afl}");

    let records = client.read_afl_records(&afl)?;
    print_records(&records);

    let card = RecordTemplate::merged(&records);
    if let Some(cvm_list) = &card.cvm_list {
        println!("CVM list: {cvm_list}");
    }
    Ok(())
}

fn print_fci(fci: &FileControlInformation) {
    let Some(template) = &fci.fci_template else {
        println!("No FCI template");
        return;
    };
    println!("DF name: {}", template.df_name.as_deref().unwrap_or("-"));
    if let Some(proprietary) = &template.proprietary {
        if let Some(label) = &proprietary.label {
            println!("Label: {label}");
        }
        if let Some(sfi) = proprietary.sfi {
            println!("Directory SFI: {sfi}");
        }
        if !proprietary.pdol.is_empty() {
            println!("PDOL: {}", proprietary.pdol);
        }
    }
}

fn print_records(records: &[RecordTemplate]) {
    let card = RecordTemplate::merged(records);

    if !card.pan.is_empty() {
        println!("PAN: {}", card.pan);
    }
    if !card.expiration_date.is_empty() {
        println!("Expires: {}", card.expiration_date);
    }
    if !card.cardholder_name.is_empty() {
        println!("Cardholder: {}", card.cardholder_name.trim());
    }
    if !card.cdol1.is_empty() {
        println!("CDOL1: {}", card.cdol1);
    }
}
