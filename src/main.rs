use cipherpay::application::ledger::PaymentLedger;
use cipherpay::domain::address::Address;
use cipherpay::domain::operation::Outcome;
use cipherpay::domain::permit::{create_permit_for_contract, signing_key_from_hex};
use cipherpay::domain::ports::PaymentStoreBox;
use cipherpay::infrastructure::in_memory::InMemoryPaymentStore;
use cipherpay::infrastructure::trivial_fhe::TrivialEncryptor;
use cipherpay::interfaces::csv::operation_reader::OperationReader;
use cipherpay::interfaces::csv::payment_writer::PaymentWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a CSV file of ledger operations and print the resulting records
    Run {
        /// Input operations CSV file
        input: PathBuf,

        /// Path to persistent database (optional). If provided, uses RocksDB.
        #[arg(long, env = "CIPHERPAY_DB_PATH")]
        db_path: Option<PathBuf>,

        /// Address of the ledger, checked against decryption permissions
        #[arg(long, env = "CIPHERPAY_CONTRACT", default_value_t = Address::ZERO)]
        contract: Address,
    },
    /// Print a decryption permission for a ledger address as JSON
    Permit {
        /// Ledger address the permission is bound to
        #[arg(long, env = "CIPHERPAY_CONTRACT")]
        contract: Address,

        /// Hex-encoded 32-byte Ed25519 secret key of the permit issuer
        #[arg(long, env = "CIPHERPAY_SIGNER_KEY", hide_env_values = true)]
        signer_key: String,
    },
}

fn open_store(db_path: Option<PathBuf>) -> Result<PaymentStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = cipherpay::infrastructure::rocksdb::RocksDBStore::open(path)
                .into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            warn!(
                "persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
            );
            Ok(Box::new(InMemoryPaymentStore::new()))
        }
        None => Ok(Box::new(InMemoryPaymentStore::new())),
    }
}

async fn run(input: PathBuf, db_path: Option<PathBuf>, contract: Address) -> Result<()> {
    let ledger = PaymentLedger::new(contract, open_store(db_path)?);

    let file = File::open(input).into_diagnostic()?;
    let reader = OperationReader::new(file, TrivialEncryptor);
    for (row, op_result) in reader.operations().enumerate() {
        let operation = match op_result {
            Ok(operation) => operation,
            Err(e) => {
                warn!(row = row + 1, error = %e, "error reading operation");
                continue;
            }
        };

        let caller = operation.caller();
        match ledger.apply(operation).await {
            Ok(Outcome::Created(id)) => info!(payment = %id, %caller, "payment created"),
            Ok(Outcome::MessageAdded { id, messages }) => {
                info!(payment = %id, %caller, messages, "chat message added")
            }
            Ok(Outcome::Details(_)) => info!(%caller, "payment details read"),
            Ok(Outcome::History(history)) => {
                info!(%caller, messages = history.len(), "chat history read")
            }
            Err(e) => warn!(row = row + 1, %caller, error = %e, "error processing operation"),
        }
    }

    let payments = ledger.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = PaymentWriter::new(stdout.lock());
    writer.write_payments(payments).into_diagnostic()?;

    Ok(())
}

fn permit(contract: Address, signer_key: &str) -> Result<()> {
    let signer = signing_key_from_hex(signer_key).into_diagnostic()?;
    let permission = create_permit_for_contract(contract, &signer);

    let json = serde_json::to_string_pretty(&permission).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            input,
            db_path,
            contract,
        } => run(input, db_path, contract).await,
        Command::Permit {
            contract,
            signer_key,
        } => permit(contract, &signer_key),
    }
}
