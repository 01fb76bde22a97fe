//! Command line entry point of the ballot ledger.

use std::path::PathBuf;

use anyhow::Context as _;
use ballot_ledger::{from_toml_path, read_genesis_json, Ledger, LedgerConfig, Transaction};
use ballot_modules_api::default_context::DefaultContext;
use ballot_modules_api::Address;
use ballot_state::{LedgerStorage, Storage};
use clap::{Parser, Subcommand};
use election_registry::{CallMessage, ElectionRegistry, ElectionRegistryConfig};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

type Ctx = DefaultContext;
type RegistryLedger = Ledger<Ctx, ElectionRegistry<Ctx>>;

#[derive(Parser)]
#[command(author, version, about = "Submit transactions to and query the election registry", long_about = None)]
struct Cli {
    /// Path to the ledger TOML config.
    #[arg(long, default_value = "ledger_config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply one call, or a JSON file holding a list of transactions.
    Submit {
        /// Address the call is made on behalf of.
        #[arg(long, required_unless_present = "batch")]
        sender: Option<Address>,
        /// The call message as JSON, e.g. '{"start_election":{"election_id":1}}'.
        #[arg(long, required_unless_present = "batch")]
        message: Option<String>,
        /// JSON file with a list of `{ "sender": .., "message": .. }` objects.
        #[arg(long, conflicts_with_all = ["sender", "message"])]
        batch: Option<PathBuf>,
    },
    /// Read the registry state.
    #[command(subcommand)]
    Query(Query),
}

#[derive(Subcommand, Debug, PartialEq)]
enum Query {
    ElectionIds,
    Summary { election_id: u64 },
    Status { election_id: u64 },
    Candidates { election_id: u64 },
    Voter { election_id: u64, address: Address },
    Winner { election_id: u64 },
    IsAdmin { address: Address },
    RootAdmin,
}

fn main() -> Result<(), anyhow::Error> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")?;

    let cli = Cli::parse();

    info!("Reading ledger config from {:?}", cli.config);
    let config: LedgerConfig =
        from_toml_path(&cli.config).context("Failed to read ledger configuration")?;
    let ledger = open_ledger(&config)?;

    match cli.command {
        Command::Submit {
            sender,
            message,
            batch,
        } => {
            let txs = read_transactions(sender, message, batch)?;
            let receipts = ledger.apply_batch(txs);
            print_json(&receipts)?;
        }
        Command::Query(query) => run_query(&ledger, query)?,
    }

    Ok(())
}

type Tx = Transaction<Address, CallMessage<Ctx>>;

fn read_transactions(
    sender: Option<Address>,
    message: Option<String>,
    batch: Option<PathBuf>,
) -> anyhow::Result<Vec<Tx>> {
    match (batch, sender, message) {
        (Some(path), _, _) => {
            let batch = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read batch {}", path.display()))?;
            serde_json::from_str::<Vec<Tx>>(&batch).context("Invalid batch")
        }
        (None, Some(sender), Some(message)) => {
            let message: CallMessage<Ctx> =
                serde_json::from_str(&message).context("Invalid call message")?;
            Ok(vec![Transaction { sender, message }])
        }
        _ => anyhow::bail!("Either --batch or both --sender and --message are required"),
    }
}

fn open_ledger(config: &LedgerConfig) -> anyhow::Result<RegistryLedger> {
    let storage = LedgerStorage::with_config(config.storage.clone())?;
    if !storage.is_empty() {
        return Ledger::open(storage, ElectionRegistry::default());
    }

    info!("Reading genesis configuration from {:?}", config.genesis_path);
    let genesis: ElectionRegistryConfig<Ctx> = read_genesis_json(&config.genesis_path)?;
    Ledger::new(storage, ElectionRegistry::default(), &genesis)
}

fn run_query(ledger: &RegistryLedger, query: Query) -> anyhow::Result<()> {
    match query {
        Query::ElectionIds => print_json(&ledger.query(|r, ws| r.get_created_election_ids(ws))),
        Query::Summary { election_id } => {
            print_json(&ledger.query(|r, ws| r.get_election_summary(election_id, ws))?)
        }
        Query::Status { election_id } => {
            print_json(&ledger.query(|r, ws| r.get_election_status(election_id, ws))?)
        }
        Query::Candidates { election_id } => {
            print_json(&ledger.query(|r, ws| r.get_candidates(election_id, ws))?)
        }
        Query::Voter {
            election_id,
            address,
        } => print_json(&ledger.query(|r, ws| r.get_voter_status(election_id, &address, ws))?),
        Query::Winner { election_id } => {
            print_json(&ledger.query(|r, ws| r.get_winner(election_id, ws))?)
        }
        Query::IsAdmin { address } => print_json(&ledger.query(|r, ws| r.is_admin(&address, ws))),
        Query::RootAdmin => print_json(&ledger.query(|r, ws| r.root_admin(ws))),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
