use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sheet_ledger::cli::{
    handle_balances, handle_export, handle_transaction, handle_transactions, handle_user_command,
    ExportFormat, ExportOptions, UserCommands,
};
use sheet_ledger::config::{LedgerPaths, Settings, SourceSettings};
use sheet_ledger::source::open_source;
use sheet_ledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "sheet-ledger",
    version,
    about = "Shared expense ledger built from spreadsheet ranges",
    long_about = "sheet-ledger reads the balance table and transaction log of a \
                  shared expense spreadsheet and derives who paid what for whom, \
                  splitting each expense among participants by weight."
)]
struct Cli {
    /// Read ranges from this snapshot file instead of the configured source
    #[arg(long, global = true, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the balance of every user
    Balances,

    /// List derived transactions
    #[command(alias = "txns")]
    Transactions {
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// List the rows that could not be derived
        #[arg(long)]
        show_skipped: bool,
    },

    /// Show a single transaction
    #[command(alias = "txn")]
    Transaction {
        /// Register index, as shown by `transactions`
        index: usize,
    },

    /// User registry commands
    #[command(subcommand)]
    Users(UserCommands),

    /// Export balances and transactions
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Compact JSON output
        #[arg(long)]
        compact: bool,
        /// Export the balance table instead of transactions (CSV only)
        #[arg(long)]
        balances: bool,
    },

    /// Write the default configuration
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sheet_ledger=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(path) = cli.snapshot {
        settings.source = SourceSettings::Snapshot { path: Some(path) };
    }
    settings.validate()?;

    match cli.command {
        Some(Commands::Balances) => {
            let source = open_source(&settings, &paths)?;
            handle_balances(&*source, &settings)?;
        }
        Some(Commands::Transactions {
            limit,
            show_skipped,
        }) => {
            let source = open_source(&settings, &paths)?;
            handle_transactions(&*source, &settings, limit, show_skipped)?;
        }
        Some(Commands::Transaction { index }) => {
            let source = open_source(&settings, &paths)?;
            handle_transaction(&*source, &settings, index)?;
        }
        Some(Commands::Users(cmd)) => {
            let mut storage = Storage::new(paths.clone())?;
            storage.load_all()?;
            handle_user_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export {
            format,
            output,
            compact,
            balances,
        }) => {
            let source = open_source(&settings, &paths)?;
            let options = ExportOptions {
                format,
                output,
                compact,
                balances,
            };
            handle_export(&*source, &settings, options)?;
        }
        Some(Commands::Init) => {
            println!("Initializing sheet-ledger at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!(
                "Place a values snapshot at {} or edit {} to point at CSV exports.",
                paths.snapshot_file().display(),
                paths.settings_file().display()
            );
        }
        Some(Commands::Config) => {
            print_config(&paths, &settings);
        }
        None => {
            println!("sheet-ledger - shared expense ledger");
            println!();
            println!("Run 'sheet-ledger --help' for usage information.");
        }
    }

    Ok(())
}

fn print_config(paths: &LedgerPaths, settings: &Settings) {
    println!("sheet-ledger Configuration");
    println!("==========================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Data directory: {}", paths.data_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!();
    println!("Source:");
    match &settings.source {
        SourceSettings::Snapshot { path } => {
            let path = path.clone().unwrap_or_else(|| paths.snapshot_file());
            println!("  Snapshot: {}", path.display());
        }
        SourceSettings::Csv {
            balance_file,
            transaction_file,
        } => {
            println!("  Balance CSV:     {}", paths.resolve(balance_file).display());
            println!("  Transaction CSV: {}", paths.resolve(transaction_file).display());
        }
    }
    println!();
    println!("Ranges:");
    println!("  Balance:      {}", settings.ranges.balance);
    println!("  Transactions: {}", settings.ranges.transactions);
    println!();
    let columns = &settings.columns;
    println!("Columns:");
    println!("  Total value:       {}", columns.total_value_column);
    println!("  Sender:            {}", columns.sender_column);
    println!("  Description:       {}", columns.description_column);
    println!("  Participants from: {}", columns.participant_start_column);
    println!("  Total count:       {}", columns.total_count_column);
    println!();
    println!("Currency symbol:   {}", settings.currency_symbol);
    println!("Balance tolerance: {}", settings.balance_tolerance);
}
