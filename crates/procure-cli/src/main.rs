//! CLI application for procurement document processing.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, extract, reconcile};

/// Procurement documents - extract structured data and reconcile receipts
#[derive(Parser)]
#[command(name = "procure")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract structured fields from a proforma or receipt document
    Extract(extract::ExtractArgs),

    /// Reconcile a receipt document against a purchase order
    Reconcile(reconcile::ReconcileArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Reconcile(args) => reconcile::run(args, cli.config.as_deref()),
        Commands::Config(args) => config::run(args),
    }
}
