//! FraudGuard CLI - Main entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fraudguard_cli::{commands, AppContext};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fraudguard")]
#[command(about = "FraudGuard - rule-based transaction risk scoring", long_about = None)]
struct Cli {
    /// JSON file with an array of rule drafts (default rules when omitted)
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all rules
    List,

    /// Filter rules by name/description and severity
    Filter {
        /// Case-insensitive search term
        #[arg(long, default_value = "")]
        term: String,
        /// low, medium, high or critical
        #[arg(long)]
        severity: Option<String>,
    },

    /// Rule counts by state and severity
    Summary,

    /// Evaluate a transaction against all enabled rules
    Evaluate {
        /// Transaction JSON file
        transaction: PathBuf,
    },

    /// Evaluate a transaction against a single rule
    TestRule {
        /// Rule id or name
        rule: String,
        /// Transaction JSON file
        transaction: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = AppContext::new(cli.rules.as_deref(), cli.config.as_deref())?;

    let output = match cli.command {
        Commands::List => commands::list(&ctx)?,
        Commands::Filter { term, severity } => {
            commands::filter(&ctx, &term, severity.as_deref())?
        }
        Commands::Summary => commands::summary(&ctx)?,
        Commands::Evaluate { transaction } => commands::evaluate(&ctx, &transaction)?,
        Commands::TestRule { rule, transaction } => {
            commands::test_rule(&ctx, &rule, &transaction)?
        }
    };

    println!("{}", output);
    Ok(())
}
