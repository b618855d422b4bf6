//! Runs one backlog command and prints its JSON result.
//!
//! Usage:
//!
//! ```text
//! backlog [--root <dir>] <operation> <kind> [key: value ...]
//! ```
//!
//! For example:
//!
//! ```text
//! backlog appendTask specs description: Fix login bug
//! backlog addOptionsFromText specs taskId: 1 optionsText: 1. Patch token refresh
//! backlog markDone specs taskId: 1
//! ```
//!
//! Logs go to stderr and honour `RUST_LOG`.

use std::io::Write;

use backlog_ledger::backlog::services::BacklogService;
use backlog_ledger::command::{self, BacklogCommand};
use backlog_ledger::config::LedgerConfig;
use camino::Utf8PathBuf;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "backlog", about = "Read and update markdown task backlogs")]
struct Cli {
    /// Directory holding the `<kind>_backlog.md` documents.
    #[arg(long, env = LedgerConfig::ROOT_ENV, default_value = ".")]
    root: Utf8PathBuf,

    /// Operation, backlog kind and `key: value` parameters.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn init_logging(config: &LedgerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let config = LedgerConfig::new(cli.root);
    init_logging(&config);

    let parsed = BacklogCommand::parse(&cli.command.join(" "))?;
    let service = BacklogService::new(Arc::new(config.open_store()?));
    let result = command::execute(&service, parsed).await?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
    Ok(())
}
