use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use expense_cli::cli::{Dispatcher, TerminalKeys};
use expense_cli::config::RunConfig;
use expense_cli::storage::Store;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Record and review expenses from the command line",
    long_about = "Record, list, search, delete and clear expenses kept in a \
                  local SQLite database. Run without a command to see the \
                  available commands."
)]
struct Cli {
    /// Database file to use
    #[arg(long, env = "EXPENSES_DB", value_name = "PATH")]
    database: Option<PathBuf>,

    /// Command and its arguments (list, add, search, delete, clear)
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "COMMAND")]
    args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = RunConfig::resolve(cli.database)?;
    init_logging(&config.settings.log_level);
    if let Some(err) = &config.ignored {
        warn!(error = %err, "Ignoring settings file, using the given database");
    }

    let store = Store::open(&config.database)?;

    let stdout = io::stdout();
    let mut dispatcher = Dispatcher::new(&store, TerminalKeys::new(), stdout.lock());
    dispatcher.run(&cli.args)?;

    Ok(())
}

/// Logs go to stderr so command output stays clean
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .compact()
        .init();
}
