pub mod api; // HTTP relay surface for the browser widget
pub mod chat; // Widget content: greeting, suggestions, apology
pub mod commands;
pub mod config;
pub mod models;
pub mod pipeline;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Filter from `RUST_LOG`, else
/// `config::default_log_filter()`. Logs go to stderr so they never mix
/// with a terminal chat session. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> ExitCode {
    let cli = commands::Cli::parse();

    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
