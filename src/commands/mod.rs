//! Command-line entry points.
//!
//! - `serve`: run the HTTP relay surface for the browser widget
//! - `chat`: interactive terminal session against a local or remote relay

pub mod chat;
pub mod serve;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::config::{self, ConfigError};
use crate::models::{ContextError, PortfolioContext};
use crate::pipeline::relay::RelayError;

#[derive(Parser, Debug)]
#[command(
    name = "portfolio-chat",
    version,
    about = "Digital-twin chat for a portfolio site",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the chat API over HTTP
    Serve(ServeArgs),
    /// Chat in the terminal
    Chat(ChatArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind (default: $PORTFOLIO_CHAT_BIND or 127.0.0.1:8787)
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Portfolio context JSON file
    #[arg(long)]
    pub context: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub struct ChatArgs {
    /// Base URL of a running `serve` instance; relays locally when absent
    #[arg(long)]
    pub server: Option<String>,

    /// Portfolio context JSON file (local relay only)
    #[arg(long)]
    pub context: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("Relay setup failed: {0}")]
    Relay(#[from] RelayError),
    #[error(transparent)]
    Server(#[from] crate::api::ServerError),
    #[error("Failed to start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Serve(args) => serve::serve(&args),
        Commands::Chat(args) => chat::chat(&args),
    }
}

/// Context from the flag, else `$PORTFOLIO_CHAT_CONTEXT`, else built-in.
fn load_context(flag: Option<&Path>) -> Result<PortfolioContext, ContextError> {
    let path = flag.map(Path::to_path_buf).or_else(config::context_path);
    PortfolioContext::load_or_default(path.as_deref())
}
