//! AI relay: forwards a bounded conversation window plus a context-enriched
//! instruction prompt to a chat-completion provider, and folds every way
//! that can go wrong into `RelayOutcome::Failed`.

pub mod openai;
pub mod orchestrator;
pub mod prompt;
pub mod remote;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

pub use openai::OpenAiTransport;
pub use orchestrator::{AiRelay, Relay};
pub use remote::RemoteRelay;
pub use types::{ChatTurn, CompletionTransport, RelayOutcome};

/// Everything that can stop the relay from producing an answer.
///
/// The `Display` text doubles as the short `Failed` reason, so provider
/// bodies are kept out of it and only logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("missing credential")]
    MissingCredential,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider returned status {status}")]
    ProviderStatus { status: u16, body: String },

    #[error("response parsing error: {0}")]
    ResponseParsing(String),

    #[error("empty response")]
    EmptyResponse,
}

impl RelayError {
    /// Short diagnostic carried by `RelayOutcome::Failed`.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
