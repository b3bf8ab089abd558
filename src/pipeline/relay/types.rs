use serde::{Deserialize, Serialize};

use super::RelayError;
use crate::models::{Message, MessageRole};

/// A `{role, content}` pair as sent to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: &str) -> Self {
        Self {
            role: MessageRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.to_string(),
        }
    }
}

impl From<&Message> for ChatTurn {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

/// Result of one relay attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Generated answer. Never empty.
    Reply(String),
    /// Short diagnostic reason. Logged, never rendered.
    Failed(String),
}

impl RelayOutcome {
    /// Normalize a provider answer: trimmed, and blank or absent becomes
    /// `Failed("empty response")`.
    pub fn from_completion(content: Option<&str>) -> Self {
        match content.map(str::trim) {
            Some(text) if !text.is_empty() => RelayOutcome::Reply(text.to_string()),
            _ => RelayOutcome::Failed(RelayError::EmptyResponse.reason()),
        }
    }

    pub fn is_reply(&self) -> bool {
        matches!(self, RelayOutcome::Reply(_))
    }
}

impl From<RelayError> for RelayOutcome {
    fn from(err: RelayError) -> Self {
        RelayOutcome::Failed(err.reason())
    }
}

// ═══════════════════════════════════════════
// Provider wire types (chat-completions shape)
// ═══════════════════════════════════════════

/// Roles the provider accepts. `System` only ever carries the instruction prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderRole {
    System,
    User,
    Assistant,
}

impl From<MessageRole> for ProviderRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => ProviderRole::User,
            MessageRole::Assistant => ProviderRole::Assistant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: ProviderRole,
    pub content: String,
}

/// Request body for the completion endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ProviderMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// Conversation turns carried after the system turn.
    pub fn conversation_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role != ProviderRole::System)
            .count()
    }
}

/// Response body. Every level is optional so a missing answer is a
/// normal `None`, not a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<CompletionMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// Content of the first choice, if the provider sent one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            choices: vec![CompletionChoice {
                message: Some(CompletionMessage {
                    content: Some(content.to_string()),
                }),
            }],
        }
    }
}

/// Transport seam: one completion call against the provider.
pub trait CompletionTransport {
    fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, RelayError>;
}

// ═══════════════════════════════════════════
// HTTP relay surface wire types
// ═══════════════════════════════════════════

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRelayRequest {
    pub messages: Vec<ChatTurn>,
}

/// Response of `POST /api/chat` and `POST /api/chat/fallback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRelayResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RelayOutcome> for ChatRelayResponse {
    fn from(outcome: RelayOutcome) -> Self {
        match outcome {
            RelayOutcome::Reply(message) => Self {
                success: true,
                message,
                error: None,
            },
            RelayOutcome::Failed(reason) => Self {
                success: false,
                message: String::new(),
                error: Some(reason),
            },
        }
    }
}
