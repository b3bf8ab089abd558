use crate::config::RelayConfig;
use crate::models::PortfolioContext;

use super::openai::OpenAiTransport;
use super::prompt::build_instruction_prompt;
use super::types::{
    ChatTurn, CompletionRequest, CompletionTransport, ProviderMessage, ProviderRole, RelayOutcome,
};
use super::RelayError;

/// Anything that can turn a conversation into a relay outcome.
pub trait Relay {
    fn relay(&self, conversation: &[ChatTurn]) -> RelayOutcome;
}

impl<R: Relay + ?Sized> Relay for Box<R> {
    fn relay(&self, conversation: &[ChatTurn]) -> RelayOutcome {
        (**self).relay(conversation)
    }
}

impl<R: Relay + ?Sized> Relay for std::sync::Arc<R> {
    fn relay(&self, conversation: &[ChatTurn]) -> RelayOutcome {
        (**self).relay(conversation)
    }
}

/// Relay backed by a chat-completion provider.
///
/// Flow: credential → window → request → normalize. A single attempt per
/// call; any failure is returned as `RelayOutcome::Failed` for the caller's
/// fallback path.
pub struct AiRelay<T: CompletionTransport> {
    transport: T,
    config: RelayConfig,
    instruction_prompt: String,
}

impl AiRelay<OpenAiTransport> {
    /// Relay over HTTP using the endpoint and timeout from `config`.
    pub fn from_config(config: RelayConfig, context: &PortfolioContext) -> Result<Self, RelayError> {
        let transport = OpenAiTransport::new(&config.endpoint, config.timeout_secs)?;
        Ok(Self::new(transport, config, context))
    }
}

impl<T: CompletionTransport> AiRelay<T> {
    pub fn new(transport: T, config: RelayConfig, context: &PortfolioContext) -> Self {
        Self {
            transport,
            config,
            instruction_prompt: build_instruction_prompt(context),
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    pub fn instruction_prompt(&self) -> &str {
        &self.instruction_prompt
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// System turn followed by the last `history_window` conversation turns.
    fn build_request(&self, conversation: &[ChatTurn]) -> CompletionRequest {
        let start = conversation
            .len()
            .saturating_sub(self.config.history_window);
        let window = &conversation[start..];

        let mut messages = Vec::with_capacity(window.len() + 1);
        messages.push(ProviderMessage {
            role: ProviderRole::System,
            content: self.instruction_prompt.clone(),
        });
        messages.extend(window.iter().map(|turn| ProviderMessage {
            role: turn.role.into(),
            content: turn.content.clone(),
        }));

        CompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    fn try_relay(&self, conversation: &[ChatTurn]) -> Result<String, RelayError> {
        let api_key = self
            .config
            .api_key
            .resolve()
            .ok_or(RelayError::MissingCredential)?;

        let request = self.build_request(conversation);
        tracing::debug!(
            model = %request.model,
            turns = request.conversation_turns(),
            dropped = conversation.len() - request.conversation_turns(),
            "Relaying conversation"
        );

        let response = self.transport.complete(&api_key, &request)?;

        match RelayOutcome::from_completion(response.first_content()) {
            RelayOutcome::Reply(text) => Ok(text),
            RelayOutcome::Failed(_) => Err(RelayError::EmptyResponse),
        }
    }
}

impl<T: CompletionTransport> Relay for AiRelay<T> {
    fn relay(&self, conversation: &[ChatTurn]) -> RelayOutcome {
        match self.try_relay(conversation) {
            Ok(text) => RelayOutcome::Reply(text),
            Err(e) => {
                if let RelayError::ProviderStatus { status, body } = &e {
                    tracing::warn!(status, body = %body, "Provider rejected relay request");
                } else {
                    tracing::warn!(error = %e, "Relay failed");
                }
                e.into()
            }
        }
    }
}
