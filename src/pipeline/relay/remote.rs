//! Relay that calls this crate's own `POST /api/chat` endpoint, so a client
//! session can keep the provider credential on the server side.

use std::time::Duration;

use super::orchestrator::Relay;
use super::types::{ChatRelayRequest, ChatRelayResponse, ChatTurn, RelayOutcome};
use super::RelayError;

pub struct RemoteRelay {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl RemoteRelay {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, RelayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RelayError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn call(&self, conversation: &[ChatTurn]) -> Result<ChatRelayResponse, RelayError> {
        let body = ChatRelayRequest {
            messages: conversation.to_vec(),
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    RelayError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    RelayError::Timeout(self.timeout_secs)
                } else {
                    RelayError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(RelayError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ChatRelayResponse>()
            .map_err(|e| RelayError::ResponseParsing(e.to_string()))
    }
}

/// Map the server's `{success, message, error}` body onto a relay outcome.
fn outcome_from_response(response: ChatRelayResponse) -> RelayOutcome {
    if response.success {
        RelayOutcome::from_completion(Some(&response.message))
    } else {
        RelayOutcome::Failed(
            response
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "relay failed".to_string()),
        )
    }
}

impl Relay for RemoteRelay {
    fn relay(&self, conversation: &[ChatTurn]) -> RelayOutcome {
        match self.call(conversation) {
            Ok(response) => outcome_from_response(response),
            Err(e) => {
                tracing::warn!(error = %e, url = %self.chat_url(), "Remote relay failed");
                e.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_url_joins_base() {
        let relay = RemoteRelay::new("http://127.0.0.1:8787/", 5).unwrap();
        assert_eq!(relay.chat_url(), "http://127.0.0.1:8787/api/chat");
    }

    #[test]
    fn successful_body_becomes_reply() {
        let outcome = outcome_from_response(ChatRelayResponse {
            success: true,
            message: " Hi! ".into(),
            error: None,
        });
        assert_eq!(outcome, RelayOutcome::Reply("Hi!".into()));
    }

    #[test]
    fn successful_but_blank_body_is_failed() {
        let outcome = outcome_from_response(ChatRelayResponse {
            success: true,
            message: String::new(),
            error: None,
        });
        assert_eq!(outcome, RelayOutcome::Failed("empty response".into()));
    }

    #[test]
    fn unsuccessful_body_keeps_server_reason() {
        let outcome = outcome_from_response(ChatRelayResponse {
            success: false,
            message: String::new(),
            error: Some("missing credential".into()),
        });
        assert_eq!(outcome, RelayOutcome::Failed("missing credential".into()));
    }

    #[test]
    fn unsuccessful_body_without_reason_gets_generic_one() {
        let outcome = outcome_from_response(ChatRelayResponse {
            success: false,
            message: String::new(),
            error: None,
        });
        assert_eq!(outcome, RelayOutcome::Failed("relay failed".into()));
    }

    #[test]
    fn unreachable_server_is_failed() {
        // Port 9 (discard) is not expected to be listening on loopback
        let relay = RemoteRelay::new("http://127.0.0.1:9", 2).unwrap();
        let outcome = relay.relay(&[ChatTurn::user("hello")]);
        assert!(!outcome.is_reply());
    }
}
