//! Blocking HTTP transport for OpenAI-compatible chat-completion endpoints.

use std::time::Duration;

use super::types::{CompletionRequest, CompletionResponse, CompletionTransport};
use super::RelayError;

/// Chat-completions client. One request per call, no retries.
pub struct OpenAiTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OpenAiTransport {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, RelayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RelayError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionTransport for OpenAiTransport {
    fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, RelayError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    RelayError::Connection(self.endpoint.clone())
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
            .json::<CompletionResponse>()
            .map_err(|e| RelayError::ResponseParsing(e.to_string()))
    }
}
