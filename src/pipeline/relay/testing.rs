//! Test doubles for the transport and relay seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::orchestrator::Relay;
use super::types::{
    ChatTurn, CompletionRequest, CompletionResponse, CompletionTransport, RelayOutcome,
};
use super::RelayError;

/// Transport that returns a canned result and records every request.
pub(crate) struct MockTransport {
    response: Result<CompletionResponse, RelayError>,
    requests: Mutex<Vec<CompletionRequest>>,
    api_keys: Mutex<Vec<String>>,
}

impl MockTransport {
    pub(crate) fn responding(response: Result<CompletionResponse, RelayError>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
            api_keys: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn answering(content: &str) -> Self {
        Self::responding(Ok(CompletionResponse::with_content(content)))
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub(crate) fn last_api_key(&self) -> Option<String> {
        self.api_keys.lock().unwrap().last().cloned()
    }
}

impl CompletionTransport for MockTransport {
    fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, RelayError> {
        self.requests.lock().unwrap().push(request.clone());
        self.api_keys.lock().unwrap().push(api_key.to_string());
        self.response.clone()
    }
}

/// Relay that returns a fixed outcome and records what it was given.
pub(crate) struct ScriptedRelay {
    outcome: RelayOutcome,
    calls: AtomicUsize,
    seen: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedRelay {
    pub(crate) fn replying(text: &str) -> Self {
        Self::with_outcome(RelayOutcome::Reply(text.to_string()))
    }

    pub(crate) fn failing(reason: &str) -> Self {
        Self::with_outcome(RelayOutcome::Failed(reason.to_string()))
    }

    fn with_outcome(outcome: RelayOutcome) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_conversation(&self) -> Option<Vec<ChatTurn>> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl Relay for ScriptedRelay {
    fn relay(&self, conversation: &[ChatTurn]) -> RelayOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(conversation.to_vec());
        self.outcome.clone()
    }
}

/// Relay whose call panics, standing in for an unexpected fault.
pub(crate) struct PanickingRelay;

impl Relay for PanickingRelay {
    fn relay(&self, _conversation: &[ChatTurn]) -> RelayOutcome {
        panic!("relay exploded");
    }
}
