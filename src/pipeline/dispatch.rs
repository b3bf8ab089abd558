//! One send cycle: user turn in, exactly one assistant turn out.
//!
//! Coordinates: guard → append user → relay → (fallback | apology) →
//! append assistant → release guard.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::chat::APOLOGY_MESSAGE;
use crate::models::MessageRole;

use super::conversation::ConversationStore;
use super::fallback::FallbackResponder;
use super::relay::{Relay, RelayOutcome};

/// Where the appended assistant message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Relay,
    Fallback,
    Apology,
}

/// Why a send was refused without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    Replied(ReplySource),
    Rejected(RejectReason),
}

/// Runs send cycles against a relay, with the keyword responder as backstop.
pub struct Dispatcher<R: Relay> {
    relay: R,
    fallback: FallbackResponder,
}

impl<R: Relay> Dispatcher<R> {
    pub fn new(relay: R, fallback: FallbackResponder) -> Self {
        Self { relay, fallback }
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Run one cycle for `user_text` against `store`.
    ///
    /// Blank input and sends made while another cycle is awaiting its reply
    /// are rejected with no effect. An accepted send always appends one user
    /// message followed by one assistant message, and always leaves the
    /// store idle.
    pub fn send(&self, store: &Mutex<ConversationStore>, user_text: &str) -> SendOutcome {
        let text = user_text.trim();
        if text.is_empty() {
            return SendOutcome::Rejected(RejectReason::EmptyInput);
        }

        let conversation = {
            let mut guard = lock_store(store);
            if !guard.begin_cycle() {
                tracing::debug!("Send ignored: reply already pending");
                return SendOutcome::Rejected(RejectReason::Busy);
            }
            if let Err(e) = guard.append(MessageRole::User, text) {
                guard.finish_cycle();
                tracing::debug!(error = %e, "Send ignored");
                return SendOutcome::Rejected(RejectReason::EmptyInput);
            }
            guard.turns()
        };
        let _cycle = CycleGuard { store };

        let relayed = panic::catch_unwind(AssertUnwindSafe(|| self.relay.relay(&conversation)));

        let (reply, source) = match relayed {
            Ok(RelayOutcome::Reply(answer)) if !answer.trim().is_empty() => {
                (answer, ReplySource::Relay)
            }
            Ok(outcome) => {
                let reason = match outcome {
                    RelayOutcome::Failed(reason) => reason,
                    RelayOutcome::Reply(_) => "empty response".to_string(),
                };
                tracing::warn!(reason = %reason, "AI relay unavailable, using fallback");
                (self.fallback.respond(text), ReplySource::Fallback)
            }
            Err(fault) => {
                tracing::error!(fault = %panic_message(fault.as_ref()), "Relay fault during send cycle");
                (APOLOGY_MESSAGE.to_string(), ReplySource::Apology)
            }
        };

        let mut guard = lock_store(store);
        if let Err(e) = guard.append(MessageRole::Assistant, &reply) {
            tracing::error!(error = %e, "Assistant reply rejected, appending apology");
            let _ = guard.append(MessageRole::Assistant, APOLOGY_MESSAGE);
            return SendOutcome::Replied(ReplySource::Apology);
        }

        SendOutcome::Replied(source)
    }
}

/// Returns the store to idle when the cycle ends, however it ends.
struct CycleGuard<'a> {
    store: &'a Mutex<ConversationStore>,
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        lock_store(self.store).finish_cycle();
    }
}

fn lock_store(store: &Mutex<ConversationStore>) -> MutexGuard<'_, ConversationStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(fault: &(dyn Any + Send)) -> String {
    if let Some(s) = fault.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = fault.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
