//! In-memory conversation store for one chat session.
//!
//! Messages are append-only and kept in insertion order. The store also
//! carries the session's reply state, which is what keeps a second send
//! cycle from starting while one is still waiting on the relay.

use crate::models::{Message, MessageRole};

use super::relay::ChatTurn;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("Message content cannot be empty")]
    EmptyContent,
}

/// Whether a send cycle is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Idle,
    AwaitingReply,
}

/// Ordered message log plus reply state for a single session.
#[derive(Debug, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    state: ReplyState,
}

impl ConversationStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an assistant greeting, the way the widget opens.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut store = Self::new();
        if let Err(e) = store.append(MessageRole::Assistant, greeting) {
            tracing::debug!(error = %e, "Skipping blank greeting");
        }
        store
    }

    /// Append a message. Content must not be blank.
    pub fn append(
        &mut self,
        role: MessageRole,
        content: &str,
    ) -> Result<&Message, ConversationError> {
        if content.trim().is_empty() {
            return Err(ConversationError::EmptyContent);
        }
        self.messages.push(Message::new(role, content));
        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The conversation as `{role, content}` turns, oldest first.
    pub fn turns(&self) -> Vec<ChatTurn> {
        self.messages.iter().map(ChatTurn::from).collect()
    }

    pub fn state(&self) -> ReplyState {
        self.state
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.state == ReplyState::AwaitingReply
    }

    /// `Idle → AwaitingReply`. Returns false if a cycle is already in flight.
    pub(crate) fn begin_cycle(&mut self) -> bool {
        match self.state {
            ReplyState::Idle => {
                self.state = ReplyState::AwaitingReply;
                true
            }
            ReplyState::AwaitingReply => false,
        }
    }

    /// Back to `Idle`, whatever the cycle's outcome.
    pub(crate) fn finish_cycle(&mut self) {
        self.state = ReplyState::Idle;
    }
}
