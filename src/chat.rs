//! Chat widget content: greeting, suggestion chips, and the apology shown
//! when a send cycle hits an unexpected fault.

use serde::{Deserialize, Serialize};

/// Shown when the relay call itself blows up mid-cycle.
pub const APOLOGY_MESSAGE: &str =
    "Sorry, I hit an unexpected error. Try again or reach out directly via email!";

/// Opening content for a fresh chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatWidgetConfig {
    pub greeting: String,
    pub suggestions: Vec<String>,
}

impl Default for ChatWidgetConfig {
    fn default() -> Self {
        Self {
            greeting: "Hey! I'm Daniel's digital twin. Ask me anything about his work, stack, \
                       or who he is to get to know him better"
                .into(),
            suggestions: vec![
                "What's Daniel's tech stack?".into(),
                "Tell me about Metropoint".into(),
                "What's Daniel like?".into(),
            ],
        }
    }
}

impl ChatWidgetConfig {
    /// Suggestions are only offered before the visitor has said anything.
    pub fn suggestions_for(&self, message_count: usize, awaiting_reply: bool) -> &[String] {
        if message_count <= 1 && !awaiting_reply {
            &self.suggestions
        } else {
            &[]
        }
    }
}
