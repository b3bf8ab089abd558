//! Shared state for the HTTP relay surface.

use std::sync::Arc;

use crate::chat::ChatWidgetConfig;
use crate::config::ApiKeySource;
use crate::pipeline::relay::Relay;
use crate::pipeline::FallbackResponder;

/// Relay handle shared across request handlers and blocking tasks.
pub type SharedRelay = Arc<dyn Relay + Send + Sync>;

/// Shared context for all API routes.
///
/// Holds no conversation state: every `POST /api/chat` carries the full
/// history it wants relayed.
#[derive(Clone)]
pub struct ApiContext {
    pub relay: SharedRelay,
    pub fallback: Arc<FallbackResponder>,
    pub widget: Arc<ChatWidgetConfig>,
    pub credential: ApiKeySource,
}

impl ApiContext {
    pub fn new(relay: SharedRelay, credential: ApiKeySource) -> Self {
        Self {
            relay,
            fallback: Arc::new(FallbackResponder::portfolio()),
            widget: Arc::new(ChatWidgetConfig::default()),
            credential,
        }
    }

    pub fn with_widget(mut self, widget: ChatWidgetConfig) -> Self {
        self.widget = Arc::new(widget);
        self
    }
}
