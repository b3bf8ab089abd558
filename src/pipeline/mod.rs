pub mod conversation;
pub mod dispatch; // Send cycle: guard, relay, fallback, apology
pub mod fallback;
pub mod relay;

pub use conversation::{ConversationError, ConversationStore, ReplyState};
pub use dispatch::{Dispatcher, RejectReason, ReplySource, SendOutcome};
pub use fallback::{FallbackResponder, KeywordRule};
