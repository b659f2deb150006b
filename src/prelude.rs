//! Convenience re-exports for common use.

pub use crate::config::ChatConfig;
pub use crate::controller::{ConversationController, SubmitOutcome, FAILURE_MESSAGE};
pub use crate::error::{ChatError, FailureKind, Result};
pub use crate::format::{MessageFormatter, RenderedMessage};
pub use crate::models::ChatModel;
pub use crate::provider::{CompletionClient, Credential, OpenAiChatClient};
pub use crate::surface::{ChatEvent, ChatSurface};
pub use crate::transcript::TranscriptStore;
pub use crate::types::{CompletionSettings, Role, Turn};
