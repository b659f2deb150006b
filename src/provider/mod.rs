//! Completion client trait and the OpenAI implementation.

pub mod http;
pub mod openai;

pub use openai::OpenAiChatClient;

use std::fmt;

use async_trait::async_trait;

use crate::error::ChatError;
use crate::types::Turn;

/// Opaque API secret. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Raw secret, for building request headers only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

/// The remote completion service, seen as a function from history to reply.
///
/// Implementations own their credential and request parameters. Every
/// failure (transport, status, payload) is returned as a [`ChatError`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model id, used in logs.
    fn model_id(&self) -> &str;

    /// Send the full ordered history and return the reply text.
    async fn complete(&self, history: &[Turn]) -> Result<String, ChatError>;
}
