//! Fixed request parameters for completions.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::models::ChatModel;

/// Temperature favoring varied but coherent replies.
pub const DEFAULT_TEMPERATURE: f64 = 0.8;

/// Reply length cap; keeps answers short-form.
pub const DEFAULT_MAX_TOKENS: u32 = 300;

/// Settings sent with every completion request.
///
/// ```
/// use waychat::models::ChatModel;
/// use waychat::types::CompletionSettings;
///
/// let settings = CompletionSettings::builder()
///     .model(ChatModel::Gpt4oMini)
///     .max_tokens(150)
///     .build();
/// assert_eq!(settings.temperature, 0.8);
/// ```
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompletionSettings {
    #[builder(default)]
    pub model: ChatModel,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f64,
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
