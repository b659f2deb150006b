//! Chat model identifiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Models known to the chat-completions endpoint.
///
/// Any other id parses into [`ChatModel::Custom`] and is sent verbatim.
#[derive(
    Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(from = "String", into = "String")]
pub enum ChatModel {
    #[default]
    #[strum(serialize = "gpt-4o")]
    Gpt4o,
    #[strum(serialize = "gpt-4o-mini")]
    Gpt4oMini,
    #[strum(serialize = "gpt-4-turbo")]
    Gpt4Turbo,
    #[strum(serialize = "gpt-4.1")]
    Gpt41,
    #[strum(serialize = "gpt-4.1-mini")]
    Gpt41Mini,
    #[strum(serialize = "gpt-3.5-turbo")]
    Gpt35Turbo,
    /// Custom/unknown model by ID.
    #[strum(default)]
    Custom(String),
}

impl ChatModel {
    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Custom(s) => s,
        }
    }
}

impl From<String> for ChatModel {
    fn from(id: String) -> Self {
        match id.parse() {
            Ok(model) => model,
            Err(_) => Self::Custom(id),
        }
    }
}

impl From<ChatModel> for String {
    fn from(model: ChatModel) -> Self {
        model.as_str().to_string()
    }
}
