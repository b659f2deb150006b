//! Configuration (layered: defaults < TOML file < env < explicit overrides).

pub mod prompt;

pub use prompt::DEFAULT_SYSTEM_PROMPT;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{ChatError, Result};
use crate::models::ChatModel;
use crate::provider::{Credential, OpenAiChatClient};
use crate::types::CompletionSettings;

/// Environment variables read by [`ChatConfig::apply_env`].
pub const ENV_VARS: [&str; 7] = [
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "WAYCHAT_MODEL",
    "WAYCHAT_TEMPERATURE",
    "WAYCHAT_MAX_TOKENS",
    "WAYCHAT_SYSTEM_PROMPT",
    "WAYCHAT_REQUEST_TIMEOUT_SECS",
];

pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 2.0;

/// Settings for one chat session.
///
/// In TOML, completion parameters live under `[completion]`:
///
/// ```toml
/// base_url = "http://localhost:8080/v1"
/// request_timeout_secs = 30
///
/// [completion]
/// model = "gpt-4o-mini"
/// max_tokens = 200
/// ```
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub system_prompt: String,
    pub request_timeout_secs: u64,
    pub completion: CompletionSettings,
}

impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| ".."))
            .field("base_url", &self.base_url)
            .field("system_prompt", &self.system_prompt)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("completion", &self.completion)
            .finish()
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            request_timeout_secs: 120,
            completion: CompletionSettings::default(),
        }
    }
}

impl ChatConfig {
    /// Default config file location (`<config dir>/waychat/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "Waymark", "waychat")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            ChatError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Load defaults, then the config file, then the environment.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used only if present. A `.env` file in the working directory is loaded
    /// first when available.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(default) => Self::load_file(&default)?,
                None => Self::default(),
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from process environment variables.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from a variable lookup (see [`ENV_VARS`]).
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.base_url = Some(url);
        }
        if let Some(model) = lookup("WAYCHAT_MODEL") {
            self.completion.model = ChatModel::from(model);
        }
        if let Some(raw) = lookup("WAYCHAT_TEMPERATURE") {
            self.completion.temperature = parse_var("WAYCHAT_TEMPERATURE", &raw)?;
        }
        if let Some(raw) = lookup("WAYCHAT_MAX_TOKENS") {
            self.completion.max_tokens = parse_var("WAYCHAT_MAX_TOKENS", &raw)?;
        }
        if let Some(prompt) = lookup("WAYCHAT_SYSTEM_PROMPT") {
            self.system_prompt = prompt;
        }
        if let Some(raw) = lookup("WAYCHAT_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("WAYCHAT_REQUEST_TIMEOUT_SECS", &raw)?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The API credential, or a configuration error naming the variable.
    pub fn credential(&self) -> Result<Credential> {
        self.api_key
            .clone()
            .map(Credential::new)
            .ok_or_else(|| ChatError::Configuration("Missing OPENAI_API_KEY".into()))
    }

    /// Reject settings no request could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(ChatError::Configuration(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        let temperature = self.completion.temperature;
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(ChatError::Configuration(format!(
                "temperature {temperature} is outside {MIN_TEMPERATURE} - {MAX_TEMPERATURE}"
            )));
        }
        Ok(())
    }

    /// Build the completion client described by this config.
    pub fn build_client(&self) -> Result<OpenAiChatClient> {
        self.validate()?;
        OpenAiChatClient::with_timeout(
            self.credential()?,
            self.completion.clone(),
            self.base_url.clone(),
            self.request_timeout(),
        )
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| ChatError::Configuration(format!("invalid {name} '{raw}': {e}")))
}
