//! Command-line front end.

pub mod terminal;

use std::path::PathBuf;

use clap::Parser;

use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::models::ChatModel;

/// WayChat terminal client
#[derive(Parser, Debug)]
#[command(name = "waychat", version, about = "WayChat: creative assistant for video ads")]
pub struct Cli {
    /// Config file (TOML). Defaults to the platform config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Model id (e.g. gpt-4o)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Max reply tokens
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Replace the built-in system prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// API base URL (OpenAI-compatible)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Apply flags on top of a loaded config.
    pub fn apply(&self, config: &mut ChatConfig) {
        if let Some(model) = &self.model {
            config.completion.model = ChatModel::from(model.clone());
        }
        if let Some(t) = self.temperature {
            config.completion.temperature = t;
        }
        if let Some(max) = self.max_tokens {
            config.completion.max_tokens = max;
        }
        if let Some(system) = &self.system {
            config.system_prompt = system.clone();
        }
        if let Some(url) = &self.base_url {
            config.base_url = Some(url.clone());
        }
    }
}

/// Map a startup error to a user-facing help string.
pub fn format_error_help(err: &ChatError) -> String {
    match err {
        ChatError::Configuration(msg) if msg.contains("OPENAI_API_KEY") => {
            format!("{msg}. Set it in your environment or a .env file.")
        }
        ChatError::Configuration(msg) => {
            format!("Configuration error: {msg}. Check your config file and WAYCHAT_* variables.")
        }
        other => format!("{other}"),
    }
}
