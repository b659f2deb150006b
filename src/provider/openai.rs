//! OpenAI Chat Completions client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::ChatError;
use crate::types::{CompletionSettings, Turn};

use super::http::{bearer_headers, build_client, status_to_error, DEFAULT_REQUEST_TIMEOUT};
use super::{CompletionClient, Credential};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug)]
pub struct OpenAiChatClient {
    credential: Credential,
    settings: CompletionSettings,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAiChatClient {
    pub fn new(
        credential: Credential,
        settings: CompletionSettings,
        base_url: Option<String>,
    ) -> Result<Self, ChatError> {
        Self::with_timeout(credential, settings, base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        credential: Credential,
        settings: CompletionSettings,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ChatError> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            credential,
            settings,
            base_url,
            http: build_client(timeout)?,
        })
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    fn build_request_body(&self, history: &[Turn]) -> serde_json::Value {
        let messages = history
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.role().as_str(),
                    "content": turn.content(),
                })
            })
            .collect::<Vec<_>>();

        serde_json::json!({
            "model": self.settings.model.as_str(),
            "messages": messages,
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for OpenAiChatClient {
    fn model_id(&self) -> &str {
        self.settings.model.as_str()
    }

    async fn complete(&self, history: &[Turn]) -> Result<String, ChatError> {
        let body = self.build_request_body(history);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = self.settings.model.as_str(),
            turns = history.len(),
            "OpenAI complete"
        );

        let resp = self
            .http
            .post(&url)
            .headers(bearer_headers(self.credential.expose()))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let body_text = resp.text().await?;
        if !status.is_success() {
            return Err(status_to_error(status.as_u16(), &body_text));
        }

        let data: OpenAiChatResponse = serde_json::from_str(&body_text)?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::MalformedResponse("no choices in response".into()))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| ChatError::MalformedResponse("reply has no text content".into()))?;

        Ok(content.trim().to_string())
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}
