//! OpenAI-compatible chat-completion backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AssistBackend;
use crate::{AssistError, Result};

/// Configuration for [`OpenAiBackend`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key. The backend cannot be constructed without one.
    pub api_key: String,

    /// Model identifier.
    pub model: String,

    /// Base URL of the API (no trailing slash).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 30,
            temperature: 0.1,
        }
    }
}

/// Backend calling an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiBackend {
    client: reqwest::blocking::Client,
    config: OpenAiConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiBackend {
    /// Create a backend from configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AssistError::Config("missing API key".to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssistError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }
}

impl AssistBackend for OpenAiBackend {
    fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.config.temperature,
        };

        debug!("Submitting {} char prompt to {}", prompt.len(), self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .map_err(|e| AssistError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AssistError::MalformedResponse("no completion choices".to_string()))
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}
