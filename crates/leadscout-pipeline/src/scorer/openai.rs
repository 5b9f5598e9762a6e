//! Chat-completions client for an OpenAI-compatible scoring service.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use leadscout_core::{AppConfig, Credentials};

use super::prompt::SCORING_INSTRUCTIONS;
use super::Scorer;
use crate::error::ScoringError;

const TEMPERATURE: f32 = 0.2;

/// Connection settings for [`OpenAiScorer`].
#[derive(Clone)]
pub struct ScorerSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl ScorerSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig, credentials: &Credentials) -> Self {
        Self {
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            api_key: credentials.openai_api_key.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }
}

impl std::fmt::Debug for ScorerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorerSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[redacted]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatCompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}

/// Scores prompts with a chat model behind `{base_url}/chat/completions`.
pub struct OpenAiScorer {
    client: Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl OpenAiScorer {
    /// Build the HTTP client. Makes no network calls.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidBaseUrl`] if the base URL does not parse,
    /// or [`ScoringError::Http`] if the HTTP client cannot be built.
    pub fn new(settings: &ScorerSettings) -> Result<Self, ScoringError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", settings.base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join("chat/completions"))
            .map_err(|e| ScoringError::InvalidBaseUrl(format!("{}: {e}", settings.base_url)))?;

        Ok(Self {
            client,
            endpoint,
            model: settings.model.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String, ScoringError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SCORING_INSTRUCTIONS,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ScoringError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| ScoringError::Deserialize {
                context: "chat completion".to_string(),
                source: e,
            })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ScoringError::EmptyResponse)
    }
}

impl Scorer for OpenAiScorer {
    async fn score(&self, prompt: &str) -> Result<String, ScoringError> {
        self.complete(prompt).await
    }
}
