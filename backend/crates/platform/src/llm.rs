//! LLM chat-completion client
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint. Requests are
//! retried with exponential backoff on 408/429/5xx and transport errors.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::env::{env_parse, env_string};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_RETRIES: usize = 3;
const BASE_BACKOFF_MS: u64 = 200;
const MAX_RETRIES_LIMIT: usize = 8;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` disables the client; callers are expected to fall back
    pub api_key: Option<String>,
    pub model: String,
    pub api_endpoint: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_retries: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            temperature: DEFAULT_TEMPERATURE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_string("LLM_API_KEY"),
            model: env_string("LLM_MODEL").unwrap_or(defaults.model),
            api_endpoint: normalize_endpoint(
                &env_string("LLM_API_ENDPOINT").unwrap_or(defaults.api_endpoint),
            ),
            timeout: env_parse("LLM_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            temperature: env_parse("LLM_TEMPERATURE").unwrap_or(defaults.temperature),
            max_retries: env_parse("LLM_MAX_RETRIES")
                .map(|n: usize| n.min(MAX_RETRIES_LIMIT))
                .unwrap_or(defaults.max_retries),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: Option<String>,
    pub choices: Vec<ChatChoice>,
}

impl ChatResponse {
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM not configured: {0}")]
    NotConfigured(&'static str),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("JSON decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty response")]
    EmptyChoices,
}

/// JSON-mode completion seam
#[trait_variant::make(LanguageModel: Send)]
pub trait LocalLanguageModel {
    /// Run one system + user exchange and parse the reply as a JSON document
    async fn complete_json(&self, system: &str, user: &str)
    -> Result<serde_json::Value, LlmError>;
}

#[derive(Clone)]
pub struct LlmClient {
    config: LlmConfig,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }

    pub fn from_env() -> Self {
        Self::new(LlmConfig::from_env())
    }

    pub fn is_available(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|v| !v.trim().is_empty())
            && !self.config.model.trim().is_empty()
    }

    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        json_mode: bool,
    ) -> Result<ChatResponse, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(LlmError::NotConfigured("LLM_API_KEY"))?;

        let url = format!(
            "{}/chat/completions",
            self.config.api_endpoint.trim_end_matches('/')
        );
        let mut payload = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "stream": false
        });
        if json_mode {
            payload["response_format"] = serde_json::json!({ "type": "json_object" });
        }

        self.post_with_retry(&url, api_key, &payload).await
    }

    async fn post_with_retry(
        &self,
        url: &str,
        api_key: &str,
        payload: &serde_json::Value,
    ) -> Result<ChatResponse, LlmError> {
        let max_retries = self.config.max_retries;
        let mut retry = 0;

        loop {
            let err = match self
                .client
                .post(url)
                .bearer_auth(api_key)
                .json(payload)
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    let bytes = resp.bytes().await?;
                    return serde_json::from_slice(&bytes).map_err(|e| {
                        tracing::error!(error = %e, "Failed to parse LLM response JSON");
                        LlmError::Json(e)
                    });
                }
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    if !is_retryable(status) {
                        return Err(LlmError::HttpStatus { status, body });
                    }
                    LlmError::HttpStatus { status, body }
                }
                Err(e) => LlmError::Request(e),
            };

            if retry >= max_retries {
                return Err(err);
            }
            let backoff = backoff_delay(retry);
            tracing::warn!(retry, error = %err, "LLM request failed, retrying");
            sleep(backoff).await;
            retry += 1;
        }
    }
}

/// Exponential delay before retry number `retry`, capped at the retry limit
fn backoff_delay(retry: usize) -> Duration {
    let exponent = retry.min(MAX_RETRIES_LIMIT) as u32;
    Duration::from_millis(BASE_BACKOFF_MS.saturating_mul(1u64 << exponent))
}

impl LanguageModel for LlmClient {
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
    ) -> Result<serde_json::Value, LlmError> {
        let messages = [ChatMessage::system(system), ChatMessage::user(user)];
        let response = self.chat(&messages, true).await?;
        let content = response.first_content().ok_or(LlmError::EmptyChoices)?;
        Ok(serde_json::from_str(content)?)
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.ends_with("/v1") || trimmed.contains("/v1/") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

fn is_retryable(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
        || status.is_server_error()
}
