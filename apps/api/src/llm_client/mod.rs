//! LLM Client — the single point of entry for all completion-service calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! The orchestrator in `ai::service` only sees the `CompletionService` trait,
//! so tests swap in a scripted mock without touching the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

#[cfg(test)]
pub mod mock;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response blocked by provider: {0}")]
    Blocked(String),

    #[error("completion service returned empty content")]
    EmptyContent,

    #[error("could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CompletionError {
    /// Transport failures, rate limits and 5xx responses are worth another attempt.
    fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Http(_) | CompletionError::Timeout(_) => true,
            CompletionError::QuotaExceeded(_) => true,
            CompletionError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// The external generative-text provider: one prompt in, free-form text out.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Eager credential check used by the availability gate at startup.
    async fn probe(&self) -> Result<(), CompletionError> {
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Result<String, CompletionError> {
        let text: String = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            Some(reason) => Err(CompletionError::Blocked(reason)),
            None => Err(CompletionError::EmptyContent),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Maps a non-success HTTP status and body to a `CompletionError`.
fn classify_status(status: u16, body: String) -> CompletionError {
    let message = serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    if status == 429 {
        CompletionError::QuotaExceeded(message)
    } else {
        CompletionError::Api { status, message }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Connection settings for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

/// Gemini `generateContent` client with explicit timeout and retry policy.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn model_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn map_send_error(&self, e: reqwest::Error) -> CompletionError {
        if e.is_timeout() {
            CompletionError::Timeout(self.settings.timeout.as_secs())
        } else {
            CompletionError::Http(e)
        }
    }

    async fn generate_once(&self, prompt: &str) -> Result<String, CompletionError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{}:generateContent", self.model_url()))
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            warn!("Gemini API returned {}", status);
            return Err(classify_status(status.as_u16(), body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Completion succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }
        parsed.text()
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    /// Single-shot by default. With `max_retries > 0`, retries transport errors,
    /// 429 and 5xx with exponential backoff (1s, 2s, 4s, ...).
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let mut attempt = 0;
        loop {
            match self.generate_once(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.settings.max_retries => {
                    let delay = Duration::from_millis(1000 * (1 << attempt.min(6)));
                    attempt += 1;
                    warn!(
                        "Completion attempt {} failed ({e}), retrying after {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn probe(&self) -> Result<(), CompletionError> {
        let response = self
            .client
            .get(self.model_url())
            .header(API_KEY_HEADER, &self.settings.api_key)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status.as_u16(), body))
    }
}
