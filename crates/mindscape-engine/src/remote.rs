//! Remote analyzer contract and an OpenAI-compatible chat-completions client.
//!
//! The remote path is never trusted: any transport failure, non-2xx status,
//! unparseable body, length mismatch, out-of-range value or unknown category
//! is an [`AnalyzerError`], and the caller falls back to the rule-based
//! analyzer for the whole batch.

use async_trait::async_trait;
use mindscape_core::{PostAnalysis, PostCategory};
use serde::Deserialize;
use std::time::Duration;

use crate::config::RemoteConfig;
use crate::prompts::{analyzer_user_message, ANALYZER_SYSTEM_PROMPT};

/// Result type for remote analysis
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Remote analyzer error types
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Expected {expected} results, got {actual}")]
    Misaligned { expected: usize, actual: usize },

    #[error("Result {index} has {field} out of range: {value}")]
    OutOfRange {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Result {index} has unknown category {category:?}")]
    UnknownCategory { index: usize, category: String },

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Remote analyzer not configured: {0}")]
    NotConfigured(String),
}

/// A batch analyzer living outside the process
#[async_trait]
pub trait ExternalAnalyzer: Send + Sync {
    /// Analyzer name for logs
    fn name(&self) -> &str;

    /// Analyze an ordered batch, returning one result per line in order
    async fn analyze_batch(&self, lines: &[String]) -> AnalyzerResult<Vec<PostAnalysis>>;
}

/// One element of the model's JSON array
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    sentiment_score: f64,
    intensity: f64,
    category: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions analyzer
pub struct ChatCompletionAnalyzer {
    client: reqwest::Client,
    config: RemoteConfig,
    api_key: Option<String>,
    timeout: Duration,
}

impl ChatCompletionAnalyzer {
    /// Build a client; the bearer token is read from `config.api_key_env`
    pub fn new(config: RemoteConfig, timeout: Duration) -> AnalyzerResult<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(AnalyzerError::NotConfigured("empty endpoint".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AnalyzerError::Transport(format!("Failed to create HTTP client: {e}")))?;

        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());

        Ok(Self {
            client,
            config,
            api_key,
            timeout,
        })
    }

    /// Override the bearer token
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn request_content(&self, lines: &[String]) -> AnalyzerResult<String> {
        let user_message =
            analyzer_user_message(lines).map_err(|e| AnalyzerError::Parse(e.to_string()))?;

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": ANALYZER_SYSTEM_PROMPT },
                { "role": "user", "content": user_message },
            ],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        let mut request = self.client.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AnalyzerError::Timeout(self.timeout.as_millis() as u64)
            } else {
                AnalyzerError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Parse(format!("chat envelope: {e}")))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalyzerError::Parse("no message content".to_string()))
    }
}

#[async_trait]
impl ExternalAnalyzer for ChatCompletionAnalyzer {
    fn name(&self) -> &str {
        "chat-completions"
    }

    async fn analyze_batch(&self, lines: &[String]) -> AnalyzerResult<Vec<PostAnalysis>> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let content = self.request_content(lines).await?;
        tracing::debug!(
            model = %self.config.model,
            response_len = content.len(),
            "remote analysis received"
        );

        parse_analysis(&content, lines.len())
    }
}

/// Remove a surrounding markdown code fence, with or without a `json` tag
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let inner = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"));

    match inner {
        Some(rest) => rest.strip_suffix("```").unwrap_or(rest).trim(),
        None => trimmed,
    }
}

/// Parse and validate the model's JSON array against the batch size
pub fn parse_analysis(content: &str, expected: usize) -> AnalyzerResult<Vec<PostAnalysis>> {
    let raw: Vec<RawAnalysis> = serde_json::from_str(strip_code_fences(content))
        .map_err(|e| AnalyzerError::Parse(e.to_string()))?;

    if raw.len() != expected {
        return Err(AnalyzerError::Misaligned {
            expected,
            actual: raw.len(),
        });
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, r)| validate(index, r))
        .collect()
}

fn validate(index: usize, raw: RawAnalysis) -> AnalyzerResult<PostAnalysis> {
    if !raw.sentiment_score.is_finite() || !(-1.0..=1.0).contains(&raw.sentiment_score) {
        return Err(AnalyzerError::OutOfRange {
            index,
            field: "sentimentScore",
            value: raw.sentiment_score,
        });
    }

    let intensity_range =
        PostAnalysis::MIN_INTENSITY as f64..=PostAnalysis::MAX_INTENSITY as f64;
    if raw.intensity.fract() != 0.0 || !intensity_range.contains(&raw.intensity) {
        return Err(AnalyzerError::OutOfRange {
            index,
            field: "intensity",
            value: raw.intensity,
        });
    }

    let category: PostCategory =
        raw.category
            .parse()
            .map_err(|_| AnalyzerError::UnknownCategory {
                index,
                category: raw.category.clone(),
            })?;

    Ok(PostAnalysis::new(
        raw.sentiment_score,
        raw.intensity as u8,
        category,
    ))
}
