//! # Summarizer
//!
//! The collaborator that turns a prompt into the day's summary text.
//!
//! ```text
//! ┌──────────────────┐  build_prompt   ┌─────────────────────┐  POST   ┌────────────┐
//! │ SummaryFigures   │ ──────────────► │ dyn Summarizer      │ ──────► │ Gemini API │
//! └──────────────────┘                 │ GeminiSummarizer    │ ◄────── │            │
//!                                      │ DisabledSummarizer  │  text   └────────────┘
//!                                      └─────────────────────┘
//! ```
//!
//! The reply is returned as-is: no parsing, no retry.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use till_core::summary::{build_prompt, SummaryFigures};

use crate::config::SummaryConfig;

// =============================================================================
// Trait
// =============================================================================

/// Produces free-text summaries. Handlers only see this trait, so tests can
/// swap in a fake.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, figures: &SummaryFigures) -> Result<String, SummaryError>;
}

/// Failures of the summary call.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// No API key configured
    #[error("summary service not configured")]
    NotConfigured,

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// API error response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Provider returned unexpected format
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

// =============================================================================
// Disabled
// =============================================================================

/// Used when no API key is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSummarizer;

#[async_trait]
impl Summarizer for DisabledSummarizer {
    async fn summarize(&self, _figures: &SummaryFigures) -> Result<String, SummaryError> {
        Err(SummaryError::NotConfigured)
    }
}

// =============================================================================
// Gemini
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for Gemini's `models/{model}:generateContent`.
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiSummarizer {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SummaryError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SummaryError::Network(e.to_string()))?;

        Ok(GeminiSummarizer {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, figures: &SummaryFigures) -> Result<String, SummaryError> {
        let prompt = build_prompt(figures);
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Requesting summary");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| SummaryError::Network(e.without_url().to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            warn!(status = status.as_u16(), "Summary service returned an error");
            return Err(SummaryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SummaryError::InvalidResponse(e.without_url().to_string()))?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or_else(|| SummaryError::InvalidResponse("no text in response".to_string()))
    }
}

/// Picks the summarizer for a configuration.
pub fn from_config(config: &SummaryConfig) -> Result<Box<dyn Summarizer>, SummaryError> {
    match &config.api_key {
        Some(key) => Ok(Box::new(GeminiSummarizer::new(
            key.clone(),
            config.model.clone(),
            config.base_url.clone(),
            config.timeout,
        )?)),
        None => Ok(Box::new(DisabledSummarizer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::Money;

    fn figures() -> SummaryFigures {
        SummaryFigures {
            total_cash: Money::from_cents(25_000),
            takings: Money::from_cents(5_000),
            expected_takings: None,
            float_total: Money::from_cents(20_000),
        }
    }

    #[tokio::test]
    async fn test_disabled_summarizer() {
        let err = DisabledSummarizer.summarize(&figures()).await.unwrap_err();
        assert!(matches!(err, SummaryError::NotConfigured));
        assert_eq!(err.to_string(), "summary service not configured");
    }

    #[test]
    fn test_endpoint() {
        let gemini = GeminiSummarizer::new(
            "k",
            "gemini-1.5-flash",
            "https://generativelanguage.googleapis.com/v1beta",
            None,
        )
        .unwrap();
        assert_eq!(
            gemini.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_and_response_shapes() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );

        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"A perfect day."}],"role":"model"}}]}"#,
        )
        .unwrap();
        let text = body.candidates[0].content.as_ref().unwrap().parts[0]
            .text
            .clone();
        assert_eq!(text.as_deref(), Some("A perfect day."));
    }

    #[test]
    fn test_from_config_without_key_is_disabled() {
        let config = SummaryConfig {
            api_key: None,
            model: "m".to_string(),
            base_url: "http://localhost".to_string(),
            timeout: None,
        };
        assert!(from_config(&config).is_ok());
    }
}
