//! Gemini answer generator using the `generateContent` API.
//!
//! This module is only available when the `gemini` feature is enabled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{DocChatError, Result};
use crate::generation::AnswerGenerator;

/// The base URL for the Gemini API.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// The default generation model.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// An [`AnswerGenerator`] backed by the hosted Gemini API.
///
/// Sends one blocking `generateContent` request per prompt with
/// temperature 0.0 by default, favoring reproducible, context-grounded
/// answers over creativity. The API key is resolved once at construction,
/// never read from the environment at call time.
///
/// # Example
///
/// ```rust,ignore
/// use docchat::GeminiGenerator;
///
/// let generator = GeminiGenerator::from_env()?.with_model("gemini-1.5-flash");
/// let answer = generator.generate("What color is the sky?").await?;
/// ```
pub struct GeminiGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiGenerator {
    /// Create a new generator with the given API key and the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DocChatError::GenerationError {
                provider: "Gemini".into(),
                message: "API key must not be empty".into(),
            });
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.into(),
            temperature: 0.0,
        })
    }

    /// Create a new generator using the `GOOGLE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY").map_err(|_| {
            DocChatError::GenerationError {
                provider: "Gemini".into(),
                message: "GOOGLE_API_KEY environment variable not set".into(),
            }
        })?;
        Self::new(api_key)
    }

    /// Set the model name (e.g. `gemini-1.5-pro`).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

// ── Gemini API request/response types ──────────────────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

// ── AnswerGenerator implementation ─────────────────────────────────

#[async_trait]
impl AnswerGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(provider = "Gemini", model = %self.model, prompt_len = prompt.len(), "generating answer");

        let request_body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            generation_config: GenerationConfig { temperature: self.temperature },
        };

        let url = format!("{GEMINI_BASE_URL}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "request failed");
                DocChatError::GenerationError {
                    provider: "Gemini".into(),
                    message: format!("request failed: {e}"),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = "Gemini", %status, "API error");
            return Err(DocChatError::GenerationError {
                provider: "Gemini".into(),
                message: format!("API returned {status}: {detail}"),
            });
        }

        let generate_response: GenerateResponse = response.json().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "failed to parse response");
            DocChatError::GenerationError {
                provider: "Gemini".into(),
                message: format!("failed to parse response: {e}"),
            }
        })?;

        let answer: String = generate_response
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();

        if answer.is_empty() {
            return Err(DocChatError::GenerationError {
                provider: "Gemini".into(),
                message: "API returned no candidate text".into(),
            });
        }

        Ok(answer)
    }
}
