// Gemini adapter implementation
// Calls the generateContent REST endpoint; no streaming.
// API Reference: https://ai.google.dev/api/generate-content

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::LlmConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Primary model when no override is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Tried when a candidate model id is unknown to the API.
pub const FALLBACK_MODEL: &str = "gemini-1.5-flash";

const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Gemini API key not configured")]
    NoApiKey,

    #[error("Gemini request failed: {0}")]
    RequestFailed(String),

    #[error("Unknown model: {0}")]
    ModelNotFound(String),

    #[error("Gemini API error ({0}): {1}")]
    Api(reqwest::StatusCode, String),

    #[error("Gemini returned no text")]
    EmptyResponse,

    #[error("No usable model among candidates")]
    CandidatesExhausted,
}

// Request types for the generateContent API

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

// Response types. Every level defaults so a structurally thin payload
// degrades to "no text" rather than a parse failure.

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Configure client from config; fails when no key is present.
    pub fn from_config(config: &LlmConfig) -> Result<Self, GeminiError> {
        if config.gemini_api_key.is_empty() {
            return Err(GeminiError::NoApiKey);
        }
        Ok(Self::new(config.gemini_api_key.clone()))
    }

    /// Point the client at a different endpoint (local mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn model_url(&self, model: &str) -> String {
        // Accept both bare ids and fully qualified "models/..." paths
        let path = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{}", model)
        };
        format!("{}/{}:generateContent?key={}", self.base_url, path, self.api_key)
    }

    /// Generate text with a single model. An HTTP 404 means the model id is
    /// unknown or retired and maps to `ModelNotFound` so callers can advance
    /// to the next candidate.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let response = self
            .client
            .post(self.model_url(model))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GeminiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GeminiError::ModelNotFound(model.to_string()));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api(status, error_text));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::RequestFailed(e.to_string()))?;

        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }

    /// Try candidate model ids in order. Only an unknown model advances to
    /// the next candidate; every other failure is returned as-is.
    pub async fn generate_with_candidates(
        &self,
        models: &[String],
        prompt: &str,
    ) -> Result<String, GeminiError> {
        for model in models {
            match self.generate(model, prompt).await {
                Ok(text) => return Ok(text),
                Err(GeminiError::ModelNotFound(missing)) => {
                    warn!(model = %missing, "Model not found, trying next candidate");
                }
                Err(e) => return Err(e),
            }
        }
        Err(GeminiError::CandidatesExhausted)
    }
}
