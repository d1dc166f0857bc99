//! Gemini model executor
//!
//! Calls the `generateContent` endpoint and returns the first text part of
//! the first candidate.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use crate::config::ModelConfig;
use crate::core::ports::ModelExecutor;

// =============================================================================
// API REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

// =============================================================================
// EXECUTOR
// =============================================================================

/// Runs prompts against a Gemini model
#[derive(Clone)]
pub struct GeminiExecutor {
    client: Client,
    runtime: Arc<Runtime>,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f64,
}

impl std::fmt::Debug for GeminiExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiExecutor")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GeminiExecutor {
    /// Executor for the model described by `config`
    pub fn new(
        config: &ModelConfig,
        api_key: String,
        runtime: Arc<Runtime>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            runtime,
            api_key,
            model: config.name.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        let model = self.model.strip_prefix("models/").unwrap_or(&self.model);
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .context("request to Gemini failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {error_text}", status.as_u16());
        }

        let body: GenerateContentResponse =
            response.json().await.context("failed to parse Gemini response")?;
        extract_answer(body)
    }
}

fn extract_answer(body: GenerateContentResponse) -> anyhow::Result<String> {
    if let Some(err) = body.error {
        anyhow::bail!("Gemini API error: {}", err.message);
    }

    body.candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
        .ok_or_else(|| anyhow::anyhow!("no response from Gemini"))
}

impl ModelExecutor for GeminiExecutor {
    fn execute(&self, prompt: &str) -> anyhow::Result<String> {
        log::debug!("sending {} char prompt to {}", prompt.chars().count(), self.model);
        self.runtime.block_on(self.generate(prompt))
    }

    fn name(&self) -> String {
        self.model.clone()
    }
}
