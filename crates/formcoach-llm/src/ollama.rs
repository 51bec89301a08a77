//! Client for an Ollama-compatible generation endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use formcoach_core::{Coach, CoachError};

use crate::config::CoachConfig;

/// Canned advice used whenever generation fails or times out.
const FALLBACK_LINES: &[&str] = &[
    "Keep it up, you're doing great!",
    "Nice steady pace, stay with it.",
    "Breathe out on the effort and keep your core tight.",
    "Good control. One more clean rep.",
];

/// Sampling temperature for generation requests.
const TEMPERATURE: f32 = 0.8;

/// Nucleus sampling cutoff for generation requests.
const TOP_P: f32 = 0.9;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Coaching client backed by a local Ollama-compatible server.
///
/// Implements [`Coach`], whose contract is infallible: any transport,
/// status, or decoding failure is logged and replaced with a canned line,
/// cycled so repeated failures do not repeat the same sentence.
#[derive(Debug)]
pub struct OllamaCoach {
    config: CoachConfig,
    client: reqwest::Client,
    fallback_cursor: AtomicUsize,
}

impl OllamaCoach {
    /// Creates a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::RequestFailed`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: CoachConfig) -> Result<Self, CoachError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoachError::RequestFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            config,
            client,
            fallback_cursor: AtomicUsize::new(0),
        })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Runs one generation round trip.
    ///
    /// # Errors
    ///
    /// Returns a [`CoachError`] for transport failures, non-success status
    /// codes, and undecodable bodies. All are recoverable; [`Coach::advise`]
    /// absorbs them.
    pub async fn generate(&self, prompt: &str) -> Result<String, CoachError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoachError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoachError::BadStatus {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| CoachError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        let advice = body.response.trim().to_string();
        if advice.is_empty() {
            return Err(CoachError::MalformedResponse {
                reason: "empty response field".to_string(),
            });
        }
        Ok(advice)
    }

    fn next_fallback(&self) -> String {
        let index = self.fallback_cursor.fetch_add(1, Ordering::Relaxed);
        FALLBACK_LINES[index % FALLBACK_LINES.len()].to_string()
    }
}

#[async_trait]
impl Coach for OllamaCoach {
    async fn advise(&self, feedback: &str, persona: Option<&str>) -> String {
        let prompt = self.config.prompt_for(feedback, persona);
        match self.generate(&prompt).await {
            Ok(advice) => {
                debug!(model = %self.config.model, "coach advice generated");
                advice
            }
            Err(error) => {
                warn!(%error, "coach generation failed, using fallback line");
                self.next_fallback()
            }
        }
    }
}
