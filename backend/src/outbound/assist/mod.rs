//! Reqwest-backed Gemini text generation adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and JSON decoding of the provider response. The
//! prompt templates live in the domain.

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::domain::ports::{TextGenerationError, TextGenerator};

use dto::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for the Gemini adapter.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    /// API key sent on every request.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Service base URL without a trailing path.
    pub endpoint: String,
}

/// Text generator calling the Gemini generateContent API.
pub struct GeminiTextGenerator {
    client: Client,
    url: String,
    api_key: String,
}

impl GeminiTextGenerator {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(settings: GeminiSettings) -> Result<Self, reqwest::Error> {
        Self::with_timeout(settings, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn with_timeout(
        settings: GeminiSettings,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.endpoint.trim_end_matches('/'),
            settings.model
        );
        Ok(Self {
            client,
            url,
            api_key: settings.api_key,
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> TextGenerationError {
    TextGenerationError::transport(error.to_string())
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&GenerateContentRequest::single_prompt(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            let detail = String::from_utf8_lossy(&body);
            debug!(status = %status, "generation request rejected");
            return Err(TextGenerationError::provider(format!(
                "generation request failed with status {status}: {}",
                detail.trim()
            )));
        }

        let decoded: GenerateContentResponse = serde_json::from_slice(&body).map_err(|err| {
            TextGenerationError::decode(format!("invalid generation payload: {err}"))
        })?;
        decoded
            .first_candidate_text()
            .map(|text| text.trim().to_owned())
            .ok_or_else(|| TextGenerationError::provider("generation returned no candidates"))
    }
}
