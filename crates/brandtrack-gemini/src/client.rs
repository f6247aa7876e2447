//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Wraps `reqwest` with Gemini-specific error handling, API key management,
//! and typed response decoding. Each call is a single attempt; callers decide
//! what a failure means.

use std::time::Duration;

use brandtrack_analysis::QueryClient;
use brandtrack_core::{
    AppConfig, ConfigError, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use reqwest::{Client, Url};

use crate::error::GeminiError;
use crate::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

/// Connection settings for [`GeminiClient`].
///
/// Built explicitly by the caller; the client never reads the environment.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Production endpoint and default model for `api_key`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Connection settings taken from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if no API key is configured.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.require_gemini_api_key()?)
            .with_model(config.model.as_str())
            .with_base_url(config.gemini_base_url.as_str())
            .with_timeout_secs(config.request_timeout_secs))
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Client for the Gemini text-generation API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: Url,
}

impl GeminiClient {
    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::InvalidConfig`] if the API key or model is empty
    /// or the base URL does not parse, and [`GeminiError::Http`] if the
    /// underlying `reqwest::Client` cannot be constructed.
    pub fn new(config: &GeminiConfig) -> Result<Self, GeminiError> {
        if config.api_key.trim().is_empty() {
            return Err(GeminiError::InvalidConfig("API key is empty".to_string()));
        }

        let endpoint = Self::build_endpoint(&config.base_url, &config.model)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("brandtrack/0.1 (brand-mention-tracking)")
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.trim_start_matches("models/").to_string(),
            endpoint,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates a completion for a single user message.
    ///
    /// Returns the concatenated text parts of the first candidate.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::Http`] on network failure or timeout.
    /// - [`GeminiError::Api`] on a non-2xx status.
    /// - [`GeminiError::Deserialize`] if the body is not the expected JSON.
    /// - [`GeminiError::EmptyResponse`] if no candidate carries text (e.g. the
    ///   prompt was blocked).
    pub async fn generate(&self, text: &str) -> Result<String, GeminiError> {
        tracing::debug!(model = %self.model, chars = text.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::user_text(text))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: Self::error_message(&body),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: format!("generateContent(model={})", self.model),
                source: e,
            })?;

        parsed.first_text().ok_or_else(|| {
            let reason = parsed
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .map(|r| format!("prompt blocked ({r})"))
                .or_else(|| {
                    parsed
                        .candidates
                        .first()
                        .and_then(|c| c.finish_reason.clone())
                        .map(|r| format!("finish reason {r}"))
                })
                .unwrap_or_else(|| "no candidates returned".to_string());
            GeminiError::EmptyResponse(reason)
        })
    }

    /// Builds `{base}/v1beta/models/{model}:generateContent`.
    ///
    /// Accepts model names with or without the `models/` prefix.
    fn build_endpoint(base_url: &str, model: &str) -> Result<Url, GeminiError> {
        let model = model.trim().trim_start_matches("models/");
        if model.is_empty() {
            return Err(GeminiError::InvalidConfig("model name is empty".to_string()));
        }

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| {
            GeminiError::InvalidConfig(format!("invalid base URL '{base_url}': {e}"))
        })?;

        base.join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| GeminiError::InvalidConfig(format!("invalid model '{model}': {e}")))
    }

    /// Pulls `error.message` out of an error body, falling back to the raw text.
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => match envelope.error.status {
                Some(status) => format!("{status}: {}", envelope.error.message),
                None => envelope.error.message,
            },
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}

impl QueryClient for GeminiClient {
    type Error = GeminiError;

    async fn query(&self, context: &str) -> Result<String, GeminiError> {
        self.generate(context).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
