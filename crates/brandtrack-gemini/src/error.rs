use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Gemini API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The API answered 2xx but produced no usable text.
    #[error("Gemini returned no text: {0}")]
    EmptyResponse(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The client configuration is unusable (empty key, bad base URL, ...).
    #[error("invalid Gemini configuration: {0}")]
    InvalidConfig(String),
}
