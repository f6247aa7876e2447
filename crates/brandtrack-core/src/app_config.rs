use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub model: String,
    pub gemini_base_url: String,
    pub request_timeout_secs: u64,
    pub brands_path: PathBuf,
    pub prompts_path: PathBuf,
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    /// The Gemini API key, for commands that call the API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`](crate::ConfigError::MissingEnvVar)
    /// if `GEMINI_API_KEY` was not set.
    pub fn require_gemini_api_key(&self) -> Result<&str, crate::ConfigError> {
        self.gemini_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| crate::ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("model", &self.model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("brands_path", &self.brands_path)
            .field("prompts_path", &self.prompts_path)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}
