//! Shared definitions and configuration for brandtrack.
//!
//! Loads the brand and prompt definition files that drive an analysis run and
//! the process-level settings read from the environment.

pub mod app_config;
pub mod definitions;

mod config;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use definitions::{load_brands, load_prompts, Brand, BrandsFile, Prompt, PromptsFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required env var {0} is not set")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read definitions file {path}: {source}")]
    DefinitionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse definitions file {path}: {source}")]
    DefinitionsFileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid definitions: {0}")]
    Validation(String),
}
