use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let gemini_api_key = lookup("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
    let model = or_default("BRANDTRACK_MODEL", DEFAULT_MODEL);
    if model.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRANDTRACK_MODEL".to_string(),
            reason: "model name must be non-empty".to_string(),
        });
    }

    let gemini_base_url = or_default("BRANDTRACK_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);

    let request_timeout_secs =
        parse_u64("BRANDTRACK_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRANDTRACK_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least 1 second".to_string(),
        });
    }

    let brands_path = PathBuf::from(or_default("BRANDTRACK_BRANDS_PATH", "./config/brands.yaml"));
    let prompts_path = PathBuf::from(or_default(
        "BRANDTRACK_PROMPTS_PATH",
        "./config/prompts.yaml",
    ));
    let output_dir = PathBuf::from(or_default("BRANDTRACK_OUTPUT_DIR", "."));
    let log_level = or_default("BRANDTRACK_LOG_LEVEL", "info");

    Ok(AppConfig {
        gemini_api_key,
        model,
        gemini_base_url,
        request_timeout_secs,
        brands_path,
        prompts_path,
        output_dir,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
