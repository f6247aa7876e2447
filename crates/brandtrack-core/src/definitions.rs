//! Brand and prompt definitions loaded from YAML.

use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A tracked brand: the name to look for, its alternate spellings, and the
/// competitors whose mentions are counted alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub canonical: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
}

impl Brand {
    #[must_use]
    pub fn new(canonical: impl Into<String>) -> Self {
        Self {
            canonical: canonical.into(),
            variants: Vec::new(),
            competitors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants = variants.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_competitors<I, S>(mut self, competitors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.competitors = competitors.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub text: String,
}

impl Prompt {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    #[serde(default)]
    pub brands: Vec<Brand>,
}

#[derive(Debug, Deserialize)]
pub struct PromptsFile {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

/// Load and validate the brand definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brands(path: &Path) -> Result<BrandsFile, ConfigError> {
    let brands_file: BrandsFile = read_yaml(path)?;
    validate_brands(&brands_file)?;
    Ok(brands_file)
}

/// Load and validate the prompt definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_prompts(path: &Path) -> Result<PromptsFile, ConfigError> {
    let prompts_file: PromptsFile = read_yaml(path)?;
    validate_prompts(&prompts_file)?;
    Ok(prompts_file)
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DefinitionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::DefinitionsFileParse {
        path: path.display().to_string(),
        source: e,
    })
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    if brands_file.brands.is_empty() {
        return Err(ConfigError::Validation(
            "no brands defined; expected a non-empty `brands` list".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (idx, brand) in brands_file.brands.iter().enumerate() {
        if brand.canonical.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand #{} has an empty canonical name",
                idx + 1
            )));
        }

        // Duplicates are allowed; they produce repeated rows in the report.
        if !seen.insert(brand.canonical.to_lowercase()) {
            tracing::warn!(
                brand = %brand.canonical,
                "duplicate brand canonical name; results will contain repeated rows"
            );
        }
    }

    Ok(())
}

fn validate_prompts(prompts_file: &PromptsFile) -> Result<(), ConfigError> {
    if prompts_file.prompts.is_empty() {
        return Err(ConfigError::Validation(
            "no prompts defined; expected a non-empty `prompts` list".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for (idx, prompt) in prompts_file.prompts.iter().enumerate() {
        if prompt.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "prompt #{} has an empty id",
                idx + 1
            )));
        }

        if !seen.insert(prompt.id.as_str()) {
            tracing::warn!(
                prompt = %prompt.id,
                "duplicate prompt id; rows for this id will be ambiguous"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "definitions_test.rs"]
mod tests;
