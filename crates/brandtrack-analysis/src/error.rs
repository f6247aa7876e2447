use thiserror::Error;

/// Errors that stop a run before any pair is processed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no brands to analyze")]
    NoBrands,

    #[error("no prompts to analyze")]
    NoPrompts,
}

/// Why a single (brand, prompt) pair produced no record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PairError {
    /// The AI query client failed or returned an unusable response.
    #[error("query failed: {0}")]
    Query(String),

    /// Sentiment scoring or record assembly failed on the response text.
    #[error("analysis failed: {0}")]
    Classifier(String),
}
