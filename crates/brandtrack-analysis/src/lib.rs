//! Mention counting and result aggregation for brandtrack.
//!
//! Composes a brand-aware query for every (brand, prompt) pair, sends it to a
//! [`QueryClient`], counts whole-word brand and competitor mentions in the
//! response, scores its sentiment, and merges everything into one
//! [`AnalysisRecord`] per pair. Pair failures are isolated and reported
//! without aborting the run.

pub mod client;
pub mod context;
pub mod error;
pub mod matcher;
pub mod orchestrator;
pub mod scorer;
pub mod sentiment;
pub mod types;

pub use client::QueryClient;
pub use context::build_context;
pub use error::{AnalysisError, PairError};
pub use matcher::{count_mentions, BrandMatcher};
pub use orchestrator::{analyze_pair, run_analysis};
pub use scorer::LexiconScorer;
pub use sentiment::{classify, score_sentiment, PolarityScorer};
pub use types::{
    AnalysisRecord, CompetitorCounts, MentionCount, PairFailure, PairOutcome, PairStatus,
    Progress, RunReport, SentimentLabel, SentimentResult,
};
