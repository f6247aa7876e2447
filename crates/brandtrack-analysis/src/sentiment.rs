//! Sentiment classification contract.

use std::fmt::Display;

use crate::types::{SentimentLabel, SentimentResult};

/// Polarity above this is positive, below its negation negative.
pub const LABEL_THRESHOLD: f64 = 0.1;

/// Maps text to a polarity score in `[-1.0, 1.0]`.
pub trait PolarityScorer {
    type Error: Display;

    /// # Errors
    ///
    /// Implementation-specific; a failure skips the pair being analyzed.
    fn polarity(&self, text: &str) -> Result<f64, Self::Error>;
}

/// Three-way label for a polarity. Both thresholds are exclusive.
#[must_use]
pub fn classify(polarity: f64) -> SentimentLabel {
    if polarity > LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else if polarity < -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

/// Score `text` and label the result.
///
/// Empty or whitespace-only text is neutral with polarity `0.0` and never
/// reaches the scorer. Scores outside `[-1.0, 1.0]` are clamped.
///
/// # Errors
///
/// Propagates the scorer's error.
pub fn score_sentiment<S>(scorer: &S, text: &str) -> Result<SentimentResult, S::Error>
where
    S: PolarityScorer + ?Sized,
{
    if text.trim().is_empty() {
        return Ok(SentimentResult::neutral());
    }

    let polarity = scorer.polarity(text)?.clamp(-1.0, 1.0);
    Ok(SentimentResult {
        polarity,
        label: classify(polarity),
    })
}
