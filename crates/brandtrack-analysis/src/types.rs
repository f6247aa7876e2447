use serde::ser::{Serialize, Serializer};

use crate::error::PairError;

/// Per-competitor mention counts, kept in the brand's competitor order.
///
/// Behaves like an insertion-ordered map: inserting a name that is already
/// present updates its count in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitorCounts(Vec<(String, usize)>);

impl CompetitorCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, count: usize) {
        if let Some(entry) = self.0.iter_mut().find(|(n, _)| n == name) {
            entry.1 = count;
        } else {
            self.0.push((name.to_string(), count));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// Encode as a compact JSON object, e.g. `{"Globex":2,"Umbrella":0}`.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for CompetitorCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Mention counts for one brand in one block of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentionCount {
    /// Matches of the canonical name plus every variant, summed.
    pub brand_mentions: usize,
    pub competitor_mentions: CompetitorCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentResult {
    /// Score in `[-1.0, 1.0]`; negative is unfavorable.
    pub polarity: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            label: SentimentLabel::Neutral,
        }
    }
}

/// One flat report row: the merged analysis of a single (brand, prompt) pair.
///
/// Field order is the column order of the CSV report.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnalysisRecord {
    pub prompt_id: String,
    /// Canonical brand name.
    pub brand: String,
    pub brand_mentions: usize,
    /// JSON-encoded competitor → count mapping.
    pub competitor_mentions: String,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub raw_response: String,
}

/// A pair that produced no record, with enough identity to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairFailure {
    pub brand: String,
    pub prompt_id: String,
    pub reason: PairError,
}

impl std::fmt::Display for PairFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "brand '{}' / prompt '{}': {}",
            self.brand, self.prompt_id, self.reason
        )
    }
}

/// Result of processing a single pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Succeeded(AnalysisRecord),
    Failed(PairFailure),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairStatus<'a> {
    Succeeded,
    Failed(&'a PairFailure),
}

/// Emitted once after every attempted pair, successful or not.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Pairs attempted so far, including this one. Starts at 1.
    pub completed: usize,
    pub total: usize,
    pub brand: &'a str,
    pub prompt_id: &'a str,
    pub status: PairStatus<'a>,
}

impl Progress<'_> {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, PairStatus::Failed(_))
    }
}

/// Everything a finished (or cancelled) run produced.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Records in (brand, prompt) iteration order, failed pairs omitted.
    pub records: Vec<AnalysisRecord>,
    pub failures: Vec<PairFailure>,
    pub attempted: usize,
    pub total: usize,
    /// Set when the run stopped early on request.
    pub cancelled: bool,
}

impl RunReport {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.records.len()
    }
}
