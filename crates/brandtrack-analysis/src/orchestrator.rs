//! Brand × prompt analysis run orchestration.

use std::sync::atomic::{AtomicBool, Ordering};

use brandtrack_core::{Brand, Prompt};

use crate::client::QueryClient;
use crate::context::build_context;
use crate::error::{AnalysisError, PairError};
use crate::matcher::count_mentions;
use crate::sentiment::{score_sentiment, PolarityScorer};
use crate::types::{AnalysisRecord, PairFailure, PairOutcome, PairStatus, Progress, RunReport};

/// Process one (brand, prompt) pair.
///
/// 1. Compose the brand-aware query text.
/// 2. Send it to `client` (single attempt).
/// 3. Count brand and competitor mentions in the response.
/// 4. Score the response's sentiment.
/// 5. Merge everything into an [`AnalysisRecord`].
///
/// Never panics or returns early with an error: every failure becomes
/// [`PairOutcome::Failed`] carrying the brand and prompt id.
pub async fn analyze_pair<Q, S>(
    brand: &Brand,
    prompt: &Prompt,
    client: &Q,
    scorer: &S,
) -> PairOutcome
where
    Q: QueryClient + ?Sized,
    S: PolarityScorer + ?Sized,
{
    let failed = |reason: PairError| {
        PairOutcome::Failed(PairFailure {
            brand: brand.canonical.clone(),
            prompt_id: prompt.id.clone(),
            reason,
        })
    };

    let context = build_context(brand, &prompt.text);

    let response = match client.query(&context).await {
        Ok(text) => text,
        Err(e) => return failed(PairError::Query(e.to_string())),
    };

    let mentions = match count_mentions(&response, brand) {
        Ok(m) => m,
        Err(e) => {
            return failed(PairError::Classifier(format!(
                "mention matching failed: {e}"
            )))
        }
    };

    let sentiment = match score_sentiment(scorer, &response) {
        Ok(s) if s.polarity.is_finite() => s,
        Ok(s) => {
            return failed(PairError::Classifier(format!(
                "scorer returned non-finite polarity {}",
                s.polarity
            )))
        }
        Err(e) => return failed(PairError::Classifier(e.to_string())),
    };

    let competitor_mentions = match mentions.competitor_mentions.to_json() {
        Ok(json) => json,
        Err(e) => return failed(PairError::Classifier(e.to_string())),
    };

    PairOutcome::Succeeded(AnalysisRecord {
        prompt_id: prompt.id.clone(),
        brand: brand.canonical.clone(),
        brand_mentions: mentions.brand_mentions,
        competitor_mentions,
        sentiment_score: sentiment.polarity,
        sentiment_label: sentiment.label,
        raw_response: response,
    })
}

/// Analyze every (brand, prompt) pair, brand-major, one pair at a time.
///
/// `on_progress` is called exactly once after each attempted pair. `cancel`
/// is checked before each pair; once set, the run stops and returns what has
/// accumulated so far with [`RunReport::cancelled`] set.
///
/// Pair failures are logged, recorded in [`RunReport::failures`], and never
/// abort the run.
///
/// # Errors
///
/// Returns [`AnalysisError`] if `brands` or `prompts` is empty. No pair is
/// attempted in that case.
pub async fn run_analysis<Q, S, F>(
    brands: &[Brand],
    prompts: &[Prompt],
    client: &Q,
    scorer: &S,
    mut on_progress: F,
    cancel: &AtomicBool,
) -> Result<RunReport, AnalysisError>
where
    Q: QueryClient + ?Sized,
    S: PolarityScorer + ?Sized,
    F: FnMut(&Progress<'_>),
{
    if brands.is_empty() {
        return Err(AnalysisError::NoBrands);
    }
    if prompts.is_empty() {
        return Err(AnalysisError::NoPrompts);
    }

    let total = brands.len() * prompts.len();
    let mut report = RunReport {
        total,
        ..RunReport::default()
    };

    tracing::info!(
        brands = brands.len(),
        prompts = prompts.len(),
        total,
        "starting brand analysis run"
    );

    'pairs: for brand in brands {
        for prompt in prompts {
            if cancel.load(Ordering::Relaxed) {
                tracing::warn!(
                    attempted = report.attempted,
                    total,
                    "analysis run cancelled; returning partial results"
                );
                report.cancelled = true;
                break 'pairs;
            }

            let outcome = analyze_pair(brand, prompt, client, scorer).await;
            report.attempted += 1;

            match outcome {
                PairOutcome::Succeeded(record) => {
                    tracing::debug!(
                        brand = %brand.canonical,
                        prompt = %prompt.id,
                        mentions = record.brand_mentions,
                        sentiment = %record.sentiment_label,
                        "pair analyzed"
                    );
                    on_progress(&Progress {
                        completed: report.attempted,
                        total,
                        brand: &brand.canonical,
                        prompt_id: &prompt.id,
                        status: PairStatus::Succeeded,
                    });
                    report.records.push(record);
                }
                PairOutcome::Failed(failure) => {
                    tracing::warn!(
                        brand = %failure.brand,
                        prompt = %failure.prompt_id,
                        error = %failure.reason,
                        "pair analysis failed; skipping"
                    );
                    on_progress(&Progress {
                        completed: report.attempted,
                        total,
                        brand: &brand.canonical,
                        prompt_id: &prompt.id,
                        status: PairStatus::Failed(&failure),
                    });
                    report.failures.push(failure);
                }
            }
        }
    }

    if !report.failures.is_empty() {
        tracing::warn!(
            failed = report.failures.len(),
            attempted = report.attempted,
            "some pairs failed during analysis"
        );
    }

    tracing::info!(
        records = report.succeeded(),
        attempted = report.attempted,
        total,
        "brand analysis run complete"
    );

    Ok(report)
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
