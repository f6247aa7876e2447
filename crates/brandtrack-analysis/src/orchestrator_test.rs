use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::*;
use crate::scorer::LexiconScorer;
use crate::types::SentimentLabel;

/// Query client driven by a closure; records every context it receives.
struct FnClient<F> {
    respond: F,
    calls: Mutex<Vec<String>>,
}

impl<F> FnClient<F>
where
    F: Fn(&str) -> Result<String, String> + Sync,
{
    fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl<F> QueryClient for FnClient<F>
where
    F: Fn(&str) -> Result<String, String> + Sync,
{
    type Error = String;

    async fn query(&self, context: &str) -> Result<String, String> {
        self.calls.lock().unwrap().push(context.to_string());
        (self.respond)(context)
    }
}

struct BrokenScorer;

impl PolarityScorer for BrokenScorer {
    type Error = String;

    fn polarity(&self, _text: &str) -> Result<f64, String> {
        Err("scorer crashed".to_string())
    }
}

struct NanScorer;

impl PolarityScorer for NanScorer {
    type Error = String;

    fn polarity(&self, _text: &str) -> Result<f64, String> {
        Ok(f64::NAN)
    }
}

fn brands() -> Vec<Brand> {
    vec![
        Brand::new("Acme").with_competitors(["Globex"]),
        Brand::new("Globex").with_competitors(["Acme"]),
        Brand::new("Initech"),
    ]
}

fn prompts() -> Vec<Prompt> {
    vec![
        Prompt::new("first", "Which tool is first?"),
        Prompt::new("second", "Which tool is second?"),
    ]
}

fn not_cancelled() -> AtomicBool {
    AtomicBool::new(false)
}

#[tokio::test]
async fn one_failed_pair_is_skipped_and_reported_once() {
    let client = FnClient::new(|ctx: &str| {
        if ctx.contains("brand \"Globex\"") && ctx.ends_with("Which tool is second?") {
            Err("quota exceeded".to_string())
        } else {
            Ok("Acme and Globex are both good.".to_string())
        }
    });

    let mut events: Vec<(usize, usize, String, String, bool)> = Vec::new();
    let report = run_analysis(
        &brands(),
        &prompts(),
        &client,
        &LexiconScorer::new(),
        |p: &Progress<'_>| {
            events.push((
                p.completed,
                p.total,
                p.brand.to_string(),
                p.prompt_id.to_string(),
                p.is_failure(),
            ));
        },
        &not_cancelled(),
    )
    .await
    .expect("run should not fail");

    assert_eq!(report.total, 6);
    assert_eq!(report.attempted, 6);
    assert_eq!(report.succeeded(), 5);
    assert!(!report.cancelled);

    let pairs: Vec<(&str, &str)> = report
        .records
        .iter()
        .map(|r| (r.brand.as_str(), r.prompt_id.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Acme", "first"),
            ("Acme", "second"),
            ("Globex", "first"),
            ("Initech", "first"),
            ("Initech", "second"),
        ]
    );

    let failures: Vec<_> = events.iter().filter(|e| e.4).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].2, "Globex");
    assert_eq!(failures[0].3, "second");

    assert_eq!(report.failures.len(), 1);
    assert_eq!(
        report.failures[0].reason,
        PairError::Query("quota exceeded".to_string())
    );

    let completed: Vec<usize> = events.iter().map(|e| e.0).collect();
    assert_eq!(completed, vec![1, 2, 3, 4, 5, 6]);
    assert!(events.iter().all(|e| e.1 == 6));
}

#[tokio::test]
async fn always_failing_client_returns_empty_report() {
    let client = FnClient::new(|_: &str| Err("network down".to_string()));
    let mut progress_calls = 0;

    let report = run_analysis(
        &brands(),
        &prompts(),
        &client,
        &LexiconScorer::new(),
        |_: &Progress<'_>| progress_calls += 1,
        &not_cancelled(),
    )
    .await
    .expect("pair failures must not fail the run");

    assert!(report.records.is_empty());
    assert_eq!(report.failures.len(), 6);
    assert_eq!(report.attempted, 6);
    assert_eq!(progress_calls, 6);
}

#[tokio::test]
async fn empty_definitions_fail_before_any_query() {
    let client = FnClient::new(|_: &str| Ok(String::new()));

    let err = run_analysis(
        &[],
        &prompts(),
        &client,
        &LexiconScorer::new(),
        |_: &Progress<'_>| {},
        &not_cancelled(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, AnalysisError::NoBrands);

    let err = run_analysis(
        &brands(),
        &[],
        &client,
        &LexiconScorer::new(),
        |_: &Progress<'_>| {},
        &not_cancelled(),
    )
    .await
    .unwrap_err();
    assert_eq!(err, AnalysisError::NoPrompts);

    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn pairs_are_dispatched_brand_major_in_order() {
    let client = FnClient::new(|_: &str| Ok("ok".to_string()));
    let brands = brands();
    let prompts = prompts();

    run_analysis(
        &brands,
        &prompts,
        &client,
        &LexiconScorer::new(),
        |_: &Progress<'_>| {},
        &not_cancelled(),
    )
    .await
    .unwrap();

    let expected: Vec<String> = brands
        .iter()
        .flat_map(|b| prompts.iter().map(move |p| build_context(b, &p.text)))
        .collect();
    assert_eq!(client.calls(), expected);
}

#[tokio::test]
async fn record_merges_mentions_and_sentiment() {
    let response = "Acme beats Globex; Acme's support is excellent.";
    let client = FnClient::new(move |_: &str| Ok(response.to_string()));
    let brand = Brand::new("Acme").with_competitors(["Globex", "Umbrella"]);
    let prompt = Prompt::new("top_brands", "Who leads?");

    let outcome = analyze_pair(&brand, &prompt, &client, &LexiconScorer::new()).await;
    let PairOutcome::Succeeded(record) = outcome else {
        panic!("expected a successful pair outcome");
    };

    assert_eq!(record.prompt_id, "top_brands");
    assert_eq!(record.brand, "Acme");
    assert_eq!(record.brand_mentions, 2);
    assert_eq!(record.competitor_mentions, r#"{"Globex":1,"Umbrella":0}"#);
    assert_eq!(record.sentiment_label, SentimentLabel::Positive);
    assert!((record.sentiment_score - 1.0).abs() < f64::EPSILON);
    assert_eq!(record.raw_response, response);
}

#[tokio::test]
async fn empty_response_is_neutral_with_zero_mentions() {
    let client = FnClient::new(|_: &str| Ok(String::new()));
    let brand = Brand::new("Acme").with_competitors(["Globex"]);
    let prompt = Prompt::new("p", "anything");

    let PairOutcome::Succeeded(record) =
        analyze_pair(&brand, &prompt, &client, &LexiconScorer::new()).await
    else {
        panic!("empty response should still produce a record");
    };

    assert_eq!(record.brand_mentions, 0);
    assert_eq!(record.competitor_mentions, r#"{"Globex":0}"#);
    assert_eq!(record.sentiment_label, SentimentLabel::Neutral);
    assert!(record.sentiment_score.abs() < f64::EPSILON);
}

#[tokio::test]
async fn scorer_failure_is_a_classifier_error() {
    let client = FnClient::new(|_: &str| Ok("Acme is fine".to_string()));
    let brand = Brand::new("Acme");
    let prompt = Prompt::new("p", "anything");

    let outcome = analyze_pair(&brand, &prompt, &client, &BrokenScorer).await;
    assert_eq!(
        outcome,
        PairOutcome::Failed(PairFailure {
            brand: "Acme".to_string(),
            prompt_id: "p".to_string(),
            reason: PairError::Classifier("scorer crashed".to_string()),
        })
    );

    let outcome = analyze_pair(&brand, &prompt, &client, &NanScorer).await;
    assert!(matches!(
        outcome,
        PairOutcome::Failed(PairFailure {
            reason: PairError::Classifier(_),
            ..
        })
    ));
}

#[tokio::test]
async fn unmatchable_name_fails_the_pair_instead_of_counting_zero() {
    let huge = "x".repeat(600_000);
    let client = FnClient::new(|_: &str| Ok("Acme is solid.".to_string()));
    let brands = vec![
        Brand::new("Acme").with_competitors([huge]),
        Brand::new("Globex"),
    ];

    let report = run_analysis(
        &brands,
        &prompts(),
        &client,
        &LexiconScorer::new(),
        |_: &Progress<'_>| {},
        &not_cancelled(),
    )
    .await
    .unwrap();

    assert_eq!(report.failures.len(), 2);
    assert!(report.failures.iter().all(|f| f.brand == "Acme"
        && matches!(&f.reason, PairError::Classifier(msg) if msg.contains("mention matching"))));
    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.brand == "Globex"));
}

#[tokio::test]
async fn scorer_failures_do_not_abort_the_run() {
    let client = FnClient::new(|_: &str| Ok("text".to_string()));

    let report = run_analysis(
        &brands(),
        &prompts(),
        &client,
        &BrokenScorer,
        |_: &Progress<'_>| {},
        &not_cancelled(),
    )
    .await
    .unwrap();

    assert!(report.records.is_empty());
    assert_eq!(report.failures.len(), 6);
    assert!(report
        .failures
        .iter()
        .all(|f| matches!(f.reason, PairError::Classifier(_))));
}

#[tokio::test]
async fn cancellation_between_pairs_keeps_partial_results() {
    let client = FnClient::new(|_: &str| Ok("Acme".to_string()));
    let cancel = AtomicBool::new(false);

    let report = run_analysis(
        &brands(),
        &prompts(),
        &client,
        &LexiconScorer::new(),
        |p: &Progress<'_>| {
            if p.completed == 2 {
                cancel.store(true, Ordering::Relaxed);
            }
        },
        &cancel,
    )
    .await
    .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.attempted, 2);
    assert_eq!(report.total, 6);
    assert_eq!(report.records.len(), 2);
    assert_eq!(client.calls().len(), 2);
}

#[tokio::test]
async fn duplicate_prompt_ids_produce_separate_rows() {
    let client = FnClient::new(|_: &str| Ok("Acme".to_string()));
    let prompts = vec![Prompt::new("dup", "one?"), Prompt::new("dup", "two?")];

    let report = run_analysis(
        &[Brand::new("Acme")],
        &prompts,
        &client,
        &LexiconScorer::new(),
        |_: &Progress<'_>| {},
        &not_cancelled(),
    )
    .await
    .unwrap();

    assert_eq!(report.records.len(), 2);
    assert!(report.records.iter().all(|r| r.prompt_id == "dup"));
}
