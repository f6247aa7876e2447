//! The `analyze` command: brand × prompt run, summary, and CSV report.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use brandtrack_analysis::{build_context, run_analysis, LexiconScorer, PairStatus, Progress};
use brandtrack_core::AppConfig;

use crate::definitions::{describe_brand, load_definitions, Definitions};
use crate::report;

#[derive(Debug, Default)]
pub(crate) struct AnalyzeArgs {
    pub brands: Option<PathBuf>,
    pub prompts: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub dry_run: bool,
}

/// One progress line, e.g. `[3/6] ok   Acme / top_brands`.
pub(crate) fn format_progress(p: &Progress<'_>) -> String {
    match p.status {
        PairStatus::Succeeded => {
            format!("[{}/{}] ok   {} / {}", p.completed, p.total, p.brand, p.prompt_id)
        }
        PairStatus::Failed(failure) => format!(
            "[{}/{}] FAIL {} / {}: {}",
            p.completed, p.total, p.brand, p.prompt_id, failure.reason
        ),
    }
}

/// Describe the pairs a run would process, in processing order.
pub(crate) fn plan_lines(defs: &Definitions) -> Vec<String> {
    defs.brands
        .iter()
        .flat_map(|b| {
            defs.prompts
                .iter()
                .map(move |p| format!("{} / {}", b.canonical, p.id))
        })
        .collect()
}

fn print_dry_run(defs: &Definitions) {
    let plan = plan_lines(defs);
    println!("dry-run: would analyze {} pairs:", plan.len());
    for line in &plan {
        println!("  {line}");
    }

    if let (Some(brand), Some(prompt)) = (defs.brands.first(), defs.prompts.first()) {
        println!();
        println!("first query ({} / {}):", brand.canonical, prompt.id);
        println!("{}", build_context(brand, &prompt.text));
    }
}

/// Exit status for a run force-quit from the terminal (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    StopAfterCurrentPair,
    ForceExit,
}

/// The first interrupt requests a stop between pairs; any later one forces exit.
fn register_interrupt(cancel: &AtomicBool) -> Interrupt {
    if cancel.swap(true, Ordering::Relaxed) {
        Interrupt::ForceExit
    } else {
        Interrupt::StopAfterCurrentPair
    }
}

/// Stop the run between pairs on Ctrl-C; partial results are still reported.
/// A second Ctrl-C exits immediately, even mid-request.
fn install_interrupt_handler(cancel: Arc<AtomicBool>) {
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            match register_interrupt(&cancel) {
                Interrupt::StopAfterCurrentPair => {
                    eprintln!(
                        "interrupt received; finishing the current pair (Ctrl-C again to quit)"
                    );
                }
                Interrupt::ForceExit => {
                    eprintln!("second interrupt; exiting without writing a report");
                    std::process::exit(INTERRUPTED_EXIT_CODE);
                }
            }
        }
    });
}

/// Run every brand against every prompt and write the CSV report.
///
/// # Errors
///
/// Returns an error if definitions fail to load, the Gemini client cannot be
/// built, no pair produces a record, or the report cannot be written.
/// Individual pair failures are reported and skipped.
pub(crate) async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let defs = load_definitions(config, args.brands.as_deref(), args.prompts.as_deref())?;

    println!(
        "loaded {} brands and {} prompts",
        defs.brands.len(),
        defs.prompts.len()
    );
    for brand in &defs.brands {
        println!("  {}", describe_brand(brand));
    }

    if args.dry_run {
        print_dry_run(&defs);
        return Ok(());
    }

    let client = crate::build_gemini_client(config)?;
    println!("querying {} ...", client.model());

    let cancel = Arc::new(AtomicBool::new(false));
    install_interrupt_handler(Arc::clone(&cancel));

    let report = run_analysis(
        &defs.brands,
        &defs.prompts,
        &client,
        &LexiconScorer::new(),
        |p: &Progress<'_>| println!("{}", format_progress(p)),
        &cancel,
    )
    .await?;

    println!();
    println!(
        "analysis complete: {} of {} pairs produced records",
        report.succeeded(),
        report.attempted
    );
    if report.cancelled {
        println!(
            "run cancelled: {} of {} pairs were not attempted",
            report.total - report.attempted,
            report.total
        );
    }

    if report.records.is_empty() {
        anyhow::bail!("no results generated; check the definition files and API key");
    }

    println!();
    report::print_summary_table(&report.records);

    let output_dir = args.output_dir.as_deref().unwrap_or(config.output_dir.as_path());
    let path = report::write_report_file(
        &report.records,
        output_dir,
        chrono::Local::now().naive_local(),
    )?;
    println!();
    println!("results written to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use brandtrack_analysis::{PairError, PairFailure};
    use brandtrack_core::{Brand, Prompt};

    use super::*;

    #[test]
    fn progress_line_for_success() {
        let p = Progress {
            completed: 3,
            total: 6,
            brand: "Acme",
            prompt_id: "top_brands",
            status: PairStatus::Succeeded,
        };
        assert_eq!(format_progress(&p), "[3/6] ok   Acme / top_brands");
    }

    #[test]
    fn progress_line_for_failure_includes_reason() {
        let failure = PairFailure {
            brand: "Globex".to_string(),
            prompt_id: "second".to_string(),
            reason: PairError::Query("timeout".to_string()),
        };
        let p = Progress {
            completed: 4,
            total: 6,
            brand: "Globex",
            prompt_id: "second",
            status: PairStatus::Failed(&failure),
        };
        assert_eq!(
            format_progress(&p),
            "[4/6] FAIL Globex / second: query failed: timeout"
        );
    }

    #[test]
    fn second_interrupt_forces_exit() {
        let cancel = AtomicBool::new(false);
        assert_eq!(register_interrupt(&cancel), Interrupt::StopAfterCurrentPair);
        assert!(cancel.load(Ordering::Relaxed));
        assert_eq!(register_interrupt(&cancel), Interrupt::ForceExit);
        assert_eq!(register_interrupt(&cancel), Interrupt::ForceExit);
    }

    #[test]
    fn plan_is_brand_major() {
        let defs = Definitions {
            brands: vec![Brand::new("Acme"), Brand::new("Globex")],
            prompts: vec![Prompt::new("a", "A?"), Prompt::new("b", "B?")],
        };
        assert_eq!(
            plan_lines(&defs),
            vec!["Acme / a", "Acme / b", "Globex / a", "Globex / b"]
        );
    }
}
