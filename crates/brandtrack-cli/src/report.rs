//! CSV and console rendering of analysis records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use brandtrack_analysis::AnalysisRecord;
use chrono::NaiveDateTime;

/// `brand_analysis_<YYYYmmdd_HHMMSS>.csv` for the given local time.
pub(crate) fn report_file_name(now: NaiveDateTime) -> String {
    format!("brand_analysis_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write `records` as CSV with a header row.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub(crate) fn write_csv<W: Write>(records: &[AnalysisRecord], writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the CSV report into `dir`, creating it if needed. Returns the file path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub(crate) fn write_report_file(
    records: &[AnalysisRecord],
    dir: &Path,
    now: NaiveDateTime,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let path = dir.join(report_file_name(now));
    let file =
        File::create(&path).with_context(|| format!("creating report {}", path.display()))?;
    write_csv(records, BufWriter::new(file))
        .with_context(|| format!("writing report {}", path.display()))?;

    Ok(path)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Fixed-width table lines: a header followed by one line per record.
pub(crate) fn summary_lines(records: &[AnalysisRecord]) -> Vec<String> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(format!(
        "{:<20}{:<20}{:<10}{:<10}{:<10}COMPETITORS",
        "PROMPT", "BRAND", "MENTIONS", "SCORE", "LABEL"
    ));
    for r in records {
        lines.push(format!(
            "{:<20}{:<20}{:<10}{:<10.3}{:<10}{}",
            truncate(&r.prompt_id, 19),
            truncate(&r.brand, 19),
            r.brand_mentions,
            r.sentiment_score,
            r.sentiment_label.as_str(),
            r.competitor_mentions
        ));
    }
    lines
}

pub(crate) fn print_summary_table(records: &[AnalysisRecord]) {
    for line in summary_lines(records) {
        println!("{line}");
    }
}
