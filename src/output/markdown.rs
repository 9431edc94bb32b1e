//! Markdown report generation
//!
//! This module renders a finished [`RunSummary`] as a self-contained
//! markdown document: run information, outcome distribution, a response
//! time histogram, and the per-URL detail table.

use crate::output::stats::{Bucket, RunSummary};
use crate::output::traits::{OutputError, OutputResult};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Width of a full (100%) bar in the charts
const BAR_WIDTH: usize = 40;

/// Run metadata that is not part of the summary itself
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub input: String,
    pub output: String,
    pub config_hash: Option<String>,
    pub generated_at: DateTime<Utc>,
}

/// Writes the markdown report for `summary` to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to format or write the report
pub fn generate_markdown_report(
    summary: &RunSummary,
    context: &ReportContext,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(summary, context)?;

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run summary as markdown
pub fn format_markdown_report(
    summary: &RunSummary,
    context: &ReportContext,
) -> OutputResult<String> {
    let mut md = String::new();
    write_report(&mut md, summary, context).map_err(|e| OutputError::Format(e.to_string()))?;
    Ok(md)
}

fn write_report(
    md: &mut String,
    summary: &RunSummary,
    context: &ReportContext,
) -> std::fmt::Result {
    writeln!(md, "# URL Check Report\n")?;

    // Run metadata
    writeln!(md, "## Run Information\n")?;
    writeln!(md, "- **Generated**: {}", format_timestamp(&context.generated_at))?;
    writeln!(md, "- **Started**: {}", format_timestamp(&summary.started_at))?;
    if let Some(finished) = &summary.finished_at {
        writeln!(md, "- **Finished**: {}", format_timestamp(finished))?;
    }
    if let Some(duration) = summary.duration() {
        writeln!(
            md,
            "- **Duration**: {:.2} seconds",
            duration.num_milliseconds() as f64 / 1000.0
        )?;
    }
    writeln!(md, "- **Input**: `{}`", context.input)?;
    writeln!(md, "- **Output**: `{}`", context.output)?;
    if let Some(hash) = &context.config_hash {
        writeln!(md, "- **Config Hash**: {}", hash)?;
    }
    writeln!(md, "- **Total URLs**: {}\n", summary.total)?;

    write_distribution(md, summary)?;
    write_response_times(md, summary)?;
    write_details(md, summary)?;

    Ok(())
}

fn write_distribution(md: &mut String, summary: &RunSummary) -> std::fmt::Result {
    writeln!(md, "## Outcome Distribution\n")?;
    writeln!(md, "| Outcome | Count | Share | |")?;
    writeln!(md, "|---------|-------|-------|-|")?;

    for bucket in Bucket::ALL {
        let share = summary.share(bucket);
        writeln!(
            md,
            "| {} | {} | {:.1}% | {} |",
            bucket,
            summary.count(bucket),
            share,
            bar(share / 100.0)
        )?;
    }
    writeln!(md)
}

fn write_response_times(md: &mut String, summary: &RunSummary) -> std::fmt::Result {
    writeln!(md, "## Response Times\n")?;

    let (stats, bins) = match summary.response_time_stats() {
        Some(stats) => (stats, summary.response_time_histogram()),
        None => {
            writeln!(md, "No timed responses were recorded.\n")?;
            return Ok(());
        }
    };

    writeln!(md, "- **Samples**: {}", stats.count)?;
    writeln!(md, "- **Min**: {} ms", stats.min.as_millis())?;
    writeln!(md, "- **Mean**: {} ms", stats.mean.as_millis())?;
    writeln!(md, "- **Max**: {} ms\n", stats.max.as_millis())?;

    let peak = bins.iter().map(|bin| bin.count).max().unwrap_or(0);

    writeln!(md, "| Range | Count | |")?;
    writeln!(md, "|-------|-------|-|")?;
    for bin in &bins {
        let fraction = if peak == 0 {
            0.0
        } else {
            bin.count as f64 / peak as f64
        };
        writeln!(md, "| {} | {} | {} |", bin.label(), bin.count, bar(fraction))?;
    }
    writeln!(md)
}

fn write_details(md: &mut String, summary: &RunSummary) -> std::fmt::Result {
    writeln!(md, "## Details\n")?;

    if summary.records.is_empty() {
        writeln!(md, "No URLs were checked.")?;
        return Ok(());
    }

    writeln!(md, "| # | URL | Status | Response Time | Outcome | Checked At |")?;
    writeln!(md, "|---|-----|--------|---------------|---------|------------|")?;

    for (index, record) in summary.records.iter().enumerate() {
        let status = record
            .status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let response_time = record
            .response_time
            .map(|t| format!("{} ms", t.as_millis()))
            .unwrap_or_else(|| "-".to_string());

        writeln!(
            md,
            "| {} | {} | {} | {} | {} | {} |",
            index + 1,
            escape_cell(&record.url),
            status,
            response_time,
            escape_cell(&record.outcome.to_string()),
            format_timestamp(&record.checked_at)
        )?;
    }

    Ok(())
}

/// Renders `fraction` (0.0..=1.0) as a text bar
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
