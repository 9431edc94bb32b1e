//! Checker module: probing and classifying URLs
//!
//! This module contains the core checking logic, including:
//! - HTTP probing with a fixed timeout and no automatic redirects
//! - Status classification and single-hop redirect following
//! - Run orchestration over the whole input list

mod classifier;
mod fetcher;
mod runner;

pub use classifier::{
    classify_follow_up, classify_initial, classify_status, resolve_location, Decision,
    RedirectFollow, StatusClass, UrlOutcome,
};
pub use fetcher::{
    build_header_map, build_http_client, NetworkError, NetworkErrorKind, ProbeResponse, Prober,
};
pub use runner::Checker;

use crate::config::Config;
use crate::output::{generate_markdown_report, Notifier, ReportContext, RunSummary};
use crate::url::load_url_list;
use crate::SieveError;
use std::fs::File;
use std::io::LineWriter;
use std::path::PathBuf;

/// Everything a full run needs
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// File with one URL or domain per line
    pub input: PathBuf,

    /// File receiving the successful URLs; truncated at start
    pub output: PathBuf,

    /// Where to write the markdown report, if one is wanted
    pub report: Option<PathBuf>,

    pub config: Config,

    /// Fingerprint of the config file, shown in the report
    pub config_hash: Option<String>,
}

/// Runs a complete check
///
/// This is the main entry point. It will:
/// 1. Read the input list
/// 2. Create (or truncate) the output file
/// 3. Probe and classify every URL in order
/// 4. Write the report, if requested
///
/// # Returns
///
/// * `Ok(RunSummary)` - The finalized summary of the run
/// * `Err(SieveError)` - A file could not be read or written, or the
///   configuration could not be turned into an HTTP client
pub async fn check_urls<N>(options: &RunOptions, notifier: &N) -> Result<RunSummary, SieveError>
where
    N: Notifier + ?Sized,
{
    let entries = load_url_list(&options.input)?;

    let output_error = |source: std::io::Error| SieveError::Output {
        path: options.output.clone(),
        source,
    };

    let file = File::create(&options.output).map_err(output_error)?;
    let mut writer = LineWriter::new(file);

    let checker = Checker::new(&options.config)?;
    let summary = checker
        .run(&entries, &mut writer, notifier)
        .await
        .map_err(output_error)?;

    if let Some(report_path) = &options.report {
        let context = ReportContext {
            input: options.input.display().to_string(),
            output: options.output.display().to_string(),
            config_hash: options.config_hash.clone(),
            generated_at: chrono::Utc::now(),
        };
        generate_markdown_report(&summary, &context, report_path)?;
        tracing::info!("Report written to {}", report_path.display());
    }

    Ok(summary)
}
