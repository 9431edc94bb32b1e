//! Run orchestration
//!
//! The runner drives the per-URL state machine in input order:
//! normalize, probe, classify, follow at most one redirect, then record the
//! outcome in the output file, the notifier, and the run summary.

use crate::checker::classifier::{classify_follow_up, classify_initial, Decision, UrlOutcome};
use crate::checker::fetcher::Prober;
use crate::config::Config;
use crate::output::{Event, Notifier, RunSummary};
use crate::url::normalize_url;
use crate::SieveError;
use std::io::Write;
use std::time::{Duration, Instant};

/// URLs between two progress lines at info level
const PROGRESS_INTERVAL: usize = 10;

/// Whether a progress line is due after `checked` of `total` URLs
fn progress_due(checked: usize, total: usize) -> bool {
    checked > 0 && (checked % PROGRESS_INTERVAL == 0 || checked == total)
}

/// Probes URLs one at a time and aggregates the results
#[derive(Debug, Clone)]
pub struct Checker {
    prober: Prober,
    normalize: bool,
}

impl Checker {
    /// Creates a checker from the run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Checker)` - Ready to probe
    /// * `Err(SieveError)` - The HTTP client could not be built or a
    ///   configured header is invalid
    pub fn new(config: &Config) -> Result<Self, SieveError> {
        Ok(Self::with_prober(Prober::new(config)?, config.normalize))
    }

    /// Creates a checker around an existing prober
    pub fn with_prober(prober: Prober, normalize: bool) -> Self {
        Self { prober, normalize }
    }

    /// Checks a single, already normalized URL
    ///
    /// Returns the outcome together with the response time of the original
    /// probe (`None` when it never got a response).
    pub async fn check_url(&self, url: &str) -> (UrlOutcome, Option<Duration>) {
        let initial = self.prober.probe(url).await;
        let response_time = initial.as_ref().ok().map(|response| response.elapsed);

        let outcome = match classify_initial(url, initial) {
            Decision::Done(outcome) => outcome,
            Decision::Follow { status, target } => {
                tracing::debug!("Following redirect ({}) {} -> {}", status, url, target);
                let follow_up = self.prober.probe(&target).await;
                classify_follow_up(status, target, follow_up)
            }
        };

        (outcome, response_time)
    }

    /// Processes every entry in order
    ///
    /// Successful URLs (and successfully resolved redirect targets) are
    /// written to `writer`, one per line. Per-URL failures never abort the
    /// run; only a failing `writer` does.
    pub async fn run<W, N>(
        &self,
        entries: &[String],
        writer: &mut W,
        notifier: &N,
    ) -> std::io::Result<RunSummary>
    where
        W: Write,
        N: Notifier + ?Sized,
    {
        let mut summary = RunSummary::new();
        let start_time = Instant::now();
        tracing::info!("Checking {} URLs", entries.len());

        for (index, raw) in entries.iter().enumerate() {
            let url = normalize_url(raw, self.normalize);
            tracing::debug!("[{}/{}] Probing {}", index + 1, entries.len(), url);

            let (outcome, response_time) = self.check_url(&url).await;

            for event in Event::from_outcome(&url, &outcome) {
                notifier.notify(&event);
            }

            if let Some(line) = outcome.output_url(&url) {
                writeln!(writer, "{}", line)?;
            }

            summary.record(&url, outcome, response_time);

            let checked = index + 1;
            if progress_due(checked, entries.len()) {
                let rate = checked as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {}/{} URLs checked, {:.2} URLs/sec",
                    checked,
                    entries.len(),
                    rate
                );
            }
        }

        writer.flush()?;
        summary.finish();

        tracing::info!(
            "Checked {} URLs: {} ok, {} redirects, {} errors, {} network errors",
            summary.total,
            summary.success,
            summary.redirects,
            summary.errors,
            summary.network_errors
        );

        Ok(summary)
    }
}
