//! Run statistics
//!
//! This module aggregates per-URL outcomes into a [`RunSummary`] and
//! derives the figures shown on the console and in reports.

use crate::checker::UrlOutcome;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Upper bounds (exclusive, milliseconds) of the response time histogram
/// bins; the last bin is open-ended
pub const HISTOGRAM_BOUNDS_MS: [u64; 6] = [100, 250, 500, 1000, 2500, 5000];

/// Mutually exclusive outcome category of one input URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Success,
    Redirect,
    Error,
    NetworkError,
}

impl Bucket {
    /// All buckets in display order
    pub const ALL: [Bucket; 4] = [
        Bucket::Success,
        Bucket::Redirect,
        Bucket::Error,
        Bucket::NetworkError,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Redirect => "Redirect",
            Self::Error => "Error",
            Self::NetworkError => "Network Error",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detail record for one processed URL
#[derive(Debug, Clone)]
pub struct UrlRecord {
    /// The URL that was probed (after normalization)
    pub url: String,

    pub outcome: UrlOutcome,

    /// Response time of the original probe
    pub response_time: Option<Duration>,

    pub checked_at: DateTime<Utc>,
}

impl UrlRecord {
    pub fn bucket(&self) -> Bucket {
        self.outcome.bucket()
    }

    pub fn status(&self) -> Option<u16> {
        self.outcome.status()
    }

    pub fn resolved_url(&self) -> Option<&str> {
        self.outcome.resolved_url()
    }
}

/// Aggregated results of one run
///
/// Each recorded URL increments exactly one counter, so
/// `total == success + redirects + errors + network_errors` always holds.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: u64,
    pub success: u64,
    pub redirects: u64,
    pub errors: u64,
    pub network_errors: u64,

    /// Per-URL details in processing order
    pub records: Vec<UrlRecord>,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl RunSummary {
    /// Creates an empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            total: 0,
            success: 0,
            redirects: 0,
            errors: 0,
            network_errors: 0,
            records: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records the outcome of one URL
    pub fn record(&mut self, url: &str, outcome: UrlOutcome, response_time: Option<Duration>) {
        self.total += 1;
        match outcome.bucket() {
            Bucket::Success => self.success += 1,
            Bucket::Redirect => self.redirects += 1,
            Bucket::Error => self.errors += 1,
            Bucket::NetworkError => self.network_errors += 1,
        }

        self.records.push(UrlRecord {
            url: url.to_string(),
            outcome,
            response_time,
            checked_at: Utc::now(),
        });
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Counter for a single bucket
    pub fn count(&self, bucket: Bucket) -> u64 {
        match bucket {
            Bucket::Success => self.success,
            Bucket::Redirect => self.redirects,
            Bucket::Error => self.errors,
            Bucket::NetworkError => self.network_errors,
        }
    }

    /// Share of `bucket` in the total, as a percentage
    pub fn share(&self, bucket: Bucket) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.count(bucket) as f64 / self.total as f64) * 100.0
    }

    /// Returns true if the counters add up to the total
    pub fn is_consistent(&self) -> bool {
        self.total == self.success + self.redirects + self.errors + self.network_errors
            && self.total == self.records.len() as u64
    }

    /// URLs that ended up in the output file, in order
    pub fn output_urls(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter_map(|record| record.outcome.output_url(&record.url))
            .collect()
    }

    /// Wall-clock duration of the run, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Response times of every URL that got a response
    pub fn response_times(&self) -> impl Iterator<Item = Duration> + '_ {
        self.records.iter().filter_map(|record| record.response_time)
    }

    /// Min/mean/max of the response times, or `None` without samples
    pub fn response_time_stats(&self) -> Option<ResponseTimeStats> {
        let mut count = 0u64;
        let mut sum = Duration::ZERO;
        let mut min = Duration::MAX;
        let mut max = Duration::ZERO;

        for sample in self.response_times() {
            count += 1;
            sum += sample;
            min = min.min(sample);
            max = max.max(sample);
        }

        if count == 0 {
            return None;
        }

        Some(ResponseTimeStats {
            count,
            min,
            max,
            mean: mean_of(sum, count),
        })
    }

    /// Response times grouped into the [`HISTOGRAM_BOUNDS_MS`] bins
    ///
    /// Empty when no URL produced a timed response.
    pub fn response_time_histogram(&self) -> Vec<HistogramBin> {
        let samples: Vec<u64> = self
            .response_times()
            .map(|sample| sample.as_millis() as u64)
            .collect();

        if samples.is_empty() {
            return Vec::new();
        }

        let mut bins: Vec<HistogramBin> = Vec::with_capacity(HISTOGRAM_BOUNDS_MS.len() + 1);
        let mut lower = 0;
        for upper in HISTOGRAM_BOUNDS_MS {
            bins.push(HistogramBin {
                lower_ms: lower,
                upper_ms: Some(upper),
                count: 0,
            });
            lower = upper;
        }
        bins.push(HistogramBin {
            lower_ms: lower,
            upper_ms: None,
            count: 0,
        });

        for ms in samples {
            if let Some(bin) = bins.iter_mut().find(|bin| bin.contains(ms)) {
                bin.count += 1;
            }
        }

        bins
    }
}

/// Aggregate response time figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseTimeStats {
    pub count: u64,
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
}

/// Mean of `count` samples summing to `sum`, at nanosecond precision
fn mean_of(sum: Duration, count: u64) -> Duration {
    let nanos = sum.as_nanos() / u128::from(count);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// One bin of the response time histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBin {
    pub lower_ms: u64,
    /// Exclusive upper bound; `None` for the last, open-ended bin
    pub upper_ms: Option<u64>,
    pub count: u64,
}

impl HistogramBin {
    pub fn contains(&self, ms: u64) -> bool {
        ms >= self.lower_ms && self.upper_ms.map_or(true, |upper| ms < upper)
    }

    pub fn label(&self) -> String {
        match self.upper_ms {
            Some(upper) if self.lower_ms == 0 => format!("< {} ms", upper),
            Some(upper) => format!("{}-{} ms", self.lower_ms, upper),
            None => format!(">= {} ms", self.lower_ms),
        }
    }
}

/// Prints the run summary to stdout
pub fn print_statistics(summary: &RunSummary) {
    println!("=== URL Check Statistics ===\n");

    println!("Overview:");
    println!("  Total URLs checked: {}", summary.total);
    if let Some(duration) = summary.duration() {
        println!(
            "  Run time: {:.2}s",
            duration.num_milliseconds() as f64 / 1000.0
        );
    }
    println!();

    println!("Outcomes:");
    for bucket in Bucket::ALL {
        println!(
            "  {}: {} ({:.1}%)",
            bucket,
            summary.count(bucket),
            summary.share(bucket)
        );
    }
    println!();

    if let Some(stats) = summary.response_time_stats() {
        println!("Response Times ({} samples):", stats.count);
        println!("  Min: {}ms", stats.min.as_millis());
        println!("  Mean: {}ms", stats.mean.as_millis());
        println!("  Max: {}ms", stats.max.as_millis());
        println!();
    }

    let written = summary.output_urls().len();
    println!(
        "Success Rate: {:.1}% ({} / {} URLs answered 2xx, {} written to output)",
        summary.share(Bucket::Success),
        summary.success,
        summary.total,
        written
    );
}
