//! Output module for run results
//!
//! This module handles:
//! - Aggregating per-URL outcomes into run statistics
//! - Delivering per-URL notifications
//! - Rendering the optional markdown report

mod markdown;
mod notify;
pub mod stats;
mod traits;

pub use markdown::{format_markdown_report, generate_markdown_report, ReportContext};
pub use notify::TracingNotifier;
pub use stats::{
    print_statistics, Bucket, HistogramBin, ResponseTimeStats, RunSummary, UrlRecord,
    HISTOGRAM_BOUNDS_MS,
};
pub use traits::{Event, Notifier, OutputError, OutputResult, RecordingNotifier};
