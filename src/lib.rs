//! url-sieve: probe a list of URLs and keep the ones that answer
//!
//! This crate reads URLs (or bare domains) from a file, normalizes them,
//! probes each one with a single HTTP GET, follows at most one redirect hop,
//! and writes the URLs that answered successfully to an output file. A run
//! summary is aggregated along the way and can be rendered as a report.

pub mod checker;
pub mod config;
pub mod output;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for url-sieve operations
///
/// Only failures that abort a whole run live here. Per-URL failures are
/// recorded as outcomes, see [`checker::UrlOutcome`].
#[derive(Debug, Error)]
pub enum SieveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read input file {path}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Report error: {0}")]
    Report(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

/// Result type alias for url-sieve operations
pub type Result<T> = std::result::Result<T, SieveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checker::{check_urls, Checker, RunOptions, UrlOutcome};
pub use config::Config;
pub use output::{Bucket, RunSummary};
pub use crate::url::normalize_url;
