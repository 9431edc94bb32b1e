use serde::Deserialize;
use std::collections::BTreeMap;

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for url-sieve
///
/// Every section is optional; a missing file is equivalent to
/// `Config::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rewrite raw input lines into absolute HTTPS URLs before probing
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    #[serde(default)]
    pub probe: ProbeConfig,

    /// Headers attached verbatim to every probe, redirect follow-ups included
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalize: default_normalize(),
            probe: ProbeConfig::default(),
            headers: BTreeMap::new(),
            report: ReportConfig::default(),
        }
    }
}

/// HTTP probe configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Timeout for a single request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Report configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Where to write the markdown report; no report when absent
    pub path: Option<String>,
}

fn default_normalize() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("url-sieve/{}", env!("CARGO_PKG_VERSION"))
}
