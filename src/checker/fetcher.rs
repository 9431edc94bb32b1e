//! HTTP prober implementation
//!
//! This module issues the single timed GET request behind every check:
//! - Building the HTTP client (no redirect following, fixed timeout)
//! - Attaching the configured headers to each request
//! - Timing the request until the response headers arrive
//! - Classifying transport failures

use crate::config::{Config, ProbeConfig};
use crate::ConfigError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};
use reqwest::{redirect::Policy, Client};
use std::collections::BTreeMap;
use std::error::Error as _;
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Response data kept from a single probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status: u16,

    /// Raw `Location` header value, if the server sent one
    pub location: Option<String>,

    /// Time from sending the request until the response headers arrived
    pub elapsed: Duration,
}

/// Broad category of a transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkErrorKind {
    /// The request did not complete within the timeout
    Timeout,
    /// DNS resolution, TCP connect, or TLS handshake failed
    Connect,
    /// The request could not be built (e.g. the URL does not parse)
    Request,
    /// Anything else the transport reported
    Other,
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connection failed",
            Self::Request => "invalid request",
            Self::Other => "transport error",
        };
        f.write_str(label)
    }
}

/// A probe that never produced an HTTP response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct NetworkError {
    pub kind: NetworkErrorKind,
    pub message: String,
}

impl NetworkError {
    pub fn new(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            NetworkErrorKind::Timeout
        } else if e.is_connect() {
            NetworkErrorKind::Connect
        } else if e.is_builder() {
            NetworkErrorKind::Request
        } else {
            NetworkErrorKind::Other
        };

        // reqwest's top-level message rarely says what went wrong, the
        // underlying cause is further down the source chain
        let mut message = e.to_string();
        let mut source = e.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        Self { kind, message }
    }
}

/// Builds an HTTP client for probing
///
/// Redirects are never followed by the client; the classifier decides
/// whether to follow a single hop.
///
/// # Example
///
/// ```no_run
/// use url_sieve::config::ProbeConfig;
/// use url_sieve::checker::build_http_client;
///
/// let client = build_http_client(&ProbeConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ProbeConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Converts configured headers into a `HeaderMap`
pub fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, ConfigError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
            ConfigError::InvalidHeader(format!("'{}' is not a valid header name", name))
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            ConfigError::InvalidHeader(format!(
                "value for header '{}' contains invalid characters",
                name
            ))
        })?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}

/// Issues probes with a shared client and header set
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    headers: HeaderMap,
}

impl Prober {
    /// Creates a prober from the run configuration
    pub fn new(config: &Config) -> Result<Self, crate::SieveError> {
        let client = build_http_client(&config.probe)?;
        let headers = build_header_map(&config.headers)?;
        Ok(Self::with_client(client, headers))
    }

    /// Creates a prober around an existing client
    pub fn with_client(client: Client, headers: HeaderMap) -> Self {
        Self { client, headers }
    }

    /// Sends one GET request and reports status, `Location` and timing
    ///
    /// The response body is never read. No retries are attempted: any
    /// transport failure comes back as a [`NetworkError`].
    pub async fn probe(&self, url: &str) -> Result<ProbeResponse, NetworkError> {
        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .headers(self.headers.clone())
            .send()
            .await?;
        let elapsed = started.elapsed();

        let location = response
            .headers()
            .get(LOCATION)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());

        tracing::trace!(
            "{} answered {} in {}ms",
            url,
            response.status(),
            elapsed.as_millis()
        );

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            location,
            elapsed,
        })
    }
}
