//! Status classification and single-hop redirect resolution
//!
//! Everything here is pure: the runner performs the probes and feeds the
//! results in, so the whole state machine is testable without a network.
//!
//! ```text
//! INIT ──probe──> PROBED ──2xx──────────> SUCCESS
//!   │                ├──300..=307──> REDIRECTING ──one follow-up──> terminal
//!   │                └──other──────> ERROR
//!   └──transport failure──────────> NETWORK_ERROR
//! ```

use crate::checker::fetcher::{NetworkError, ProbeResponse};
use crate::output::Bucket;
use std::fmt;
use url::Url;

/// Coarse class of an HTTP status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// 200..=299
    Success,
    /// 300..=307
    Redirect,
    /// Everything else, including 1xx and 308
    Error,
}

/// Classifies a status code
///
/// 308 falls outside the redirect range and is treated as an error.
pub fn classify_status(code: u16) -> StatusClass {
    match code {
        200..=299 => StatusClass::Success,
        300..=307 => StatusClass::Redirect,
        _ => StatusClass::Error,
    }
}

/// What happened when a redirect was followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectFollow {
    /// The redirect response had no `Location` header
    MissingLocation,
    /// `Location` was present but could not be turned into a URL
    InvalidLocation { location: String },
    /// The follow-up probe answered 2xx
    Resolved { target: String, status: u16 },
    /// The follow-up probe answered with a non-2xx status; not followed further
    Unresolved { target: String, status: u16 },
    /// The follow-up probe failed at the transport level
    Failed { target: String, error: NetworkError },
}

/// Final classification of one input URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlOutcome {
    Success { status: u16 },
    Redirect { status: u16, follow: RedirectFollow },
    HttpError { status: u16 },
    NetworkError { error: NetworkError },
}

impl UrlOutcome {
    /// Summary bucket for this outcome
    ///
    /// A redirect always lands in [`Bucket::Redirect`], even when the
    /// follow-up succeeded.
    pub fn bucket(&self) -> Bucket {
        match self {
            Self::Success { .. } => Bucket::Success,
            Self::Redirect { .. } => Bucket::Redirect,
            Self::HttpError { .. } => Bucket::Error,
            Self::NetworkError { .. } => Bucket::NetworkError,
        }
    }

    /// Status code of the original probe, if it got a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status }
            | Self::Redirect { status, .. }
            | Self::HttpError { status } => Some(*status),
            Self::NetworkError { .. } => None,
        }
    }

    /// Redirect target that answered successfully, if any
    pub fn resolved_url(&self) -> Option<&str> {
        match self {
            Self::Redirect {
                follow: RedirectFollow::Resolved { target, .. },
                ..
            } => Some(target),
            _ => None,
        }
    }

    /// The URL to write to the output file, if this outcome produces one
    ///
    /// `probed` is the URL the original request was sent to.
    pub fn output_url<'a>(&'a self, probed: &'a str) -> Option<&'a str> {
        match self {
            Self::Success { .. } => Some(probed),
            _ => self.resolved_url(),
        }
    }
}

impl fmt::Display for UrlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { .. } => write!(f, "success"),
            Self::HttpError { .. } => write!(f, "HTTP error"),
            Self::NetworkError { error } => write!(f, "network error ({})", error.kind),
            Self::Redirect { follow, .. } => match follow {
                RedirectFollow::MissingLocation => write!(f, "redirect, no Location header"),
                RedirectFollow::InvalidLocation { location } => {
                    write!(f, "redirect, invalid Location '{}'", location)
                }
                RedirectFollow::Resolved { target, status } => {
                    write!(f, "redirect to {} ({})", target, status)
                }
                RedirectFollow::Unresolved { target, status } => {
                    write!(f, "redirect to {} (answered {}, not followed)", target, status)
                }
                RedirectFollow::Failed { target, error } => {
                    write!(f, "redirect to {} ({})", target, error.kind)
                }
            },
        }
    }
}

/// Next step after the first probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The URL reached a terminal state
    Done(UrlOutcome),
    /// Probe `target` once more, then call [`classify_follow_up`]
    Follow { status: u16, target: String },
}

/// Resolves a `Location` header value against the URL that returned it
///
/// Absolute locations are used verbatim; relative ones are joined onto
/// `base`. Returns `None` if neither works.
pub fn resolve_location(base: &str, location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    match Url::parse(location) {
        Ok(_) => Some(location.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|base| base.join(location))
            .ok()
            .map(String::from),
        Err(_) => None,
    }
}

/// Classifies the first probe of `url`
pub fn classify_initial(url: &str, result: Result<ProbeResponse, NetworkError>) -> Decision {
    let response = match result {
        Ok(response) => response,
        Err(error) => return Decision::Done(UrlOutcome::NetworkError { error }),
    };

    let status = response.status;
    match classify_status(status) {
        StatusClass::Success => Decision::Done(UrlOutcome::Success { status }),
        StatusClass::Error => Decision::Done(UrlOutcome::HttpError { status }),
        StatusClass::Redirect => match response.location {
            None => Decision::Done(UrlOutcome::Redirect {
                status,
                follow: RedirectFollow::MissingLocation,
            }),
            Some(location) => match resolve_location(url, &location) {
                Some(target) => Decision::Follow { status, target },
                None => Decision::Done(UrlOutcome::Redirect {
                    status,
                    follow: RedirectFollow::InvalidLocation { location },
                }),
            },
        },
    }
}

/// Classifies the single follow-up probe of a redirect
///
/// `status` is the original redirect status. The follow-up is terminal
/// whatever it returns.
pub fn classify_follow_up(
    status: u16,
    target: String,
    result: Result<ProbeResponse, NetworkError>,
) -> UrlOutcome {
    let follow = match result {
        Err(error) => RedirectFollow::Failed { target, error },
        Ok(response) => match classify_status(response.status) {
            StatusClass::Success => RedirectFollow::Resolved {
                target,
                status: response.status,
            },
            StatusClass::Redirect | StatusClass::Error => RedirectFollow::Unresolved {
                target,
                status: response.status,
            },
        },
    };

    UrlOutcome::Redirect { status, follow }
}
