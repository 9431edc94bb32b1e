//! Notification traits and types
//!
//! Per-URL events are delivered to an injected [`Notifier`] instead of being
//! printed from inside the checker, so runs can be observed in tests.

use crate::checker::{NetworkError, RedirectFollow, UrlOutcome};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Something worth telling the user about while a run progresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The URL answered 2xx
    Success { url: String, status: u16 },

    /// The URL answered with a redirect status
    Redirect {
        url: String,
        status: u16,
        location: Option<String>,
    },

    /// Result of following a redirect from `url`
    RedirectFollowed { url: String, follow: RedirectFollow },

    /// The URL answered with any other status
    Error { url: String, status: u16 },

    /// The request never got a response
    NetworkError { url: String, error: NetworkError },
}

impl Event {
    /// Events describing how `url` ended up with `outcome`, in order
    pub fn from_outcome(url: &str, outcome: &UrlOutcome) -> Vec<Event> {
        let url = url.to_string();
        match outcome {
            UrlOutcome::Success { status } => vec![Event::Success {
                url,
                status: *status,
            }],
            UrlOutcome::HttpError { status } => vec![Event::Error {
                url,
                status: *status,
            }],
            UrlOutcome::NetworkError { error } => vec![Event::NetworkError {
                url,
                error: error.clone(),
            }],
            UrlOutcome::Redirect { status, follow } => {
                let location = match follow {
                    RedirectFollow::MissingLocation => None,
                    RedirectFollow::InvalidLocation { location } => Some(location.clone()),
                    RedirectFollow::Resolved { target, .. }
                    | RedirectFollow::Unresolved { target, .. }
                    | RedirectFollow::Failed { target, .. } => Some(target.clone()),
                };
                vec![
                    Event::Redirect {
                        url: url.clone(),
                        status: *status,
                        location,
                    },
                    Event::RedirectFollowed {
                        url,
                        follow: follow.clone(),
                    },
                ]
            }
        }
    }
}

/// Receives per-URL events
pub trait Notifier {
    /// Called once per event, in processing order
    fn notify(&self, event: &Event);
}

/// Notifier that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Event>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far
    pub fn events(&self) -> Vec<Event> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: &Event) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
