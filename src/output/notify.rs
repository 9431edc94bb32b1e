//! Console notifications through `tracing`

use crate::checker::RedirectFollow;
use crate::output::traits::{Event, Notifier};

/// Notifier that turns events into log lines
///
/// Successes and redirects are logged at `info`, HTTP errors at `warn`,
/// network errors and broken redirects at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &Event) {
        match event {
            Event::Success { url, status } => {
                tracing::info!("✓ OK ({}): {}", status, url);
            }
            Event::Redirect {
                url,
                status,
                location,
            } => match location {
                Some(location) => {
                    tracing::info!("→ Redirect ({}): {} -> {}", status, url, location)
                }
                None => tracing::info!("→ Redirect ({}): {}", status, url),
            },
            Event::RedirectFollowed { url, follow } => match follow {
                RedirectFollow::Resolved { target, status } => {
                    tracing::info!("✓ OK ({}): {} (redirect target)", status, target);
                }
                RedirectFollow::Unresolved { target, status } => {
                    tracing::warn!(
                        "Redirect target {} answered {}, not following further",
                        target,
                        status
                    );
                }
                RedirectFollow::Failed { target, error } => {
                    tracing::error!("! Redirect target {} unreachable: {}", target, error);
                }
                RedirectFollow::MissingLocation => {
                    tracing::error!("Location header missing for redirect from {}", url);
                }
                RedirectFollow::InvalidLocation { location } => {
                    tracing::error!("Invalid Location '{}' in redirect from {}", location, url);
                }
            },
            Event::Error { url, status } => {
                tracing::warn!("✗ Error ({}): {}", status, url);
            }
            Event::NetworkError { url, error } => {
                tracing::error!("! Network error for {}: {}", url, error);
            }
        }
    }
}
