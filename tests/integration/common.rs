use std::collections::BTreeMap;
use url_sieve::config::Config;
use url_sieve::output::RecordingNotifier;
use url_sieve::{Checker, RunSummary};

/// Creates a test configuration that probes URLs exactly as given
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.normalize = false;
    config.probe.timeout_secs = 2;
    config
}

/// Same as `test_config` with extra headers
pub fn test_config_with_headers(headers: &[(&str, &str)]) -> Config {
    let mut config = test_config();
    config.headers = headers
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect::<BTreeMap<_, _>>();
    config
}

/// Port on localhost that nothing listens on
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    port
}

/// Runs the checker over `entries` and returns the summary, the lines
/// written to the output, and the recorded events
pub async fn run_entries(
    config: &Config,
    entries: &[String],
) -> (RunSummary, Vec<String>, RecordingNotifier) {
    let checker = Checker::new(config).expect("Failed to create checker");
    let notifier = RecordingNotifier::new();
    let mut out = Vec::new();

    let summary = checker
        .run(entries, &mut out, &notifier)
        .await
        .expect("Run failed");

    let lines = String::from_utf8(out)
        .expect("Output is not UTF-8")
        .lines()
        .map(str::to_string)
        .collect();

    (summary, lines, notifier)
}
