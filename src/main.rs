//! url-sieve main entry point
//!
//! This is the command-line interface for the url-sieve URL checker.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url_sieve::checker::check_urls;
use url_sieve::config::{load_config_with_hash, validate, Config};
use url_sieve::output::{print_statistics, TracingNotifier};
use url_sieve::RunOptions;

/// url-sieve: keep the URLs that answer
///
/// Reads one URL or domain per line, probes each with a single GET request,
/// follows at most one redirect, and writes the URLs that answered 2xx to
/// the output file.
#[derive(Parser, Debug)]
#[command(name = "url-sieve")]
#[command(version)]
#[command(about = "Probe a list of URLs and keep the ones that answer", long_about = None)]
struct Cli {
    /// File with one URL or domain per line
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// File receiving the successful URLs (truncated first)
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Extra request header, e.g. "Accept-Language: en" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Probe input lines exactly as written
    #[arg(long)]
    no_normalize: bool,

    /// Write a markdown report of the run to this file
    #[arg(short, long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Parses a `Name: Value` header argument
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: Value', got '{}'", raw))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name missing in '{}'", raw));
    }

    Ok((name.to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    apply_overrides(&mut config, &cli)?;

    let report = cli
        .report
        .clone()
        .or_else(|| config.report.path.as_ref().map(PathBuf::from));

    let options = RunOptions {
        input: cli.input.clone(),
        output: cli.output.clone(),
        report,
        config,
        config_hash,
    };

    let summary = check_urls(&options, &TracingNotifier)
        .await
        .context("URL check aborted")?;

    if !cli.quiet {
        println!();
        print_statistics(&summary);
    }

    Ok(())
}

/// Applies command-line flags on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if cli.no_normalize {
        config.normalize = false;
    }

    if let Some(timeout) = cli.timeout {
        config.probe.timeout_secs = timeout;
    }

    // Header names are case-insensitive; drop any config spelling first
    for (name, value) in &cli.headers {
        config
            .headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        config.headers.insert(name.clone(), value.clone());
    }

    validate(config).context("invalid command-line option")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("url_sieve=info,warn"),
            1 => EnvFilter::new("url_sieve=debug,info"),
            2 => EnvFilter::new("url_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
