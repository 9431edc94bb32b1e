//! URL handling module for url-sieve
//!
//! This module turns the raw input file into the list of URLs to probe:
//! reading and splitting the file, and normalizing each entry.

mod normalize;

use crate::SieveError;
use std::path::Path;

pub use normalize::normalize_url;

/// Splits input text into URL entries
///
/// Each line is trimmed and empty lines are dropped. There is no comment
/// syntax; every non-blank line is an entry.
///
/// # Examples
///
/// ```
/// use url_sieve::url::parse_url_list;
///
/// let entries = parse_url_list("example.com\n\n  www.test.org \r\n");
/// assert_eq!(entries, vec!["example.com", "www.test.org"]);
/// ```
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the input file and returns its URL entries
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Entries in file order
/// * `Err(SieveError::Input)` - The file could not be read
pub fn load_url_list(path: &Path) -> Result<Vec<String>, SieveError> {
    let content = std::fs::read_to_string(path).map_err(|source| SieveError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = parse_url_list(&content);
    tracing::debug!("Loaded {} URLs from {}", entries.len(), path.display());
    Ok(entries)
}
