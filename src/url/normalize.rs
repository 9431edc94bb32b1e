/// Scheme every normalized URL ends up with
const HTTPS: &str = "https://";

/// Plain HTTP scheme, upgraded to HTTPS during normalization
const HTTP: &str = "http://";

/// Normalizes a raw input line into an absolute HTTPS URL
///
/// # Normalization Steps
///
/// 1. If `enabled` is false, return the input unchanged
/// 2. `http://...` is upgraded to `https://...`
/// 3. `https://...` is kept as-is
/// 4. `www....` gets an `https://` prefix
/// 5. Anything else gets an `https://www.` prefix
///
/// Prefix checks are case-sensitive and the rest of the input is never
/// touched, so this never fails.
///
/// # Examples
///
/// ```
/// use url_sieve::url::normalize_url;
///
/// assert_eq!(normalize_url("example.com", true), "https://www.example.com");
/// assert_eq!(normalize_url("http://example.com/a", true), "https://example.com/a");
/// assert_eq!(normalize_url("example.com", false), "example.com");
/// ```
pub fn normalize_url(raw: &str, enabled: bool) -> String {
    if !enabled {
        return raw.to_string();
    }

    if let Some(rest) = raw.strip_prefix(HTTP) {
        format!("{}{}", HTTPS, rest)
    } else if raw.starts_with(HTTPS) {
        raw.to_string()
    } else if raw.starts_with("www.") {
        format!("{}{}", HTTPS, raw)
    } else {
        format!("{}www.{}", HTTPS, raw)
    }
}
