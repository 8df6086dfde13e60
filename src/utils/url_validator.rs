//! Shape validation for URLs submitted for shortening.
//!
//! Validation is a pure function of its input: no normalization, no DNS, no
//! I/O. A URL is accepted only when it has an `http`, `https` or `ftp` scheme,
//! a host with at least one dot-separated label, and an optional path made of
//! word characters, dots, hyphens and slashes.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum accepted URL length, in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Compiled URL shape pattern.
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?|ftp)://[\w.-]+(?:\.[\w.-]+)+[/\w.-]*$").unwrap()
});

/// Returns `true` when `url` is acceptable as a shortening target.
///
/// # Examples
///
/// ```
/// use url_shortener::utils::url_validator::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/page"));
/// assert!(!is_valid_url("example.com"));
/// assert!(!is_valid_url(""));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() || url.chars().count() > MAX_URL_LENGTH {
        return false;
    }

    URL_REGEX.is_match(url)
}
