//! External-link helpers.
//!
//! Question cards deep-link to web content; links are validated and
//! normalized here before the platform shell opens them.

use crate::models::{Result, VerdantError};
use regex::Regex;

/// Pattern accepted for external links: optional scheme, lowercase host
/// with a TLD, optional path. Query strings are rejected.
const URL_PATTERN: &str = r"^(https?://)?([\da-z.-]+)\.([a-z.]{2,6})([/\w .-]*)*/?$";

/// Check whether a string looks like an openable web URL.
pub fn is_valid_url(url: &str) -> bool {
    Regex::new(URL_PATTERN)
        .map(|re| re.is_match(url.trim()))
        .unwrap_or(false)
}

/// Prefix `https://` when the scheme is missing.
pub fn normalize_url(url: &str) -> String {
    let clean = url.trim();

    if clean.starts_with("http://") || clean.starts_with("https://") {
        clean.to_string()
    } else {
        format!("https://{clean}")
    }
}

/// Validate an external link and return its normalized form.
pub fn validate_external_url(url: &str) -> Result<String> {
    if !is_valid_url(url) {
        return Err(VerdantError::InvalidUrl {
            url: url.to_string(),
        });
    }

    Ok(normalize_url(url))
}
