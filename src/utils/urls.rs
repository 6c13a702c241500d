//! Resolution of possibly-relative hrefs against the site origin.

use url::Url;

use crate::sources::SourceError;

/// Check if `candidate` already carries an http(s) scheme
pub fn is_absolute_url(candidate: &str) -> bool {
    candidate.starts_with("http://") || candidate.starts_with("https://")
}

/// Resolve `candidate` against `base`.
///
/// Absolute http(s) URLs are returned unchanged, byte for byte. Anything else is
/// joined onto `base` with standard reference resolution, so the scheme and host
/// come from `base` and query/fragment are kept.
pub fn resolve(candidate: &str, base: &Url) -> Result<String, SourceError> {
    if is_absolute_url(candidate) {
        return Ok(candidate.to_string());
    }

    base.join(candidate)
        .map(String::from)
        .map_err(|e| SourceError::InvalidUrl(format!("{}: {}", candidate, e)))
}

/// Parse a base origin string
pub fn parse_base(base: &str) -> Result<Url, SourceError> {
    Url::parse(base).map_err(|e| SourceError::InvalidUrl(format!("{}: {}", base, e)))
}
