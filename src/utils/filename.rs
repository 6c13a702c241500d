//! Filename derivation for downloaded assets.
//!
//! The name comes from the response's `Content-Disposition` header when it has a
//! `filename*=` or `filename=` parameter, else from the caller's suggestion, else
//! [`FALLBACK_FILENAME`].
//! An extension is appended from the `Content-Type` only when the name has none.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

/// Name used when neither the server nor the caller supplies one
pub const FALLBACK_FILENAME: &str = "download";

fn disposition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\bfilename\s*=\s*(?:"([^"]*)"|'([^']*)'|([^;\n]*))"#)
            .expect("filename pattern is valid")
    })
}

/// RFC 5987 `filename*=charset'language'percent-encoded`
fn extended_disposition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\bfilename\*\s*=\s*"?[^'";]*'[^'";]*'([^;\s"]+)"#)
            .expect("extended filename pattern is valid")
    })
}

/// Extract the filename from a Content-Disposition header value.
///
/// `filename*=` wins over `filename=` when both are present; its value is
/// percent-decoded. Plain values may be quoted or unquoted, surrounding quotes are
/// stripped and an empty value counts as absent.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    if let Some(caps) = extended_disposition_regex().captures(header) {
        let decoded = urlencoding::decode_binary(caps[1].as_bytes());
        let name = String::from_utf8_lossy(&decoded).trim().to_string();
        if !name.is_empty() {
            return Some(name);
        }
    }

    let caps = disposition_regex().captures(header)?;
    let raw = caps
        .get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))?
        .as_str();

    let name = raw.trim().replace(['"', '\''], "");
    (!name.is_empty()).then_some(name)
}

/// Replace characters that could escape the target directory or are invalid on
/// common filesystems.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match sanitized.trim() {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Extension implied by a Content-Type value, if it is one we append
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let content_type = content_type.to_ascii_lowercase();
    if content_type.contains("pdf") {
        Some("pdf")
    } else if content_type.contains("zip") {
        Some("zip")
    } else {
        None
    }
}

/// Pick the final filename for a download.
pub fn resolve_filename(
    content_disposition: Option<&str>,
    suggested: Option<&str>,
    content_type: Option<&str>,
) -> String {
    let name = content_disposition
        .and_then(filename_from_disposition)
        .or_else(|| {
            suggested
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
    let name = sanitize_filename(&name);

    if Path::new(&name).extension().is_some() {
        return name;
    }

    match content_type.and_then(extension_for_content_type) {
        Some(ext) => format!("{}.{}", name, ext),
        None => name,
    }
}
