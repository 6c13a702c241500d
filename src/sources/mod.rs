//! Site access: page fetching, record extraction and asset downloads.
//!
//! [`PastPapersSource`] exposes the operations callers build on:
//!
//! - [`search`](PastPapersSource::search) and [`recent`](PastPapersSource::recent)
//!   return paper stubs from a listing page
//! - [`get_details`](PastPapersSource::get_details) returns a full detail record
//! - [`download`](PastPapersSource::download) streams an asset to the downloads
//!   directory
//!
//! The listing and detail calls never fail: fetch and parse problems are logged and
//! come back as an empty list or `None`. Only `download` returns an error.

mod pastpapers;

pub use pastpapers::PastPapersSource;

use std::path::PathBuf;

/// Errors that can occur while fetching or reading a page
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// The site answered with a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Response body could not be read or parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// An href or base URL could not be resolved
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

/// Errors that can occur while downloading an asset
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Invalid download URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to download {url}: {message}")]
    Network { url: String, message: String },

    #[error("Download of {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    pub(crate) fn network(url: &str, err: impl std::fmt::Display) -> Self {
        DownloadError::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DownloadError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<SourceError> for DownloadError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::InvalidUrl(msg) => DownloadError::InvalidUrl(msg),
            other => DownloadError::Network {
                url: String::new(),
                message: other.to_string(),
            },
        }
    }
}
