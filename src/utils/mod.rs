//! Utility modules supporting scraping and downloads.
//!
//! - [`HttpClient`]: site-bound HTTP client with a fixed timeout and user agent
//! - [`resolve`]: resolve possibly-relative hrefs against the site origin
//! - [`resolve_filename`]: choose a filename from response headers
//!
//! # URL resolution
//!
//! ```rust
//! use pastpapers::utils::resolve;
//! use url::Url;
//!
//! let base = Url::parse("https://pastpapers.wiki").unwrap();
//! assert_eq!(
//!     resolve("/files/a.pdf", &base).unwrap(),
//!     "https://pastpapers.wiki/files/a.pdf"
//! );
//! ```

mod filename;
mod http;
mod urls;

pub use filename::{
    extension_for_content_type, filename_from_disposition, resolve_filename, sanitize_filename,
    FALLBACK_FILENAME,
};
pub use http::HttpClient;
pub use urls::{is_absolute_url, parse_base, resolve};
