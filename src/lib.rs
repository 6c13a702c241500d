//! # pastpapers
//!
//! Search, inspect and download past exam papers from pastpapers.wiki.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (PaperStub, PaperDetail, DownloadLink, etc.)
//! - [`extract`]: Selector-fallback HTML extraction and link classification
//! - [`sources`]: Page fetching, the public operations, and their errors
//! - [`utils`]: HTTP client, URL resolution and filename helpers
//! - [`config`]: Configuration management
//!
//! ```rust,no_run
//! use pastpapers::PastPapersSource;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = PastPapersSource::new()?;
//! for stub in source.search("mathematics 2023", 1).await {
//!     if let Some(detail) = source.get_details(&stub.url).await {
//!         println!("{}: {} links", detail.title, detail.download_links.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod extract;
pub mod models;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use models::{DownloadLink, FetchResult, LinkType, PaperDetail, PaperStub};
pub use sources::{DownloadError, PastPapersSource, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
