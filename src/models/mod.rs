//! Core data models for listing, detail and download operations.

mod paper;
mod search;

pub use paper::{DownloadLink, LinkType, PaperDetail, PaperStub};
pub use search::{FetchResult, ListingQuery};
