//! Listing queries and download results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A request for one listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum ListingQuery {
    /// Site search results for a term
    Search { term: String, page: u32 },

    /// Most recent posts
    Recent { page: u32 },
}

impl ListingQuery {
    /// Create a search query
    pub fn search(term: impl Into<String>, page: u32) -> Self {
        ListingQuery::Search {
            term: term.into(),
            page,
        }
    }

    /// Create a recent-posts query
    pub fn recent(page: u32) -> Self {
        ListingQuery::Recent { page }
    }

    /// Page number, never below 1
    pub fn page(&self) -> u32 {
        match self {
            ListingQuery::Search { page, .. } | ListingQuery::Recent { page } => (*page).max(1),
        }
    }

    /// Site-relative path of the listing page
    pub fn path(&self) -> String {
        match self {
            ListingQuery::Search { term, .. } => {
                format!("/page/{}/?s={}", self.page(), urlencoding::encode(term))
            }
            ListingQuery::Recent { .. } => format!("/page/{}/", self.page()),
        }
    }
}

/// Result of a completed download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    /// Absolute path of the written file
    pub file_path: PathBuf,

    /// Bytes written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

impl FetchResult {
    pub fn new(file_path: PathBuf, bytes: u64) -> Self {
        Self {
            file_path,
            bytes: Some(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_path_encodes_term() {
        let query = ListingQuery::search("mathematics 2023", 2);
        assert_eq!(query.path(), "/page/2/?s=mathematics%202023");
    }

    #[test]
    fn test_recent_path() {
        assert_eq!(ListingQuery::recent(3).path(), "/page/3/");
    }

    #[test]
    fn test_page_zero_is_clamped() {
        let query = ListingQuery::search("physics", 0);
        assert_eq!(query.page(), 1);
        assert_eq!(query.path(), "/page/1/?s=physics");
    }

    #[test]
    fn test_fetch_result_json() {
        let result = FetchResult::new(PathBuf::from("/tmp/downloads/paper.pdf"), 42);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["filePath"], "/tmp/downloads/paper.pdf");
        assert_eq!(json["bytes"], 42);
    }
}
