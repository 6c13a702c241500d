//! Paper records extracted from listing and detail pages.

use serde::{Deserialize, Serialize};

/// The kind of target a download link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Pdf,
    Zip,
    External,
    Link,
}

impl LinkType {
    /// Returns the wire tag of this link type
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Pdf => "pdf",
            LinkType::Zip => "zip",
            LinkType::External => "external",
            LinkType::Link => "link",
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A paper as it appears on a listing page, before detail enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperStub {
    /// Paper title (never empty)
    pub title: String,

    /// Detail page URL, as found in the markup (absolute or site-relative)
    pub url: String,

    /// Thumbnail `src`, if the listing item carried one
    pub image: Option<String>,

    /// Direct asset link; listing pages never provide one
    pub direct_download: Option<String>,
}

impl PaperStub {
    /// Create a stub from its required fields
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            image: None,
            direct_download: None,
        }
    }

    /// Set the thumbnail
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

/// A classified link to a downloadable asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadLink {
    /// Human label, or a fallback token when the anchor had no text
    pub text: String,

    /// Absolute URL
    pub url: String,

    /// Link classification
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

/// A fully extracted detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperDetail {
    pub title: String,

    /// First paragraph of the post body (may be empty)
    pub description: String,

    /// Download links in discovery order, unique by URL
    pub download_links: Vec<DownloadLink>,

    /// Absolute image URLs in document order
    pub images: Vec<String>,
}

impl PaperDetail {
    /// Returns the first link of the given type
    pub fn first_of_type(&self, link_type: LinkType) -> Option<&DownloadLink> {
        self.download_links
            .iter()
            .find(|link| link.link_type == link_type)
    }

    /// Check if the page offered anything to download
    pub fn has_downloads(&self) -> bool {
        !self.download_links.is_empty()
    }
}
