//! Download link classification and de-duplication.

use std::collections::HashSet;

use url::Url;

use crate::models::{DownloadLink, LinkType};
use crate::utils::resolve;

/// File hosts whose links are worth offering as downloads
pub const EXTERNAL_HOSTS: &[&str] = &[
    "drive.google.com",
    "docs.google.com",
    "mega.nz",
    "mediafire.com",
    "dropbox.com",
];

/// Which sweep over a detail page produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestPass {
    /// Download-looking anchors and download buttons anywhere in the page
    Narrow,
    /// Every anchor in the post body
    Broad,
}

impl HarvestPass {
    /// Label used when the anchor has no visible text
    pub fn fallback_label(&self) -> &'static str {
        match self {
            HarvestPass::Narrow => "Download",
            HarvestPass::Broad => "Direct Link",
        }
    }
}

/// Outcome of classifying one anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkClass {
    pub link_type: LinkType,
    pub label: String,
}

/// Decide whether an anchor is a download candidate, and of what type.
///
/// Rules are checked in order and the first hit wins: `.pdf` in the href, `.zip` in
/// the href, "download" in the visible text (any case), then a known file host.
pub fn classify(href: &str, visible_text: &str, pass: HarvestPass) -> Option<LinkClass> {
    let link_type = if href.contains(".pdf") {
        LinkType::Pdf
    } else if href.contains(".zip") {
        LinkType::Zip
    } else if visible_text.to_lowercase().contains("download") {
        LinkType::Link
    } else if EXTERNAL_HOSTS.iter().any(|host| href.contains(host)) {
        LinkType::External
    } else {
        return None;
    };

    let text = visible_text.trim();
    let label = if text.is_empty() {
        pass.fallback_label().to_string()
    } else {
        text.to_string()
    };

    Some(LinkClass { link_type, label })
}

/// Ordered set of download links keyed by resolved URL.
///
/// The first pass to offer a URL decides its label and type; later offers of the
/// same URL are dropped.
#[derive(Debug, Clone)]
pub struct LinkSet {
    base: Url,
    seen: HashSet<String>,
    links: Vec<DownloadLink>,
}

impl LinkSet {
    pub fn new(base: Url) -> Self {
        Self {
            base,
            seen: HashSet::new(),
            links: Vec::new(),
        }
    }

    /// Classify and add an anchor. Returns `true` if it was added.
    pub fn offer(&mut self, href: &str, visible_text: &str, pass: HarvestPass) -> bool {
        let href = href.trim();
        if href.is_empty() {
            return false;
        }

        let Some(class) = classify(href, visible_text, pass) else {
            return false;
        };

        let url = match resolve(href, &self.base) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping link {:?}: {}", href, e);
                return false;
            }
        };

        if !self.seen.insert(url.clone()) {
            return false;
        }

        self.links.push(DownloadLink {
            text: class.label,
            url,
            link_type: class.link_type,
        });
        true
    }

    pub fn into_links(self) -> Vec<DownloadLink> {
        self.links
    }
}
