//! Listing page extraction.

use scraper::{Html, Selector};

use super::{selector, SelectorChain};
use crate::models::{ListingQuery, PaperStub};

/// Selector configuration for one kind of listing page
#[derive(Debug, Clone)]
pub struct ListingSelectors {
    /// Matches every result container; each match is processed on its own
    pub container: Option<Selector>,

    /// Title anchors, in priority order; the matched anchor also supplies the link
    pub title_link: SelectorChain,

    /// Thumbnail image
    pub image: SelectorChain,
}

impl ListingSelectors {
    /// Site search result pages
    pub fn search() -> Self {
        Self {
            container: selector(".post-item, .search-result-item, article"),
            title_link: SelectorChain::new(&["h2 a", ".post-title a", "h3 a"]),
            image: SelectorChain::new(&["img"]),
        }
    }

    /// Recent-posts pages
    pub fn recent() -> Self {
        Self {
            container: selector(".post-item, article, .search-result-item"),
            title_link: SelectorChain::new(&["h2 a", ".entry-title a"]),
            image: SelectorChain::new(&["img"]),
        }
    }

    /// Selectors matching the page a query fetches
    pub fn for_query(query: &ListingQuery) -> Self {
        match query {
            ListingQuery::Search { .. } => Self::search(),
            ListingQuery::Recent { .. } => Self::recent(),
        }
    }
}

/// Extract paper stubs from a listing page, in document order.
///
/// A container contributes a stub only when it has both a title and a link;
/// anything else is skipped without affecting its siblings.
pub fn extract_listing(document: &Html, selectors: &ListingSelectors) -> Vec<PaperStub> {
    let Some(container) = &selectors.container else {
        return Vec::new();
    };

    document
        .select(container)
        .filter_map(|item| {
            let Some((anchor, title)) = selectors.title_link.first_with_text(item) else {
                tracing::debug!("Skipping listing item without a title");
                return None;
            };

            let link = anchor
                .value()
                .attr("href")
                .map(str::trim)
                .filter(|href| !href.is_empty());
            let Some(link) = link else {
                tracing::debug!("Skipping listing item {:?}: no link", title);
                return None;
            };

            let image = selectors.image.first_element(item).and_then(|img| {
                img.value()
                    .attr("src")
                    .filter(|src| !src.is_empty())
                    .map(str::to_string)
            });

            Some(PaperStub::new(title, link).image(image))
        })
        .collect()
}
