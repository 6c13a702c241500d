//! HTML-to-record extraction.
//!
//! Every field is read through a [`SelectorChain`]: an ordered list of CSS selectors
//! where the first one that produces a non-empty result wins. A chain that matches
//! nothing yields `None`, never an error, so markup drift degrades to empty fields
//! instead of failed requests.
//!
//! - [`extract_listing`]: paper stubs from a search or recent-posts page
//! - [`extract_detail`]: title, description, download links and images of a post
//! - [`classify`] and [`LinkSet`]: download link classification and de-duplication

mod detail;
mod links;
mod listing;

pub use detail::{extract_detail, DetailSelectors};
pub use links::{classify, HarvestPass, LinkClass, LinkSet, EXTERNAL_HOSTS};
pub use listing::{extract_listing, ListingSelectors};

use scraper::{ElementRef, Selector};

/// An ordered list of selectors for one field
#[derive(Debug, Clone)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    /// Build a chain from CSS patterns, in priority order.
    ///
    /// Patterns that fail to parse are logged and left out of the chain.
    pub fn new(patterns: &[&str]) -> Self {
        let selectors = patterns
            .iter()
            .filter_map(|pattern| match Selector::parse(pattern) {
                Ok(selector) => Some(selector),
                Err(e) => {
                    tracing::warn!("Ignoring invalid selector {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();

        Self { selectors }
    }

    /// Number of usable selectors
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// First element, in chain order, whose trimmed text is non-empty
    pub fn first_with_text<'a>(&self, scope: ElementRef<'a>) -> Option<(ElementRef<'a>, String)> {
        self.selectors.iter().find_map(|selector| {
            scope.select(selector).find_map(|elem| {
                let text = element_text(elem);
                (!text.is_empty()).then_some((elem, text))
            })
        })
    }

    /// Text of [`first_with_text`](Self::first_with_text)
    pub fn first_text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.first_with_text(scope).map(|(_, text)| text)
    }

    /// First element matched by any selector, in chain order
    pub fn first_element<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .iter()
            .find_map(|selector| scope.select(selector).next())
    }

    /// First non-empty value of `attr`, in chain order
    pub fn first_attr(&self, scope: ElementRef<'_>, attr: &str) -> Option<String> {
        self.selectors.iter().find_map(|selector| {
            scope.select(selector).find_map(|elem| {
                elem.value()
                    .attr(attr)
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            })
        })
    }
}

/// Concatenated, trimmed text content of an element
pub fn element_text(elem: ElementRef<'_>) -> String {
    elem.text().collect::<String>().trim().to_string()
}

/// Parse a single built-in selector pattern
pub(crate) fn selector(pattern: &str) -> Option<Selector> {
    Selector::parse(pattern)
        .map_err(|e| tracing::warn!("Ignoring invalid selector {:?}: {}", pattern, e))
        .ok()
}
