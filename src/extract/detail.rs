//! Detail page extraction.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::links::{HarvestPass, LinkSet};
use super::{element_text, selector, SelectorChain};
use crate::models::PaperDetail;
use crate::utils::resolve;

/// Image `src` substrings that mark site chrome rather than paper content
const IGNORED_IMAGE_MARKERS: &[&str] = &["logo", "avatar"];

/// Selector configuration for detail pages
#[derive(Debug, Clone)]
pub struct DetailSelectors {
    pub title: SelectorChain,

    /// Post body; the first match scopes the description and the broad link pass
    pub content: SelectorChain,

    /// Elements swept by the narrow link pass
    pub download_candidates: Option<Selector>,

    pub anchor: Option<Selector>,
    pub paragraph: Option<Selector>,
    pub image: Option<Selector>,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: SelectorChain::new(&["h1", ".post-title"]),
            content: SelectorChain::new(&[".post-content", ".entry-content"]),
            download_candidates: selector(
                r#"a[href*=".pdf"], a[href*=".zip"], a[href*="download"], .download-btn, .btn-download"#,
            ),
            anchor: selector("a"),
            paragraph: selector("p"),
            image: selector("img"),
        }
    }
}

/// Extract a detail record from a post page.
///
/// Missing pieces come back empty. Download links are gathered in two passes, narrow
/// then broad, into a single [`LinkSet`] so a URL found by both keeps its narrow-pass
/// label.
pub fn extract_detail(document: &Html, base: &Url, selectors: &DetailSelectors) -> PaperDetail {
    let root = document.root_element();
    let content = selectors.content.first_element(root);

    let title = selectors.title.first_text(root).unwrap_or_default();

    let description = match (content, &selectors.paragraph) {
        (Some(content), Some(paragraph)) => content
            .select(paragraph)
            .next()
            .map(element_text)
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut links = LinkSet::new(base.clone());

    if let Some(candidates) = &selectors.download_candidates {
        for elem in root.select(candidates) {
            if let Some((href, text)) = narrow_target(elem, selectors.anchor.as_ref()) {
                links.offer(href, &text, HarvestPass::Narrow);
            }
        }
    }

    if let (Some(content), Some(anchor)) = (content, &selectors.anchor) {
        for elem in content.select(anchor) {
            if let Some(href) = elem.value().attr("href") {
                links.offer(href, &element_text(elem), HarvestPass::Broad);
            }
        }
    }

    let images = selectors
        .image
        .as_ref()
        .map(|image| collect_images(root, image, base))
        .unwrap_or_default();

    PaperDetail {
        title,
        description,
        download_links: links.into_links(),
        images,
    }
}

/// The href and label for a narrow-pass element. Buttons without an href lend the
/// first anchor inside them.
fn narrow_target<'a>(
    elem: ElementRef<'a>,
    anchor: Option<&Selector>,
) -> Option<(&'a str, String)> {
    if let Some(href) = elem.value().attr("href") {
        return Some((href, element_text(elem)));
    }

    let inner = elem.select(anchor?).find(|a| a.value().attr("href").is_some())?;
    let text = element_text(inner);
    let text = if text.is_empty() { element_text(elem) } else { text };
    Some((inner.value().attr("href")?, text))
}

fn collect_images(root: ElementRef<'_>, image: &Selector, base: &Url) -> Vec<String> {
    root.select(image)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .filter(|src| !IGNORED_IMAGE_MARKERS.iter().any(|marker| src.contains(marker)))
        .filter_map(|src| match resolve(src, base) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!("Skipping image {:?}: {}", src, e);
                None
            }
        })
        .collect()
}
