//! Hyperlink collection from a parsed page.
//!
//! Anchors resolve against the page's base URL, honoring an in-document
//! `<base href>` override. Fragments are stripped and duplicates dropped,
//! keeping the first occurrence and its anchor text.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static BASE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("base[href]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLink {
    /// Absolute, fragment-stripped URL.
    pub href: String,
    pub anchor_text: String,
}

/// Collect the outbound links of a page in first-seen order.
pub fn extract_links(doc: &Html, fetch_url: &Url) -> Vec<ExtractedLink> {
    let base = resolve_base(doc, fetch_url);

    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for anchor in doc.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let Ok(mut resolved) = base.join(href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        resolved.set_fragment(None);

        let normalized = resolved.to_string();
        if !seen.insert(normalized.clone()) {
            continue;
        }

        let anchor_text = anchor
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        links.push(ExtractedLink {
            href: normalized,
            anchor_text,
        });
    }

    links
}

/// The first `<base href>` overrides the fetch URL for relative-link
/// resolution, when it itself resolves.
fn resolve_base(doc: &Html, fetch_url: &Url) -> Url {
    if let Some(base_el) = doc.select(&BASE_SELECTOR).next()
        && let Some(href) = base_el.value().attr("href")
        && let Ok(base) = fetch_url.join(href.trim())
    {
        return base;
    }
    fetch_url.clone()
}
