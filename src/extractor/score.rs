//! Density scoring for candidate content containers.
//!
//! Classification is heuristic, so the thresholds and keyword lists live
//! here as data tables rather than branching logic. A container's score
//! is its visible-text length over its descendant tag count, adjusted by
//! tag and class/id signals.

use crate::extractor::blocks::{CHROME_TAGS, SKIP_TAGS};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};

static CANDIDATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article, main, section, div, td, body").unwrap());

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("body").unwrap());

/// Class/id tokens that mark a container as page chrome.
const BOILERPLATE_TOKENS: &[&str] = &[
    "ad",
    "ads",
    "advert",
    "banner",
    "breadcrumb",
    "comment",
    "comments",
    "cookie",
    "footer",
    "header",
    "masthead",
    "menu",
    "modal",
    "nav",
    "navbar",
    "newsletter",
    "popup",
    "promo",
    "related",
    "share",
    "sidebar",
    "social",
    "sponsor",
    "subscribe",
    "widget",
];

/// Multipliers for semantic content tags.
const TAG_BOOSTS: &[(&str, f64)] = &[("article", 2.5), ("main", 2.5), ("section", 1.2)];

/// Score multiplier once a boilerplate class/id token is present.
const BOILERPLATE_PENALTY: f64 = 0.05;

/// Per direct `<p>` child, capped at [`PARAGRAPH_BONUS_CAP`] children.
const PARAGRAPH_BONUS: f64 = 0.2;
const PARAGRAPH_BONUS_CAP: usize = 5;

/// Containers below this score lose to the whole-body fallback.
const MIN_DENSITY: f64 = 10.0;

/// Containers with less visible text than this never beat the body
/// fallback. A short leaf fragment can have a very high density (no
/// descendant tags to dilute it) while holding only a fraction of the
/// page's text; picking it would drop its readable siblings.
const MIN_CONTENT_CHARS: usize = 80;

/// Pick the subtree holding the main readable text. Falls back to the
/// whole `<body>` (or the document root) when nothing clears the
/// density and text-length thresholds, so degraded pages keep all
/// their content.
pub fn select_content_root(doc: &Html) -> ElementRef<'_> {
    let mut best: Option<(f64, ElementRef)> = None;
    for candidate in doc.select(&CANDIDATE_SELECTOR) {
        if visible_text_len(candidate) < MIN_CONTENT_CHARS {
            continue;
        }
        let score = score_container(candidate);
        if best.is_none_or(|(top, _)| score > top) {
            best = Some((score, candidate));
        }
    }

    if let Some((score, el)) = best
        && score >= MIN_DENSITY
    {
        return el;
    }

    doc.select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| doc.root_element())
}

/// Pure scoring function over one candidate container.
pub fn score_container(el: ElementRef) -> f64 {
    if inside_chrome(el) {
        return 0.0;
    }

    let text_len = visible_text_len(el);
    if text_len == 0 {
        return 0.0;
    }

    let tag_count = descendant_tag_count(el);
    let mut score = text_len as f64 / (1.0 + tag_count as f64);

    score *= tag_boost(el.value().name());

    let paragraphs = direct_paragraph_children(el).min(PARAGRAPH_BONUS_CAP);
    score *= 1.0 + PARAGRAPH_BONUS * paragraphs as f64;

    if has_boilerplate_marker(el) {
        score *= BOILERPLATE_PENALTY;
    }

    score
}

fn tag_boost(name: &str) -> f64 {
    TAG_BOOSTS
        .iter()
        .find(|(tag, _)| *tag == name)
        .map_or(1.0, |(_, boost)| *boost)
}

fn inside_chrome(el: ElementRef) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| CHROME_TAGS.contains(&a.value().name()))
}

/// Length in characters of the text this subtree would contribute,
/// whitespace collapsed, skipping non-textual and chrome subtrees.
fn visible_text_len(el: ElementRef) -> usize {
    let mut len = 0;
    for child in el.children() {
        match child.value() {
            Node::Text(t) => {
                len += t
                    .split_whitespace()
                    .map(|w| w.chars().count())
                    .sum::<usize>();
            }
            Node::Element(e) => {
                let name = e.name();
                if SKIP_TAGS.contains(&name) || CHROME_TAGS.contains(&name) {
                    continue;
                }
                if let Some(child_ref) = ElementRef::wrap(child) {
                    len += visible_text_len(child_ref);
                }
            }
            _ => {}
        }
    }
    len
}

fn descendant_tag_count(el: ElementRef) -> usize {
    let mut count = 0;
    for child in el.children() {
        if let Node::Element(e) = child.value() {
            let name = e.name();
            if SKIP_TAGS.contains(&name) || CHROME_TAGS.contains(&name) {
                continue;
            }
            count += 1;
            if let Some(child_ref) = ElementRef::wrap(child) {
                count += descendant_tag_count(child_ref);
            }
        }
    }
    count
}

fn direct_paragraph_children(el: ElementRef) -> usize {
    el.children()
        .filter(|c| matches!(c.value(), Node::Element(e) if e.name() == "p"))
        .count()
}

fn has_boilerplate_marker(el: ElementRef) -> bool {
    for attr in ["class", "id"] {
        if let Some(value) = el.value().attr(attr) {
            let hit = value
                .split(|c: char| !c.is_ascii_alphanumeric())
                .filter(|token| !token.is_empty())
                .any(|token| {
                    let token = token.to_ascii_lowercase();
                    BOILERPLATE_TOKENS.contains(&token.as_str())
                });
            if hit {
                return true;
            }
        }
    }
    false
}
