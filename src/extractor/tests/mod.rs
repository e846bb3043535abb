use std::fs;

use scraper::Html;

use crate::extractor::{BlockRole, extract};

fn parse_fixture(name: &str) -> Html {
    let html = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture");
    Html::parse_document(&html)
}

fn joined(doc: &Html) -> String {
    extract(doc)
        .iter()
        .map(|b| b.text.clone())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[test]
fn extracts_article_and_drops_chrome() {
    let doc = parse_fixture("article.html");
    let text = joined(&doc);

    assert!(text.contains("first paragraph of the article"));
    assert!(text.contains("second paragraph"));
    assert!(text.contains("A Subheading"));
    assert!(text.contains("First takeaway"));

    // Navigation, sidebar, footer and ads are boilerplate
    assert!(!text.contains("Home"));
    assert!(!text.contains("Trending"));
    assert!(!text.contains("Copyright"));
    assert!(!text.contains("Buy our product"));

    // Script and style bodies never leak
    assert!(!text.contains("analytics"));
    assert!(!text.contains("font-family"));
}

#[test]
fn article_blocks_carry_roles() {
    let doc = parse_fixture("article.html");
    let blocks = extract(&doc);

    assert_eq!(blocks[0].role, BlockRole::Heading);
    assert_eq!(blocks[0].text, "Sample Article");
    assert!(blocks.iter().any(|b| b.role == BlockRole::ListItem));
    assert!(blocks.iter().any(|b| b.role == BlockRole::Paragraph));
}

#[test]
fn bare_page_returns_whole_body_as_one_block() {
    let doc = parse_fixture("bare.html");
    let blocks = extract(&doc);

    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].role, BlockRole::Paragraph);
    assert!(blocks[0].text.starts_with("Just a single run of text"));
}

#[test]
fn synthetic_nav_vs_article() {
    let para = "a".repeat(500);
    let html = format!(
        "<html><body><nav>Home|About|Contact</nav><article><p>{para}</p></article></body></html>"
    );
    let doc = Html::parse_document(&html);
    let text = joined(&doc);

    assert!(text.contains(&para));
    assert!(!text.contains("Home|About|Contact"));
}

#[test]
fn empty_body_is_not_an_error() {
    let doc = Html::parse_document("<html><body></body></html>");
    assert!(extract(&doc).is_empty());
}

#[test]
fn extraction_is_deterministic() {
    let doc = parse_fixture("article.html");
    assert_eq!(extract(&doc), extract(&doc));
}

#[test]
fn malformed_html_is_recovered() {
    let doc =
        Html::parse_document("<html><head><title>Broken</title><body><p>Unclosed tags<div>More content");
    let text = joined(&doc);

    assert!(text.contains("Unclosed tags"));
    assert!(text.contains("More content"));
}

#[test]
fn never_panics_on_garbage() {
    for garbage in [
        "",
        "<<<>>>",
        "<html><body><p>\u{FFFD}\u{0}</p>",
        "plain text, no markup at all",
        "<a href=></a><b><b><b></b>",
    ] {
        let doc = Html::parse_document(garbage);
        let _ = extract(&doc);
    }
}
