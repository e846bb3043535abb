//! Linearization of a content root into ordered text blocks.
//!
//! Walks the subtree in document order. Block-level boundaries flush the
//! accumulated text as a [`ContentBlock`]; within a block, whitespace
//! runs collapse to a single space.

use scraper::{ElementRef, Node};
use serde::Serialize;

/// Coarse semantic role of a block, kept for formatting joins.
/// Heading levels all collapse to `Heading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
    Heading,
    Paragraph,
    ListItem,
}

/// One fragment of main content, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub role: BlockRole,
    pub text: String,
}

/// Subtrees that never contribute readable text.
pub const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "iframe", "object", "embed", "svg", "head",
];

/// Page chrome pruned during linearization, so even a body fallback
/// excludes navigation and the like.
pub const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "aside", "form"];

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "blockquote",
    "body",
    "caption",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "hr",
    "li",
    "main",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "td",
    "th",
    "tr",
    "ul",
];

pub fn is_block_tag(name: &str) -> bool {
    BLOCK_TAGS.contains(&name)
}

fn role_for(name: &str) -> BlockRole {
    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => BlockRole::Heading,
        "li" => BlockRole::ListItem,
        _ => BlockRole::Paragraph,
    }
}

/// Flatten `root` into ordered content blocks. An empty subtree yields
/// an empty vector.
pub fn linearize(root: ElementRef) -> Vec<ContentBlock> {
    let mut walker = Walker {
        blocks: Vec::new(),
        current: String::new(),
        pending_space: false,
        role: role_for(root.value().name()),
    };
    walker.walk(root);
    walker.flush();
    walker.blocks
}

struct Walker {
    blocks: Vec<ContentBlock>,
    current: String,
    pending_space: bool,
    role: BlockRole,
}

impl Walker {
    fn walk(&mut self, el: ElementRef) {
        for child in el.children() {
            match child.value() {
                Node::Text(t) => self.push_text(t),
                Node::Element(e) => {
                    let name = e.name();
                    if SKIP_TAGS.contains(&name) || CHROME_TAGS.contains(&name) {
                        continue;
                    }
                    if name == "br" {
                        self.pending_space = true;
                        continue;
                    }
                    let Some(child_ref) = ElementRef::wrap(child) else {
                        continue;
                    };
                    if is_block_tag(name) {
                        self.flush();
                        let outer = self.role;
                        self.role = role_for(name);
                        self.walk(child_ref);
                        self.flush();
                        self.role = outer;
                    } else {
                        self.walk(child_ref);
                    }
                }
                _ => {}
            }
        }
    }

    fn push_text(&mut self, raw: &str) {
        for ch in raw.chars() {
            if ch.is_whitespace() {
                self.pending_space = true;
            } else {
                if self.pending_space && !self.current.is_empty() {
                    self.current.push(' ');
                }
                self.pending_space = false;
                self.current.push(ch);
            }
        }
    }

    fn flush(&mut self) {
        self.pending_space = false;
        if self.current.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.current);
        self.blocks.push(ContentBlock {
            role: self.role,
            text,
        });
    }
}
