pub mod blocks;
pub mod score;

#[cfg(test)]
mod tests;

pub use blocks::{BlockRole, ContentBlock};

use scraper::Html;

/// Separate main content from boilerplate and return it as ordered
/// blocks. Never fails: a page with nothing readable yields an empty
/// vector.
pub fn extract(doc: &Html) -> Vec<ContentBlock> {
    let root = score::select_content_root(doc);
    blocks::linearize(root)
}
