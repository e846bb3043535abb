//! Size policy: join content blocks and apply the caller's character
//! budget without splitting a word.

use crate::extractor::{BlockRole, ContentBlock};

/// Join blocks with a blank-line separator, then truncate to `max_chars`
/// characters if set. Returns the text and whether it was truncated.
pub fn apply(blocks: &[ContentBlock], max_chars: Option<usize>) -> (String, bool) {
    let text = join_blocks(blocks);
    match max_chars {
        Some(limit) => truncate_at_word_boundary(text, limit),
        None => (text, false),
    }
}

fn join_blocks(blocks: &[ContentBlock]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &ContentBlock) -> String {
    match block.role {
        BlockRole::ListItem => format!("- {}", block.text),
        BlockRole::Heading | BlockRole::Paragraph => block.text.clone(),
    }
}

/// Cut at the nearest whitespace boundary at or before `limit` chars.
/// A prefix with no whitespace at all is cut hard at the limit. Counts
/// are characters, not bytes.
fn truncate_at_word_boundary(text: String, limit: usize) -> (String, bool) {
    let Some((byte_limit, next_char)) = text.char_indices().nth(limit) else {
        // The whole text fits within the budget
        return (text, false);
    };

    let prefix = &text[..byte_limit];

    if next_char.is_whitespace() || prefix.ends_with(char::is_whitespace) {
        // Already at a word boundary
        return (prefix.trim_end().to_string(), true);
    }

    match prefix.rfind(char::is_whitespace) {
        Some(idx) => (prefix[..idx].trim_end().to_string(), true),
        // No whitespace anywhere in the prefix: hard cut
        None => (prefix.to_string(), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> ContentBlock {
        ContentBlock {
            role: BlockRole::Paragraph,
            text: text.to_string(),
        }
    }

    #[test]
    fn joins_blocks_with_blank_line() {
        let blocks = vec![block("First."), block("Second.")];
        let (text, truncated) = apply(&blocks, None);
        assert_eq!(text, "First.\n\nSecond.");
        assert!(!truncated);
    }

    #[test]
    fn list_items_render_as_bullets() {
        let blocks = vec![
            block("Intro."),
            ContentBlock {
                role: BlockRole::ListItem,
                text: "point one".to_string(),
            },
        ];
        let (text, _) = apply(&blocks, None);
        assert_eq!(text, "Intro.\n\n- point one");
    }

    #[test]
    fn no_truncation_when_under_budget() {
        let (text, truncated) = apply(&[block("short text")], Some(100));
        assert_eq!(text, "short text");
        assert!(!truncated);
    }

    #[test]
    fn exact_budget_is_not_truncated() {
        let (text, truncated) = apply(&[block("abcde")], Some(5));
        assert_eq!(text, "abcde");
        assert!(!truncated);
    }

    #[test]
    fn cuts_at_preceding_word_boundary() {
        // Budget of 9 lands mid-"jumps"
        let (text, truncated) = apply(&[block("the fox jumps far")], Some(9));
        assert_eq!(text, "the fox");
        assert!(truncated);
        assert!(text.chars().count() <= 9);
    }

    #[test]
    fn budget_landing_on_boundary_keeps_whole_word() {
        let (text, truncated) = apply(&[block("the fox jumps")], Some(7));
        assert_eq!(text, "the fox");
        assert!(truncated);
    }

    #[test]
    fn whitespace_free_prefix_cuts_hard() {
        let (text, truncated) = apply(&[block("supercalifragilistic")], Some(5));
        assert_eq!(text, "super");
        assert!(truncated);
    }

    #[test]
    fn never_ends_mid_word() {
        let source = "alpha beta gamma delta epsilon zeta";
        for limit in 1..=source.len() {
            let (text, truncated) = apply(&[block(source)], Some(limit));
            assert!(text.chars().count() <= limit);
            if truncated && text.contains(' ') {
                // Every truncated result must end on a full word
                assert!(source.split_whitespace().any(|w| text.ends_with(w)));
            }
        }
    }

    #[test]
    fn counts_chars_not_bytes() {
        // Each char is multi-byte
        let (text, truncated) = apply(&[block("日本語 テキスト")], Some(3));
        assert_eq!(text, "日本語");
        assert!(truncated);
    }
}
