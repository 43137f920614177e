//! Reshaping of raw-mode query results.

use ragtool_engine::{BLOCK_SEPARATOR, SOURCE_MARKER};

/// Remove citation lines from a raw-mode result.
///
/// The result is split on blank lines. A block starting with `[Source:` loses
/// everything up to and including its first line break; other blocks are
/// kept as they are. A cited block with no line break has no content and is
/// dropped. The remaining blocks are re-joined with a blank line.
pub fn strip_source_citations(result: &str) -> String {
    result
        .split(BLOCK_SEPARATOR)
        .filter_map(|block| {
            if block.starts_with(SOURCE_MARKER) {
                block.find('\n').map(|newline| &block[newline + 1..])
            } else {
                Some(block)
            }
        })
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_every_citation() {
        let raw = "[Source: a.pdf]\ncontent A\n\n[Source: b.pdf]\ncontent B";
        assert_eq!(strip_source_citations(raw), "content A\n\ncontent B");
    }

    #[test]
    fn test_uncited_result_unchanged() {
        let raw = "first paragraph\n\nsecond paragraph\nwith two lines";
        assert_eq!(strip_source_citations(raw), raw);
    }

    #[test]
    fn test_mixed_blocks() {
        let raw = "preamble\n\n[Source: a.pdf]\nline 1\nline 2\n\ntrailer";
        assert_eq!(
            strip_source_citations(raw),
            "preamble\n\nline 1\nline 2\n\ntrailer"
        );
    }

    #[test]
    fn test_citation_without_line_break_is_dropped() {
        let raw = "[Source: a.pdf]\ncontent A\n\n[Source: orphan.pdf]\n\n[Source: b.pdf]\ncontent B";
        // "[Source: orphan.pdf]" ends its block with no newline
        assert_eq!(strip_source_citations(raw), "content A\n\ncontent B");
    }

    #[test]
    fn test_marker_must_start_block() {
        let raw = "see [Source: a.pdf]\nkept";
        assert_eq!(strip_source_citations(raw), raw);
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(strip_source_citations(""), "");
    }
}
