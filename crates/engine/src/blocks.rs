//! Layout of raw-mode query results.
//!
//! A raw result is a sequence of blocks separated by a blank line. Each block
//! cites its source on the first line:
//!
//! ```text
//! [Source: a.pdf]
//! content A
//!
//! [Source: b.pdf]
//! content B
//! ```

/// Prefix of a block's citation line.
pub const SOURCE_MARKER: &str = "[Source:";

/// Separator between result blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Format one cited block.
pub fn format_source_block(source: &str, content: &str) -> String {
    format!("{} {}]\n{}", SOURCE_MARKER, source, content)
}

/// Join blocks with [`BLOCK_SEPARATOR`].
pub fn join_blocks<I, S>(blocks: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    blocks
        .into_iter()
        .map(|b| b.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
