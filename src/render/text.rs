//! Plain text rendering for assembled blocks.

use crate::error::Result;
use crate::layout::LINE_BREAK;
use crate::model::Block;

use super::RenderOptions;

/// Convert blocks to plain text.
///
/// Suppressed blocks never reach plain text output.
pub fn to_text(blocks: &[Block], _options: &RenderOptions) -> Result<String> {
    let output = blocks
        .iter()
        .filter(|block| !block.is_suppressed())
        .map(|block| block.plain_text().replace(LINE_BREAK, " "))
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(output.trim().to_string())
}
