//! Counts over an assembled block sequence.

use serde::{Deserialize, Serialize};

use crate::model::Block;

/// Rendered content together with counts over its blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (HTML, Markdown, etc.)
    pub content: String,

    /// Block statistics
    pub stats: ConversionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ConversionStats) -> Self {
        Self { content, stats }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected over assembled blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of headings, title and subtitle included
    pub heading_count: u32,

    /// Number of suppressed blocks
    pub suppressed_count: u32,

    /// Approximate word count of visible text
    pub word_count: u32,

    /// Character count of visible text (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every block of a sequence.
    pub fn from_blocks(blocks: &[Block]) -> Self {
        let mut stats = Self::new();
        for block in blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Count one block.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph { .. } => self.paragraph_count += 1,
            Block::Heading { .. } => self.heading_count += 1,
            Block::Suppressed { .. } => {
                self.suppressed_count += 1;
                return;
            }
        }
        self.count_text(&block.plain_text());
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Number of blocks that reach the reader.
    pub fn visible_count(&self) -> u32 {
        self.paragraph_count + self.heading_count
    }
}
