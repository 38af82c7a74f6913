//! Output blocks.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Markup;

/// Why a block was kept out of the visible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuppressReason {
    /// Page falls within the skipped initial pages
    InitialPages,
    /// Fragment sits above the header cutoff
    Header,
    /// Fragment sits below the footer cutoff
    Footer,
}

impl fmt::Display for SuppressReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            SuppressReason::InitialPages => "INITIAL PAGES",
            SuppressReason::Header => "HEADER",
            SuppressReason::Footer => "FOOTER",
        };
        f.write_str(tag)
    }
}

/// A reconstructed unit of document structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A body paragraph
    Paragraph {
        /// Accumulated content
        markup: Markup,
    },

    /// A heading
    Heading {
        /// Heading level (1 = title, 2 = subtitle and detected headings)
        level: u8,
        /// Accumulated content
        markup: Markup,
    },

    /// What a suppressed fragment would have produced
    Suppressed {
        /// Suppression reason
        reason: SuppressReason,
        /// The block that was suppressed
        block: Box<Block>,
    },
}

impl Block {
    /// Create a paragraph.
    pub fn paragraph(markup: Markup) -> Self {
        Block::Paragraph { markup }
    }

    /// Create a heading.
    pub fn heading(level: u8, markup: Markup) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            markup,
        }
    }

    /// Wrap a block as suppressed.
    pub fn suppressed(reason: SuppressReason, block: Block) -> Self {
        Block::Suppressed {
            reason,
            block: Box::new(block),
        }
    }

    /// Content of the block (of the wrapped block when suppressed).
    pub fn markup(&self) -> &Markup {
        match self {
            Block::Paragraph { markup } | Block::Heading { markup, .. } => markup,
            Block::Suppressed { block, .. } => block.markup(),
        }
    }

    /// Mutable content of the block.
    pub fn markup_mut(&mut self) -> &mut Markup {
        match self {
            Block::Paragraph { markup } | Block::Heading { markup, .. } => markup,
            Block::Suppressed { block, .. } => block.markup_mut(),
        }
    }

    /// Plain text of the block.
    pub fn plain_text(&self) -> String {
        self.markup().plain_text()
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph { .. })
    }

    /// Check if this block was suppressed.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Block::Suppressed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppressed_exposes_inner_markup() {
        let block = Block::suppressed(
            SuppressReason::Header,
            Block::paragraph(Markup::text("Chapter 3")),
        );
        assert!(block.is_suppressed());
        assert_eq!(block.plain_text(), "Chapter 3");
    }

    #[test]
    fn test_heading_level_clamped() {
        let block = Block::heading(9, Markup::text("x"));
        assert!(matches!(block, Block::Heading { level: 6, .. }));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(SuppressReason::InitialPages.to_string(), "INITIAL PAGES");
        assert_eq!(SuppressReason::Footer.to_string(), "FOOTER");
    }
}
