//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{FontTable, Page, TextFragment};

/// A document as delivered by the layout extractor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Pages in document order
    pub pages: Vec<Page>,

    /// Fonts declared anywhere in the document
    pub fonts: FontTable,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Iterate over every fragment of every page, in source order.
    pub fn fragments(&self) -> impl Iterator<Item = &TextFragment> {
        self.pages.iter().flat_map(|p| p.fragments.iter())
    }

    /// Total number of fragments.
    pub fn fragment_count(&self) -> usize {
        self.pages.iter().map(|p| p.fragments.len()).sum()
    }

    /// Check that every fragment references a declared font.
    pub fn validate_fonts(&self) -> crate::Result<()> {
        for fragment in self.fragments() {
            self.fonts.resolve(&fragment.font, fragment.page)?;
        }
        Ok(())
    }

    /// Check if the document holds no fragments at all.
    pub fn is_empty(&self) -> bool {
        self.fragment_count() == 0
    }
}
