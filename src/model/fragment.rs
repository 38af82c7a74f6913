//! Positioned text fragments.

use serde::{Deserialize, Serialize};

use super::{FontId, Markup};

/// One positioned run of text on a page.
///
/// Coordinates are integer points with the origin at the top-left corner of
/// the page and `top` increasing downwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Page number (1-indexed)
    pub page: u32,
    /// Top edge
    pub top: i32,
    /// Left edge
    pub left: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
    /// Referenced font
    pub font: FontId,
    /// Literal text and inline bold/italic markup
    pub markup: Markup,
}

impl TextFragment {
    /// Create a fragment holding plain text.
    pub fn new(
        page: u32,
        top: i32,
        left: i32,
        width: i32,
        height: i32,
        font: FontId,
        text: impl Into<String>,
    ) -> Self {
        Self {
            page,
            top,
            left,
            width,
            height,
            font,
            markup: Markup::text(text),
        }
    }

    /// Replace the fragment's markup.
    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    /// Text directly inside the fragment, before any inline span.
    pub fn text(&self) -> &str {
        self.markup.leading_text()
    }

    /// Right edge.
    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    /// Bottom edge.
    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }
}
