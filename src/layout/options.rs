//! Layout inference options and configuration.

use crate::model::{FragmentOrder, SuppressReason};

/// User-supplied replacements for inferred layout constants.
///
/// Negative values are ignored, so `-1` can be used to mean "infer".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutOverrides {
    /// Left margin of body lines, for both page parities
    pub left_margin: Option<i32>,

    /// First-line indent, for both page parities
    pub indent: Option<i32>,

    /// Horizontal tolerance between odd and even page margins
    pub horiz_leeway: Option<i32>,

    /// Distance between the tops of consecutive body lines
    pub leading: Option<i32>,
}

impl LayoutOverrides {
    pub(crate) fn left_margin(&self) -> Option<i32> {
        non_negative(self.left_margin)
    }

    pub(crate) fn indent(&self) -> Option<i32> {
        non_negative(self.indent)
    }

    pub(crate) fn horiz_leeway(&self) -> Option<i32> {
        non_negative(self.horiz_leeway)
    }

    pub(crate) fn leading(&self) -> Option<i32> {
        non_negative(self.leading)
    }
}

fn non_negative(value: Option<i32>) -> Option<i32> {
    value.filter(|v| *v >= 0)
}

/// Options controlling paragraph reconstruction.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Suppress text whose top is at or above this position
    pub header_pos: Option<i32>,

    /// Suppress text whose top is at or below this position
    pub footer_pos: Option<i32>,

    /// Suppress every fragment on the first N pages
    pub skip_initial_pages: u32,

    /// Replacements for inferred constants
    pub overrides: LayoutOverrides,

    /// Document title, emitted as a level 1 heading before the body
    pub title: Option<String>,

    /// Document subtitle, emitted as a level 2 heading before the body
    pub subtitle: Option<String>,

    /// Log the frequency tables behind every inferred constant
    pub debug: bool,

    /// Order in which each page's fragments are consumed
    pub fragment_order: FragmentOrder,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header cutoff. Non-positive values disable it.
    pub fn with_header_pos(mut self, pos: i32) -> Self {
        self.header_pos = Some(pos);
        self
    }

    /// Set the footer cutoff. Non-positive values disable it.
    pub fn with_footer_pos(mut self, pos: i32) -> Self {
        self.footer_pos = Some(pos);
        self
    }

    /// Skip the first `pages` pages.
    pub fn with_skip_initial_pages(mut self, pages: u32) -> Self {
        self.skip_initial_pages = pages;
        self
    }

    /// Set layout overrides.
    pub fn with_overrides(mut self, overrides: LayoutOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Enable or disable diagnostic frequency tables.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set fragment order.
    pub fn with_fragment_order(mut self, order: FragmentOrder) -> Self {
        self.fragment_order = order;
        self
    }

    /// Active header cutoff, if any.
    pub fn header_cutoff(&self) -> Option<i32> {
        self.header_pos.filter(|p| *p > 0)
    }

    /// Active footer cutoff, if any.
    pub fn footer_cutoff(&self) -> Option<i32> {
        self.footer_pos.filter(|p| *p > 0)
    }

    /// Decide whether a fragment at `top` on page `page_number` is hidden.
    pub fn suppression(&self, page_number: u32, top: i32) -> Option<SuppressReason> {
        if page_number <= self.skip_initial_pages {
            return Some(SuppressReason::InitialPages);
        }
        if self.header_cutoff().is_some_and(|h| top <= h) {
            return Some(SuppressReason::Header);
        }
        if self.footer_cutoff().is_some_and(|f| top >= f) {
            return Some(SuppressReason::Footer);
        }
        None
    }
}
