//! Deciding whether a fragment continues the block before it.

use super::{LayoutStatistics, ParityLayout};
use crate::model::{Font, Parity, TextFragment};

/// Extra vertical room allowed on top of the body leading, for the jitter
/// superscripts introduce into line positions.
pub const LEADING_LEEWAY: i32 = 1;

/// Character that joins two visual lines merged into one block.
pub const LINE_BREAK: char = '\n';

/// How a continued fragment is joined to the text before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    /// A single line break, rendered as collapsible whitespace
    LineBreak,
    /// Nothing: the two pieces form one word
    Direct,
}

impl Joiner {
    /// The separator text.
    pub fn as_str(self) -> &'static str {
        match self {
            Joiner::LineBreak => "\n",
            Joiner::Direct => "",
        }
    }
}

/// Relationship between a fragment and the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Start a new block
    NewBlock,
    /// Append to the open block
    Continue(Joiner),
    /// Append to the open block inside a new superscript span
    OpenSuperscript,
    /// Leave the superscript span and keep appending
    CloseSuperscript,
}

/// A fragment paired with its resolved font.
#[derive(Debug, Clone, Copy)]
pub struct Placed<'a> {
    /// The fragment
    pub fragment: &'a TextFragment,
    /// Its font
    pub font: &'a Font,
}

impl<'a> Placed<'a> {
    /// Pair a fragment with its font.
    pub fn new(fragment: &'a TextFragment, font: &'a Font) -> Self {
        Self { fragment, font }
    }
}

/// Pure classifier over pairs of consecutive visible fragments.
pub struct ContinuationClassifier<'a> {
    stats: &'a LayoutStatistics,
}

impl<'a> ContinuationClassifier<'a> {
    /// Create a classifier over inferred statistics.
    pub fn new(stats: &'a LayoutStatistics) -> Self {
        Self { stats }
    }

    /// Classify `curr` against `prev`.
    ///
    /// Rules are tried in order: drop cap, same baseline, superscript open,
    /// superscript close, regular line continuation. `was_superscript` is
    /// true when `prev` itself opened a superscript span.
    pub fn classify(
        &self,
        prev: Placed<'_>,
        curr: Placed<'_>,
        parity: Parity,
        was_superscript: bool,
    ) -> Continuation {
        let (p, c) = (prev.fragment, curr.fragment);
        let gap = c.top - p.top;

        if is_drop_cap(p, c) {
            return Continuation::Continue(Joiner::Direct);
        }
        if gap == 0 {
            return Continuation::Continue(Joiner::LineBreak);
        }
        if self.opens_superscript(p, c, gap) {
            return Continuation::OpenSuperscript;
        }
        if was_superscript && gap < 0 && c.height > p.height {
            return Continuation::CloseSuperscript;
        }
        if self.continues_line(prev, curr, self.stats.parity(parity), gap) {
            return Continuation::Continue(Joiner::LineBreak);
        }
        Continuation::NewBlock
    }

    fn opens_superscript(&self, prev: &TextFragment, curr: &TextFragment, gap: i32) -> bool {
        self.stats
            .body_leading
            .get()
            .is_some_and(|leading| gap < leading)
            && curr.height < prev.height
    }

    /// A plain next line of the same paragraph: not indented, not shifted
    /// right, following a full-width line at normal leading in the same font.
    fn continues_line(
        &self,
        prev: Placed<'_>,
        curr: Placed<'_>,
        layout: ParityLayout,
        gap: i32,
    ) -> bool {
        let (p, c) = (prev.fragment, curr.fragment);
        let stats = self.stats;

        if layout.indent.matches(c.left) {
            return false;
        }
        let Some(leeway) = stats.horiz_leeway.get() else {
            return false;
        };
        if c.left > p.left + leeway {
            return false;
        }
        let full_line = match (layout.margin.get(), stats.text_width_threshold.get()) {
            (Some(margin), Some(threshold)) => {
                p.right() >= margin.saturating_add(leeway).saturating_add(threshold)
            }
            _ => false,
        };
        if !full_line {
            return false;
        }
        let close_enough = stats
            .body_leading
            .get()
            .is_some_and(|leading| gap <= leading + LEADING_LEEWAY);

        close_enough && prev.font == curr.font
    }
}

/// An oversized one- or two-letter initial beside the first line of a paragraph.
///
/// The initial must be taller than the next fragment, end within half its
/// own width of where the next fragment starts, and be offset vertically
/// by more than a quarter of its height at the top or the bottom edge.
pub fn is_drop_cap(prev: &TextFragment, curr: &TextFragment) -> bool {
    let initial = prev.text();
    if initial.is_empty() || curr.text().is_empty() {
        return false;
    }
    if !(1..=2).contains(&initial.chars().count()) {
        return false;
    }
    if prev.height <= curr.height {
        return false;
    }
    let horiz_gap = prev.width / 2;
    let vert_gap = prev.height / 4;
    if (prev.right() - curr.left).abs() > horiz_gap {
        return false;
    }
    (prev.top - curr.top).abs() > vert_gap || (prev.bottom() - curr.bottom()).abs() > vert_gap
}
