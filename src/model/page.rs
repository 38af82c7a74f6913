//! Page-level types.

use serde::{Deserialize, Serialize};

use super::TextFragment;

/// Page parity, used to select per-parity margin and indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    /// Odd-numbered pages (usually right-hand pages)
    Odd,
    /// Even-numbered pages
    Even,
}

impl Parity {
    /// Parity of a page number.
    pub fn of(number: u32) -> Self {
        if number % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }
}

/// Order in which a page's fragments are consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentOrder {
    /// Line by line from the top, each line left to right
    #[default]
    TopLeft,
    /// As the extractor emitted them
    Source,
}

/// A single page of positioned fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Fragments in source order
    pub fragments: Vec<TextFragment>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            fragments: Vec::new(),
        }
    }

    /// Add a fragment in source order.
    pub fn add_fragment(&mut self, fragment: TextFragment) {
        self.fragments.push(fragment);
    }

    /// Parity of this page.
    pub fn parity(&self) -> Parity {
        Parity::of(self.number)
    }

    /// Fragments in the requested consumption order.
    ///
    /// `TopLeft` sorts by `(top, left)`, then pulls raised or lowered
    /// fragments (superscripts, subscripts) into the line they sit on, so a
    /// footnote mark is read between its neighbours rather than after the
    /// whole line. Sorting is stable, so fragments sharing `(top, left)`
    /// keep their source order.
    pub fn ordered(&self, order: FragmentOrder) -> Vec<&TextFragment> {
        let mut fragments: Vec<&TextFragment> = self.fragments.iter().collect();
        if order == FragmentOrder::Source {
            return fragments;
        }
        fragments.sort_by_key(|f| (f.top, f.left));

        let mut lines: Vec<Line<'_>> = Vec::new();
        for fragment in fragments {
            match lines.last_mut() {
                Some(line) if line.accepts(fragment) => line.push(fragment),
                _ => lines.push(Line::new(fragment)),
            }
        }
        lines
            .into_iter()
            .flat_map(|mut line| {
                line.fragments.sort_by_key(|f| f.left);
                line.fragments
            })
            .collect()
    }

    /// Check if the page has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

/// One visual line while ordering a page.
///
/// The line's height is the smallest height among the fragments sharing its
/// top. A later fragment belongs to the line when it is shorter than that and
/// starts above the line's bottom edge.
struct Line<'a> {
    top: i32,
    height: i32,
    bottom: i32,
    fragments: Vec<&'a TextFragment>,
}

impl<'a> Line<'a> {
    fn new(fragment: &'a TextFragment) -> Self {
        Self {
            top: fragment.top,
            height: fragment.height,
            bottom: fragment.bottom(),
            fragments: vec![fragment],
        }
    }

    fn accepts(&self, fragment: &TextFragment) -> bool {
        fragment.top == self.top || (fragment.height < self.height && fragment.top < self.bottom)
    }

    fn push(&mut self, fragment: &'a TextFragment) {
        if fragment.top == self.top {
            self.height = self.height.min(fragment.height);
        }
        self.bottom = self.bottom.min(fragment.bottom());
        self.fragments.push(fragment);
    }
}
