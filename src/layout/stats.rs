//! Document-wide typographic statistics.
//!
//! Every constant is the winner of a frequency count over the fragment
//! population. Candidates are ranked by `(count, value)` so that ties are
//! always broken the same way and repeated runs agree.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, log_enabled, warn, Level};
use serde::Serialize;

use super::LayoutOptions;
use crate::error::Result;
use crate::model::{Font, FontId, FragmentOrder, Page, Parity, SourceDocument, TextFragment};

/// An inferred measurement, or the marker that nothing could be inferred.
///
/// `NotFound` never matches a real coordinate: [`Measure::matches`] is
/// always false for it and arithmetic through [`Measure::get`] short-circuits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Measure {
    /// A measured value in points
    Found(i32),
    /// Nothing to measure
    #[default]
    NotFound,
}

impl Measure {
    /// The value, if one was found.
    pub fn get(self) -> Option<i32> {
        match self {
            Measure::Found(v) => Some(v),
            Measure::NotFound => None,
        }
    }

    /// Whether a value was found.
    pub fn is_found(self) -> bool {
        matches!(self, Measure::Found(_))
    }

    /// Whether this measure equals `value`. Always false for `NotFound`.
    pub fn matches(self, value: i32) -> bool {
        matches!(self, Measure::Found(v) if v == value)
    }
}

impl From<Option<i32>> for Measure {
    fn from(value: Option<i32>) -> Self {
        value.map_or(Measure::NotFound, Measure::Found)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Found(v) => write!(f, "{}", v),
            Measure::NotFound => f.write_str("not found"),
        }
    }
}

/// Margin and first-line indent for one page parity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParityLayout {
    /// Left edge of continuation lines
    pub margin: Measure,
    /// Left edge of paragraph-opening lines
    pub indent: Measure,
}

/// Typographic constants inferred once per document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayoutStatistics {
    /// Most frequent fragment height
    pub body_height: Measure,
    /// Font behind the most frequent font id
    pub body_font: Option<Font>,
    /// Most frequent positive distance between consecutive fragment tops
    pub body_leading: Measure,
    /// Margin and indent on odd pages
    pub odd: ParityLayout,
    /// Margin and indent on even pages
    pub even: ParityLayout,
    /// Tolerated horizontal offset between odd and even pages
    pub horiz_leeway: Measure,
    /// Minimum width of a "full" paragraph line
    pub text_width_threshold: Measure,
}

impl LayoutStatistics {
    /// Statistics of a document with no fragments: nothing is found.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Margin and indent for pages of the given parity.
    pub fn parity(&self, parity: Parity) -> ParityLayout {
        match parity {
            Parity::Odd => self.odd,
            Parity::Even => self.even,
        }
    }
}

/// Infers [`LayoutStatistics`] from a document.
pub struct LayoutEstimator<'a> {
    doc: &'a SourceDocument,
    options: &'a LayoutOptions,
}

impl<'a> LayoutEstimator<'a> {
    /// Create an estimator over `doc`.
    pub fn new(doc: &'a SourceDocument, options: &'a LayoutOptions) -> Self {
        Self { doc, options }
    }

    /// Run every frequency count and assemble the statistics.
    pub fn estimate(&self) -> Result<LayoutStatistics> {
        let overrides = &self.options.overrides;

        let body_height = self.most_frequent("height", |f| f.height);
        let body_font = match self.most_frequent_font() {
            Some(id) => {
                let page = self.doc.fragments().find(|f| f.font == id).map_or(0, |f| f.page);
                Some(self.doc.fonts.resolve(&id, page)?.clone())
            }
            None => None,
        };

        let body_leading = match overrides.leading() {
            Some(v) => Measure::Found(v),
            None => self.body_leading(),
        };

        let odd = self.margin_and_indent(Parity::Odd);
        let even = self.margin_and_indent(Parity::Even);

        let horiz_leeway = match overrides.horiz_leeway() {
            Some(v) => Measure::Found(v),
            None => leeway_between(odd.margin, even.margin),
        };

        let text_width_threshold = self.text_width_threshold();

        let stats = LayoutStatistics {
            body_height,
            body_font,
            body_leading,
            odd,
            even,
            horiz_leeway,
            text_width_threshold,
        };
        self.log_summary(&stats);
        Ok(stats)
    }

    fn pages(&self, parity: Option<Parity>) -> impl Iterator<Item = &'a Page> {
        self.doc
            .pages
            .iter()
            .filter(move |p| parity.map_or(true, |want| p.parity() == want))
    }

    fn values<T, F>(&self, parity: Option<Parity>, attr: F) -> Vec<T>
    where
        F: Fn(&'a TextFragment) -> T,
    {
        self.pages(parity)
            .flat_map(|p| p.fragments.iter())
            .map(attr)
            .collect()
    }

    fn most_frequent<F>(&self, name: &str, attr: F) -> Measure
    where
        F: Fn(&'a TextFragment) -> i32,
    {
        let ranked = rank(self.values(None, attr));
        self.log_table(name, "", &ranked);
        top_n(&ranked, 1).first().copied().into()
    }

    fn most_frequent_font(&self) -> Option<FontId> {
        let ranked = rank(self.values(None, |f| f.font.clone()));
        self.log_table("font", "", &ranked);
        top_n(&ranked, 1).into_iter().next()
    }

    /// Most frequent positive top-to-top delta between consecutive
    /// fragments of the same page.
    fn body_leading(&self) -> Measure {
        let order: FragmentOrder = self.options.fragment_order;
        let deltas: Vec<i32> = self
            .doc
            .pages
            .iter()
            .flat_map(|page| {
                let fragments = page.ordered(order);
                fragments
                    .windows(2)
                    .map(|w| w[1].top - w[0].top)
                    .filter(|d| *d > 0)
                    .collect::<Vec<_>>()
            })
            .collect();
        let ranked = rank(deltas);
        self.log_table("leading", "", &ranked);
        top_n(&ranked, 1).first().copied().into()
    }

    /// The two most frequent left offsets, smaller one as margin.
    fn margin_and_indent(&self, parity: Parity) -> ParityLayout {
        let overrides = &self.options.overrides;
        let title = match parity {
            Parity::Odd => " (odd pages)",
            Parity::Even => " (even pages)",
        };
        let ranked = rank(self.values(Some(parity), |f| f.left));
        self.log_table("left", title, &ranked);

        let mut xs = top_n(&ranked, 2);
        xs.sort_unstable();
        let (mut margin, mut indent) = match xs.as_slice() {
            [margin, indent] => (Measure::Found(*margin), Measure::Found(*indent)),
            [margin] => (Measure::Found(*margin), Measure::NotFound),
            _ => (Measure::NotFound, Measure::NotFound),
        };

        if let Some(v) = overrides.left_margin() {
            margin = Measure::Found(v);
        }
        if let Some(v) = overrides.indent() {
            indent = Measure::Found(v);
        }

        if let (Some(m), Some(i)) = (margin.get(), indent.get()) {
            if m == i {
                warn!(
                    "Indent equals left margin ({}) on {:?} pages, disabling indent detection",
                    m, parity
                );
                indent = Measure::NotFound;
            }
        }
        ParityLayout { margin, indent }
    }

    /// 80% of the widest of the three most frequent widths, truncated.
    fn text_width_threshold(&self) -> Measure {
        let ranked = rank(self.values(None, |f| f.width));
        self.log_table("width", "", &ranked);
        top_n(&ranked, 3)
            .into_iter()
            .max()
            .map(|w| (i64::from(w) * 8 / 10) as i32)
            .into()
    }

    fn log_table<T: fmt::Display>(&self, attr: &str, extratitle: &str, ranked: &[(usize, T)]) {
        if !self.options.debug || !log_enabled!(Level::Debug) {
            return;
        }
        debug!("Top 5 most frequent values of {:?}:{}", attr, extratitle);
        let Some((max, _)) = ranked.last() else {
            return;
        };
        for (count, value) in ranked.iter().rev().take(5).rev() {
            let bar = "*".repeat(30 * count / max);
            debug!("  {:6} chunks have value {:<6} {}", count, value, bar);
        }
    }

    fn log_summary(&self, stats: &LayoutStatistics) {
        debug!(
            "Guessing left margin = {} (odd pages), {} (even pages)",
            stats.odd.margin, stats.even.margin
        );
        debug!(
            "Guessing indent = {} (odd pages), {} (even pages)",
            stats.odd.indent, stats.even.indent
        );
        debug!("Guessing horizontal leeway = {}", stats.horiz_leeway);
        debug!("Guessing line leading = {}", stats.body_leading);
        debug!(
            "Guessing minimum paragraph line width = {}",
            stats.text_width_threshold
        );
        if !stats.odd.margin.is_found() && !stats.even.margin.is_found() && !self.doc.is_empty() {
            warn!("No left margin detected, paragraphs will not be joined");
        }
    }
}

/// Estimate layout statistics for a document.
pub fn estimate(doc: &SourceDocument, options: &LayoutOptions) -> Result<LayoutStatistics> {
    LayoutEstimator::new(doc, options).estimate()
}

/// Margin difference between page parities.
///
/// A document with pages of only one parity shows no binding offset, so
/// the leeway is zero rather than unknown.
fn leeway_between(odd: Measure, even: Measure) -> Measure {
    match (odd.get(), even.get()) {
        (Some(o), Some(e)) => Measure::Found((e - o).abs()),
        (Some(_), None) | (None, Some(_)) => Measure::Found(0),
        (None, None) => Measure::NotFound,
    }
}

/// Count occurrences and sort ascending by `(count, value)`.
fn rank<T: Ord>(values: Vec<T>) -> Vec<(usize, T)> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    let mut ranked: Vec<(usize, T)> = counts.into_iter().map(|(v, c)| (c, v)).collect();
    ranked.sort();
    ranked
}

/// The `n` most frequent values, least frequent of them first.
fn top_n<T: Clone>(ranked: &[(usize, T)], n: usize) -> Vec<T> {
    let start = ranked.len().saturating_sub(n);
    ranked[start..].iter().map(|(_, v)| v.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutOverrides;

    fn fragment(page: u32, top: i32, left: i32, width: i32) -> TextFragment {
        TextFragment::new(page, top, left, width, 13, FontId::new("0"), "text")
    }

    fn doc_with(pages: Vec<Page>) -> SourceDocument {
        let mut doc = SourceDocument::new();
        doc.fonts
            .declare(FontId::new("0"), Font::new(12, "Times", "#000000"));
        for page in pages {
            doc.add_page(page);
        }
        doc
    }

    fn page(number: u32, rows: &[(i32, i32, i32)]) -> Page {
        let mut page = Page::new(number);
        for &(top, left, width) in rows {
            page.add_fragment(fragment(number, top, left, width));
        }
        page
    }

    #[test]
    fn test_rank_breaks_ties_by_value() {
        let ranked = rank(vec![5, 3, 5, 3, 9]);
        assert_eq!(ranked, vec![(1, 9), (2, 3), (2, 5)]);
        assert_eq!(top_n(&ranked, 1), vec![5]);
        assert_eq!(top_n(&ranked, 2), vec![3, 5]);
        assert_eq!(top_n(&ranked, 10), vec![9, 3, 5]);
    }

    #[test]
    fn test_empty_document_has_nothing() {
        let doc = SourceDocument::new();
        let stats = estimate(&doc, &LayoutOptions::default()).unwrap();
        assert_eq!(stats, LayoutStatistics::empty());
        assert!(!stats.odd.margin.matches(0));
        assert!(!stats.body_height.matches(0));
    }

    #[test]
    fn test_margin_indent_and_threshold() {
        let doc = doc_with(vec![
            page(
                1,
                &[
                    (100, 100, 360),
                    (114, 60, 400),
                    (128, 60, 400),
                    (142, 60, 210),
                    (156, 100, 360),
                    (170, 60, 400),
                ],
            ),
            page(2, &[(100, 70, 400), (114, 70, 400), (128, 110, 360)]),
        ]);
        let stats = estimate(&doc, &LayoutOptions::default()).unwrap();

        assert_eq!(stats.odd.margin, Measure::Found(60));
        assert_eq!(stats.odd.indent, Measure::Found(100));
        assert_eq!(stats.even.margin, Measure::Found(70));
        assert_eq!(stats.even.indent, Measure::Found(110));
        assert_eq!(stats.horiz_leeway, Measure::Found(10));
        assert_eq!(stats.body_leading, Measure::Found(14));
        assert_eq!(stats.body_height, Measure::Found(13));
        // widths 400 (5x), 360 (3x), 210 (1x): max 400 * 0.8
        assert_eq!(stats.text_width_threshold, Measure::Found(320));
        assert_eq!(
            stats.body_font,
            Some(Font::new(12, "Times", "#000000"))
        );
    }

    #[test]
    fn test_threshold_truncates() {
        let doc = doc_with(vec![page(1, &[(100, 60, 401), (114, 60, 401)])]);
        let stats = estimate(&doc, &LayoutOptions::default()).unwrap();
        // 401 * 8 / 10 = 320.8
        assert_eq!(stats.text_width_threshold, Measure::Found(320));
    }

    #[test]
    fn test_threshold_of_oversized_width() {
        let doc = doc_with(vec![page(1, &[(100, 60, i32::MAX), (114, 60, i32::MAX)])]);
        let stats = estimate(&doc, &LayoutOptions::default()).unwrap();
        assert_eq!(
            stats.text_width_threshold,
            Measure::Found((i64::from(i32::MAX) * 8 / 10) as i32)
        );
        assert!(crate::layout::assemble(&doc, &stats, &LayoutOptions::default()).is_ok());
    }

    #[test]
    fn test_single_left_offset_has_no_indent() {
        let doc = doc_with(vec![page(1, &[(100, 60, 400), (114, 60, 400)])]);
        let stats = estimate(&doc, &LayoutOptions::default()).unwrap();
        assert_eq!(stats.odd.margin, Measure::Found(60));
        assert_eq!(stats.odd.indent, Measure::NotFound);
        assert_eq!(stats.even.margin, Measure::NotFound);
        assert_eq!(stats.horiz_leeway, Measure::Found(0));
    }

    #[test]
    fn test_overrides_replace_inferred_values() {
        let doc = doc_with(vec![page(
            1,
            &[(100, 100, 360), (114, 60, 400), (128, 60, 400)],
        )]);
        let options = LayoutOptions::new().with_overrides(LayoutOverrides {
            left_margin: Some(50),
            indent: Some(80),
            horiz_leeway: Some(4),
            leading: Some(15),
        });
        let stats = estimate(&doc, &options).unwrap();
        assert_eq!(stats.odd.margin, Measure::Found(50));
        assert_eq!(stats.odd.indent, Measure::Found(80));
        assert_eq!(stats.horiz_leeway, Measure::Found(4));
        assert_eq!(stats.body_leading, Measure::Found(15));
    }

    #[test]
    fn test_indent_equal_to_margin_is_disabled() {
        let doc = doc_with(vec![page(
            1,
            &[(100, 100, 360), (114, 60, 400), (128, 60, 400)],
        )]);
        let options = LayoutOptions::new().with_overrides(LayoutOverrides {
            indent: Some(60),
            ..Default::default()
        });
        let stats = estimate(&doc, &options).unwrap();
        assert_eq!(stats.odd.margin, Measure::Found(60));
        assert_eq!(stats.odd.indent, Measure::NotFound);
    }

    #[test]
    fn test_leading_is_per_page() {
        // The jump from page 1 bottom to page 2 top never counts.
        let doc = doc_with(vec![
            page(1, &[(700, 60, 400), (714, 60, 400), (728, 60, 400)]),
            page(2, &[(100, 60, 400), (114, 60, 400)]),
        ]);
        let stats = estimate(&doc, &LayoutOptions::default()).unwrap();
        assert_eq!(stats.body_leading, Measure::Found(14));
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let doc = doc_with(vec![page(
            1,
            &[(100, 100, 360), (114, 60, 400), (128, 80, 300), (142, 90, 250)],
        )]);
        let first = estimate(&doc, &LayoutOptions::default()).unwrap();
        for _ in 0..10 {
            assert_eq!(estimate(&doc, &LayoutOptions::default()).unwrap(), first);
        }
    }
}
