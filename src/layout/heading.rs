//! Heading detection for fragments that open a new block.

use super::LayoutStatistics;
use crate::model::{Font, TextFragment};

/// Decide whether a block-opening fragment is a heading.
///
/// A fragment whose markup reduces to a single bold span is a heading when
/// it is set in a non-body font at least as tall as body text and the bold
/// text has a letter in it. Otherwise only bare numerals set taller than
/// body text in a non-body font count, which catches chapter numbers.
pub fn is_heading(fragment: &TextFragment, font: &Font, stats: &LayoutStatistics) -> bool {
    let distinct_font = stats.body_font.as_ref() != Some(font);

    match fragment.markup.sole_bold() {
        Some(bold) => {
            let text = bold.leading_text();
            distinct_font
                && stats
                    .body_height
                    .get()
                    .is_some_and(|h| fragment.height >= h)
                && !text.is_empty()
                && text.chars().any(char::is_alphabetic)
        }
        None => {
            let text = fragment.text();
            distinct_font
                && stats
                    .body_height
                    .get()
                    .is_some_and(|h| fragment.height > h)
                && !text.is_empty()
                && text.chars().all(|c| c.is_ascii_digit())
        }
    }
}
