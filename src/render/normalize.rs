//! Text normalization applied to assembled blocks.

use regex::Regex;

use crate::layout::LINE_BREAK;
use crate::model::{Block, Markup};

/// Options for text normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Rejoin words hyphenated across a line join
    pub fix_hyphenation: bool,

    /// Expand typographic ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,
}

impl NormalizeOptions {
    /// Leave text untouched.
    pub fn none() -> Self {
        Self {
            fix_hyphenation: false,
            fix_ligatures: false,
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            fix_hyphenation: true,
            fix_ligatures: true,
        }
    }
}

/// Rewrites every text node of the block tree.
pub struct TextNormalizer {
    options: NormalizeOptions,
    hyphenation_regex: Regex,
    ligature_map: [(char, &'static str); 5],
}

impl TextNormalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        // Consecutive breaks collapse in one match.
        let pattern = format!(r"(?:-{})+(\p{{Ll}})", LINE_BREAK);
        Self {
            options,
            hyphenation_regex: Regex::new(&pattern).expect("hyphenation pattern is valid"),
            ligature_map: [
                ('\u{FB00}', "ff"),  // ﬀ
                ('\u{FB01}', "fi"),  // ﬁ
                ('\u{FB02}', "fl"),  // ﬂ
                ('\u{FB03}', "ffi"), // ﬃ
                ('\u{FB04}', "ffl"), // ﬄ
            ],
        }
    }

    /// Normalize a single string.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.fix_ligatures && result.contains(|c| ('\u{FB00}'..='\u{FB04}').contains(&c)) {
            for (ligature, replacement) in &self.ligature_map {
                result = result.replace(*ligature, replacement);
            }
        }

        // "exam-\nple" -> "example"
        if self.options.fix_hyphenation {
            result = self.hyphenation_regex.replace_all(&result, "$1").to_string();
        }

        result
    }

    /// Normalize every text node of a markup tree in place.
    pub fn normalize_markup(&self, markup: &mut Markup) {
        markup.for_each_text_mut(&mut |text| {
            *text = self.process(text);
        });
    }

    /// Normalize every block, suppressed ones included.
    pub fn normalize_blocks(&self, blocks: &mut [Block]) {
        for block in blocks {
            self.normalize_markup(block.markup_mut());
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Inline, SpanStyle};

    #[test]
    fn test_dehyphenation() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.process("exam-\nple"), "example");
        assert_eq!(normalizer.process("naïve co-\nöperation"), "naïve coöperation");
    }

    #[test]
    fn test_dehyphenation_keeps_real_hyphens() {
        let normalizer = TextNormalizer::default();
        // Capitalised continuation: a compound such as "Anglo-\nSaxon".
        assert_eq!(normalizer.process("Anglo-\nSaxon"), "Anglo-\nSaxon");
        // No line break: an ordinary hyphen.
        assert_eq!(normalizer.process("well-known"), "well-known");
        assert_eq!(normalizer.process("dash -\n 1"), "dash -\n 1");
    }

    #[test]
    fn test_ligature_expansion() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.process("\u{FB01}nd"), "find");
        assert_eq!(normalizer.process("ba\u{FB04}e"), "baffle");
        assert_eq!(
            normalizer.process("\u{FB00} \u{FB02} \u{FB03}"),
            "ff fl ffi"
        );
    }

    #[test]
    fn test_idempotent() {
        let normalizer = TextNormalizer::default();
        for input in ["exam-\nple", "re-\n-\nentry", "o\u{FB03}ce-\nholder", "plain"] {
            let once = normalizer.process(input);
            assert_eq!(normalizer.process(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_consecutive_breaks_collapse() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.process("re-\n-\nentry"), "reentry");
        assert_eq!(normalizer.process("a-\n-\n-\nb"), "ab");
    }

    #[test]
    fn test_options_disable_rewrites() {
        let normalizer = TextNormalizer::new(NormalizeOptions::none());
        assert_eq!(normalizer.process("\u{FB01}x-\ny"), "\u{FB01}x-\ny");
    }

    #[test]
    fn test_normalize_markup_reaches_nested_text() {
        let normalizer = TextNormalizer::default();
        let mut markup = Markup::from(vec![
            Inline::Text("con-\ntinued ".into()),
            Inline::span(SpanStyle::Italic, Markup::text("\u{FB02}ourish")),
        ]);
        normalizer.normalize_markup(&mut markup);
        assert_eq!(markup.plain_text(), "continued flourish");
    }

    #[test]
    fn test_normalize_blocks() {
        let normalizer = TextNormalizer::default();
        let mut blocks = vec![Block::paragraph(Markup::text("hyphen-\nated"))];
        normalizer.normalize_blocks(&mut blocks);
        assert_eq!(blocks[0].plain_text(), "hyphenated");
    }
}
