//! Block assembly: the second pass over the document.

use log::{debug, info};

use super::continuation::{Continuation, ContinuationClassifier, Joiner, Placed};
use super::{is_heading, LayoutOptions, LayoutStatistics};
use crate::error::Result;
use crate::model::{Block, Inline, Markup, SourceDocument, SpanStyle};

/// Walks fragments in reading order and groups them into blocks.
pub struct BlockAssembler<'a> {
    doc: &'a SourceDocument,
    stats: &'a LayoutStatistics,
    options: &'a LayoutOptions,
}

/// Mutable state carried from one visible fragment to the next.
#[derive(Default)]
struct AssemblyState<'a> {
    /// Index of the block later fragments may still extend
    open: Option<usize>,
    /// Last fragment that was not suppressed
    prev: Option<Placed<'a>>,
    /// Whether `prev` opened a superscript span
    in_superscript: bool,
}

impl<'a> BlockAssembler<'a> {
    /// Create an assembler.
    pub fn new(
        doc: &'a SourceDocument,
        stats: &'a LayoutStatistics,
        options: &'a LayoutOptions,
    ) -> Self {
        Self {
            doc,
            stats,
            options,
        }
    }

    /// Produce the ordered block sequence.
    pub fn assemble(&self) -> Result<Vec<Block>> {
        let classifier = ContinuationClassifier::new(self.stats);
        let mut blocks = self.preamble();
        let mut state = AssemblyState::default();
        let mut suppressed = 0usize;

        for page in &self.doc.pages {
            let parity = page.parity();
            for fragment in page.ordered(self.options.fragment_order) {
                let font = self.doc.fonts.resolve(&fragment.font, page.number)?;
                let curr = Placed::new(fragment, font);

                if let Some(reason) = self.options.suppression(page.number, fragment.top) {
                    blocks.push(Block::suppressed(reason, self.start_block(curr)));
                    suppressed += 1;
                    continue;
                }

                let decision = match (state.prev, state.open) {
                    (Some(prev), Some(_)) => {
                        classifier.classify(prev, curr, parity, state.in_superscript)
                    }
                    _ => Continuation::NewBlock,
                };

                match (decision, state.open) {
                    (Continuation::NewBlock, _) | (_, None) => {
                        blocks.push(self.start_block(curr));
                        state.open = Some(blocks.len() - 1);
                        state.in_superscript = false;
                    }
                    (Continuation::Continue(joiner), Some(open)) => {
                        append(blocks[open].markup_mut(), joiner, fragment.markup.clone());
                        state.in_superscript = false;
                    }
                    (Continuation::OpenSuperscript, Some(open)) => {
                        let target = blocks[open].markup_mut();
                        if !target.is_empty() {
                            target.push_text(Joiner::LineBreak.as_str());
                        }
                        target.push(Inline::span(SpanStyle::Superscript, fragment.markup.clone()));
                        state.in_superscript = true;
                    }
                    (Continuation::CloseSuperscript, Some(open)) => {
                        append(blocks[open].markup_mut(), Joiner::Direct, fragment.markup.clone());
                        state.in_superscript = false;
                    }
                }
                state.prev = Some(curr);
            }
        }

        info!(
            "Assembled {} blocks from {} fragments ({} suppressed)",
            blocks.len(),
            self.doc.fragment_count(),
            suppressed
        );
        Ok(blocks)
    }

    /// Title and subtitle headings placed ahead of the body.
    fn preamble(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        if let Some(title) = &self.options.title {
            blocks.push(Block::heading(1, Markup::text(title.as_str())));
        }
        if let Some(subtitle) = &self.options.subtitle {
            blocks.push(Block::heading(2, Markup::text(subtitle.as_str())));
        }
        blocks
    }

    fn start_block(&self, curr: Placed<'_>) -> Block {
        let markup = curr.fragment.markup.clone();
        if is_heading(curr.fragment, curr.font, self.stats) {
            debug!("Heading on page {}: {:?}", curr.fragment.page, markup.plain_text());
            Block::heading(2, markup)
        } else {
            Block::paragraph(markup)
        }
    }
}

/// Append a fragment's markup to an open block.
///
/// The joiner is only placed between existing content and the new text.
fn append(target: &mut Markup, joiner: Joiner, markup: Markup) {
    if !target.is_empty() {
        target.push_text(joiner.as_str());
    }
    target.append(markup);
}

/// Assemble blocks for a document whose statistics are already known.
pub fn assemble(
    doc: &SourceDocument,
    stats: &LayoutStatistics,
    options: &LayoutOptions,
) -> Result<Vec<Block>> {
    BlockAssembler::new(doc, stats, options).assemble()
}
