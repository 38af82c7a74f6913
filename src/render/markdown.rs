//! Markdown rendering for assembled blocks.

use crate::error::Result;
use crate::layout::LINE_BREAK;
use crate::model::{Block, Inline, Markup, SpanStyle};

use super::{ConversionStats, RenderOptions, RenderResult};

/// Convert blocks to Markdown.
pub fn to_markdown(blocks: &[Block], options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(blocks)
}

/// Convert blocks to Markdown with statistics.
pub fn to_markdown_with_stats(blocks: &[Block], options: &RenderOptions) -> Result<RenderResult> {
    let content = to_markdown(blocks, options)?;
    Ok(RenderResult::new(content, ConversionStats::from_blocks(blocks)))
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render blocks to Markdown.
    pub fn render(self, blocks: &[Block]) -> Result<String> {
        let mut output = String::new();
        for block in blocks {
            self.render_block(&mut output, block);
        }
        Ok(output.trim().to_string())
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Heading { level, markup } => {
                output.push_str(&"#".repeat(*level as usize));
                output.push(' ');
                render_markup(output, markup);
                output.push_str("\n\n");
            }
            Block::Paragraph { markup } => {
                render_markup(output, markup);
                output.push_str("\n\n");
            }
            Block::Suppressed { reason, block } => {
                if !self.options.include_suppressed {
                    return;
                }
                let text = block.plain_text().replace(LINE_BREAK, " ");
                output.push_str(&format!(
                    "<!-- {}: {} -->\n\n",
                    reason,
                    text.replace("--", "- -")
                ));
            }
        }
    }
}

fn render_markup(output: &mut String, markup: &Markup) {
    for node in markup.nodes() {
        match node {
            Inline::Text(text) => {
                output.push_str(&escape_markdown(&text.replace(LINE_BREAK, " ")));
            }
            Inline::Span { style, children } => {
                let mut inner = String::new();
                render_markup(&mut inner, children);
                // Emphasis markers must hug the text.
                let trimmed = inner.trim();
                if trimmed.is_empty() {
                    output.push_str(&inner);
                    continue;
                }
                let lead = &inner[..inner.len() - inner.trim_start().len()];
                let tail = &inner[inner.trim_end().len()..];
                let styled = match style {
                    SpanStyle::Bold => format!("**{}**", trimmed),
                    SpanStyle::Italic => format!("*{}*", trimmed),
                    SpanStyle::Superscript => format!("<sup>{}</sup>", trimmed),
                };
                output.push_str(lead);
                output.push_str(&styled);
                output.push_str(tail);
            }
        }
    }
}

/// Escape special Markdown characters.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            // Core formatting that must be escaped
            '\\' | '`' | '*' | '_' |
            // Brackets for links/images, pipe for tables
            '[' | ']' | '|' | '<' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SuppressReason;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_render_heading_and_paragraph() {
        let blocks = vec![
            Block::heading(2, Markup::text("Chapter 1")),
            Block::paragraph(Markup::text("First line\nsecond line")),
        ];
        let result = to_markdown(&blocks, &RenderOptions::new()).unwrap();
        assert_eq!(result, "## Chapter 1\n\nFirst line second line");
    }

    #[test]
    fn test_render_inline_styles() {
        let blocks = vec![Block::paragraph(Markup::from(vec![
            Inline::Text("A ".into()),
            Inline::span(SpanStyle::Bold, Markup::text("bold ")),
            Inline::span(SpanStyle::Italic, Markup::text("word")),
            Inline::span(SpanStyle::Superscript, Markup::text("2")),
        ]))];
        let result = to_markdown(&blocks, &RenderOptions::new()).unwrap();
        assert_eq!(result, "A **bold** *word*<sup>2</sup>");
    }

    #[test]
    fn test_render_suppressed() {
        let blocks = vec![
            Block::suppressed(
                SuppressReason::Footer,
                Block::paragraph(Markup::text("Page 3")),
            ),
            Block::paragraph(Markup::text("Body")),
        ];
        let result = to_markdown(&blocks, &RenderOptions::new()).unwrap();
        assert!(result.starts_with("<!-- FOOTER: Page 3 -->"));

        let result = to_markdown(&blocks, &RenderOptions::new().with_suppressed(false)).unwrap();
        assert_eq!(result, "Body");
    }

    #[test]
    fn test_markdown_with_stats() {
        let blocks = vec![Block::paragraph(Markup::text("one two"))];
        let result = to_markdown_with_stats(&blocks, &RenderOptions::new()).unwrap();
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.word_count, 2);
    }
}
