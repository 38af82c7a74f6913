//! XHTML rendering for assembled blocks.

use crate::error::Result;
use crate::model::{Block, Inline, Markup, SpanStyle};

use super::RenderOptions;

/// Name and version written to the generator meta tag.
pub const GENERATOR: &str = concat!("pdfreflow ", env!("CARGO_PKG_VERSION"));

/// Convert blocks to an XHTML document.
pub fn to_html(blocks: &[Block], options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(blocks)
}

/// XHTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render blocks to a complete document.
    pub fn render(self, blocks: &[Block]) -> Result<String> {
        let mut output = String::new();

        output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        output.push_str("<!DOCTYPE html>\n");
        output.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\">\n");
        self.render_head(&mut output);
        output.push_str("<body>\n");
        for block in blocks {
            self.render_block(&mut output, block);
        }
        output.push_str("</body>\n</html>\n");

        Ok(output)
    }

    fn render_head(&self, output: &mut String) {
        output.push_str("<head>\n");
        output.push_str(
            "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>\n",
        );
        if !self.options.skip_generator {
            output.push_str(&format!(
                "<meta name=\"generator\" content=\"{}\"/>\n",
                escape(GENERATOR)
            ));
        }
        let title = self.options.title.as_deref().unwrap_or_default();
        output.push_str(&format!("<title>{}</title>\n", escape(title)));
        output.push_str("</head>\n");
    }

    fn render_block(&self, output: &mut String, block: &Block) {
        match block {
            Block::Suppressed { reason, block } => {
                if !self.options.include_suppressed {
                    return;
                }
                let mut inner = String::new();
                render_element(&mut inner, block);
                output.push_str(&format!(
                    "<!-- {}: {} -->\n",
                    reason,
                    comment_safe(&inner)
                ));
            }
            _ => {
                render_element(output, block);
                output.push('\n');
            }
        }
    }
}

fn render_element(output: &mut String, block: &Block) {
    let tag = match block {
        Block::Heading { level, .. } => format!("h{}", level),
        _ => "p".to_string(),
    };
    output.push_str(&format!("<{}>", tag));
    render_markup(output, block.markup());
    output.push_str(&format!("</{}>", tag));
}

fn render_markup(output: &mut String, markup: &Markup) {
    for node in markup.nodes() {
        match node {
            Inline::Text(text) => output.push_str(&escape(text)),
            Inline::Span { style, children } => {
                let tag = match style {
                    SpanStyle::Bold => "b",
                    SpanStyle::Italic => "i",
                    SpanStyle::Superscript => "sup",
                };
                output.push_str(&format!("<{}>", tag));
                render_markup(output, children);
                output.push_str(&format!("</{}>", tag));
            }
        }
    }
}

/// Escape text for element content and attribute values.
fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}

/// Comments may not contain `--`.
fn comment_safe(text: &str) -> String {
    let mut result = text.to_string();
    while result.contains("--") {
        result = result.replace("--", "- -");
    }
    if result.ends_with('-') {
        result.push(' ');
    }
    result
}
