//! Rendering module for converting blocks to various output formats.

mod html;
mod json;
mod markdown;
mod normalize;
mod options;
mod result;
mod text;

pub use html::{to_html, HtmlRenderer, GENERATOR};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use normalize::{NormalizeOptions, TextNormalizer};
pub use options::{OutputFormat, RenderOptions};
pub use result::{ConversionStats, RenderResult};
pub use text::to_text;

use crate::error::Result;
use crate::model::Block;

/// Render blocks in the given format.
pub fn render(blocks: &[Block], format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Html => to_html(blocks, options),
        OutputFormat::Markdown => to_markdown(blocks, options),
        OutputFormat::Text => to_text(blocks, options),
        OutputFormat::Json => to_json(blocks, JsonFormat::Pretty),
    }
}
