//! # pdfreflow
//!
//! Paragraph reconstruction for text laid out by `pdftohtml -xml`.
//!
//! `pdftohtml` reports every run of text as an absolutely positioned
//! fragment. This library infers the document's typographic constants
//! (body font, leading, margins, indents) from those fragments, then walks
//! them in reading order to rebuild paragraphs and headings, nesting
//! superscripts and splitting off running headers and footers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfreflow::{convert_pdfxml, render, LayoutOptions};
//!
//! fn main() -> pdfreflow::Result<()> {
//!     let xml = std::fs::read_to_string("book.xml")?;
//!     let blocks = convert_pdfxml(&xml, &LayoutOptions::new().with_header_pos(60))?;
//!
//!     let html = render::to_html(&blocks, &render::RenderOptions::default())?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Layout inference**: margins and indents per page parity, leading, body font
//! - **Structure**: paragraphs, headings, drop caps, superscripts
//! - **Suppression**: running headers, footers and front matter kept as comments
//! - **Output formats**: XHTML, Markdown, plain text, JSON
//! - **Per-directory configuration**: `.pdfreflow.toml` with glob-matched sections

pub mod config;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use config::{ConfigFile, ConfigSection};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, InputKind};
pub use error::{Error, Result};
pub use layout::{LayoutOptions, LayoutOverrides, LayoutStatistics, Measure};
pub use model::{
    Block, Font, FontId, FontTable, FragmentOrder, Inline, Markup, Page, SourceDocument,
    SpanStyle, SuppressReason, TextFragment,
};
pub use parser::{parse_pdfxml, LayoutExtractor, PdfToHtml};
pub use render::{
    ConversionStats, JsonFormat, NormalizeOptions, OutputFormat, RenderOptions, TextNormalizer,
};

use std::fs;
use std::path::Path;

use log::info;

/// Reconstruct blocks from pdf2xml text.
///
/// Runs parsing, layout estimation, block assembly and default text
/// normalization.
///
/// # Example
///
/// ```
/// use pdfreflow::{convert_pdfxml, LayoutOptions};
///
/// let blocks = convert_pdfxml("<pdf2xml/>", &LayoutOptions::default()).unwrap();
/// assert!(blocks.is_empty());
/// ```
pub fn convert_pdfxml(xml: &str, options: &LayoutOptions) -> Result<Vec<Block>> {
    let doc = parse_pdfxml(xml)?;
    reflow(&doc, options, NormalizeOptions::default()).map(|(blocks, _)| blocks)
}

/// Reconstruct blocks from a PDF or pdf2xml file.
///
/// PDF files go through `pdftohtml -xml`; `keep` preserves its scratch
/// directory.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::{convert_file, LayoutOptions};
///
/// let blocks = convert_file("book.pdf", &LayoutOptions::default(), false).unwrap();
/// println!("{} blocks", blocks.len());
/// ```
pub fn convert_file<P: AsRef<Path>>(
    path: P,
    options: &LayoutOptions,
    keep: bool,
) -> Result<Vec<Block>> {
    let extractor = PdfToHtml::new().with_keep(keep);
    let doc = load_document(path, &extractor)?;
    reflow(&doc, options, NormalizeOptions::default()).map(|(blocks, _)| blocks)
}

/// Load a PDF or pdf2xml file into a source document.
pub fn load_document<P: AsRef<Path>>(
    path: P,
    extractor: &dyn LayoutExtractor,
) -> Result<SourceDocument> {
    let path = path.as_ref();
    let kind = detect_kind_from_path(path)?;
    info!("Reading {} as {}", path.display(), kind);

    let xml = match kind {
        InputKind::PdfXml => fs::read_to_string(path)?,
        InputKind::Pdf => extractor.extract(path)?,
    };
    parse_pdfxml(&xml)
}

/// Run both layout passes and normalization over a parsed document.
pub fn reflow(
    doc: &SourceDocument,
    options: &LayoutOptions,
    normalize: NormalizeOptions,
) -> Result<(Vec<Block>, LayoutStatistics)> {
    let stats = layout::estimate(doc, options)?;
    let mut blocks = layout::assemble(doc, &stats, options)?;
    TextNormalizer::new(normalize).normalize_blocks(&mut blocks);
    Ok((blocks, stats))
}

/// Convert a PDF or pdf2xml file to XHTML with default options.
///
/// # Example
///
/// ```no_run
/// let html = pdfreflow::to_html("book.pdf").unwrap();
/// std::fs::write("book.html", html).unwrap();
/// ```
pub fn to_html<P: AsRef<Path>>(path: P) -> Result<String> {
    Reflow::new().parse(path)?.to_html()
}

/// Builder for converting documents.
///
/// # Example
///
/// ```no_run
/// use pdfreflow::Reflow;
///
/// let markdown = Reflow::new()
///     .with_title("Moby Dick")
///     .with_header_pos(60)
///     .with_skip_initial_pages(2)
///     .parse("moby-dick.pdf")?
///     .to_markdown()?;
/// # Ok::<(), pdfreflow::Error>(())
/// ```
pub struct Reflow {
    layout_options: LayoutOptions,
    render_options: RenderOptions,
    keep: bool,
    extractor: Option<Box<dyn LayoutExtractor>>,
}

impl Reflow {
    /// Create a new Reflow builder.
    pub fn new() -> Self {
        Self {
            layout_options: LayoutOptions::default(),
            render_options: RenderOptions::default(),
            keep: false,
            extractor: None,
        }
    }

    /// Set the header cutoff.
    pub fn with_header_pos(mut self, pos: i32) -> Self {
        self.layout_options = self.layout_options.with_header_pos(pos);
        self
    }

    /// Set the footer cutoff.
    pub fn with_footer_pos(mut self, pos: i32) -> Self {
        self.layout_options = self.layout_options.with_footer_pos(pos);
        self
    }

    /// Suppress the first `pages` pages.
    pub fn with_skip_initial_pages(mut self, pages: u32) -> Self {
        self.layout_options = self.layout_options.with_skip_initial_pages(pages);
        self
    }

    /// Replace inferred layout constants.
    pub fn with_overrides(mut self, overrides: LayoutOverrides) -> Self {
        self.layout_options = self.layout_options.with_overrides(overrides);
        self
    }

    /// Set the document title, used for the leading heading and the HTML title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.layout_options = self.layout_options.with_title(title.clone());
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set the HTML title only, without a leading heading.
    pub fn with_html_title(mut self, title: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_title(title);
        self
    }

    /// Set the document subtitle.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.layout_options = self.layout_options.with_subtitle(subtitle);
        self
    }

    /// Log diagnostic frequency tables.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.layout_options = self.layout_options.with_debug(debug);
        self
    }

    /// Set the order in which page fragments are consumed.
    pub fn with_fragment_order(mut self, order: FragmentOrder) -> Self {
        self.layout_options = self.layout_options.with_fragment_order(order);
        self
    }

    /// Omit the generator meta tag.
    pub fn with_skip_generator(mut self, skip: bool) -> Self {
        self.render_options = self.render_options.with_skip_generator(skip);
        self
    }

    /// Emit or drop suppressed blocks in rendered output.
    pub fn with_suppressed(mut self, include: bool) -> Self {
        self.render_options = self.render_options.with_suppressed(include);
        self
    }

    /// Set text normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.render_options = self.render_options.with_normalize(normalize);
        self
    }

    /// Keep the extractor scratch directory.
    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    /// Apply a configuration section.
    pub fn with_section(mut self, section: &ConfigSection) -> Self {
        self.layout_options = section.apply_layout(self.layout_options);
        self.render_options = section.apply_render(self.render_options);
        if let Some(keep) = section.keep {
            self.keep = keep;
        }
        self
    }

    /// Use a custom extractor for PDF input.
    pub fn with_extractor(mut self, extractor: impl LayoutExtractor + 'static) -> Self {
        self.extractor = Some(Box::new(extractor));
        self
    }

    /// Layout options collected so far.
    pub fn layout_options(&self) -> &LayoutOptions {
        &self.layout_options
    }

    /// Render options collected so far.
    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    /// Convert a PDF or pdf2xml file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<ReflowResult> {
        let doc = match &self.extractor {
            Some(extractor) => load_document(path, extractor.as_ref())?,
            None => load_document(path, &PdfToHtml::new().with_keep(self.keep))?,
        };
        self.parse_document(&doc)
    }

    /// Convert pdf2xml text.
    pub fn parse_str(self, xml: &str) -> Result<ReflowResult> {
        let doc = parse_pdfxml(xml)?;
        self.parse_document(&doc)
    }

    /// Convert an already parsed document.
    pub fn parse_document(self, doc: &SourceDocument) -> Result<ReflowResult> {
        let (blocks, statistics) =
            reflow(doc, &self.layout_options, self.render_options.normalize)?;
        Ok(ReflowResult {
            blocks,
            statistics,
            render_options: self.render_options,
        })
    }
}

impl Default for Reflow {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of converting a document.
#[derive(Debug)]
pub struct ReflowResult {
    /// The reconstructed blocks
    pub blocks: Vec<Block>,
    /// Constants inferred for the document
    pub statistics: LayoutStatistics,
    /// Render options to use
    render_options: RenderOptions,
}

impl ReflowResult {
    /// Convert to XHTML.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.blocks, &self.render_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.blocks, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.blocks, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.blocks, format)
    }

    /// Convert to the given output format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render::render(&self.blocks, format, &self.render_options)
    }

    /// Counts over the reconstructed blocks.
    pub fn conversion_stats(&self) -> ConversionStats {
        ConversionStats::from_blocks(&self.blocks)
    }

    /// Get the blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}
