//! Reader for pdf2xml documents written by `pdftohtml -xml`.
//!
//! The document shape is:
//!
//! ```text
//! <pdf2xml>
//!   <page number="1" position="absolute" top="0" left="0" height="800" width="600">
//!     <fontspec id="0" size="12" family="Times" color="#000000"/>
//!     <text top="100" left="60" width="200" height="13" font="0"><i><b>Some text</b></i></text>
//!   </page>
//! </pdf2xml>
//! ```
//!
//! Font declarations are document-wide even though they appear inside pages.
//! Coordinates are screen coordinates: `(0, 0)` is top-left.

use std::str::FromStr;

use log::debug;
use roxmltree::Node;

use crate::error::{Error, Result};
use crate::model::{
    Font, FontId, Inline, Markup, Page, SourceDocument, SpanStyle, TextFragment,
};

const ROOT_TAG: &str = "pdf2xml";

/// Parse a pdf2xml document into pages, fragments and fonts.
///
/// Fails with [`Error::Xml`] when the input is not well-formed,
/// [`Error::InputShape`] when the root is not `<pdf2xml>` or a required
/// attribute is missing, and [`Error::FontResolution`] when a fragment uses
/// an undeclared font.
pub fn parse_pdfxml(xml: &str) -> Result<SourceDocument> {
    let parse_options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let tree = roxmltree::Document::parse_with_options(xml, parse_options)?;

    let root = tree.root_element();
    if root.tag_name().name() != ROOT_TAG {
        return Err(Error::InputShape(format!(
            "expected a {} document, got <{}>",
            ROOT_TAG,
            root.tag_name().name()
        )));
    }

    let mut doc = SourceDocument::new();
    for (index, page_node) in root
        .children()
        .filter(|n| n.has_tag_name("page"))
        .enumerate()
    {
        let number = optional_attr(&page_node, "number")?.unwrap_or(index as u32 + 1);
        let mut page = Page::new(number);

        for node in page_node.children().filter(Node::is_element) {
            match node.tag_name().name() {
                "fontspec" => {
                    let id = FontId::new(required_str(&node, "id")?);
                    // Validated as a number, kept as declared.
                    required_attr::<f64>(&node, "size")?;
                    let font = Font::new(
                        required_str(&node, "size")?,
                        node.attribute("family").unwrap_or_default(),
                        node.attribute("color").unwrap_or_default(),
                    );
                    doc.fonts.declare(id, font);
                }
                "text" => page.add_fragment(parse_text(&node, number)?),
                _ => {}
            }
        }
        doc.add_page(page);
    }

    doc.validate_fonts()?;
    debug!(
        "Parsed {} pages, {} fragments, {} fonts",
        doc.page_count(),
        doc.fragment_count(),
        doc.fonts.len()
    );
    Ok(doc)
}

fn parse_text(node: &Node, page: u32) -> Result<TextFragment> {
    let fragment = TextFragment::new(
        page,
        required_attr(node, "top")?,
        required_attr(node, "left")?,
        required_attr(node, "width")?,
        required_attr(node, "height")?,
        FontId::new(required_str(node, "font")?),
        "",
    );
    Ok(fragment.with_markup(decode_inline(node)))
}

/// Decode the content of an element into a markup tree.
///
/// `<b>` and `<i>` become spans; any other element is replaced by its content.
fn decode_inline(node: &Node) -> Markup {
    let mut markup = Markup::new();
    for child in node.children() {
        if child.is_text() {
            markup.push_text(child.text().unwrap_or_default());
            continue;
        }
        if !child.is_element() {
            continue;
        }
        let children = decode_inline(&child);
        match child.tag_name().name() {
            "b" => markup.push(Inline::span(SpanStyle::Bold, children)),
            "i" => markup.push(Inline::span(SpanStyle::Italic, children)),
            _ => markup.append(children),
        }
    }
    markup
}

fn required_str<'a>(node: &Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        Error::InputShape(format!(
            "<{}> is missing the {} attribute",
            node.tag_name().name(),
            name
        ))
    })
}

fn required_attr<T: FromStr>(node: &Node, name: &str) -> Result<T> {
    let value = required_str(node, name)?;
    parse_number(value).ok_or_else(|| {
        Error::InputShape(format!(
            "<{}> has a non-numeric {} attribute: {:?}",
            node.tag_name().name(),
            name,
            value
        ))
    })
}

fn optional_attr<T: FromStr>(node: &Node, name: &str) -> Result<Option<T>> {
    match node.attribute(name) {
        Some(_) => required_attr(node, name).map(Some),
        None => Ok(None),
    }
}

/// Parse an integer attribute, accepting fractional values rounded to the
/// nearest integer.
fn parse_number<T: FromStr>(value: &str) -> Option<T> {
    let value = value.trim();
    if let Ok(parsed) = value.parse() {
        return Some(parsed);
    }
    let rounded = value.parse::<f64>().ok()?.round();
    format!("{}", rounded).parse().ok()
}
