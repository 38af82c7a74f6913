//! Input parsing: pdf2xml documents and the extractor that produces them.

mod extractor;
mod pdfxml;

pub use extractor::{LayoutExtractor, PdfToHtml};
pub use pdfxml::parse_pdfxml;
