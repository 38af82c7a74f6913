//! Input format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of input a conversion starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A PDF file, converted through `pdftohtml -xml` first
    Pdf,
    /// A pdf2xml document as written by `pdftohtml -xml`
    PdfXml,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Pdf => write!(f, "PDF"),
            InputKind::PdfXml => write!(f, "pdf2xml"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const XML_PROLOG: &[u8] = b"<?xml";
const PDFXML_ROOT: &[u8] = b"<pdf2xml";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SNIFF_LEN: usize = 256;

/// Detect the input kind of a file.
///
/// Files named `*.xml` are taken as pdf2xml without reading them.
///
/// # Example
/// ```no_run
/// use pdfreflow::detect::{detect_kind_from_path, InputKind};
///
/// let kind = detect_kind_from_path("book.pdf").unwrap();
/// assert_eq!(kind, InputKind::Pdf);
/// ```
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let path = path.as_ref();
    let is_xml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
    if is_xml {
        return Ok(InputKind::PdfXml);
    }

    let mut header = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)?;
    detect_kind_from_bytes(&header)
}

/// Detect the input kind from the leading bytes of a file.
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<InputKind> {
    if data.starts_with(PDF_MAGIC) {
        return Ok(InputKind::Pdf);
    }

    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    let data = &data[start..];
    if data.starts_with(XML_PROLOG) || data.starts_with(PDFXML_ROOT) {
        return Ok(InputKind::PdfXml);
    }

    Err(Error::UnknownFormat)
}

/// Check if bytes look like a PDF.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_kind_from_bytes(data), Ok(InputKind::Pdf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf() {
        assert_eq!(
            detect_kind_from_bytes(b"%PDF-1.7\n%").unwrap(),
            InputKind::Pdf
        );
        assert!(is_pdf_bytes(b"%PDF-2.0"));
    }

    #[test]
    fn test_detect_pdfxml() {
        let prolog = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<pdf2xml>";
        assert_eq!(detect_kind_from_bytes(prolog).unwrap(), InputKind::PdfXml);
        assert_eq!(
            detect_kind_from_bytes(b"\xEF\xBB\xBF  <pdf2xml producer=\"poppler\">").unwrap(),
            InputKind::PdfXml
        );
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(
            detect_kind_from_bytes(b"PK\x03\x04"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(detect_kind_from_bytes(b""), Err(Error::UnknownFormat)));
        assert!(!is_pdf_bytes(b"<html>"));
    }

    #[test]
    fn test_xml_extension_skips_sniffing() {
        // The file does not exist; the extension alone decides.
        let kind = detect_kind_from_path("/nonexistent/book.XML").unwrap();
        assert_eq!(kind, InputKind::PdfXml);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            detect_kind_from_path("/nonexistent/book.pdf"),
            Err(Error::Io(_))
        ));
    }
}
