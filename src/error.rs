//! Error types for pdfreflow library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfreflow operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a document.
///
/// An empty document is not an error: it produces empty layout statistics
/// and an empty block sequence.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a PDF nor a pdf2xml document.
    #[error("Unknown file format: expected a PDF or a pdf2xml document")]
    UnknownFormat,

    /// The XML input is not well-formed.
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The parsed input does not have the expected document shape.
    #[error("Unexpected input shape: {0}")]
    InputShape(String),

    /// A text fragment references a font that was never declared.
    #[error("Undeclared font id {font:?} referenced on page {page}")]
    FontResolution {
        /// The unresolved font id
        font: String,
        /// Page carrying the offending fragment
        page: u32,
    },

    /// The external layout extractor failed.
    #[error("pdftohtml failed: {0}")]
    Extractor(String),

    /// The configuration file could not be read or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during rendering (HTML, Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InputShape("expected a pdf2xml document, got html".to_string());
        assert_eq!(
            err.to_string(),
            "Unexpected input shape: expected a pdf2xml document, got html"
        );

        let err = Error::FontResolution {
            font: "7".to_string(),
            page: 3,
        };
        assert_eq!(err.to_string(), "Undeclared font id \"7\" referenced on page 3");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_xml_error_conversion() {
        let err: Error = roxmltree::Document::parse("<pdf2xml>").unwrap_err().into();
        assert!(matches!(err, Error::Xml(_)));
    }
}
