//! Running the external layout extractor on PDF files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};

/// Source of pdf2xml documents for PDF files.
pub trait LayoutExtractor {
    /// Produce the pdf2xml text for the PDF at `pdf`.
    fn extract(&self, pdf: &Path) -> Result<String>;
}

/// `pdftohtml -xml`, run inside a scratch directory.
#[derive(Debug, Clone)]
pub struct PdfToHtml {
    program: PathBuf,
    keep: bool,
}

impl PdfToHtml {
    /// Base name of the document pdftohtml writes into the scratch directory.
    /// The tool appends `.xml` itself.
    const OUTPUT_STEM: &'static str = "data";

    /// Use `pdftohtml` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific executable.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Keep the scratch directory after extraction.
    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    fn run(&self, pdf: &Path, dir: &Path) -> Result<String> {
        let stem = dir.join(Self::OUTPUT_STEM);
        debug!("Running {} -xml {} {}", self.program.display(), pdf.display(), stem.display());

        let output = Command::new(&self.program)
            .arg("-xml")
            .arg(pdf)
            .arg(&stem)
            .output()
            .map_err(|e| {
                Error::Extractor(format!("could not run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Extractor(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(fs::read_to_string(stem.with_extension("xml"))?)
    }
}

impl Default for PdfToHtml {
    fn default() -> Self {
        Self {
            program: PathBuf::from("pdftohtml"),
            keep: false,
        }
    }
}

impl LayoutExtractor for PdfToHtml {
    fn extract(&self, pdf: &Path) -> Result<String> {
        let dir = tempfile::Builder::new().prefix("pdfreflow").tempdir()?;
        let result = self.run(pdf, dir.path());

        if self.keep {
            #[allow(deprecated)]
            let kept = dir.into_path();
            info!("Temporary files kept in {}", kept.display());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_extractor_error() {
        let extractor = PdfToHtml::new().with_program("/nonexistent/pdftohtml");
        let err = extractor.extract(Path::new("book.pdf")).unwrap_err();
        assert!(matches!(err, Error::Extractor(msg) if msg.contains("could not run")));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_extractor_error() {
        let extractor = PdfToHtml::new().with_program("false");
        let err = extractor.extract(Path::new("book.pdf")).unwrap_err();
        assert!(matches!(err, Error::Extractor(msg) if msg.contains("exited with")));
    }
}
