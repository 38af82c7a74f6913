//! Rendering options and configuration.

use super::NormalizeOptions;

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// XHTML document
    #[default]
    Html,

    /// Markdown
    Markdown,

    /// Plain text
    Text,

    /// JSON block structure
    Json,
}

impl OutputFormat {
    /// File extension for this format, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Html => "application/xhtml+xml",
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Text => "text/plain",
            OutputFormat::Json => "application/json",
        }
    }
}

/// Options for rendering a block sequence.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document title for the HTML `<title>` element
    pub title: Option<String>,

    /// Omit the generator meta tag
    pub skip_generator: bool,

    /// Emit suppressed blocks as comments
    pub include_suppressed: bool,

    /// Text normalization applied before rendering
    pub normalize: NormalizeOptions,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Omit or emit the generator meta tag.
    pub fn with_skip_generator(mut self, skip: bool) -> Self {
        self.skip_generator = skip;
        self
    }

    /// Emit or drop suppressed blocks.
    pub fn with_suppressed(mut self, include: bool) -> Self {
        self.include_suppressed = include;
        self
    }

    /// Set the text normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: None,
            skip_generator: false,
            include_suppressed: true,
            normalize: NormalizeOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format() {
        assert_eq!(OutputFormat::default(), OutputFormat::Html);
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Json.mime_type(), "application/json");
    }

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert!(opts.title.is_none());
        assert!(!opts.skip_generator);
        assert!(opts.include_suppressed);
        assert!(opts.normalize.fix_hyphenation);
    }

    #[test]
    fn test_builder_pattern() {
        let opts = RenderOptions::new()
            .with_title("Moby Dick")
            .with_skip_generator(true)
            .with_suppressed(false)
            .with_normalize(NormalizeOptions::none());

        assert_eq!(opts.title.as_deref(), Some("Moby Dick"));
        assert!(opts.skip_generator);
        assert!(!opts.include_suppressed);
        assert!(!opts.normalize.fix_ligatures);
    }
}
