//! Inline markup trees.
//!
//! A fragment's content and a block's accumulated content are both a
//! sequence of [`Inline`] nodes: plain text interleaved with styled spans
//! that may nest further text and spans.

use serde::{Deserialize, Serialize};

/// Style carried by an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    /// Bold text (`<b>` in pdf2xml)
    Bold,
    /// Italic text (`<i>` in pdf2xml)
    Italic,
    /// Raised text inferred from geometry
    Superscript,
}

/// One node of an inline markup tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inline {
    /// Literal text
    Text(String),

    /// A styled span
    Span {
        /// Span style
        style: SpanStyle,
        /// Nested content
        children: Markup,
    },
}

impl Inline {
    /// Create a styled span.
    pub fn span(style: SpanStyle, children: Markup) -> Self {
        Inline::Span { style, children }
    }
}

/// An ordered sequence of inline nodes.
///
/// Adjacent text nodes are always merged, so text that directly precedes
/// the first span is available as [`Markup::leading_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markup(Vec<Inline>);

impl Markup {
    /// Create empty markup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create markup holding a single text node.
    pub fn text(text: impl Into<String>) -> Self {
        let mut markup = Self::new();
        markup.push_text(&text.into());
        markup
    }

    /// Append text, merging it into a trailing text node.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = self.0.last_mut() {
            last.push_str(text);
        } else {
            self.0.push(Inline::Text(text.to_string()));
        }
    }

    /// Append a node.
    pub fn push(&mut self, node: Inline) {
        match node {
            Inline::Text(text) => self.push_text(&text),
            span => self.0.push(span),
        }
    }

    /// Append every node of `other`.
    pub fn append(&mut self, other: Markup) {
        for node in other.0 {
            self.push(node);
        }
    }

    /// Text preceding the first span, or `""` when the markup starts with a span.
    pub fn leading_text(&self) -> &str {
        match self.0.first() {
            Some(Inline::Text(text)) => text,
            _ => "",
        }
    }

    /// Iterate over the span nodes, skipping text.
    pub fn spans(&self) -> impl Iterator<Item = &Inline> {
        self.0.iter().filter(|n| matches!(n, Inline::Span { .. }))
    }

    /// Descend through single-span levels until a bold span is reached.
    ///
    /// Returns the bold span's children when every level on the way down
    /// holds exactly one span, and `None` otherwise.
    pub fn sole_bold(&self) -> Option<&Markup> {
        let mut level = self;
        loop {
            let mut spans = level.spans();
            let only = spans.next()?;
            if spans.next().is_some() {
                return None;
            }
            match only {
                Inline::Span {
                    style: SpanStyle::Bold,
                    children,
                } => return Some(children),
                Inline::Span { children, .. } => level = children,
                Inline::Text(_) => return None,
            }
        }
    }

    /// Concatenated text of the whole tree.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.0 {
            match node {
                Inline::Text(text) => out.push_str(text),
                Inline::Span { children, .. } => children.collect_text(out),
            }
        }
    }

    /// Apply `f` to every text node in the tree, at any depth.
    pub fn for_each_text_mut<F: FnMut(&mut String)>(&mut self, f: &mut F) {
        for node in &mut self.0 {
            match node {
                Inline::Text(text) => f(text),
                Inline::Span { children, .. } => children.for_each_text_mut(f),
            }
        }
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Inline] {
        &self.0
    }

    /// Check if the markup holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Inline>> for Markup {
    fn from(nodes: Vec<Inline>) -> Self {
        let mut markup = Markup::new();
        for node in nodes {
            markup.push(node);
        }
        markup
    }
}
