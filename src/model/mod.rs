//! Document model types for positioned text fragments and reconstructed blocks.
//!
//! The source side (`SourceDocument`, `Page`, `TextFragment`, `Font`) mirrors
//! what the layout extractor produced and is never mutated after loading.
//! The output side (`Block`) is built by the layout assembler.

mod block;
mod document;
mod font;
mod fragment;
mod markup;
mod page;

pub use block::{Block, SuppressReason};
pub use document::SourceDocument;
pub use font::{Font, FontId, FontTable};
pub use fragment::TextFragment;
pub use markup::{Inline, Markup, SpanStyle};
pub use page::{FragmentOrder, Page, Parity};
