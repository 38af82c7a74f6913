//! Layout inference and paragraph assembly.
//!
//! Reconstruction runs in two passes. [`estimate`] derives document-wide
//! typographic constants from the fragment population; [`assemble`] then
//! walks the fragments in reading order and, consulting those constants,
//! decides for each one whether it continues the open block or starts a
//! new paragraph or heading.

mod assembler;
mod continuation;
mod heading;
mod options;
mod stats;

pub use assembler::{assemble, BlockAssembler};
pub use continuation::{
    is_drop_cap, Continuation, ContinuationClassifier, Joiner, Placed, LEADING_LEEWAY, LINE_BREAK,
};
pub use heading::is_heading;
pub use options::{LayoutOptions, LayoutOverrides};
pub use stats::{estimate, LayoutEstimator, LayoutStatistics, Measure, ParityLayout};
