//! Text structure reconstruction.
//!
//! Raw extracted lines flow one way through this module:
//!
//! 1. [`LineFilter`] drops page delimiters, page numbers and running
//!    headers/footers.
//! 2. [`merge`] rejoins wrapped fragments of a paragraph.
//! 3. [`Classifier`] labels each logical line (chapter, section, …).
//!
//! [`Structurer`] runs the three steps in order and never merges across a
//! heading.

mod filter;
mod merge;
mod observer;
mod pass;
mod patterns;
mod rules;

pub use filter::LineFilter;
pub use merge::{merge, should_merge, SHORT_LINE_CHARS, TERMINAL_PUNCTUATION};
pub use observer::{LogObserver, NoopObserver, StructureObserver, StructureStats};
pub use pass::{StructureOptions, Structurer};
pub use rules::Classifier;
