//! Document model types for structured text.
//!
//! The model sits between the structuring pass and the renderers: a flat,
//! ordered list of labelled records plus document metadata.

mod document;
mod record;

pub use document::{Metadata, StructuredDocument};
pub use record::{StructureLabel, StructuredRecord};
