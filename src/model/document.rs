//! Document-level types.

use super::{StructureLabel, StructuredRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured document: ordered records plus metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Document metadata
    pub metadata: Metadata,

    /// Records in reading order
    pub records: Vec<StructuredRecord>,
}

impl StructuredDocument {
    /// Create a document from records.
    pub fn new(records: Vec<StructuredRecord>) -> Self {
        Self {
            metadata: Metadata::default(),
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the document has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over heading records only.
    pub fn headings(&self) -> impl Iterator<Item = &StructuredRecord> {
        self.records.iter().filter(|r| r.is_heading())
    }

    /// Count records with the given label.
    pub fn count(&self, label: StructureLabel) -> usize {
        self.records.iter().filter(|r| r.label == label).count()
    }

    /// Plain text of all records, one per line.
    pub fn plain_text(&self) -> String {
        self.records
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Source file name, if known
    pub source: Option<String>,

    /// Number of page delimiters seen in the raw stream
    pub page_count: u32,

    /// Locale used for classification
    pub locale: String,

    /// Conversion timestamp
    pub generated_at: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata stamped with the current time.
    pub fn now(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            generated_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    /// Set the source name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
