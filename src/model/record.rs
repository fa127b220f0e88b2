//! Structure labels and labelled records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The structural role of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureLabel {
    /// A table-of-contents header ("目录", "CONTENTS")
    TocHeader,
    /// A table-of-contents entry (never produced by the built-in rules)
    TocItem,
    /// Front matter: preface, foreword, acknowledgements
    Preface,
    /// A chapter title ("第五章", "第一章 引言")
    Chapter,
    /// A section title ("1.2 Overview", "第三节")
    Section,
    /// An appendix title
    Appendix,
    /// A references/bibliography title
    References,
    /// Body text
    Content,
}

impl StructureLabel {
    /// All labels, in rule-table order.
    pub const ALL: [StructureLabel; 8] = [
        StructureLabel::TocHeader,
        StructureLabel::TocItem,
        StructureLabel::Preface,
        StructureLabel::Chapter,
        StructureLabel::Section,
        StructureLabel::Appendix,
        StructureLabel::References,
        StructureLabel::Content,
    ];

    /// Whether this label starts its own run and is never merged.
    pub fn is_heading(self) -> bool {
        !matches!(
            self,
            StructureLabel::Content | StructureLabel::TocHeader | StructureLabel::TocItem
        )
    }

    /// Whether records with this label are dropped from the output.
    pub fn is_toc(self) -> bool {
        matches!(self, StructureLabel::TocHeader | StructureLabel::TocItem)
    }

    /// Markdown heading level, if this label renders as a heading.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            StructureLabel::Preface
            | StructureLabel::Chapter
            | StructureLabel::Appendix
            | StructureLabel::References => Some(1),
            StructureLabel::Section => Some(2),
            _ => None,
        }
    }

    /// Snake-case name, as used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            StructureLabel::TocHeader => "toc_header",
            StructureLabel::TocItem => "toc_item",
            StructureLabel::Preface => "preface",
            StructureLabel::Chapter => "chapter",
            StructureLabel::Section => "section",
            StructureLabel::Appendix => "appendix",
            StructureLabel::References => "references",
            StructureLabel::Content => "content",
        }
    }
}

impl fmt::Display for StructureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled logical line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    /// Structural role
    pub label: StructureLabel,
    /// Line text, verbatim
    pub text: String,
}

impl StructuredRecord {
    /// Create a new record.
    pub fn new(label: StructureLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }

    /// Create a body-text record.
    pub fn content(text: impl Into<String>) -> Self {
        Self::new(StructureLabel::Content, text)
    }

    /// Check if this record is a heading.
    pub fn is_heading(&self) -> bool {
        self.label.is_heading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_labels() {
        let headings: Vec<_> = StructureLabel::ALL
            .iter()
            .filter(|l| l.is_heading())
            .collect();
        assert_eq!(headings.len(), 5);
        assert!(!StructureLabel::Content.is_heading());
        assert!(!StructureLabel::TocHeader.is_heading());
        assert!(!StructureLabel::TocItem.is_heading());
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(StructureLabel::Chapter.heading_level(), Some(1));
        assert_eq!(StructureLabel::Section.heading_level(), Some(2));
        assert_eq!(StructureLabel::Content.heading_level(), None);
    }

    #[test]
    fn test_label_serializes_snake_case() {
        let record = StructuredRecord::new(StructureLabel::TocHeader, "目录");
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"toc_header\""));
        assert_eq!(StructureLabel::TocHeader.to_string(), "toc_header");
    }
}
