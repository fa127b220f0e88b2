//! Observer hooks for the structuring pass.
//!
//! The pass reports what it does (pages seen, noise dropped, headings found,
//! runs merged) through a [`StructureObserver`] passed in by the caller,
//! instead of printing. Classification itself stays pure.
//!
//! # Example
//!
//! ```
//! use pdf2md::structure::{StructureObserver, Structurer};
//! use pdf2md::model::StructureLabel;
//!
//! struct HeadingCollector(Vec<String>);
//!
//! impl StructureObserver for HeadingCollector {
//!     fn on_heading(&mut self, _label: StructureLabel, text: &str) {
//!         self.0.push(text.to_string());
//!     }
//! }
//!
//! let mut collector = HeadingCollector(Vec::new());
//! Structurer::default().structure_with(["第一章 引言", "正文。"], &mut collector);
//! assert_eq!(collector.0, vec!["第一章 引言"]);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{StructureLabel, StructuredRecord};

/// Hooks called by the structuring pass. All methods default to no-ops.
pub trait StructureObserver {
    /// A page delimiter line was consumed.
    fn on_page(&mut self, page: u32) {
        let _ = page;
    }

    /// A non-blank line was dropped as header/footer noise.
    fn on_noise(&mut self, line: &str) {
        let _ = line;
    }

    /// A heading line was found and will form its own record.
    fn on_heading(&mut self, label: StructureLabel, text: &str) {
        let _ = (label, text);
    }

    /// A run of body lines was merged.
    fn on_merge(&mut self, lines_in: usize, lines_out: usize) {
        let _ = (lines_in, lines_out);
    }

    /// A table-of-contents line was skipped.
    fn on_toc(&mut self, text: &str) {
        let _ = text;
    }

    /// A record was emitted.
    fn on_record(&mut self, record: &StructuredRecord) {
        let _ = record;
    }
}

impl<T: StructureObserver + ?Sized> StructureObserver for &mut T {
    fn on_page(&mut self, page: u32) {
        (**self).on_page(page)
    }

    fn on_noise(&mut self, line: &str) {
        (**self).on_noise(line)
    }

    fn on_heading(&mut self, label: StructureLabel, text: &str) {
        (**self).on_heading(label, text)
    }

    fn on_merge(&mut self, lines_in: usize, lines_out: usize) {
        (**self).on_merge(lines_in, lines_out)
    }

    fn on_toc(&mut self, text: &str) {
        (**self).on_toc(text)
    }

    fn on_record(&mut self, record: &StructuredRecord) {
        (**self).on_record(record)
    }
}

/// Forwards every hook to both observers, first `A` then `B`.
impl<A: StructureObserver, B: StructureObserver> StructureObserver for (A, B) {
    fn on_page(&mut self, page: u32) {
        self.0.on_page(page);
        self.1.on_page(page);
    }

    fn on_noise(&mut self, line: &str) {
        self.0.on_noise(line);
        self.1.on_noise(line);
    }

    fn on_heading(&mut self, label: StructureLabel, text: &str) {
        self.0.on_heading(label, text);
        self.1.on_heading(label, text);
    }

    fn on_merge(&mut self, lines_in: usize, lines_out: usize) {
        self.0.on_merge(lines_in, lines_out);
        self.1.on_merge(lines_in, lines_out);
    }

    fn on_toc(&mut self, text: &str) {
        self.0.on_toc(text);
        self.1.on_toc(text);
    }

    fn on_record(&mut self, record: &StructuredRecord) {
        self.0.on_record(record);
        self.1.on_record(record);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StructureObserver for NoopObserver {}

/// Observer that reports through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl StructureObserver for LogObserver {
    fn on_page(&mut self, page: u32) {
        log::trace!("page delimiter: {}", page);
    }

    fn on_noise(&mut self, line: &str) {
        log::trace!("dropped header/footer line: {}", line);
    }

    fn on_heading(&mut self, label: StructureLabel, text: &str) {
        log::debug!("matched {}: {}", label, text);
    }

    fn on_merge(&mut self, lines_in: usize, lines_out: usize) {
        if lines_in != lines_out {
            log::trace!("merged {} lines into {}", lines_in, lines_out);
        }
    }

    fn on_toc(&mut self, text: &str) {
        log::debug!("skipped table of contents line: {}", text);
    }
}

/// Counters collected during a structuring pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    /// Page delimiters seen
    pub page_count: u32,

    /// Non-blank lines dropped as noise
    pub noise_lines: u32,

    /// Body lines entering the merger
    pub lines_before_merge: u32,

    /// Logical lines leaving the merger
    pub lines_after_merge: u32,

    /// Table-of-contents lines skipped
    pub toc_lines: u32,

    /// Emitted records per label
    pub records: BTreeMap<String, u32>,
}

impl StructureStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of emitted records with the given label.
    pub fn count(&self, label: StructureLabel) -> u32 {
        self.records.get(label.as_str()).copied().unwrap_or(0)
    }

    /// Number of emitted heading records.
    pub fn heading_count(&self) -> u32 {
        StructureLabel::ALL
            .iter()
            .filter(|l| l.is_heading())
            .map(|l| self.count(*l))
            .sum()
    }

    /// Total number of emitted records.
    pub fn record_count(&self) -> u32 {
        self.records.values().sum()
    }
}

impl StructureObserver for StructureStats {
    fn on_page(&mut self, _page: u32) {
        self.page_count += 1;
    }

    fn on_noise(&mut self, _line: &str) {
        self.noise_lines += 1;
    }

    fn on_merge(&mut self, lines_in: usize, lines_out: usize) {
        self.lines_before_merge += lines_in as u32;
        self.lines_after_merge += lines_out as u32;
    }

    fn on_toc(&mut self, _text: &str) {
        self.toc_lines += 1;
    }

    fn on_record(&mut self, record: &StructuredRecord) {
        *self
            .records
            .entry(record.label.as_str().to_string())
            .or_insert(0) += 1;
    }
}
