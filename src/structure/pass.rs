//! The structuring pass: filter → merge → classify.

use unicode_normalization::UnicodeNormalization;

use super::merge::merge;
use super::observer::{NoopObserver, StructureObserver};
use super::{Classifier, LineFilter};
use crate::error::Result;
use crate::locale::{Locale, LocaleTable};
use crate::model::{Metadata, StructuredDocument, StructuredRecord};

/// Options for the structuring pass.
#[derive(Debug, Clone)]
pub struct StructureOptions {
    /// Normalize input lines to Unicode NFC before matching
    pub normalize_unicode: bool,

    /// Let paragraphs continue across page delimiters
    pub merge_across_pages: bool,
}

impl StructureOptions {
    /// Create new structure options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable NFC normalization.
    pub fn with_normalize_unicode(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable merging across page delimiters.
    pub fn with_merge_across_pages(mut self, merge: bool) -> Self {
        self.merge_across_pages = merge;
        self
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            merge_across_pages: true,
        }
    }
}

/// Rebuilds document structure from raw extracted lines.
#[derive(Debug, Clone)]
pub struct Structurer {
    filter: LineFilter,
    classifier: Classifier,
    options: StructureOptions,
    locale: String,
}

impl Structurer {
    /// Create a structurer for a built-in locale.
    pub fn new(locale: Locale) -> Self {
        Self {
            filter: LineFilter::for_locale(locale),
            classifier: Classifier::for_locale(locale),
            options: StructureOptions::default(),
            locale: locale.code().to_string(),
        }
    }

    /// Create a structurer from a custom locale table.
    pub fn from_table(table: &LocaleTable) -> Result<Self> {
        table.validate()?;
        Ok(Self {
            filter: LineFilter::from_table(table)?,
            classifier: Classifier::from_table(table)?,
            options: StructureOptions::default(),
            locale: table.name.clone(),
        })
    }

    /// Set structuring options.
    pub fn with_options(mut self, options: StructureOptions) -> Self {
        self.options = options;
        self
    }

    /// The line filter in use.
    pub fn filter(&self) -> &LineFilter {
        &self.filter
    }

    /// The classifier in use.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Structure raw lines into ordered records.
    pub fn structure<I, S>(&self, lines: I) -> Vec<StructuredRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.structure_with(lines, &mut NoopObserver)
    }

    /// Structure raw lines, reporting progress to an observer.
    pub fn structure_with<I, S>(
        &self,
        lines: I,
        observer: &mut dyn StructureObserver,
    ) -> Vec<StructuredRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(lines, observer).0
    }

    /// Structure a raw text stream (one line per `\n`) into a document.
    pub fn structure_text(&self, text: &str) -> StructuredDocument {
        self.structure_text_with(text, &mut NoopObserver)
    }

    /// Structure a raw text stream, reporting progress to an observer.
    pub fn structure_text_with(
        &self,
        text: &str,
        observer: &mut dyn StructureObserver,
    ) -> StructuredDocument {
        let (records, pages) = self.run(text.split('\n'), observer);
        let mut metadata = Metadata::now(self.locale.as_str());
        metadata.page_count = pages;
        StructuredDocument { metadata, records }
    }

    fn run<I, S>(
        &self,
        lines: I,
        observer: &mut dyn StructureObserver,
    ) -> (Vec<StructuredRecord>, u32)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records = Vec::new();
        let mut run: Vec<String> = Vec::new();
        let mut pages = 0u32;

        for raw in lines {
            let normalized;
            let line = if self.options.normalize_unicode {
                normalized = raw.as_ref().nfc().collect::<String>();
                normalized.as_str()
            } else {
                raw.as_ref()
            };
            let text = line.trim();

            if let Some(page) = self.filter.page_delimiter(text) {
                pages += 1;
                observer.on_page(page);
                if !self.options.merge_across_pages {
                    self.flush(&mut run, &mut records, observer);
                }
                continue;
            }

            if self.filter.is_noise(text) {
                if !text.is_empty() {
                    observer.on_noise(text);
                }
                continue;
            }

            let label = self.classifier.label(text);
            if label.is_heading() {
                self.flush(&mut run, &mut records, observer);
                observer.on_heading(label, text);
                let record = StructuredRecord::new(label, text);
                observer.on_record(&record);
                records.push(record);
            } else {
                run.push(text.to_string());
            }
        }

        self.flush(&mut run, &mut records, observer);
        (records, pages)
    }

    /// Merge the pending run of body lines and classify the result.
    fn flush(
        &self,
        run: &mut Vec<String>,
        records: &mut Vec<StructuredRecord>,
        observer: &mut dyn StructureObserver,
    ) {
        if run.is_empty() {
            return;
        }

        let lines_in = run.len();
        let merged = merge(std::mem::take(run));
        observer.on_merge(lines_in, merged.len());

        for line in merged {
            let label = self.classifier.label(&line);
            if label.is_toc() {
                observer.on_toc(&line);
                continue;
            }
            let record = StructuredRecord::new(label, line);
            observer.on_record(&record);
            records.push(record);
        }
    }
}

impl Default for Structurer {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructureLabel;
    use crate::structure::StructureStats;

    #[test]
    fn test_end_to_end_records() {
        let records = Structurer::default().structure([
            "--- page 1 ---",
            "第一章 引言",
            "这是正文内容，描述背景。",
            "--- page 1 ---",
        ]);
        assert_eq!(
            records,
            vec![
                StructuredRecord::new(StructureLabel::Chapter, "第一章 引言"),
                StructuredRecord::content("这是正文内容，描述背景。"),
            ]
        );
    }

    #[test]
    fn test_noise_and_toc_dropped() {
        let records = Structurer::default().structure([
            "目录",
            "12",
            "© 2020 出版社",
            "",
            "前言",
            "本书介绍了结构化文本处理的方法。",
        ]);
        assert_eq!(
            records,
            vec![
                StructuredRecord::new(StructureLabel::Preface, "前言"),
                StructuredRecord::content("本书介绍了结构化文本处理的方法。"),
            ]
        );
    }

    #[test]
    fn test_consecutive_headings_not_merged() {
        let records = Structurer::default().structure(["第一章", "1.1 背景", "第二节", "附录"]);
        let labels: Vec<_> = records.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                StructureLabel::Chapter,
                StructureLabel::Section,
                StructureLabel::Section,
                StructureLabel::Appendix,
            ]
        );
    }

    #[test]
    fn test_paragraph_continues_across_pages() {
        let records = Structurer::default().structure([
            "--- 第 1 页 ---",
            "这一段文字在第一页的末尾被截断了",
            "--- 第 2 页 ---",
            "并在第二页继续，直到句号结束。",
        ]);
        assert_eq!(
            records,
            vec![StructuredRecord::content(
                "这一段文字在第一页的末尾被截断了并在第二页继续，直到句号结束。"
            )]
        );
    }

    #[test]
    fn test_page_boundary_splits_when_configured() {
        let structurer = Structurer::default()
            .with_options(StructureOptions::new().with_merge_across_pages(false));
        let records = structurer.structure([
            "--- 第 1 页 ---",
            "这一段文字在第一页的末尾被截断了",
            "--- 第 2 页 ---",
            "并在第二页继续，直到句号结束。",
        ]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let records = Structurer::default().structure(["   第二章 方法   ", "  Hello world  "]);
        assert_eq!(records[0].text, "第二章 方法");
        assert_eq!(records[1].text, "Hello world");
    }

    #[test]
    fn test_stats_observer() {
        let mut stats = StructureStats::new();
        let doc = Structurer::default().structure_text_with(
            "--- 第 1 页 ---\n第一章 引言\n这是第一行没有标点的较长文字\n继续这一行直到结束。\n\n3\n--- 第 2 页 ---\n参考文献\n",
            &mut stats,
        );

        assert_eq!(stats.page_count, 2);
        assert_eq!(stats.noise_lines, 1);
        assert_eq!(stats.lines_before_merge, 2);
        assert_eq!(stats.lines_after_merge, 1);
        assert_eq!(stats.count(StructureLabel::References), 1);
        assert_eq!(doc.metadata.page_count, 2);
        assert_eq!(doc.records.len(), 3);
    }

    #[test]
    fn test_custom_table() {
        let mut table = Locale::En.table();
        table.references.push("works cited".to_string());
        let structurer = Structurer::from_table(&table).unwrap();
        let records = structurer.structure(["Works Cited"]);
        assert_eq!(records[0].label, StructureLabel::References);
    }
}
