//! Markdown rendering for structured documents.

use crate::model::{StructureLabel, StructuredDocument, StructuredRecord};

use super::RenderOptions;

/// Convert a structured document to Markdown.
pub fn to_markdown(doc: &StructuredDocument, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(&doc.records)
}

/// Markdown renderer.
///
/// Top-level headings (preface, chapter, appendix, references) become `#`
/// followed by a horizontal rule, sections become `##`, and content becomes
/// a paragraph. Every block ends with a blank line.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render records in order.
    pub fn render(&self, records: &[StructuredRecord]) -> String {
        let mut output = String::new();

        for record in records {
            self.render_record(&mut output, record);
        }

        if self.options.include_footer {
            self.render_footer(&mut output);
        }

        output
    }

    fn render_record(&self, output: &mut String, record: &StructuredRecord) {
        match record.label {
            StructureLabel::TocHeader | StructureLabel::TocItem => {}
            StructureLabel::Section => {
                output.push_str("## ");
                output.push_str(&record.text);
                output.push_str("\n\n");
            }
            StructureLabel::Content => {
                output.push_str(&record.text);
                output.push_str("\n\n");
            }
            StructureLabel::Preface
            | StructureLabel::Chapter
            | StructureLabel::Appendix
            | StructureLabel::References => {
                output.push_str("# ");
                output.push_str(&record.text);
                output.push_str("\n\n");
                output.push_str(&self.options.horizontal_rule);
                output.push_str("\n\n");
            }
        }
    }

    fn render_footer(&self, output: &mut String) {
        output.push_str("\n\n");
        output.push_str(&self.options.horizontal_rule);
        output.push_str("\n\n");
        output.push_str(&self.options.footer);
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_footer() -> RenderOptions {
        RenderOptions::default().with_include_footer(false)
    }

    #[test]
    fn test_render_chapter_and_content() {
        let records = vec![
            StructuredRecord::new(StructureLabel::Chapter, "第一章 引言"),
            StructuredRecord::content("这是正文内容，描述背景。"),
        ];
        let md = MarkdownRenderer::new(no_footer()).render(&records);
        assert_eq!(md, "# 第一章 引言\n\n---\n\n这是正文内容，描述背景。\n\n");
    }

    #[test]
    fn test_render_section() {
        let records = vec![StructuredRecord::new(StructureLabel::Section, "1.1 背景")];
        let md = MarkdownRenderer::new(no_footer()).render(&records);
        assert_eq!(md, "## 1.1 背景\n\n");
    }

    #[test]
    fn test_top_level_headings_share_format() {
        for label in [
            StructureLabel::Preface,
            StructureLabel::Appendix,
            StructureLabel::References,
        ] {
            let md = MarkdownRenderer::new(no_footer())
                .render(&[StructuredRecord::new(label, "X")]);
            assert_eq!(md, "# X\n\n---\n\n");
        }
    }

    #[test]
    fn test_toc_records_not_rendered() {
        let records = vec![
            StructuredRecord::new(StructureLabel::TocHeader, "目录"),
            StructuredRecord::content("正文"),
        ];
        let md = MarkdownRenderer::new(no_footer()).render(&records);
        assert_eq!(md, "正文\n\n");
    }

    #[test]
    fn test_footer_appended() {
        let md = MarkdownRenderer::default().render(&[StructuredRecord::content("正文")]);
        assert_eq!(md, "正文\n\n\n\n---\n\n*由PDF2MD自动转换生成*\n");
    }

    #[test]
    fn test_empty_document_renders_footer_only() {
        let doc = StructuredDocument::default();
        assert_eq!(to_markdown(&doc, &no_footer()), "");
        assert!(to_markdown(&doc, &RenderOptions::default()).ends_with("*\n"));
    }
}
