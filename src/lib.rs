//! # pdf2md
//!
//! Rebuilds the logical structure of text extracted from PDF books and
//! renders it as Markdown.
//!
//! Extracted text arrives as a flat stream of visual lines: paragraphs are
//! wrapped, page numbers and running headers are interleaved, and headings
//! look like any other line. This library drops the page furniture, rejoins
//! wrapped paragraphs and labels every logical line (chapter, section,
//! appendix, ...) before rendering.
//!
//! ## Quick Start
//!
//! ```
//! use pdf2md::{render, Structurer};
//!
//! let raw = "--- 第 1 页 ---\n第一章 引言\n这是正文内容，描述背景。\n";
//! let doc = Structurer::default().structure_text(raw);
//! let markdown = render::to_markdown(&doc, &render::RenderOptions::default());
//! assert!(markdown.starts_with("# 第一章 引言\n\n---\n\n"));
//! ```
//!
//! ## Features
//!
//! - **PDF extraction**: per-page text via lopdf, in parallel with Rayon
//! - **Raw text cache**: extracted text is kept next to the PDF and reused
//! - **Locale tables**: Chinese and English rule sets, or custom JSON tables
//! - **Multiple output formats**: Markdown and JSON

pub mod convert;
pub mod detect;
pub mod error;
pub mod extract;
pub mod locale;
pub mod model;
pub mod render;
pub mod structure;

// Re-export commonly used types
pub use convert::{raw_path_for, ConvertOptions, ConvertResult, Converter, OutputFormat};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, InputKind};
pub use error::{Error, Result};
pub use extract::{join_pages, ExtractOptions, LopdfSource, PageSource, PageText};
pub use locale::{Locale, LocaleTable};
pub use model::{Metadata, StructureLabel, StructuredDocument, StructuredRecord};
pub use render::{JsonFormat, MarkdownRenderer, RenderOptions};
pub use structure::{
    Classifier, LineFilter, StructureObserver, StructureOptions, StructureStats, Structurer,
};

use std::path::Path;

/// Structure raw lines with the default (Chinese) rules.
///
/// # Example
///
/// ```
/// use pdf2md::{structure_lines, StructureLabel};
///
/// let records = structure_lines(["--- page 1 ---", "第一章 引言", "正文。"]);
/// assert_eq!(records[0].label, StructureLabel::Chapter);
/// ```
pub fn structure_lines<I, S>(lines: I) -> Vec<StructuredRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Structurer::default().structure(lines)
}

/// Render records to Markdown with default options.
pub fn render_markdown(records: &[StructuredRecord]) -> String {
    MarkdownRenderer::default().render(records)
}

/// Convert raw extracted text to Markdown with default rules and options.
pub fn text_to_markdown(text: &str) -> String {
    let doc = Structurer::default().structure_text(text);
    render_markdown(&doc.records)
}

/// Extract the raw text stream of a PDF file.
///
/// # Example
///
/// ```no_run
/// let raw = pdf2md::extract_text("book.pdf").unwrap();
/// println!("{}", raw);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let source = LopdfSource::open(path)?;
    extract::extract_raw(&source, &LocaleTable::default())
}

/// Convert a PDF file to Markdown next to it, reusing its raw cache.
///
/// # Example
///
/// ```no_run
/// let result = pdf2md::convert_pdf("book.pdf").unwrap();
/// println!("wrote {:?}", result.output_path);
/// ```
pub fn convert_pdf<P: AsRef<Path>>(path: P) -> Result<ConvertResult> {
    Converter::default().convert_pdf(path, None)
}

/// Builder-style interface for in-memory conversion.
///
/// # Example
///
/// ```
/// use pdf2md::{Locale, Pdf2Md};
///
/// let markdown = Pdf2Md::new()
///     .with_locale(Locale::En)
///     .without_footer()
///     .parse_text("Chapter 1 Getting Started\nThis book is short.\n")?
///     .to_markdown();
/// assert_eq!(markdown, "# Chapter 1 Getting Started\n\n---\n\nThis book is short.\n\n");
/// # Ok::<(), pdf2md::Error>(())
/// ```
pub struct Pdf2Md {
    table: LocaleTable,
    structure_options: StructureOptions,
    extract_options: ExtractOptions,
    render_options: Option<RenderOptions>,
}

impl Pdf2Md {
    /// Create a new builder with the default locale.
    pub fn new() -> Self {
        Self {
            table: LocaleTable::default(),
            structure_options: StructureOptions::default(),
            extract_options: ExtractOptions::default(),
            render_options: None,
        }
    }

    /// Use a built-in locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.table = locale.table();
        self
    }

    /// Use a custom rule table.
    pub fn with_table(mut self, table: LocaleTable) -> Self {
        self.table = table;
        self
    }

    /// Keep paragraphs from continuing across page delimiters.
    pub fn split_at_pages(mut self) -> Self {
        self.structure_options = self.structure_options.with_merge_across_pages(false);
        self
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.extract_options = self.extract_options.sequential();
        self
    }

    /// Fail on pages whose text cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.extract_options = self.extract_options.strict();
        self
    }

    /// Omit the attribution footer.
    pub fn without_footer(mut self) -> Self {
        self.render_options = Some(self.effective_render_options().with_include_footer(false));
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = Some(options);
        self
    }

    fn effective_render_options(&self) -> RenderOptions {
        self.render_options
            .clone()
            .unwrap_or_else(|| RenderOptions::for_table(&self.table))
    }

    fn structurer(&self) -> Result<Structurer> {
        Ok(Structurer::from_table(&self.table)?.with_options(self.structure_options.clone()))
    }

    /// Structure raw text.
    pub fn parse_text(self, text: &str) -> Result<Pdf2MdResult> {
        let document = self.structurer()?.structure_text(text);
        Ok(Pdf2MdResult {
            document,
            render_options: self.effective_render_options(),
        })
    }

    /// Read and structure a raw text file.
    pub fn parse_raw_file<P: AsRef<Path>>(self, path: P) -> Result<Pdf2MdResult> {
        let text = detect::read_text(path)?;
        self.parse_text(&text)
    }

    /// Extract and structure a PDF without touching the raw cache.
    pub fn parse_pdf<P: AsRef<Path>>(self, path: P) -> Result<Pdf2MdResult> {
        let source = LopdfSource::open_with_options(path, self.extract_options.clone())?;
        let raw = extract::extract_raw(&source, &self.table)?;
        self.parse_text(&raw)
    }
}

impl Default for Pdf2Md {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of structuring a document.
pub struct Pdf2MdResult {
    /// The structured document
    pub document: StructuredDocument,
    /// Render options to use
    render_options: RenderOptions,
}

impl Pdf2MdResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Record texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }
}
