//! Conversion options and results.

use std::path::PathBuf;

use crate::extract::ExtractOptions;
use crate::locale::{Locale, LocaleTable};
use crate::model::StructuredDocument;
use crate::render::{JsonFormat, RenderOptions};
use crate::structure::{StructureOptions, StructureStats};

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Rule table used for filtering and classification
    pub table: LocaleTable,

    /// Structuring options
    pub structure: StructureOptions,

    /// Rendering options; `None` uses the table's footer wording
    pub render: Option<RenderOptions>,

    /// Page extraction options
    pub extract: ExtractOptions,

    /// Output format
    pub output_format: OutputFormat,

    /// Re-extract the PDF even when a raw cache exists
    pub force: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
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

    /// Set structuring options.
    pub fn with_structure_options(mut self, options: StructureOptions) -> Self {
        self.structure = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = Some(options);
        self
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Ignore an existing raw cache.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Effective rendering options.
    pub fn render_options(&self) -> RenderOptions {
        self.render
            .clone()
            .unwrap_or_else(|| RenderOptions::for_table(&self.table))
    }
}

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// JSON structure
    Json(JsonFormat),
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json(_) => "json",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Json(_) => "application/json",
        }
    }
}

/// Result of document conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Rendered content
    pub content: String,

    /// Structured records and metadata
    pub document: StructuredDocument,

    /// Counters from the structuring pass
    pub stats: StructureStats,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Raw text file read, if the input came from disk
    pub raw_path: Option<PathBuf>,

    /// Whether an existing raw cache was reused instead of extracting
    pub raw_reused: bool,

    /// File the content was written to
    pub output_path: Option<PathBuf>,
}

impl ConvertResult {
    /// Create a new in-memory conversion result.
    pub fn new(content: String, document: StructuredDocument, stats: StructureStats) -> Self {
        Self {
            content,
            document,
            stats,
            mime_type: "text/markdown",
            raw_path: None,
            raw_reused: false,
            output_path: None,
        }
    }

    /// Set MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_options_builder() {
        let options = ConvertOptions::new()
            .with_locale(Locale::En)
            .with_force(true)
            .with_format(OutputFormat::Json(JsonFormat::Compact));

        assert_eq!(options.table.name, "en");
        assert!(options.force);
        assert_eq!(options.output_format.extension(), "json");
        assert_eq!(options.output_format.mime_type(), "application/json");
    }

    #[test]
    fn test_render_options_follow_table() {
        let options = ConvertOptions::new().with_locale(Locale::En);
        assert_eq!(
            options.render_options().footer,
            "*Converted automatically by PDF2MD*"
        );

        let options = options.with_render_options(RenderOptions::new().with_include_footer(false));
        assert!(!options.render_options().include_footer);
    }
}
