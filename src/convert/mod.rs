//! PDF and raw text conversion with a raw text cache.
//!
//! Converting a PDF happens in two stages. The page text is first extracted
//! into a `.raw` file next to the PDF; the raw file is then structured and
//! rendered. An existing `.raw` file is reused unless
//! [`ConvertOptions::force`] is set, so hand-corrected raw text survives
//! repeated conversions.
//!
//! # Example
//!
//! ```no_run
//! use pdf2md::convert::{ConvertOptions, Converter};
//! use pdf2md::Locale;
//!
//! fn main() -> pdf2md::Result<()> {
//!     let converter = Converter::new(ConvertOptions::new().with_locale(Locale::Zh))?;
//!     let result = converter.convert_pdf("book.pdf", None)?;
//!     println!("{} records", result.document.len());
//!     Ok(())
//! }
//! ```

mod options;

pub use options::{ConvertOptions, ConvertResult, OutputFormat};

use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::{self, InputKind};
use crate::error::{Error, Result};
use crate::extract::{join_pages, LopdfSource};
use crate::render::{to_json, MarkdownRenderer};
use crate::structure::{LogObserver, StructureStats, Structurer};

/// Path of the raw text cache for a PDF (same name, `.raw` extension).
pub fn raw_path_for<P: AsRef<Path>>(pdf: P) -> PathBuf {
    pdf.as_ref().with_extension("raw")
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Converts PDFs and raw text files.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
    structurer: Structurer,
}

impl Converter {
    /// Create a converter, compiling the rule table.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        let structurer =
            Structurer::from_table(&options.table)?.with_options(options.structure.clone());
        Ok(Self {
            options,
            structurer,
        })
    }

    /// Conversion options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// The structurer in use.
    pub fn structurer(&self) -> &Structurer {
        &self.structurer
    }

    /// Structure and render raw text in memory.
    pub fn convert_text(&self, text: &str) -> Result<ConvertResult> {
        let mut stats = StructureStats::new();
        let document = self
            .structurer
            .structure_text_with(text, &mut (&mut stats, LogObserver));

        let format = self.options.output_format;
        let content = match format {
            OutputFormat::Markdown => {
                MarkdownRenderer::new(self.options.render_options()).render(&document.records)
            }
            OutputFormat::Json(json) => to_json(&document, json)?,
        };

        Ok(ConvertResult::new(content, document, stats).with_mime_type(format.mime_type()))
    }

    /// Extract a PDF into a raw text file, returning the path written.
    ///
    /// `output` defaults to [`raw_path_for`] the PDF. The cache is not
    /// consulted; see [`Converter::convert_pdf`].
    pub fn extract_raw<P: AsRef<Path>>(&self, pdf: P, output: Option<&Path>) -> Result<PathBuf> {
        self.extract_raw_with(pdf, output, |_| {})
    }

    /// Extract a PDF into a raw text file, reporting each finished page.
    pub fn extract_raw_with<P, F>(
        &self,
        pdf: P,
        output: Option<&Path>,
        on_page: F,
    ) -> Result<PathBuf>
    where
        P: AsRef<Path>,
        F: Fn(u32) + Sync,
    {
        let pdf = pdf.as_ref();
        let raw_path = output.map_or_else(|| raw_path_for(pdf), Path::to_path_buf);

        let source = LopdfSource::open_with_options(pdf, self.options.extract.clone())?;
        let pages = source.extract_with(on_page)?;
        log::info!(
            "extracted {} of {} pages with text from {}",
            pages.iter().filter(|p| p.has_text()).count(),
            pages.len(),
            pdf.display()
        );

        fs::write(&raw_path, join_pages(&pages, &self.options.table))?;
        log::info!("wrote raw text to {}", raw_path.display());
        Ok(raw_path)
    }

    /// Convert a raw text file, writing the rendered output.
    ///
    /// `output` defaults to the raw path with the output format's extension.
    /// An output path that names the input file is refused.
    pub fn convert_raw_file<P: AsRef<Path>>(
        &self,
        raw: P,
        output: Option<&Path>,
    ) -> Result<ConvertResult> {
        let raw = raw.as_ref();
        let output_path = output.map_or_else(
            || raw.with_extension(self.options.output_format.extension()),
            Path::to_path_buf,
        );
        if same_file(raw, &output_path) {
            return Err(Error::OutputIsInput(output_path));
        }

        let text = detect::read_text(raw)?;

        let mut result = self.convert_text(&text)?;
        result.document.metadata.source = raw
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        fs::write(&output_path, &result.content)?;
        log::info!("wrote {}", output_path.display());

        result.raw_path = Some(raw.to_path_buf());
        result.output_path = Some(output_path);
        Ok(result)
    }

    /// Convert a PDF, reusing its raw cache when present.
    pub fn convert_pdf<P: AsRef<Path>>(
        &self,
        pdf: P,
        output: Option<&Path>,
    ) -> Result<ConvertResult> {
        self.convert_pdf_with(pdf, output, |_| {})
    }

    /// Convert a PDF, reporting each extracted page.
    pub fn convert_pdf_with<P, F>(
        &self,
        pdf: P,
        output: Option<&Path>,
        on_page: F,
    ) -> Result<ConvertResult>
    where
        P: AsRef<Path>,
        F: Fn(u32) + Sync,
    {
        let pdf = pdf.as_ref();
        if !pdf.exists() {
            return Err(Error::ResourceNotFound(pdf.to_path_buf()));
        }

        let cached = raw_path_for(pdf);
        let reused = cached.exists() && !self.options.force;
        let raw_path = if reused {
            log::info!("reusing raw text cache {}", cached.display());
            cached
        } else {
            self.extract_raw_with(pdf, Some(cached.as_path()), on_page)?
        };

        let output_path = output.map_or_else(
            || pdf.with_extension(self.options.output_format.extension()),
            Path::to_path_buf,
        );
        let mut result = self.convert_raw_file(&raw_path, Some(output_path.as_path()))?;
        result.document.metadata.source = pdf
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        result.raw_reused = reused;
        Ok(result)
    }

    /// Convert a PDF or raw text file, chosen by its leading bytes.
    pub fn convert_file<P: AsRef<Path>>(
        &self,
        path: P,
        output: Option<&Path>,
    ) -> Result<ConvertResult> {
        let path = path.as_ref();
        match detect::detect_kind_from_path(path)? {
            InputKind::Pdf { version } => {
                log::debug!("{} is PDF {}", path.display(), version);
                self.convert_pdf(path, output)
            }
            InputKind::RawText => self.convert_raw_file(path, output),
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            structurer: Structurer::default().with_options(options.structure.clone()),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructureLabel;
    use crate::render::{JsonFormat, RenderOptions};

    #[test]
    fn test_raw_path_for() {
        assert_eq!(raw_path_for("/tmp/book.pdf"), PathBuf::from("/tmp/book.raw"));
        assert_eq!(raw_path_for("notes"), PathBuf::from("notes.raw"));
    }

    #[test]
    fn test_convert_text_markdown() {
        let converter = Converter::new(
            ConvertOptions::new()
                .with_render_options(RenderOptions::new().with_include_footer(false)),
        )
        .unwrap();
        let result = converter
            .convert_text("--- 第 1 页 ---\n第一章 引言\n这是正文内容，描述背景。\n")
            .unwrap();

        assert_eq!(
            result.content,
            "# 第一章 引言\n\n---\n\n这是正文内容，描述背景。\n\n"
        );
        assert_eq!(result.mime_type, "text/markdown");
        assert_eq!(result.stats.count(StructureLabel::Chapter), 1);
        assert_eq!(result.document.metadata.page_count, 1);
    }

    #[test]
    fn test_convert_text_json() {
        let converter = Converter::new(
            ConvertOptions::new().with_format(OutputFormat::Json(JsonFormat::Compact)),
        )
        .unwrap();
        let result = converter.convert_text("参考文献\n").unwrap();
        assert!(result.content.contains("\"references\""));
        assert_eq!(result.mime_type, "application/json");
    }

    #[test]
    fn test_convert_pdf_missing() {
        let result = Converter::default().convert_pdf("/definitely/not/here.pdf", None);
        assert!(matches!(result, Err(Error::ResourceNotFound(_))));
    }

    #[test]
    fn test_markdown_input_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.md");
        fs::write(&notes, "第一章 引言\n").unwrap();

        let converter = Converter::default();
        let result = converter.convert_raw_file(&notes, None);
        assert!(matches!(result, Err(Error::OutputIsInput(_))));
        let result = converter.convert_file(&notes, Some(notes.as_path()));
        assert!(matches!(result, Err(Error::OutputIsInput(_))));
        assert_eq!(fs::read_to_string(&notes).unwrap(), "第一章 引言\n");

        let other = dir.path().join("notes.out.md");
        assert!(converter.convert_raw_file(&notes, Some(other.as_path())).is_ok());
    }

    #[test]
    fn test_invalid_table_rejected() {
        let mut table = crate::Locale::Zh.table();
        table.numerals.clear();
        let result = Converter::new(ConvertOptions::new().with_table(table));
        assert!(matches!(result, Err(Error::InvalidRules(_))));
    }
}
