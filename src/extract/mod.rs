//! Page text extraction.
//!
//! Extraction produces one [`PageText`] per page. [`join_pages`] turns them
//! into the raw text stream the structuring pass reads: each page with text
//! becomes a delimiter line, the page text and a trailing newline, and the
//! blocks are joined with `\n`.

mod pdf_source;

pub use pdf_source::LopdfSource;

use crate::error::Result;
use crate::locale::LocaleTable;

/// Extracted text of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page text, `None` for pages without extractable text
    pub text: Option<String>,
}

impl PageText {
    /// Create a page with text.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: Some(text.into()),
        }
    }

    /// Create a page without text (image-only or failed).
    pub fn empty(number: u32) -> Self {
        Self { number, text: None }
    }

    /// Check whether the page carries any text.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// A source of per-page text.
pub trait PageSource {
    /// Number of pages in the source.
    fn page_count(&self) -> u32;

    /// Extract all pages in page order.
    fn pages(&self) -> Result<Vec<PageText>>;
}

impl PageSource for [PageText] {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn pages(&self) -> Result<Vec<PageText>> {
        Ok(self.to_vec())
    }
}

impl PageSource for Vec<PageText> {
    fn page_count(&self) -> u32 {
        self.as_slice().page_count()
    }

    fn pages(&self) -> Result<Vec<PageText>> {
        self.as_slice().pages()
    }
}

/// Options for page extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Extract pages in parallel
    pub parallel: bool,

    /// Treat a page that fails to extract as having no text
    pub lenient: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable lenient mode.
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Abort on the first page that fails to extract.
    pub fn strict(mut self) -> Self {
        self.lenient = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            lenient: true,
        }
    }
}

/// Join extracted pages into a raw text stream.
pub fn join_pages(pages: &[PageText], table: &LocaleTable) -> String {
    pages
        .iter()
        .filter_map(|page| {
            let text = page.text.as_deref().filter(|t| !t.is_empty())?;
            Some(format!(
                "{}\n{}\n",
                table.page_delimiter(page.number),
                text.trim_end_matches('\n')
            ))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract every page of a source and join them.
pub fn extract_raw<S: PageSource + ?Sized>(source: &S, table: &LocaleTable) -> Result<String> {
    let pages = source.pages()?;
    Ok(join_pages(&pages, table))
}
