//! Page source backed by lopdf.

use std::path::Path;

use lopdf::Document as LopdfDocument;
use rayon::prelude::*;

use super::{ExtractOptions, PageSource, PageText};
use crate::detect;
use crate::error::{Error, Result};

/// Extracts page text from a PDF with `lopdf`.
pub struct LopdfSource {
    doc: LopdfDocument,
    options: ExtractOptions,
}

impl LopdfSource {
    /// Open a PDF file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ExtractOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ExtractOptions) -> Result<Self> {
        let path = path.as_ref();
        match detect::detect_kind_from_path(path) {
            Ok(kind) if kind.is_pdf() => {}
            Ok(_) | Err(Error::DecodeFailure(_)) => return Err(Error::UnknownFormat),
            Err(e) => return Err(e),
        }

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc, options)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ExtractOptions::default())
    }

    /// Load a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ExtractOptions) -> Result<Self> {
        if !detect::is_pdf_bytes(data) {
            return Err(Error::UnknownFormat);
        }

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc, options)
    }

    fn from_document(doc: LopdfDocument, options: ExtractOptions) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc, options })
    }

    /// PDF version from the file header.
    pub fn version(&self) -> &str {
        &self.doc.version
    }

    /// Extract all pages, calling `on_page` after each one finishes.
    ///
    /// With parallel extraction `on_page` is called from worker threads in
    /// completion order; the returned pages are always in page order.
    pub fn extract_with<F>(&self, on_page: F) -> Result<Vec<PageText>>
    where
        F: Fn(u32) + Sync,
    {
        let numbers: Vec<u32> = self.doc.get_pages().keys().copied().collect();
        log::debug!(
            "extracting {} pages ({})",
            numbers.len(),
            if self.options.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );

        let extract = |number: u32| {
            let page = self.extract_page(number);
            on_page(number);
            page
        };

        let mut pages = if self.options.parallel {
            numbers
                .par_iter()
                .map(|&n| extract(n))
                .collect::<Result<Vec<_>>>()?
        } else {
            numbers
                .iter()
                .map(|&n| extract(n))
                .collect::<Result<Vec<_>>>()?
        };

        pages.sort_by_key(|p| p.number);
        Ok(pages)
    }

    fn extract_page(&self, number: u32) -> Result<PageText> {
        match self.doc.extract_text(&[number]) {
            Ok(text) if text.trim().is_empty() => Ok(PageText::empty(number)),
            Ok(text) => Ok(PageText::new(number, text)),
            Err(e) if self.options.lenient => {
                log::warn!("Failed to extract text from page {}: {}", number, e);
                Ok(PageText::empty(number))
            }
            Err(e) => Err(Error::TextExtract(format!("page {}: {}", number, e))),
        }
    }
}

impl PageSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn pages(&self) -> Result<Vec<PageText>> {
        self.extract_with(|_| {})
    }
}

impl std::fmt::Debug for LopdfSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfSource")
            .field("version", &self.doc.version)
            .field("options", &self.options)
            .finish()
    }
}
