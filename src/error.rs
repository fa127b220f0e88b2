//! Error types for pdf2md.
//!
//! The structuring core never fails; every variant here belongs to the
//! I/O boundary around it (reading PDFs, raw caches and rule tables).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf2md operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An input file does not exist.
    #[error("Resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    /// Input bytes could not be decoded into text.
    #[error("Decode failure: {0}")]
    DecodeFailure(String),

    /// The file format is neither PDF nor raw text.
    #[error("Unknown file format: not a PDF or raw text file")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// A locale rule table is malformed.
    #[error("Invalid rule table: {0}")]
    InvalidRules(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The output path is the input file itself.
    #[error("Output would overwrite its input: {}", .0.display())]
    OutputIsInput(PathBuf),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidRules(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::InvalidRules(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::ResourceNotFound(PathBuf::from("missing.pdf"));
        assert_eq!(err.to_string(), "Resource not found: missing.pdf");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_is_invalid_rules() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = err.into();
        assert!(matches!(err, Error::InvalidRules(_)));
    }
}
