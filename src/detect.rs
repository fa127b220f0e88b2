//! Input format detection and raw text decoding.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of input accepted by the converter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A PDF file with its header version (e.g., "1.7")
    Pdf {
        /// Version from the `%PDF-x.y` header
        version: String,
    },
    /// Previously extracted raw text (UTF-8)
    RawText,
}

impl InputKind {
    /// Check whether this is a PDF.
    pub fn is_pdf(&self) -> bool {
        matches!(self, InputKind::Pdf { .. })
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Pdf { version } => write!(f, "PDF {}", version),
            InputKind::RawText => write!(f, "raw text"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Bytes inspected when sniffing a file.
const SNIFF_LEN: u64 = 4096;

/// Detect the input kind of a file.
///
/// # Example
/// ```no_run
/// use pdf2md::detect::detect_kind_from_path;
///
/// let kind = detect_kind_from_path("book.pdf").unwrap();
/// println!("{}", kind);
/// ```
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ResourceNotFound(path.to_path_buf()));
    }

    let mut head = Vec::new();
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut head)?;
    detect_kind_from_bytes(&head)
}

/// Detect the input kind from the leading bytes of a file.
///
/// Anything that is not a PDF is raw text and must be valid UTF-8; other
/// encodings are reported as [`Error::DecodeFailure`]. A multi-byte
/// character cut off at the end of `data` is tolerated.
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<InputKind> {
    if data.starts_with(PDF_MAGIC) {
        if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
            return Err(Error::UnknownFormat);
        }
        let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
        let version = String::from_utf8_lossy(version_bytes).to_string();
        if !is_valid_version(&version) {
            return Err(Error::UnknownFormat);
        }
        return Ok(InputKind::Pdf { version });
    }

    let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match std::str::from_utf8(body) {
        Ok(_) => Ok(InputKind::RawText),
        // Truncated trailing character, not invalid data
        Err(e) if e.error_len().is_none() => Ok(InputKind::RawText),
        Err(e) => Err(Error::DecodeFailure(format!(
            "invalid UTF-8 at byte {}",
            e.valid_up_to()
        ))),
    }
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_kind_from_bytes(data), Ok(InputKind::Pdf { .. }))
}

/// Decode raw text bytes as UTF-8, dropping a leading byte order mark.
pub fn decode_text(data: &[u8]) -> Result<String> {
    let body = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    String::from_utf8(body.to_vec()).map_err(|e| {
        Error::DecodeFailure(format!(
            "invalid UTF-8 at byte {}",
            e.utf8_error().valid_up_to()
        ))
    })
}

/// Read and decode a raw text file.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ResourceNotFound(path.to_path_buf()));
    }
    decode_text(&std::fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pdf() {
        let kind = detect_kind_from_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(
            kind,
            InputKind::Pdf {
                version: "1.7".to_string()
            }
        );
        assert_eq!(kind.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_raw_text() {
        let kind = detect_kind_from_bytes("--- 第 1 页 ---\n第一章 引言\n".as_bytes()).unwrap();
        assert_eq!(kind, InputKind::RawText);
        assert!(!kind.is_pdf());
    }

    #[test]
    fn test_detect_truncated_utf8_tail() {
        let text = "第一章".as_bytes();
        let kind = detect_kind_from_bytes(&text[..text.len() - 1]).unwrap();
        assert_eq!(kind, InputKind::RawText);
    }

    #[test]
    fn test_detect_non_utf8_text_is_decode_failure() {
        let result = detect_kind_from_bytes(b"\xd5\xe2\xca\xc7 GBK \xce\xc4\xb1\xbe");
        assert!(matches!(result, Err(Error::DecodeFailure(msg)) if msg.contains("byte 0")));
    }

    #[test]
    fn test_detect_short_pdf_header() {
        assert!(matches!(
            detect_kind_from_bytes(b"%PDF-1"),
            Err(Error::UnknownFormat)
        ));
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }

    #[test]
    fn test_decode_text_strips_bom() {
        let text = decode_text(b"\xEF\xBB\xBFhello").unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_decode_text_rejects_invalid_utf8() {
        let result = decode_text(b"ok\xff\xfe");
        assert!(matches!(result, Err(Error::DecodeFailure(msg)) if msg.contains("byte 2")));
    }

    #[test]
    fn test_missing_file() {
        let result = read_text("/definitely/not/here.raw");
        assert!(matches!(result, Err(Error::ResourceNotFound(_))));
    }
}
