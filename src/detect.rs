//! Format detection for input documents.

use crate::error::{Error, Result};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// PDF header marker
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Readers tolerate junk before the header, up to this many bytes
const PDF_HEADER_WINDOW: usize = 1024;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Portable Document Format
    Pdf,
    /// Already-extracted UTF-8 text
    PlainText,
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Pdf => write!(f, "PDF"),
            SourceFormat::PlainText => write!(f, "Plain text"),
        }
    }
}

/// Detect input format from a file path.
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<SourceFormat> {
    let mut file = std::fs::File::open(path)?;
    detect_format(&mut file)
}

/// Detect input format from a reader.
///
/// The reader is rewound to the start before returning.
pub fn detect_format<R: Read + Seek>(reader: &mut R) -> Result<SourceFormat> {
    reader.seek(SeekFrom::Start(0))?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    reader.seek(SeekFrom::Start(0))?;

    detect_format_from_bytes(&data)
}

/// Detect input format from bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<SourceFormat> {
    if data.is_empty() {
        return Err(Error::InvalidData("File is empty".into()));
    }

    let window = &data[..data.len().min(PDF_HEADER_WINDOW)];
    if window
        .windows(PDF_MAGIC.len())
        .any(|candidate| candidate == PDF_MAGIC)
    {
        return Ok(SourceFormat::Pdf);
    }

    if std::str::from_utf8(data).is_ok() {
        return Ok(SourceFormat::PlainText);
    }

    Err(Error::UnknownFormat)
}
