//! Error types for rsvpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for rsvpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rsvpdf library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is neither a PDF nor UTF-8 text.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The PDF is encrypted and its text cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// The PDF structure could not be loaded.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// A single page failed to extract (strict mode only).
    #[error("Could not extract page {page}: {message}")]
    PageExtraction { page: u32, message: String },

    /// Every page came back empty or failed.
    #[error("No extractable text in document")]
    NoExtractableText,

    /// Invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The dictionary resource has an unexpected shape.
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Text encoding error.
    #[error("Text encoding error: {0}")]
    Encoding(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
