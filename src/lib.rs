//! # rsvpdf
//!
//! Extracts the body prose of academic PDF papers as a flat word sequence
//! suitable for rapid serial visual presentation (one word at a time).
//!
//! Scientific papers carry a lot of text that is not prose: headers,
//! affiliations, citations, equations, figure labels, references. A
//! multi-stage heuristic pipeline strips it using line and token statistics
//! plus an optional word dictionary. An audit mode reports, per character of
//! the raw text, what the pipeline keeps.
//!
//! ## Quick Start
//!
//! ```no_run
//! use rsvpdf::Rsvpdf;
//!
//! fn main() -> rsvpdf::Result<()> {
//!     let document = Rsvpdf::new()
//!         .with_dictionary("dictionary.json")
//!         .open("paper.pdf")?;
//!
//!     for word in document.words() {
//!         println!("{}", word);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`sanitize`]: the filter pipeline
//! - [`audit`]: per-character keep/discard masks
//! - [`extract`]: PDF and plain-text page extraction
//! - [`lexicon`]: dictionary and safe words
//! - [`pacing`]: pivot and delay computation for playback

pub mod audit;
pub mod detect;
pub mod error;
pub mod extract;
pub mod lexicon;
pub mod model;
pub mod pacing;
pub mod sanitize;

// Re-exports
pub use audit::{audit, Audit};
pub use detect::{detect_format, detect_format_from_bytes, detect_format_from_path, SourceFormat};
pub use error::{Error, Result};
pub use extract::{ErrorMode, ExtractOptions, PdfExtractor, PlainTextSource, TextSource};
pub use lexicon::{Dictionary, DictionaryStatus, Lexicon};
pub use model::{CharacterMask, MaskRun, PageText, RawDocument};
pub use pacing::{Frame, Playback};
pub use sanitize::{sanitize, SanitizeOptions};

use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Extracts the raw text of a PDF or UTF-8 text file.
///
/// Automatically detects the format and uses the appropriate source.
///
/// # Example
///
/// ```no_run
/// let raw = rsvpdf::extract_raw("paper.pdf")?;
/// println!("{} pages", raw.page_count());
/// # Ok::<(), rsvpdf::Error>(())
/// ```
pub fn extract_raw(path: impl AsRef<Path>) -> Result<RawDocument> {
    extract_raw_with_options(path, &ExtractOptions::default())
}

/// Extracts the raw text of a file with custom options.
pub fn extract_raw_with_options(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<RawDocument> {
    let data = std::fs::read(path)?;
    extract_raw_from_bytes(&data, options)
}

/// Extracts the raw text of an in-memory PDF or UTF-8 text.
pub fn extract_raw_from_bytes(data: &[u8], options: &ExtractOptions) -> Result<RawDocument> {
    match detect_format_from_bytes(data)? {
        SourceFormat::Pdf => PdfExtractor::from_bytes(data)?.load(options),
        SourceFormat::PlainText => {
            PlainTextSource::new(std::str::from_utf8(data)?).load(options)
        }
    }
}

/// Extracts the cleaned word sequence of a file.
///
/// Uses `dictionary.json` from the well-known locations when present.
///
/// # Example
///
/// ```no_run
/// let words = rsvpdf::extract_words("paper.pdf")?;
/// println!("{} words", words.len());
/// # Ok::<(), rsvpdf::Error>(())
/// ```
pub fn extract_words(path: impl AsRef<Path>) -> Result<Vec<String>> {
    Ok(Rsvpdf::new().open(path)?.into_words())
}

/// Builder for loading documents.
///
/// # Example
///
/// ```no_run
/// use rsvpdf::{Rsvpdf, SanitizeOptions};
///
/// let document = Rsvpdf::new()
///     .without_dictionary()
///     .with_sanitize_options(SanitizeOptions::strict())
///     .strict()
///     .open("paper.pdf")?;
/// println!("{} words", document.word_count());
/// # Ok::<(), rsvpdf::Error>(())
/// ```
pub struct Rsvpdf {
    lexicon: Option<Lexicon>,
    sanitize_options: SanitizeOptions,
    extract_options: ExtractOptions,
}

impl Default for Rsvpdf {
    fn default() -> Self {
        Self::new()
    }
}

impl Rsvpdf {
    /// Creates a builder that discovers `dictionary.json` on load.
    pub fn new() -> Self {
        Self {
            lexicon: None,
            sanitize_options: SanitizeOptions::default(),
            extract_options: ExtractOptions::default(),
        }
    }

    /// Uses the given lexicon.
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    /// Loads the dictionary at `path`; a missing or broken file degrades to regex-only mode.
    pub fn with_dictionary(self, path: impl AsRef<Path>) -> Self {
        self.with_lexicon(Lexicon::from_path(path))
    }

    /// Disables dictionary-backed heuristics.
    pub fn without_dictionary(self) -> Self {
        self.with_lexicon(Lexicon::without_dictionary())
    }

    /// Sets the sanitization options.
    pub fn with_sanitize_options(mut self, options: SanitizeOptions) -> Self {
        self.sanitize_options = options;
        self
    }

    /// Sets the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Fails on the first page that cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.extract_options = self.extract_options.strict();
        self
    }

    /// Skips pages that cannot be extracted.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Disables parallel processing.
    pub fn sequential(mut self) -> Self {
        self.sanitize_options = self.sanitize_options.with_parallel(false);
        self
    }

    /// Loads and sanitizes a PDF or UTF-8 text file.
    pub fn open(self, path: impl AsRef<Path>) -> Result<LoadedDocument> {
        let path = path.as_ref();
        let raw = extract_raw_with_options(path, &self.extract_options)?;
        info!(
            path = %path.display(),
            pages = raw.page_count(),
            skipped = raw.skipped_pages().len(),
            "document extracted"
        );
        Ok(self.build(raw))
    }

    /// Loads and sanitizes an in-memory PDF or UTF-8 text.
    pub fn load_bytes(self, data: &[u8]) -> Result<LoadedDocument> {
        let raw = extract_raw_from_bytes(data, &self.extract_options)?;
        Ok(self.build(raw))
    }

    /// Sanitizes already-extracted text.
    pub fn load_text(self, text: impl Into<String>) -> LoadedDocument {
        self.build(RawDocument::from_text(text))
    }

    fn build(self, raw: RawDocument) -> LoadedDocument {
        let lexicon = self.lexicon.unwrap_or_else(Lexicon::discover);
        let words = sanitize(raw.text(), &lexicon, &self.sanitize_options);
        LoadedDocument {
            raw,
            words,
            lexicon,
            options: self.sanitize_options,
        }
    }
}

/// A loaded document: raw text plus its cleaned word sequence.
pub struct LoadedDocument {
    raw: RawDocument,
    words: Vec<String>,
    lexicon: Lexicon,
    options: SanitizeOptions,
}

impl LoadedDocument {
    /// Returns the raw extracted text.
    pub fn raw(&self) -> &RawDocument {
        &self.raw
    }

    /// Returns the cleaned word sequence.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the number of cleaned words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Returns the lexicon the words were built with.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Returns the sanitization options the words were built with.
    pub fn options(&self) -> &SanitizeOptions {
        &self.options
    }

    /// Audits the raw text with the same lexicon and options.
    pub fn audit(&self) -> Audit {
        audit::audit(self.raw.text(), &self.lexicon, &self.options)
    }

    /// Starts playback at the first word.
    pub fn playback(&self, wpm: u32) -> Playback<'_> {
        Playback::new(&self.words, wpm)
    }

    /// Summarizes the document.
    pub fn stats(&self) -> DocumentStats {
        let audit = self.audit();
        DocumentStats {
            pages: self.raw.page_count(),
            skipped_pages: self.raw.skipped_pages().to_vec(),
            raw_chars: audit.mask.len(),
            kept_chars: audit.mask.kept_count(),
            words: self.words.len(),
            dictionary: self.lexicon.status().clone(),
        }
    }

    /// Consumes self and returns the word sequence.
    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

/// Document statistics.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStats {
    /// Pages in the source
    pub pages: usize,
    /// Pages that contributed no text
    pub skipped_pages: Vec<u32>,
    /// Characters of raw text
    pub raw_chars: usize,
    /// Characters the audit keeps
    pub kept_chars: usize,
    /// Words in the cleaned sequence
    pub words: usize,
    /// Dictionary state
    pub dictionary: DictionaryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "Introduction\nThe model learns well.\nReferences\n[1] Foo et al.";

    #[test]
    fn test_load_text() {
        let document = Rsvpdf::new().without_dictionary().load_text(SAMPLE);
        assert_eq!(document.words(), &["The", "model", "learns", "well"]);
        assert_eq!(document.word_count(), 4);
        assert_eq!(document.lexicon().status(), &DictionaryStatus::Disabled);
    }

    #[test]
    fn test_load_bytes_plain_text() {
        let document = Rsvpdf::new()
            .without_dictionary()
            .load_bytes(SAMPLE.as_bytes())
            .unwrap();
        assert_eq!(document.into_words(), vec!["The", "model", "learns", "well"]);
    }

    #[test]
    fn test_load_bytes_unknown_format() {
        let result = Rsvpdf::new()
            .without_dictionary()
            .load_bytes(&[0xFF, 0xFE, 0x00, 0xD8]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_open_text_file() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let document = Rsvpdf::new().without_dictionary().open(file.path()).unwrap();
        assert_eq!(document.words(), &["The", "model", "learns", "well"]);
        assert_eq!(document.raw().page_count(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let result = Rsvpdf::new().without_dictionary().open("/nonexistent/paper.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_with_dictionary_file() {
        let mut dict = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(dict, r#"{{"see": 1, "also": 1, "related": 1, "work": 1}}"#).unwrap();

        let document = Rsvpdf::new()
            .with_dictionary(dict.path())
            .load_text("Introduction\nThe model learns (see also related work) well (Smith et al., 2019).");
        assert!(document.lexicon().has_dictionary());
        assert!(document.words().contains(&"related".to_string()));
        assert!(!document.words().contains(&"Smith".to_string()));
    }

    #[test]
    fn test_audit_and_stats() {
        let document = Rsvpdf::new().without_dictionary().load_text(SAMPLE);
        let audit = document.audit();
        assert_eq!(audit.kept_tokens(document.raw().text()), document.words());

        let stats = document.stats();
        assert_eq!(stats.pages, 1);
        assert_eq!(stats.words, 4);
        assert_eq!(stats.raw_chars, SAMPLE.chars().count());
        assert!(stats.kept_chars < stats.raw_chars);
    }

    #[test]
    fn test_playback_over_words() {
        let document = Rsvpdf::new().without_dictionary().load_text(SAMPLE);
        let frames: Vec<_> = document.playback(300).collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].word, "well");
    }

    #[test]
    fn test_sequential_builder() {
        let parallel = Rsvpdf::new().without_dictionary().load_text(SAMPLE);
        let sequential = Rsvpdf::new()
            .without_dictionary()
            .sequential()
            .load_text(SAMPLE);
        assert_eq!(parallel.words(), sequential.words());
        assert!(!sequential.options().parallel);
    }
}
