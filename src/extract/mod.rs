//! Page-by-page text extraction.
//!
//! PDF pages are read with `lopdf`. Extraction is best-effort: in lenient
//! mode a page that fails is logged and skipped, and only a document with
//! no text at all is an error.

mod options;

pub use options::{ErrorMode, ExtractOptions};

use crate::error::{Error, Result};
use crate::model::{PageText, RawDocument};
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// A document that can yield text page by page.
pub trait TextSource {
    /// Number of pages in the source.
    fn page_count(&self) -> usize;

    /// Extracts pages in order. Blank pages may be returned or omitted.
    fn extract_pages(&self, options: &ExtractOptions) -> Result<Vec<PageText>>;

    /// Extracts every page and assembles the raw document.
    ///
    /// Fails with [`Error::NoExtractableText`] when no page has text.
    fn load(&self, options: &ExtractOptions) -> Result<RawDocument> {
        let pages = self.extract_pages(options)?;
        let raw = RawDocument::from_pages(&pages, self.page_count(), options.normalize_unicode);
        if raw.is_empty() {
            return Err(Error::NoExtractableText);
        }
        Ok(raw)
    }
}

/// PDF text source backed by `lopdf`.
pub struct PdfExtractor {
    document: Document,
}

impl PdfExtractor {
    /// Opens a PDF file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Loads a PDF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)?;
        if document.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { document })
    }

    fn extract_page(&self, number: u32) -> Result<String> {
        self.document
            .extract_text(&[number])
            .map_err(|e| Error::PageExtraction {
                page: number,
                message: e.to_string(),
            })
    }
}

impl TextSource for PdfExtractor {
    fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    fn extract_pages(&self, options: &ExtractOptions) -> Result<Vec<PageText>> {
        let limit = match options.max_pages {
            0 => usize::MAX,
            n => n,
        };

        let mut pages = Vec::new();
        for &number in self.document.get_pages().keys().take(limit) {
            match self.extract_page(number) {
                Ok(text) if text.trim().is_empty() => {
                    debug!(page = number, "page has no text");
                }
                Ok(text) => pages.push(PageText::new(number, text)),
                Err(e) if options.is_lenient() => {
                    warn!(page = number, error = %e, "skipping page");
                }
                Err(e) => return Err(e),
            }
        }

        debug!(pages = pages.len(), "pages extracted");
        Ok(pages)
    }
}

/// Already-extracted UTF-8 text, treated as a single page.
pub struct PlainTextSource {
    text: String,
}

impl PlainTextSource {
    /// Reads a UTF-8 text file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self {
            text: String::from_utf8(data)?,
        })
    }

    /// Wraps text already in memory.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TextSource for PlainTextSource {
    fn page_count(&self) -> usize {
        1
    }

    fn extract_pages(&self, _options: &ExtractOptions) -> Result<Vec<PageText>> {
        Ok(vec![PageText::new(1, self.text.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};
    use std::io::Write;

    /// Builds a PDF with one page per entry; empty entries give blank pages.
    fn build_pdf(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in page_texts {
            let operations = if text.is_empty() {
                Vec::new()
            } else {
                vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ]
            };
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_pdf_page_count() {
        let data = build_pdf(&["Hello World", "", "Goodbye"]);
        let extractor = PdfExtractor::from_bytes(&data).unwrap();
        assert_eq!(extractor.page_count(), 3);
    }

    #[test]
    fn test_pdf_extracts_text_and_skips_blank_pages() {
        let data = build_pdf(&["Hello World", "", "Goodbye"]);
        let extractor = PdfExtractor::from_bytes(&data).unwrap();
        let raw = extractor.load(&ExtractOptions::default()).unwrap();

        assert!(raw.text().contains("Hello World"));
        assert!(raw.text().contains("Goodbye"));
        assert_eq!(raw.page_count(), 3);
        assert_eq!(raw.skipped_pages(), &[2]);
    }

    #[test]
    fn test_pdf_max_pages() {
        let data = build_pdf(&["Hello World", "Goodbye"]);
        let extractor = PdfExtractor::from_bytes(&data).unwrap();
        let pages = extractor
            .extract_pages(&ExtractOptions::default().with_max_pages(1))
            .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 1);
    }

    #[test]
    fn test_pdf_without_text() {
        let data = build_pdf(&["", ""]);
        let extractor = PdfExtractor::from_bytes(&data).unwrap();
        assert!(matches!(
            extractor.load(&ExtractOptions::default()),
            Err(Error::NoExtractableText)
        ));
    }

    #[test]
    fn test_invalid_pdf() {
        let result = PdfExtractor::from_bytes(b"%PDF-1.7\nnot really a pdf")
            .and_then(|extractor| extractor.load(&ExtractOptions::default()));
        assert!(result.is_err());
    }

    #[test]
    fn test_open_pdf_file() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(&build_pdf(&["Hello World"])).unwrap();
        let extractor = PdfExtractor::open(file.path()).unwrap();
        assert_eq!(extractor.page_count(), 1);
    }

    #[test]
    fn test_plain_text_source() {
        let source = PlainTextSource::new("Introduction\nThe model learns well.");
        let raw = source.load(&ExtractOptions::default()).unwrap();
        assert_eq!(raw.text(), "Introduction\nThe model learns well. ");
        assert_eq!(raw.page_count(), 1);
    }

    #[test]
    fn test_plain_text_blank() {
        let source = PlainTextSource::new(" \n ");
        assert!(matches!(
            source.load(&ExtractOptions::default()),
            Err(Error::NoExtractableText)
        ));
    }

    #[test]
    fn test_plain_text_file_must_be_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, 0x00]).unwrap();
        assert!(matches!(
            PlainTextSource::open(file.path()),
            Err(Error::Encoding(_))
        ));
    }
}
