//! Raw extracted text and its page bookkeeping.

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// Text extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageText {
    /// 1-based page number
    pub number: u32,
    /// Extracted text
    pub text: String,
}

impl PageText {
    /// Creates a page.
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    /// Returns true if the page holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The immutable source text shared by the filter and the audit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawDocument {
    text: String,
    page_count: usize,
    skipped_pages: Vec<u32>,
}

impl RawDocument {
    /// Wraps already-extracted text as a single-page document.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let skipped_pages = if text.trim().is_empty() { vec![1] } else { Vec::new() };
        Self {
            text,
            page_count: 1,
            skipped_pages,
        }
    }

    /// Concatenates pages in order, each followed by one space.
    ///
    /// Blank pages are skipped, as are page numbers up to `page_count` that
    /// are missing from `pages` (pages the extractor gave up on).
    pub fn from_pages(pages: &[PageText], page_count: usize, normalize: bool) -> Self {
        let mut text = String::new();
        let mut present = Vec::with_capacity(pages.len());

        for page in pages.iter().filter(|p| !p.is_blank()) {
            if normalize {
                text.extend(page.text.nfc());
            } else {
                text.push_str(&page.text);
            }
            text.push(' ');
            present.push(page.number);
        }

        let page_count = page_count.max(pages.len());
        let skipped_pages = (1..=page_count as u32)
            .filter(|n| !present.contains(n))
            .collect();

        Self {
            text,
            page_count,
            skipped_pages,
        }
    }

    /// Returns the full text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of pages in the source.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns the 1-based numbers of pages that contributed no text.
    pub fn skipped_pages(&self) -> &[u32] {
        &self.skipped_pages
    }

    /// Returns the number of characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns true if no page contributed text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl AsRef<str> for RawDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
