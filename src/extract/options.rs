//! Options for text extraction.

/// Options for controlling page extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How to handle pages that fail to extract.
    pub error_mode: ErrorMode,

    /// Whether to NFC-normalize extracted text.
    pub normalize_unicode: bool,

    /// Stop after this many pages (0 = all pages).
    pub max_pages: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            normalize_unicode: true,
            max_pages: 0,
        }
    }
}

impl ExtractOptions {
    /// Creates new options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets lenient error handling (skip failing pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Sets strict error handling (fail on the first failing page).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Disables Unicode normalization.
    pub fn without_normalization(mut self) -> Self {
        self.normalize_unicode = false;
        self
    }

    /// Limits extraction to the first `pages` pages.
    pub fn with_max_pages(mut self, pages: usize) -> Self {
        self.max_pages = pages;
        self
    }

    /// Returns true if failing pages should be skipped.
    pub fn is_lenient(&self) -> bool {
        matches!(self.error_mode, ErrorMode::Lenient)
    }
}

/// How to handle page extraction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first page that cannot be extracted.
    Strict,
    /// Skip failing pages with a warning and continue.
    #[default]
    Lenient,
}
