//! Span removal rules shared by the filter and the audit mask.
//!
//! Each [`Rule`] locates byte spans of boilerplate in a text. The filter
//! deletes (or blanks) those spans stage by stage, while the audit marks the
//! same spans as discarded in the raw document.

use super::SanitizeOptions;
use crate::lexicon::Lexicon;
use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::sync::LazyLock;

// ============================================================================
// Patterns
// ============================================================================

static RE_FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*(?:Abstract|ABSTRACT|Introduction|INTRODUCTION)").unwrap());

static RE_BACK_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:References|REFERENCES|Bibliography|BIBLIOGRAPHY|Appendix|APPENDIX|Appendices|APPENDICES)(?:\s+[A-Z0-9]*)?\s*$",
    )
    .unwrap()
});

static RE_ARXIV_STAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)arXiv:[\d\.]+(?:v\d+)?\s*\[.*?\]").unwrap());

static RE_VENUE_FOOTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Published as a conference paper at.*").unwrap());

// Braced multi-author local parts may contain spaces; plain local parts may not
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[\w\.,\s-]+\}@[\w\.-]+\.\w+|[\w\.+-]+@[\w\.-]+\.\w+").unwrap()
});

static RE_AFFILIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*[\d\*,†‡§]*\s*.*(?:University|Institute|Department|Laboratory|School of|Center for|Inc\.|Ltd\.).*$",
    )
    .unwrap()
});

static RE_SUBMISSION_NOTICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i).*(?:submitted to|accepted by|preprint|conference|journal).*").unwrap()
});

static RE_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^\)]+\)|\[[^\]]+\]").unwrap());

static RE_NUMERIC_CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*[\d,\s-]+\s*\]").unwrap());

static RE_AUTHOR_YEAR_CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z][a-zA-Z\s.,&]+,?\s\d{4}[a-z]?\)").unwrap());

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://\S+").unwrap());

static RE_DOI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"doi:\S+").unwrap());

static RE_LINE_BREAK_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[ \t\r]*\n").unwrap());

static RE_MATH_SYMBOL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[=+\-*/<>^~∫∑∏√∞∂∇≈≠≤≥\x{2010}-\x{2015}\x{2212}]").unwrap()
});

static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());

// ============================================================================
// Rules
// ============================================================================

/// A category of removable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Everything before the Abstract/Introduction heading
    FrontMatter,
    /// Everything from the References/Appendix heading onward
    BackMatter,
    /// `arXiv:2312.00752v2 [cs.LG]`
    ArxivStamp,
    /// "Published as a conference paper at ..." to end of line
    VenueFooter,
    /// Email addresses, including `{a, b}@host.org`
    Email,
    /// Lines naming a university, institute, lab or company
    Affiliation,
    /// Lines mentioning submission, acceptance, preprint, conference or journal
    SubmissionNotice,
    /// Bracketed spans that do not read as prose (dictionary required)
    Parenthetical,
    /// `[12]`, `[3, 4-7]`
    NumericCitation,
    /// `(Smith et al., 2019)`
    AuthorYearCitation,
    /// `http://` and `https://` links
    Url,
    /// `doi:` identifiers
    Doi,
    /// Hyphen at the end of a line, through the newline
    LineBreakHyphen,
    /// Math operators and dash variants
    MathSymbol,
}

/// Boilerplate rules of the metadata trimmer, in application order.
pub const METADATA_RULES: &[Rule] = &[
    Rule::FrontMatter,
    Rule::BackMatter,
    Rule::ArxivStamp,
    Rule::VenueFooter,
    Rule::Email,
    Rule::Affiliation,
    Rule::SubmissionNotice,
];

/// Residue rules, in application order.
pub const RESIDUE_RULES: &[Rule] = &[Rule::Url, Rule::Doi, Rule::MathSymbol];

const DICTIONARY_CITATION_RULES: &[Rule] = &[Rule::Parenthetical];

const FALLBACK_CITATION_RULES: &[Rule] = &[Rule::NumericCitation, Rule::AuthorYearCitation];

/// Citation rules for the given lexicon: the language-ratio test when a
/// dictionary is loaded, citation-shape patterns otherwise.
pub fn citation_rules(lexicon: &Lexicon) -> &'static [Rule] {
    if lexicon.has_dictionary() {
        DICTIONARY_CITATION_RULES
    } else {
        FALLBACK_CITATION_RULES
    }
}

impl Rule {
    /// Stable snake_case name for logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Rule::FrontMatter => "front_matter",
            Rule::BackMatter => "back_matter",
            Rule::ArxivStamp => "arxiv_stamp",
            Rule::VenueFooter => "venue_footer",
            Rule::Email => "email",
            Rule::Affiliation => "affiliation",
            Rule::SubmissionNotice => "submission_notice",
            Rule::Parenthetical => "parenthetical",
            Rule::NumericCitation => "numeric_citation",
            Rule::AuthorYearCitation => "author_year_citation",
            Rule::Url => "url",
            Rule::Doi => "doi",
            Rule::LineBreakHyphen => "line_break_hyphen",
            Rule::MathSymbol => "math_symbol",
        }
    }

    /// Text substituted for each span when the filter applies the rule.
    pub fn replacement(self) -> &'static str {
        match self {
            Rule::MathSymbol => " ",
            _ => "",
        }
    }

    /// Byte spans of `text` this rule removes, ascending and non-overlapping.
    pub fn find_spans(
        self,
        text: &str,
        lexicon: &Lexicon,
        options: &SanitizeOptions,
    ) -> Vec<Range<usize>> {
        match self {
            Rule::FrontMatter => front_matter_span(text, options).into_iter().collect(),
            Rule::BackMatter => back_matter_span(text, options).into_iter().collect(),
            Rule::ArxivStamp => matches(&RE_ARXIV_STAMP, text),
            Rule::VenueFooter => matches(&RE_VENUE_FOOTER, text),
            Rule::Email => matches(&RE_EMAIL, text),
            Rule::Affiliation => matches(&RE_AFFILIATION, text),
            Rule::SubmissionNotice => matches(&RE_SUBMISSION_NOTICE, text),
            Rule::Parenthetical => {
                if !lexicon.has_dictionary() {
                    return Vec::new();
                }
                RE_BRACKETED
                    .find_iter(text)
                    .filter(|m| !is_prose_span(m.as_str(), lexicon, options))
                    .map(|m| m.range())
                    .collect()
            }
            Rule::NumericCitation => matches(&RE_NUMERIC_CITATION, text),
            Rule::AuthorYearCitation => matches(&RE_AUTHOR_YEAR_CITATION, text),
            Rule::Url => matches(&RE_URL, text),
            Rule::Doi => matches(&RE_DOI, text),
            Rule::LineBreakHyphen => matches(&RE_LINE_BREAK_HYPHEN, text),
            Rule::MathSymbol => matches(&RE_MATH_SYMBOL, text),
        }
    }

    /// Applies the rule, replacing every span with [`Rule::replacement`].
    pub fn apply(self, text: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> String {
        let spans = self.find_spans(text, lexicon, options);
        replace_spans(text, &spans, self.replacement())
    }
}

fn matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.range()).collect()
}

/// Byte offset just past the first `window` characters.
fn char_window_end(text: &str, window: usize) -> usize {
    text.char_indices()
        .nth(window)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn front_matter_span(text: &str, options: &SanitizeOptions) -> Option<Range<usize>> {
    let window = &text[..char_window_end(text, options.head_window)];
    RE_FRONT_MATTER
        .find(window)
        .map(|m| 0..m.start())
        .filter(|span| !span.is_empty())
}

// The tail is searched only in what survives the head cut
fn back_matter_span(text: &str, options: &SanitizeOptions) -> Option<Range<usize>> {
    let from = front_matter_span(text, options).map_or(0, |span| span.end);
    RE_BACK_MATTER
        .find(&text[from..])
        .map(|m| from + m.start()..text.len())
}

/// Returns true if enough of the span's words are in the dictionary.
///
/// Punctuation is dropped before splitting, so `(see also, e.g.)` counts
/// `see`, `also` and `eg`. Spans with no words are not prose.
pub fn is_prose_span(span: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> bool {
    let cleaned = RE_NON_WORD.replace_all(span, "");
    let mut total = 0usize;
    let mut known = 0usize;
    for word in cleaned.split_whitespace() {
        total += 1;
        if lexicon.knows(word) {
            known += 1;
        }
    }
    total > 0 && known as f64 / total as f64 >= options.min_prose_ratio
}

/// Rebuilds `text` with each span replaced. Overlapping spans are clamped.
pub fn replace_spans(text: &str, spans: &[Range<usize>], replacement: &str) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in spans {
        if span.end <= cursor {
            continue;
        }
        let start = span.start.max(cursor);
        result.push_str(&text[cursor..start]);
        result.push_str(replacement);
        cursor = span.end;
    }
    result.push_str(&text[cursor..]);
    result
}
