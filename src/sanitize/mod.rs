//! # Sanitization Pipeline
//!
//! A 5-stage pipeline that reduces text extracted from an academic paper to
//! the word sequence of its body prose.
//!
//! ## Pipeline Stages
//!
//! 1. **Stage 1: Metadata Trimming** - Front matter, back matter, stamps, emails, affiliations
//! 2. **Stage 2: Line Filtering** - Drops labels, equations and fragments; joins kept lines
//! 3. **Stage 3: Citation Resolution** - Keeps prose in brackets, drops citations
//! 4. **Stage 4: Residue Cleaning** - URLs, DOIs, math symbols, whitespace
//! 5. **Stage 5: Token Filtering** - Digits, irregular casing, stray characters, markup

pub mod casing;
pub mod lines;
pub mod rules;
pub mod tokens;

use crate::lexicon::Lexicon;
use lines::classify_lines;
use regex::Regex;
use rules::Rule;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static RE_WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Sanitization configuration options
#[derive(Debug, Clone)]
pub struct SanitizeOptions {
    /// Enable Stage 1: Metadata trimming
    pub trim_metadata: bool,
    /// Enable Stage 2: Line filtering
    pub filter_lines: bool,
    /// Rejoin words hyphenated across a line break
    pub join_hyphenated: bool,
    /// Enable Stage 3: Citation resolution
    pub resolve_citations: bool,
    /// Enable Stage 4: Residue cleaning
    pub clean_residue: bool,
    /// Enable Stage 5: Token filtering
    pub filter_tokens: bool,
    /// Classify lines and build audit masks on the rayon pool
    pub parallel: bool,
    /// Characters searched for the Abstract/Introduction heading
    pub head_window: usize,
    /// Minimum share of alphabetic and whitespace characters in a kept line
    pub min_alpha_ratio: f64,
    /// Lines with fewer tokens need a safe word or sentence punctuation
    pub short_line_tokens: usize,
    /// Unlisted words count as valid when longer than this
    pub min_unlisted_word_len: usize,
    /// Minimum share of valid tokens in a kept line
    pub min_valid_ratio: f64,
    /// Minimum share of dictionary words in a kept bracketed span
    pub min_prose_ratio: f64,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            trim_metadata: true,
            filter_lines: true,
            join_hyphenated: true,
            resolve_citations: true,
            clean_residue: true,
            filter_tokens: true,
            parallel: true,
            head_window: 5000,
            min_alpha_ratio: 0.70,
            short_line_tokens: 7,
            min_unlisted_word_len: 3,
            min_valid_ratio: 0.6,
            min_prose_ratio: 0.5,
        }
    }
}

impl SanitizeOptions {
    /// Creates options with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that keep more borderline lines
    pub fn lenient() -> Self {
        Self {
            min_alpha_ratio: 0.60,
            short_line_tokens: 5,
            min_valid_ratio: 0.5,
            min_prose_ratio: 0.4,
            ..Self::default()
        }
    }

    /// Creates options that discard more borderline lines
    pub fn strict() -> Self {
        Self {
            min_alpha_ratio: 0.80,
            short_line_tokens: 9,
            min_valid_ratio: 0.7,
            min_prose_ratio: 0.6,
            ..Self::default()
        }
    }

    /// Enables or disables metadata trimming.
    pub fn with_trim_metadata(mut self, enabled: bool) -> Self {
        self.trim_metadata = enabled;
        self
    }

    /// Enables or disables line filtering.
    pub fn with_filter_lines(mut self, enabled: bool) -> Self {
        self.filter_lines = enabled;
        self
    }

    /// Enables or disables line-break hyphen repair.
    pub fn with_join_hyphenated(mut self, enabled: bool) -> Self {
        self.join_hyphenated = enabled;
        self
    }

    /// Enables or disables citation resolution.
    pub fn with_resolve_citations(mut self, enabled: bool) -> Self {
        self.resolve_citations = enabled;
        self
    }

    /// Enables or disables residue cleaning.
    pub fn with_clean_residue(mut self, enabled: bool) -> Self {
        self.clean_residue = enabled;
        self
    }

    /// Enables or disables token filtering.
    pub fn with_filter_tokens(mut self, enabled: bool) -> Self {
        self.filter_tokens = enabled;
        self
    }

    /// Enables or disables rayon parallelism.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the heading search window in characters.
    pub fn with_head_window(mut self, chars: usize) -> Self {
        self.head_window = chars;
        self
    }

    /// Sets the minimum alphabetic ratio of a kept line.
    pub fn with_min_alpha_ratio(mut self, ratio: f64) -> Self {
        self.min_alpha_ratio = ratio;
        self
    }

    /// Sets the token count below which the short-line rule applies.
    pub fn with_short_line_tokens(mut self, tokens: usize) -> Self {
        self.short_line_tokens = tokens;
        self
    }

    /// Sets the minimum valid-token ratio of a kept line.
    pub fn with_min_valid_ratio(mut self, ratio: f64) -> Self {
        self.min_valid_ratio = ratio;
        self
    }

    /// Sets the minimum dictionary ratio of a kept bracketed span.
    pub fn with_min_prose_ratio(mut self, ratio: f64) -> Self {
        self.min_prose_ratio = ratio;
        self
    }
}

fn apply_rules(
    text: String,
    rules: &[Rule],
    lexicon: &Lexicon,
    options: &SanitizeOptions,
) -> String {
    rules
        .iter()
        .fold(text, |acc, rule| rule.apply(&acc, lexicon, options))
}

// ============================================================================
// Stage 1: Metadata Trimming
// ============================================================================

/// Stage 1: Strip document boilerplate
///
/// - Header before the Abstract/Introduction heading
/// - Everything from the References/Appendix heading onward
/// - arXiv stamps, venue footers, emails
/// - Affiliation lines and submission notices
pub fn stage1_trim_metadata(input: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> String {
    apply_rules(input.to_string(), rules::METADATA_RULES, lexicon, options)
}

// ============================================================================
// Stage 2: Line Filtering
// ============================================================================

/// Stage 2: Keep useful lines and join them with single spaces
///
/// A kept line ending in a line-break hyphen is glued to the next line
/// without the hyphen, provided that line is kept too.
pub fn stage2_filter_lines(input: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> String {
    let verdicts = classify_lines(input, lexicon, options);

    // Newline offset -> offset of the hyphen that precedes it
    let hyphen_breaks: HashMap<usize, usize> = if options.join_hyphenated {
        Rule::LineBreakHyphen
            .find_spans(input, lexicon, options)
            .into_iter()
            .map(|span| (span.end - 1, span.start))
            .collect()
    } else {
        HashMap::new()
    };

    let mut result = String::with_capacity(input.len());
    let mut first = true;
    let mut glue = false;
    let mut kept = 0usize;

    for (i, (span, useful)) in verdicts.iter().enumerate() {
        if !useful {
            continue;
        }
        kept += 1;

        if !first && !glue {
            result.push(' ');
        }
        first = false;

        let next_kept = verdicts.get(i + 1).is_some_and(|(_, useful)| *useful);
        let end = match hyphen_breaks.get(&span.end) {
            Some(&hyphen) if next_kept && hyphen >= span.start => hyphen,
            _ => span.end,
        };
        glue = end != span.end;

        result.push_str(&input[span.start..end]);
    }

    debug!(lines = verdicts.len(), kept, "line filter complete");
    result
}

// ============================================================================
// Stage 3: Citation Resolution
// ============================================================================

/// Stage 3: Remove citations and non-prose bracketed spans
///
/// With a dictionary, bracketed spans survive when enough of their words
/// are known. Without one, numeric and author-year citation shapes are removed.
pub fn stage3_resolve_citations(
    input: &str,
    lexicon: &Lexicon,
    options: &SanitizeOptions,
) -> String {
    apply_rules(
        input.to_string(),
        rules::citation_rules(lexicon),
        lexicon,
        options,
    )
}

// ============================================================================
// Stage 4: Residue Cleaning
// ============================================================================

/// Stage 4: Remove URLs and DOIs, blank math symbols, collapse whitespace
pub fn stage4_clean_residue(input: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> String {
    let cleaned = apply_rules(input.to_string(), rules::RESIDUE_RULES, lexicon, options);
    RE_WHITESPACE_RUN.replace_all(&cleaned, " ").into_owned()
}

// ============================================================================
// Stage 5: Token Filtering
// ============================================================================

/// Stage 5: Split into words, dropping tokens that are not plain words
pub fn stage5_filter_tokens(input: &str) -> Vec<String> {
    tokens::filter_tokens(input)
}

// ============================================================================
// Main Pipeline
// ============================================================================

/// Run the sanitization pipeline over raw extracted text.
///
/// Never fails: empty or fully discarded input yields an empty sequence.
pub fn sanitize(raw: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut text = raw.to_string();

    if options.trim_metadata {
        text = stage1_trim_metadata(&text, lexicon, options);
        debug!(chars = text.len(), "metadata trimmed");
    }

    if options.filter_lines {
        text = stage2_filter_lines(&text, lexicon, options);
    } else if options.join_hyphenated {
        text = Rule::LineBreakHyphen.apply(&text, lexicon, options);
    }

    if options.resolve_citations {
        text = stage3_resolve_citations(&text, lexicon, options);
        debug!(chars = text.len(), "citations resolved");
    }

    if options.clean_residue {
        text = stage4_clean_residue(&text, lexicon, options);
    }

    let words = if options.filter_tokens {
        stage5_filter_tokens(&text)
    } else {
        text.split_whitespace().map(str::to_string).collect()
    };

    debug!(words = words.len(), "sanitization complete");
    words
}

/// Run the pipeline with default options and no dictionary.
pub fn sanitize_default(raw: &str) -> Vec<String> {
    sanitize(raw, &Lexicon::default(), &SanitizeOptions::default())
}
