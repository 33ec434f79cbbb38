//! Line usefulness classifier.
//!
//! Separates sentence prose from diagram labels, equations and other
//! fragments using alphabetic density and token shape. Both the filter and
//! the audit mask walk lines through [`line_spans`] and [`classify_lines`],
//! so they see the same line boundaries and the same verdicts.

use super::tokens::{has_digit, is_stray_capital, strip_border};
use super::{casing, SanitizeOptions};
use crate::lexicon::Lexicon;
use rayon::prelude::*;
use serde::Serialize;
use std::ops::Range;

/// Characters that mark a short line as a sentence rather than a label.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Why a line was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineRejection {
    /// Empty or whitespace only
    Blank,
    /// Too few alphabetic and whitespace characters
    SymbolHeavy,
    /// No whitespace-separated tokens
    NoTokens,
    /// Short line with neither a safe word nor sentence punctuation
    ShortLabel,
    /// Too few tokens look like words
    LowValidRatio,
}

impl std::fmt::Display for LineRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            LineRejection::Blank => "blank line",
            LineRejection::SymbolHeavy => "symbol-heavy line",
            LineRejection::NoTokens => "no tokens",
            LineRejection::ShortLabel => "short label",
            LineRejection::LowValidRatio => "too few word-like tokens",
        };
        f.write_str(reason)
    }
}

/// Per-line token statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenTally {
    /// Whitespace-separated tokens, including ones that strip to nothing
    pub total: usize,
    /// Tokens that look like words
    pub valid: usize,
    /// At least one token is a safe function word
    pub safe_word_found: bool,
}

impl TokenTally {
    /// Scores every token of an already trimmed line.
    pub fn score(line: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> Self {
        let mut tally = Self::default();

        for token in line.split_whitespace() {
            tally.total += 1;

            let clean = strip_border(token);
            if clean.is_empty()
                || has_digit(clean)
                || is_stray_capital(clean)
                || !casing::is_regular(clean)
            {
                continue;
            }

            let lower = clean.to_lowercase();
            if lexicon.is_safe_word(&lower) {
                tally.safe_word_found = true;
                tally.valid += 1;
            } else if lexicon.affirms(&lower)
                || clean.chars().count() > options.min_unlisted_word_len
            {
                tally.valid += 1;
            }
        }

        tally
    }

    /// Fraction of tokens that look like words.
    pub fn valid_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.valid as f64 / self.total as f64
        }
    }
}

/// Fraction of characters that are alphabetic or whitespace.
fn alpha_ratio(line: &str) -> f64 {
    let mut total = 0usize;
    let mut alpha = 0usize;
    for c in line.chars() {
        total += 1;
        if c.is_alphabetic() || c.is_whitespace() {
            alpha += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        alpha as f64 / total as f64
    }
}

/// Classifies one line, naming the first check it fails.
pub fn classify_line(
    line: &str,
    lexicon: &Lexicon,
    options: &SanitizeOptions,
) -> Result<(), LineRejection> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(LineRejection::Blank);
    }

    if alpha_ratio(trimmed) < options.min_alpha_ratio {
        return Err(LineRejection::SymbolHeavy);
    }

    let tally = TokenTally::score(trimmed, lexicon, options);
    if tally.total == 0 {
        return Err(LineRejection::NoTokens);
    }

    if tally.total < options.short_line_tokens {
        let ends_sentence = trimmed.ends_with(SENTENCE_TERMINATORS);
        if !tally.safe_word_found && !ends_sentence {
            return Err(LineRejection::ShortLabel);
        }
    }

    if tally.valid_ratio() < options.min_valid_ratio {
        return Err(LineRejection::LowValidRatio);
    }

    Ok(())
}

/// Returns true if the line reads like sentence prose.
pub fn is_useful(line: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> bool {
    classify_line(line, lexicon, options).is_ok()
}

/// Byte ranges of the `\n`-delimited lines of `text`, terminators excluded.
///
/// A trailing newline yields a final empty line, so every byte except the
/// separators belongs to exactly one range.
pub fn line_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            spans.push(start..i);
            start = i + 1;
        }
    }
    spans.push(start..text.len());
    spans
}

/// Classifies every line of `text`, pairing each span with its verdict.
pub fn classify_lines(
    text: &str,
    lexicon: &Lexicon,
    options: &SanitizeOptions,
) -> Vec<(Range<usize>, bool)> {
    let spans = line_spans(text);
    let verdict = |span: Range<usize>| {
        let useful = is_useful(&text[span.clone()], lexicon, options);
        (span, useful)
    };

    if options.parallel {
        spans.into_par_iter().map(verdict).collect()
    } else {
        spans.into_iter().map(verdict).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Dictionary;

    fn classify(line: &str) -> Result<(), LineRejection> {
        classify_line(line, &Lexicon::default(), &SanitizeOptions::default())
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(classify(""), Err(LineRejection::Blank));
        assert_eq!(classify("   \t "), Err(LineRejection::Blank));
    }

    #[test]
    fn test_symbol_heavy_equation() {
        assert_eq!(classify("x(1:H) = W·h + b"), Err(LineRejection::SymbolHeavy));
    }

    #[test]
    fn test_short_label_rejected() {
        assert_eq!(classify("Layer input projection"), Err(LineRejection::ShortLabel));
        assert_eq!(classify("Parallel scan"), Err(LineRejection::ShortLabel));
    }

    #[test]
    fn test_short_sentence_kept() {
        assert_eq!(classify("The model learns well."), Ok(()));
        // Safe word rescues a short line without punctuation
        assert_eq!(classify("results of the method"), Ok(()));
        // Terminal punctuation rescues a short line without a safe word
        assert_eq!(classify("Results improve considerably."), Ok(()));
    }

    #[test]
    fn test_low_valid_ratio() {
        // Long enough to skip the label rule, but mostly short unknown fragments
        let line = "xy ab cd ef gh ij kl mn op";
        assert_eq!(classify(line), Err(LineRejection::LowValidRatio));
    }

    #[test]
    fn test_irregular_tokens_count_against_line() {
        let line = "yNon S4 B the fooBar qux.";
        assert_eq!(classify(line), Err(LineRejection::LowValidRatio));
    }

    #[test]
    fn test_long_prose_line() {
        let line = "We propose a selective state space model that scales linearly";
        assert_eq!(classify(line), Ok(()));
    }

    #[test]
    fn test_dictionary_affirms_short_words() {
        let options = SanitizeOptions::default();
        // Seven three-letter tokens; only "old" is a safe word
        let line = "cat ran far old dog bit red";
        let without = Lexicon::default();
        assert!(!is_useful(line, &without, &options));

        let dict = Dictionary::from_words(["cat", "ran", "far", "dog", "bit", "red"]);
        let with = Lexicon::with_dictionary(dict);
        assert!(is_useful(line, &with, &options));
    }

    #[test]
    fn test_falsy_dictionary_entry_not_affirmed() {
        let options = SanitizeOptions::default();
        let dict = Dictionary::from_json_str(
            r#"{"cat": 0, "ran": 0, "far": 0, "dog": 0, "bit": 0, "red": 0}"#,
        )
        .unwrap();
        let lexicon = Lexicon::with_dictionary(dict);
        assert!(!is_useful("cat ran far old dog bit red", &lexicon, &options));
    }

    #[test]
    fn test_token_tally() {
        let options = SanitizeOptions::default();
        let tally = TokenTally::score("The (model) S4 ...", &Lexicon::default(), &options);
        assert_eq!(tally.total, 4);
        assert_eq!(tally.valid, 2);
        assert!(tally.safe_word_found);
    }

    #[test]
    fn test_line_spans() {
        let text = "one\ntwo\n\nthree";
        let spans = line_spans(text);
        let lines: Vec<&str> = spans.iter().map(|s| &text[s.clone()]).collect();
        assert_eq!(lines, vec!["one", "two", "", "three"]);

        assert_eq!(line_spans(""), vec![0..0]);
        assert_eq!(line_spans("a\n"), vec![0..1, 2..2]);
    }

    #[test]
    fn test_classify_lines_parallel_matches_sequential() {
        let text = "Introduction\nThe model learns well.\nLayer input projection\nx = y + z";
        let lexicon = Lexicon::default();
        let parallel = classify_lines(text, &lexicon, &SanitizeOptions::default());
        let sequential = classify_lines(
            text,
            &lexicon,
            &SanitizeOptions::default().with_parallel(false),
        );
        assert_eq!(parallel, sequential);
        let kept: Vec<bool> = parallel.iter().map(|(_, keep)| *keep).collect();
        assert_eq!(kept, vec![false, true, false, false]);
    }
}
