//! Audit mode: which characters of the raw text the pipeline discards.
//!
//! Two masks are built independently over the raw document: one marks the
//! spans removed by the shared [`Rule`] set, the other marks whole lines the
//! line classifier rejects. Their AND is the audit verdict.

use crate::lexicon::Lexicon;
use crate::model::{CharacterMask, MaskRun};
use crate::sanitize::lines::classify_lines;
use crate::sanitize::rules::{self, Rule};
use crate::sanitize::tokens::strip_border;
use crate::sanitize::SanitizeOptions;
use serde::Serialize;
use tracing::debug;

/// Result of auditing a raw text.
#[derive(Debug, Clone, Serialize)]
pub struct Audit {
    /// Spans surviving every enabled rule
    pub regex_mask: CharacterMask,
    /// Characters on lines the classifier accepts
    pub line_mask: CharacterMask,
    /// `regex_mask AND line_mask`
    pub mask: CharacterMask,
    /// Discarded characters the filter replaces with a space rather than deletes
    pub separators: CharacterMask,
}

impl Audit {
    /// Kept and discarded runs of `text` under the final mask.
    pub fn runs<'a>(&self, text: &'a str) -> Vec<MaskRun<'a>> {
        self.mask.runs(text)
    }

    /// Kept characters of `text`.
    ///
    /// Each discarded run that holds a separator becomes one space, so words
    /// split by a blanked symbol stay split.
    pub fn kept_text(&self, text: &str) -> String {
        let mut kept = String::with_capacity(text.len());
        let mut pending_space = false;
        for (i, c) in text.chars().enumerate() {
            if self.mask.get(i).unwrap_or(true) {
                if pending_space {
                    kept.push(' ');
                    pending_space = false;
                }
                kept.push(c);
            } else if self.separators.get(i).unwrap_or(false) {
                pending_space = true;
            }
        }
        kept
    }

    /// Whitespace tokens of the kept text with border punctuation stripped.
    pub fn kept_tokens(&self, text: &str) -> Vec<String> {
        self.kept_text(text)
            .split_whitespace()
            .map(strip_border)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Share of characters kept, in `0.0..=1.0`.
    pub fn kept_ratio(&self) -> f64 {
        if self.mask.is_empty() {
            0.0
        } else {
            self.mask.kept_count() as f64 / self.mask.len() as f64
        }
    }
}

/// Rules the audit marks, honouring the same stage switches as the filter.
pub fn audit_rules(lexicon: &Lexicon, options: &SanitizeOptions) -> Vec<Rule> {
    let mut selected = Vec::new();
    if options.trim_metadata {
        selected.extend_from_slice(rules::METADATA_RULES);
    }
    if options.resolve_citations {
        selected.extend_from_slice(rules::citation_rules(lexicon));
    }
    if options.join_hyphenated {
        selected.push(Rule::LineBreakHyphen);
    }
    if options.clean_residue {
        selected.extend_from_slice(rules::RESIDUE_RULES);
    }
    selected
}

/// Per-byte masks of rule spans: kept bytes, and bytes only ever blanked to a space.
fn regex_byte_masks(
    text: &str,
    lexicon: &Lexicon,
    options: &SanitizeOptions,
) -> (Vec<bool>, Vec<bool>) {
    let mut deleted = vec![false; text.len()];
    let mut blanked = vec![false; text.len()];
    for rule in audit_rules(lexicon, options) {
        let spans = rule.find_spans(text, lexicon, options);
        debug!(rule = rule.name(), spans = spans.len(), "audit rule applied");
        let marks = if rule.replacement().is_empty() {
            &mut deleted
        } else {
            &mut blanked
        };
        for span in spans {
            marks[span].fill(true);
        }
    }

    let keep = deleted
        .iter()
        .zip(&blanked)
        .map(|(d, b)| !d && !b)
        .collect();
    let separators = deleted.iter().zip(&blanked).map(|(d, b)| !d && *b).collect();
    (keep, separators)
}

/// Per-byte mask with every rejected line marked false. Newlines stay true.
fn line_byte_mask(text: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> Vec<bool> {
    let mut keep = vec![true; text.len()];
    if !options.filter_lines {
        return keep;
    }
    for (span, useful) in classify_lines(text, lexicon, options) {
        if !useful {
            keep[span].fill(false);
        }
    }
    keep
}

/// Builds the regex-stage mask over `text`.
pub fn regex_mask(text: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> CharacterMask {
    let (keep, _) = regex_byte_masks(text, lexicon, options);
    CharacterMask::from_byte_mask(text, &keep)
}

/// Builds the line-validity mask over `text`.
pub fn line_mask(text: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> CharacterMask {
    CharacterMask::from_byte_mask(text, &line_byte_mask(text, lexicon, options))
}

/// Audits `text`, computing both masks and their AND.
pub fn audit(text: &str, lexicon: &Lexicon, options: &SanitizeOptions) -> Audit {
    let ((regex_keep, separators), line_keep) = if options.parallel {
        rayon::join(
            || regex_byte_masks(text, lexicon, options),
            || line_byte_mask(text, lexicon, options),
        )
    } else {
        (
            regex_byte_masks(text, lexicon, options),
            line_byte_mask(text, lexicon, options),
        )
    };
    let regex_mask = CharacterMask::from_byte_mask(text, &regex_keep);
    let line_mask = CharacterMask::from_byte_mask(text, &line_keep);
    let separators = CharacterMask::from_byte_mask(text, &separators);

    let mask = regex_mask.and(&line_mask);
    debug!(
        chars = mask.len(),
        kept = mask.kept_count(),
        "audit complete"
    );

    Audit {
        regex_mask,
        line_mask,
        mask,
        separators,
    }
}
