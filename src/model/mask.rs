//! Per-character keep/discard mask.

use serde::Serialize;

/// One boolean per character of a text; `true` keeps the character.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CharacterMask {
    keep: Vec<bool>,
}

/// A maximal stretch of characters sharing one verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaskRun<'a> {
    /// Whether the run is kept
    pub kept: bool,
    /// First character index
    pub start: usize,
    /// One past the last character index
    pub end: usize,
    /// The run's text
    pub text: &'a str,
}

impl CharacterMask {
    /// Creates a mask of `len` characters, all set to `keep`.
    pub fn filled(len: usize, keep: bool) -> Self {
        Self {
            keep: vec![keep; len],
        }
    }

    /// Converts a per-byte mask of `text` into a per-character mask.
    ///
    /// A character takes the verdict of its first byte.
    pub fn from_byte_mask(text: &str, bytes: &[bool]) -> Self {
        debug_assert_eq!(text.len(), bytes.len());
        let keep = text
            .char_indices()
            .map(|(i, _)| bytes.get(i).copied().unwrap_or(true))
            .collect();
        Self { keep }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// Returns true if the mask covers no characters.
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Verdict for the character at `index`.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.keep.get(index).copied()
    }

    /// Returns the verdicts.
    pub fn as_slice(&self) -> &[bool] {
        &self.keep
    }

    /// Element-wise logical AND. The shorter mask bounds the result.
    pub fn and(&self, other: &CharacterMask) -> CharacterMask {
        let keep = self
            .keep
            .iter()
            .zip(&other.keep)
            .map(|(a, b)| *a && *b)
            .collect();
        CharacterMask { keep }
    }

    /// Number of kept characters.
    pub fn kept_count(&self) -> usize {
        self.keep.iter().filter(|k| **k).count()
    }

    /// Number of discarded characters.
    pub fn discarded_count(&self) -> usize {
        self.len() - self.kept_count()
    }

    /// Splits `text` into alternating kept and discarded runs.
    pub fn runs<'a>(&self, text: &'a str) -> Vec<MaskRun<'a>> {
        let mut runs = Vec::new();
        let mut current: Option<(bool, usize, usize)> = None;

        for (index, ((byte, _), keep)) in text.char_indices().zip(&self.keep).enumerate() {
            match current {
                Some((kept, _, _)) if kept == *keep => {}
                Some((kept, start, start_byte)) => {
                    runs.push(MaskRun {
                        kept,
                        start,
                        end: index,
                        text: &text[start_byte..byte],
                    });
                    current = Some((*keep, index, byte));
                }
                None => current = Some((*keep, index, byte)),
            }
        }

        if let Some((kept, start, start_byte)) = current {
            let covered = self.keep.len().min(text.chars().count());
            let end_byte = text
                .char_indices()
                .nth(covered)
                .map_or(text.len(), |(i, _)| i);
            runs.push(MaskRun {
                kept,
                start,
                end: covered,
                text: &text[start_byte..end_byte],
            });
        }

        runs
    }

    /// Concatenates the kept characters of `text`.
    pub fn kept_text(&self, text: &str) -> String {
        text.chars()
            .zip(&self.keep)
            .filter(|(_, keep)| **keep)
            .map(|(c, _)| c)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte_mask_multibyte() {
        let text = "aé b";
        // 'é' spans bytes 1..3
        let bytes = [true, false, false, true, true];
        let mask = CharacterMask::from_byte_mask(text, &bytes);
        assert_eq!(mask.as_slice(), &[true, false, true, true]);
    }

    #[test]
    fn test_and() {
        let a = CharacterMask {
            keep: vec![true, true, false, false],
        };
        let b = CharacterMask {
            keep: vec![true, false, true, false],
        };
        assert_eq!(a.and(&b).as_slice(), &[true, false, false, false]);
    }

    #[test]
    fn test_counts() {
        let mask = CharacterMask {
            keep: vec![true, false, true, true],
        };
        assert_eq!(mask.kept_count(), 3);
        assert_eq!(mask.discarded_count(), 1);
    }

    #[test]
    fn test_runs() {
        let text = "keep drop keep";
        let mut keep = vec![true; 14];
        for k in &mut keep[5..10] {
            *k = false;
        }
        let mask = CharacterMask { keep };
        let runs = mask.runs(text);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "keep ");
        assert!(!runs[1].kept);
        assert_eq!(runs[1].text, "drop ");
        assert_eq!((runs[1].start, runs[1].end), (5, 10));
        assert_eq!(runs[2].text, "keep");
    }

    #[test]
    fn test_runs_multibyte() {
        let text = "αβγ";
        let mask = CharacterMask {
            keep: vec![true, false, false],
        };
        let runs = mask.runs(text);
        assert_eq!(runs[0].text, "α");
        assert_eq!(runs[1].text, "βγ");
        assert_eq!(runs[1].end, 3);
    }

    #[test]
    fn test_runs_empty() {
        assert!(CharacterMask::default().runs("").is_empty());
    }

    #[test]
    fn test_kept_text() {
        let mask = CharacterMask {
            keep: vec![true, false, true],
        };
        assert_eq!(mask.kept_text("a-b"), "ab");
        assert_eq!(CharacterMask::filled(3, true).kept_text("abc"), "abc");
    }
}
