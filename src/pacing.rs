//! Presentation pacing: fixation pivot and per-word display time.

use serde::Serialize;
use std::time::Duration;

/// Reading speed used when none is given.
pub const DEFAULT_WPM: u32 = 350;

/// Character index of the fixation pivot.
///
/// One-character words pivot on their only character, words of two to five
/// characters on the second, longer words just left of the middle.
pub fn pivot_index(word: &str) -> usize {
    match word.chars().count() {
        0 | 1 => 0,
        2..=5 => 1,
        len => len / 2 - 1,
    }
}

/// Splits a word around its pivot character.
///
/// Returns `None` for an empty word.
pub fn split_at_pivot(word: &str) -> Option<(&str, char, &str)> {
    let pivot = pivot_index(word);
    let (offset, c) = word.char_indices().nth(pivot)?;
    Some((&word[..offset], c, &word[offset + c.len_utf8()..]))
}

/// Display time multiplier for a word.
pub fn delay_multiplier(word: &str) -> f64 {
    if word.ends_with('.') {
        2.2
    } else if word.ends_with(',') || word.ends_with(';') {
        1.5
    } else if word.chars().count() > 10 {
        1.4
    } else {
        1.0
    }
}

/// Display time for a word at `wpm` words per minute. A speed of 0 counts as 1.
pub fn word_delay(word: &str, wpm: u32) -> Duration {
    let base_ms = 60_000.0 / f64::from(wpm.max(1));
    Duration::from_millis((base_ms * delay_multiplier(word)) as u64)
}

/// One word ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame<'a> {
    /// Position in the word sequence
    pub index: usize,
    /// The full word
    pub word: &'a str,
    /// Characters before the pivot
    pub left: &'a str,
    /// The pivot character
    pub pivot: char,
    /// Characters after the pivot
    pub right: &'a str,
    /// How long to show the word
    pub delay: Duration,
}

/// Index-addressed cursor over a cleaned word sequence.
#[derive(Debug, Clone)]
pub struct Playback<'a> {
    words: &'a [String],
    position: usize,
    wpm: u32,
}

impl<'a> Playback<'a> {
    /// Starts at the first word.
    pub fn new(words: &'a [String], wpm: u32) -> Self {
        Self {
            words,
            position: 0,
            wpm: wpm.max(1),
        }
    }

    /// Current reading speed.
    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    /// Changes the reading speed for subsequent frames.
    pub fn set_wpm(&mut self, wpm: u32) {
        self.wpm = wpm.max(1);
    }

    /// Index of the next word to show.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor, clamped to the end of the sequence.
    pub fn seek(&mut self, index: usize) {
        self.position = index.min(self.words.len());
    }

    /// Words not yet shown.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.position
    }

    /// Returns true once every word has been shown.
    pub fn is_finished(&self) -> bool {
        self.position >= self.words.len()
    }

    /// Total time to show the remaining words.
    pub fn remaining_time(&self) -> Duration {
        self.words[self.position..]
            .iter()
            .map(|w| word_delay(w, self.wpm))
            .sum()
    }

    /// Produces the next frame and advances the cursor.
    pub fn next_frame(&mut self) -> Option<Frame<'a>> {
        let words = self.words;
        while let Some(word) = words.get(self.position) {
            let index = self.position;
            self.position += 1;
            // Empty words have no pivot; skip them
            if let Some((left, pivot, right)) = split_at_pivot(word) {
                return Some(Frame {
                    index,
                    word,
                    left,
                    pivot,
                    right,
                    delay: word_delay(word, self.wpm),
                });
            }
        }
        None
    }
}

impl<'a> Iterator for Playback<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame()
    }
}
