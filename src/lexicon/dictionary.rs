//! Word dictionary backing the language-ratio heuristics.
//!
//! The resource is a JSON object mapping words to arbitrary values (the
//! common `words_dictionary.json` layout maps every word to `1`), or a plain
//! word list with one word per line.

use crate::error::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Read-only word lookup loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    /// Lowercased word -> truthiness of the stored value
    entries: HashMap<String, bool>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dictionary in which every given word is present and affirmed.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = words
            .into_iter()
            .map(|w| (w.as_ref().to_lowercase(), true))
            .collect();
        Self { entries }
    }

    /// Parses a JSON object resource.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(Error::Dictionary(
                "expected a JSON object mapping words to values".into(),
            ));
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (word, flag) in map {
            let truthy = is_truthy(&flag);
            // Keys differing only in case collapse; any truthy spelling wins
            entries
                .entry(word.to_lowercase())
                .and_modify(|t: &mut bool| *t |= truthy)
                .or_insert(truthy);
        }

        Ok(Self { entries })
    }

    /// Parses a newline-separated word list. Blank lines and `#` comments are skipped.
    pub fn from_word_list(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Loads a dictionary file; `.txt` files are read as word lists, anything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_word_list = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

        if is_word_list {
            Ok(Self::from_word_list(&content))
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Returns true if the word has an entry, whatever its value.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }

    /// Returns true if the word has an entry with a truthy value.
    pub fn affirms(&self, word: &str) -> bool {
        self.entries
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(false)
    }

    /// Number of distinct lowercased entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
