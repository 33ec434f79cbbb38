//! Lexical context shared by every classifier.
//!
//! A [`Lexicon`] bundles the optional [`Dictionary`] with the fixed safe-word
//! set. It is built once, never mutated, and passed by reference into each
//! stage so that classification is a pure function of its inputs.

mod dictionary;

pub use dictionary::Dictionary;

use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{info, warn};

/// File name looked up by [`Lexicon::discover`].
pub const DEFAULT_DICTIONARY_FILE: &str = "dictionary.json";

/// Common short function words that rescue short sentences and tokens.
pub const SAFE_WORDS: &[&str] = &[
    "a", "an", "as", "at", "am", "be", "by", "do", "go", "he", "hi", "if", "in", "is", "it", "me",
    "my", "no", "of", "on", "or", "ok", "so", "to", "up", "us", "we", "i", "the", "and", "but",
    "for", "not", "yes", "can", "did", "put", "say", "she", "too", "use", "who", "why", "you",
    "are", "all", "any", "day", "get", "has", "him", "his", "how", "man", "new", "now", "old",
    "one", "out", "own", "see", "two", "way", "our", "that", "this", "these", "those", "with",
    "from", "have",
];

static SAFE_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SAFE_WORDS.iter().copied().collect());

/// Whether the dictionary-backed heuristics are active, and why not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DictionaryStatus {
    /// Dictionary loaded with this many entries.
    Loaded { words: usize },
    /// No dictionary file was found.
    Missing,
    /// A dictionary file was found but could not be used.
    Failed { reason: String },
    /// Dictionary lookups were switched off by the caller.
    Disabled,
}

impl DictionaryStatus {
    /// Returns true when the regex-only fallbacks are in effect.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, DictionaryStatus::Loaded { .. })
    }
}

impl std::fmt::Display for DictionaryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DictionaryStatus::Loaded { words } => write!(f, "loaded ({} words)", words),
            DictionaryStatus::Missing => write!(f, "dictionary missing"),
            DictionaryStatus::Failed { reason } => write!(f, "dictionary unavailable: {}", reason),
            DictionaryStatus::Disabled => write!(f, "disabled"),
        }
    }
}

/// Immutable lexical context for the sanitization pipeline.
#[derive(Debug, Clone)]
pub struct Lexicon {
    dictionary: Option<Dictionary>,
    status: DictionaryStatus,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::without_dictionary()
    }
}

impl Lexicon {
    /// Creates a lexicon with regex-only fallbacks.
    pub fn without_dictionary() -> Self {
        Self {
            dictionary: None,
            status: DictionaryStatus::Disabled,
        }
    }

    /// Creates a lexicon around an already loaded dictionary.
    ///
    /// An empty dictionary cannot back any heuristic and degrades to
    /// regex-only mode.
    pub fn with_dictionary(dictionary: Dictionary) -> Self {
        if dictionary.is_empty() {
            return Self {
                dictionary: None,
                status: DictionaryStatus::Failed {
                    reason: "empty dictionary".to_string(),
                },
            };
        }
        Self {
            status: DictionaryStatus::Loaded {
                words: dictionary.len(),
            },
            dictionary: Some(dictionary),
        }
    }

    /// Loads the dictionary at `path`, degrading to regex-only mode on any failure.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "dictionary not found; using regex-only filtering");
            return Self {
                dictionary: None,
                status: DictionaryStatus::Missing,
            };
        }

        match Dictionary::load(path) {
            Ok(dictionary) if dictionary.is_empty() => {
                warn!(path = %path.display(), "dictionary is empty; using regex-only filtering");
                Self::with_dictionary(dictionary)
            }
            Ok(dictionary) => {
                info!(path = %path.display(), words = dictionary.len(), "dictionary loaded");
                Self::with_dictionary(dictionary)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "dictionary unusable; using regex-only filtering");
                Self {
                    dictionary: None,
                    status: DictionaryStatus::Failed {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Loads `dictionary.json` from the first well-known location that has one.
    pub fn discover() -> Self {
        match default_dictionary_locations()
            .into_iter()
            .find(|candidate| candidate.is_file())
        {
            Some(path) => Self::from_path(path),
            None => {
                warn!("no {} found; using regex-only filtering", DEFAULT_DICTIONARY_FILE);
                Self {
                    dictionary: None,
                    status: DictionaryStatus::Missing,
                }
            }
        }
    }

    /// Returns the dictionary, if one is loaded.
    pub fn dictionary(&self) -> Option<&Dictionary> {
        self.dictionary.as_ref()
    }

    /// Returns true if dictionary-backed heuristics are active.
    pub fn has_dictionary(&self) -> bool {
        self.dictionary.is_some()
    }

    /// Returns the dictionary status for display by the host.
    pub fn status(&self) -> &DictionaryStatus {
        &self.status
    }

    /// Returns true if `lowercase` is one of the safe function words.
    pub fn is_safe_word(&self, lowercase: &str) -> bool {
        SAFE_WORD_SET.contains(lowercase)
    }

    /// Dictionary presence lookup. Always false without a dictionary.
    pub fn knows(&self, word: &str) -> bool {
        self.dictionary.as_ref().is_some_and(|d| d.contains(word))
    }

    /// Dictionary truthy lookup. Always false without a dictionary.
    pub fn affirms(&self, word: &str) -> bool {
        self.dictionary.as_ref().is_some_and(|d| d.affirms(word))
    }
}

/// Candidate dictionary paths: next to the executable, then the working directory.
pub fn default_dictionary_locations() -> Vec<PathBuf> {
    let mut locations = Vec::with_capacity(2);

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        locations.push(dir.join(DEFAULT_DICTIONARY_FILE));
    }
    locations.push(PathBuf::from(DEFAULT_DICTIONARY_FILE));

    locations
}
