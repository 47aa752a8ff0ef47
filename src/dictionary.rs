//! Signature-keyed word dictionary.
//!
//! A [`Dictionary`] maps a [`Signature`] to every known word with exactly those letters,
//! in the order the words were first seen. It is built once from a newline-delimited word
//! list by [`DictionaryBuilder`], saved as JSON, and loaded read-only for each search.
//!
//! On disk the dictionary is a single JSON object:
//!
//! ```json
//! { "entries": { "2": ["a"], "1562": ["tea", "eat", "ate"] } }
//! ```
//!
//! Keys are decimal signatures. Loading re-encodes every word and rejects entries whose
//! key does not match, so a corrupted file never produces wrong anagrams.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::error::{AnagramError, Result};
use crate::letters::{encode, Signature};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<Signature, Vec<String>>,
}

#[derive(Serialize, Deserialize)]
struct StoredDictionary {
    entries: BTreeMap<String, Vec<String>>,
}

impl Dictionary {
    /// Group the given words by signature without any filtering.
    ///
    /// Words that are not made of `a..z` letters are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Dictionary::default();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            if let Ok(signature) = encode(&word) {
                dictionary.insert(signature, word);
            }
        }
        dictionary
    }

    fn insert(&mut self, signature: Signature, word: String) -> bool {
        let words = self.entries.entry(signature).or_default();
        if words.contains(&word) {
            return false;
        }
        words.push(word);
        true
    }

    pub fn get(&self, signature: &Signature) -> Option<&[String]> {
        self.entries.get(signature).map(Vec::as_slice)
    }

    pub fn contains(&self, signature: &Signature) -> bool {
        self.entries.contains_key(signature)
    }

    /// Letter count shared by every word of this signature.
    pub fn word_len(&self, signature: &Signature) -> Option<usize> {
        self.get(signature)
            .and_then(|words| words.first())
            .map(String::len)
    }

    /// Number of distinct signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of words across all signatures.
    pub fn word_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        let stored = StoredDictionary {
            entries: self
                .entries
                .iter()
                .map(|(sig, words)| (sig.to_string(), words.clone()))
                .collect(),
        };
        Ok(serde_json::to_string(&stored)?)
    }

    /// Parse and validate a serialized dictionary. `origin` only labels errors.
    pub fn from_json(text: &str, origin: &Path) -> Result<Self> {
        let stored: StoredDictionary =
            serde_json::from_str(text).map_err(|e| AnagramError::load(origin, e))?;

        let mut entries = HashMap::with_capacity(stored.entries.len());
        for (key, words) in stored.entries {
            let signature = key
                .parse::<Signature>()
                .map_err(|e| AnagramError::load(origin, format!("bad signature key {key:?}: {e}")))?;
            if words.is_empty() {
                return Err(AnagramError::load(origin, format!("signature {key} has no words")));
            }
            for word in &words {
                let actual = encode(word).map_err(|e| AnagramError::load(origin, e))?;
                if actual != signature {
                    return Err(AnagramError::load(
                        origin,
                        format!("word {word:?} does not match signature {key}"),
                    ));
                }
            }
            entries.insert(signature, words);
        }
        Ok(Dictionary { entries })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| AnagramError::load(path, e))?;
        let dictionary = Self::from_json(&text, path)?;
        log::debug!(
            "Loaded {} signatures ({} words) from {}",
            dictionary.len(),
            dictionary.word_count(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| AnagramError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Read a whole word-list file.
pub fn read_word_list(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| AnagramError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds a [`Dictionary`] from raw word lists, keeping only words that make
/// reasonable anagram pieces.
///
/// * single letters: only `a` and `i`
/// * two to four letters: only words in the short-word allow-list
/// * anything longer: always kept
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    short_words: HashSet<String>,
    dictionary: Dictionary,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow-list for two to four letter words. Entries of other lengths are ignored.
    pub fn with_short_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.short_words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| is_short(w.len())),
        );
        self
    }

    pub fn accepts(&self, word: &str) -> bool {
        match word.len() {
            0 => false,
            1 => word == "a" || word == "i",
            n if is_short(n) => self.short_words.contains(word),
            _ => true,
        }
    }

    /// Add one raw word. Returns true if it was kept and not already present.
    pub fn add_word(&mut self, raw: &str) -> bool {
        let word = raw.trim().to_lowercase();
        if !self.accepts(&word) {
            return false;
        }
        match encode(&word) {
            Ok(signature) => self.dictionary.insert(signature, word),
            Err(e) => {
                log::debug!("Skipping word {word:?}: {e}");
                false
            }
        }
    }

    /// Add every line of a newline-delimited list. Returns how many words were kept.
    pub fn add_word_list(&mut self, text: &str) -> usize {
        text.lines().filter(|line| self.add_word(line)).count()
    }

    pub fn build(self) -> Dictionary {
        self.dictionary
    }
}

const fn is_short(len: usize) -> bool {
    len > 1 && len < 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anagram_classes_share_an_entry() {
        let dict = Dictionary::from_words(["listen", "silent", "enlist", "tinsel", "stone"]);
        let sig = encode("listen").unwrap();
        assert_eq!(dict.get(&sig).unwrap(), ["listen", "silent", "enlist", "tinsel"]);
        assert_eq!(dict.word_len(&sig), Some(6));
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.word_count(), 5);
    }

    #[test]
    fn duplicates_and_invalid_words_are_dropped() {
        let dict = Dictionary::from_words(["Tea", "tea", "eat", "", "o'clock", "  ate "]);
        assert_eq!(dict.get(&encode("tea").unwrap()).unwrap(), ["tea", "eat", "ate"]);
        assert_eq!(dict.word_count(), 3);
    }

    #[test]
    fn builder_filters_short_words() {
        let mut builder = DictionaryBuilder::new().with_short_words(["cat", "ox", "a", "horses"]);
        let list = "a\ni\nb\ncat\ndog\nox\nhorse\nhorses\n\nQ\n";
        assert_eq!(builder.add_word_list(list), 6);
        let dict = builder.build();
        // "horses" is longer than four letters and needs no allow-list entry
        for kept in ["a", "i", "cat", "ox", "horse", "horses"] {
            assert!(dict.contains(&encode(kept).unwrap()), "{kept} should be kept");
        }
        for dropped in ["b", "dog", "q"] {
            assert!(!dict.contains(&encode(dropped).unwrap()), "{dropped} should be dropped");
        }
    }

    #[test]
    fn json_round_trip() {
        let dict = Dictionary::from_words(["listen", "silent", "a", "stone", "notes"]);
        let json = dict.to_json().unwrap();
        let back = Dictionary::from_json(&json, Path::new("mem")).unwrap();
        assert_eq!(dict, back);
    }

    #[test]
    fn save_and_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dictionary.json");
        let dict = Dictionary::from_words(["rat", "tar", "art", "star"]);
        dict.save(&path).unwrap();
        assert_eq!(Dictionary::load(&path).unwrap(), dict);
    }

    #[test]
    fn load_errors_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(Dictionary::load(&missing), Err(AnagramError::DictionaryLoad { .. })));

        let garbage = dir.path().join("garbage.json");
        fs::write(&garbage, "not json").unwrap();
        assert!(matches!(Dictionary::load(&garbage), Err(AnagramError::DictionaryLoad { .. })));
    }

    #[test]
    fn mismatched_keys_are_rejected() {
        let origin = Path::new("mem");
        let wrong = r#"{"entries": {"3": ["a"]}}"#;
        assert!(matches!(
            Dictionary::from_json(wrong, origin),
            Err(AnagramError::DictionaryLoad { .. })
        ));
        let bad_key = r#"{"entries": {"two": ["a"]}}"#;
        assert!(Dictionary::from_json(bad_key, origin).is_err());
        let empty = r#"{"entries": {"2": []}}"#;
        assert!(Dictionary::from_json(empty, origin).is_err());
        let ok = r#"{"entries": {"2": ["a"], "6": ["ab", "ba"]}}"#;
        assert_eq!(Dictionary::from_json(ok, origin).unwrap().word_count(), 3);
    }

    #[test]
    fn keys_wider_than_a_machine_word_round_trip() {
        let long = "pneumonoultramicroscopicsilicovolcanoconiosis";
        let dict = Dictionary::from_words([long, "a"]);
        let key = encode(long).unwrap();
        assert!(key.get().bits() > 128);
        let back = Dictionary::from_json(&dict.to_json().unwrap(), Path::new("mem")).unwrap();
        assert_eq!(back.get(&key).unwrap(), [long]);
        assert_eq!(back.word_len(&key), Some(long.len()));
    }
}
