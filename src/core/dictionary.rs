//! Word list used by the spelling classifier

use crate::core::error::CuratorError;
use log::info;
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

pub const DEFAULT_DICTIONARY_PATH: &str = "/usr/share/dict/words";

pub trait Dictionary: Send + Sync {
    /// `word` is already lower-cased
    fn contains(&self, word: &str) -> bool;

    /// Distinct lower-cased words that are not in the dictionary
    fn unknown(&self, words: &[String]) -> BTreeSet<String> {
        words
            .iter()
            .map(|w| w.to_lowercase())
            .filter(|w| !self.contains(w))
            .collect()
    }
}

/// Case-insensitive set of known words, one per line on disk.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn load(path: &Path) -> Result<Self, CuratorError> {
        info!("📖 Loading dictionary: {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| CuratorError::Dictionary {
            path: path.to_path_buf(),
            source,
        })?;

        let list = Self::from_words(content.lines());
        if list.is_empty() {
            return Err(CuratorError::EmptyDictionary(path.to_path_buf()));
        }

        info!("✓ Loaded {} dictionary words", list.len());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordList {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_unknown_is_case_insensitive() {
        let dict = WordList::from_words(["Hello", "world"]);
        let unknown = dict.unknown(&words(&["HELLO", "World", "xqzvk"]));
        assert_eq!(unknown.into_iter().collect::<Vec<_>>(), vec!["xqzvk"]);
    }

    #[test]
    fn test_unknown_counts_distinct_words() {
        let dict = WordList::from_words(["caption"]);
        let unknown = dict.unknown(&words(&["Qwrtz", "QWRTZ", "qwrtz", "caption"]));
        assert_eq!(unknown.len(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nBravo\n\n  charlie  ").unwrap();

        let dict = WordList::load(file.path()).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("bravo"));
        assert!(dict.contains("charlie"));
    }

    #[test]
    fn test_load_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        match WordList::load(file.path()) {
            Err(CuratorError::EmptyDictionary(_)) => {}
            other => panic!("expected empty dictionary error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let result = WordList::load(Path::new("/nonexistent/frame-curator/words"));
        assert!(matches!(result, Err(CuratorError::Dictionary { .. })));
    }
}
