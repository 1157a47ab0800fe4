//! Text detection by spelling
//!
//! OCR on photographic frames produces letter soup that rarely forms real
//! words, while captions and watermarks read as correctly spelled words. A
//! frame whose recognized words are (almost) all in the dictionary is
//! therefore treated as containing text and removed.

use super::decision::{Decision, Evidence};
use super::FrameClassifier;
use crate::core::dictionary::Dictionary;
use crate::core::error::FrameError;
use crate::core::ocr::{OcrConfig, OcrEngine};
use image::RgbImage;
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// Maximal runs of 3+ ASCII letters
static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z]{3,}\b").expect("word pattern is valid"));

pub const DEFAULT_MIN_WORD_LENGTH: usize = 5;
pub const DEFAULT_MAX_MISSPELLED: usize = 1;

/// What to do when OCR yields no word long enough to check.
///
/// With nothing to check the misspelled count is 0, which passes the
/// tolerance test, so `Remove` drops frames without any text evidence.
/// `Remove` is the default; the CLI exposes `Keep` as `--keep-when-no-words`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyTextPolicy {
    Remove,
    Keep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpellingConfig {
    pub ocr: OcrConfig,
    pub min_word_length: usize,
    /// Remove when at most this many distinct words are misspelled
    pub max_misspelled: usize,
    pub empty_text: EmptyTextPolicy,
}

impl Default for SpellingConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_misspelled: DEFAULT_MAX_MISSPELLED,
            empty_text: EmptyTextPolicy::Remove,
        }
    }
}

/// Candidate words of at least `min_len` letters, in reading order
pub fn extract_words(text: &str, min_len: usize) -> Vec<String> {
    WORD_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.len() >= min_len)
        .map(str::to_string)
        .collect()
}

/// Decide from already-extracted words
pub fn judge_spelling(words: Vec<String>, dictionary: &dyn Dictionary, config: &SpellingConfig) -> Decision {
    let no_words = words.is_empty();
    let misspelled: Vec<String> = dictionary.unknown(&words).into_iter().collect();
    let looks_like_text = misspelled.len() <= config.max_misspelled;

    let evidence = Evidence::Spelling {
        words,
        misspelled,
        no_words,
    };

    if no_words && config.empty_text == EmptyTextPolicy::Keep {
        return Decision::keep(evidence);
    }

    if looks_like_text {
        Decision::remove(evidence)
    } else {
        Decision::keep(evidence)
    }
}

pub fn classify_by_spelling(
    image: &RgbImage,
    ocr: &dyn OcrEngine,
    dictionary: &dyn Dictionary,
    config: &SpellingConfig,
) -> Result<Decision, FrameError> {
    let text = ocr.image_to_string(image, &config.ocr)?;
    let words = extract_words(&text, config.min_word_length);
    Ok(judge_spelling(words, dictionary, config))
}

pub struct SpellingClassifier {
    ocr: Arc<dyn OcrEngine>,
    dictionary: Arc<dyn Dictionary>,
    config: SpellingConfig,
}

impl SpellingClassifier {
    pub fn new(ocr: Arc<dyn OcrEngine>, dictionary: Arc<dyn Dictionary>, config: SpellingConfig) -> Self {
        Self {
            ocr,
            dictionary,
            config,
        }
    }

    pub fn config(&self) -> &SpellingConfig {
        &self.config
    }
}

impl FrameClassifier for SpellingClassifier {
    fn name(&self) -> &'static str {
        "spelling"
    }

    fn classify(&self, image: &RgbImage) -> Result<Decision, FrameError> {
        let decision = classify_by_spelling(image, self.ocr.as_ref(), self.dictionary.as_ref(), &self.config)?;
        if let Evidence::Spelling { no_words: true, .. } = decision.evidence {
            if decision.is_remove() {
                warn!("no checkable words found, removing by default policy");
            }
        }
        Ok(decision)
    }
}
