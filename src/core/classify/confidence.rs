//! Text detection by OCR confidence
//!
//! Trusts tesseract's per-token confidence directly. The first token that
//! clears every filter decides the frame; the remaining tokens are never
//! looked at.

use super::decision::{Decision, Evidence};
use super::FrameClassifier;
use crate::core::error::FrameError;
use crate::core::ocr::{OcrConfig, OcrEngine, OcrToken};
use image::RgbImage;
use std::sync::Arc;

pub const DEFAULT_MIN_CONFIDENCE: f32 = 75.0;
pub const DEFAULT_MIN_LETTERS: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceConfig {
    pub ocr: OcrConfig,
    /// ASCII letters a token needs to count as text
    pub min_letters: usize,
    /// Inclusive lower bound, 0..=100
    pub min_confidence: f32,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            min_letters: DEFAULT_MIN_LETTERS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl ConfidenceConfig {
    /// Second pass over frames that survived a first text sweep: automatic
    /// page segmentation and a lower bar.
    pub fn second_pass() -> Self {
        Self {
            ocr: OcrConfig::second_pass(),
            min_letters: 1,
            min_confidence: 58.0,
        }
    }
}

/// The token's trimmed text and confidence if it counts as text
fn qualify<'a>(token: &'a OcrToken, config: &ConfidenceConfig) -> Option<(&'a str, f32)> {
    let text = token.text.trim();
    if text.is_empty() {
        return None;
    }

    let conf: f32 = token.conf.trim().parse().ok()?;
    // negative means tesseract had no confidence for this row
    if conf.is_nan() || conf < 0.0 || conf < config.min_confidence {
        return None;
    }

    let letters = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if letters < config.min_letters {
        return None;
    }

    Some((text, conf))
}

/// First token, in engine order, that clears every filter
pub fn first_qualifying_token<'a>(tokens: &'a [OcrToken], config: &ConfidenceConfig) -> Option<(&'a str, f32)> {
    tokens.iter().find_map(|token| qualify(token, config))
}

pub fn judge_tokens(tokens: &[OcrToken], config: &ConfidenceConfig) -> Decision {
    match first_qualifying_token(tokens, config) {
        Some((token, confidence)) => Decision::remove(Evidence::Token {
            token: token.to_string(),
            confidence,
        }),
        None => Decision::keep(Evidence::NoQualifyingToken {
            tokens_seen: tokens.len(),
        }),
    }
}

pub fn classify_by_confidence(
    image: &RgbImage,
    ocr: &dyn OcrEngine,
    config: &ConfidenceConfig,
) -> Result<Decision, FrameError> {
    let tokens = ocr.image_to_data(image, &config.ocr)?;
    Ok(judge_tokens(&tokens, config))
}

pub struct ConfidenceClassifier {
    ocr: Arc<dyn OcrEngine>,
    config: ConfidenceConfig,
}

impl ConfidenceClassifier {
    pub fn new(ocr: Arc<dyn OcrEngine>, config: ConfidenceConfig) -> Self {
        Self { ocr, config }
    }

    pub fn config(&self) -> &ConfidenceConfig {
        &self.config
    }
}

impl FrameClassifier for ConfidenceClassifier {
    fn name(&self) -> &'static str {
        "confidence"
    }

    fn classify(&self, image: &RgbImage) -> Result<Decision, FrameError> {
        classify_by_confidence(image, self.ocr.as_ref(), &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::decision::Verdict;
    use crate::core::ocr::MockOcrEngine;
    use image::Rgb;

    fn tok(text: &str, conf: &str) -> OcrToken {
        OcrToken::new(text, conf)
    }

    #[test]
    fn test_no_tokens_is_kept() {
        let decision = judge_tokens(&[], &ConfidenceConfig::default());
        assert_eq!(decision.verdict, Verdict::Keep);
        assert_eq!(decision.evidence, Evidence::NoQualifyingToken { tokens_seen: 0 });
    }

    #[test]
    fn test_hello_token_is_removed() {
        let decision = judge_tokens(&[tok("HELLO", "90")], &ConfidenceConfig::default());
        assert_eq!(
            decision,
            Decision::remove(Evidence::Token {
                token: "HELLO".to_string(),
                confidence: 90.0,
            })
        );
    }

    #[test]
    fn test_confidence_boundary_is_inclusive() {
        let config = ConfidenceConfig::default();
        assert!(judge_tokens(&[tok("SALE", "75")], &config).is_remove());
        assert!(!judge_tokens(&[tok("SALE", "74")], &config).is_remove());
        assert!(judge_tokens(&[tok("SALE", "75.0")], &config).is_remove());
    }

    #[test]
    fn test_unusable_tokens_are_skipped() {
        let config = ConfidenceConfig::default();
        let tokens = vec![
            tok("", "-1"),
            tok("   ", "95"),
            tok("WORD", "-1"),
            tok("WORD", "n/a"),
            tok("1234", "99"),
            tok("LOW", "30"),
        ];
        let decision = judge_tokens(&tokens, &config);
        assert_eq!(decision.verdict, Verdict::Keep);
        assert_eq!(decision.evidence, Evidence::NoQualifyingToken { tokens_seen: 6 });
    }

    #[test]
    fn test_sentinel_skipped_even_with_zero_threshold() {
        let config = ConfidenceConfig {
            min_confidence: 0.0,
            ..ConfidenceConfig::default()
        };
        assert!(!judge_tokens(&[tok("WORD", "-1")], &config).is_remove());
        assert!(judge_tokens(&[tok("WORD", "0")], &config).is_remove());
    }

    #[test]
    fn test_min_letters() {
        let config = ConfidenceConfig {
            min_letters: 3,
            ..ConfidenceConfig::default()
        };
        assert!(!judge_tokens(&[tok("A1B2", "95")], &config).is_remove());
        assert!(judge_tokens(&[tok("A1B2C", "95")], &config).is_remove());
    }

    #[test]
    fn test_first_qualifying_token_wins() {
        let tokens = vec![tok("noise", "20"), tok(" FIRST ", "80"), tok("SECOND", "99")];
        let decision = judge_tokens(&tokens, &ConfidenceConfig::default());
        assert_eq!(
            decision.evidence,
            Evidence::Token {
                token: "FIRST".to_string(),
                confidence: 80.0,
            }
        );
    }

    #[test]
    fn test_second_pass_preset() {
        let config = ConfidenceConfig::second_pass();
        assert_eq!(config.min_confidence, 58.0);
        assert_eq!(config.ocr.psm, Some(3));
        assert!(judge_tokens(&[tok("logo", "60")], &config).is_remove());
    }

    #[test]
    fn test_classifier_with_mock_ocr() {
        let classifier = ConfidenceClassifier::new(
            Arc::new(MockOcrEngine::with_tokens(vec![tok("HELLO", "90")])),
            ConfidenceConfig::default(),
        );
        let image = RgbImage::from_pixel(8, 8, Rgb([0, 0, 0]));

        let first = classifier.classify(&image).unwrap();
        assert!(first.is_remove());
        assert_eq!(first, classifier.classify(&image).unwrap());
    }
}
