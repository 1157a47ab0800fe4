use super::config::OcrConfig;
use super::error::OcrError;
use image::RgbImage;

/// One recognized fragment with the confidence field exactly as the engine
/// reported it. Tesseract uses `-1` for rows that carry no confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrToken {
    pub text: String,
    pub conf: String,
}

impl OcrToken {
    pub fn new(text: impl Into<String>, conf: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            conf: conf.into(),
        }
    }
}

pub trait OcrEngine: Send + Sync {
    /// Raw recognized text of the whole image
    fn image_to_string(&self, image: &RgbImage, config: &OcrConfig) -> Result<String, OcrError>;

    /// Recognized tokens in reading order
    fn image_to_data(&self, image: &RgbImage, config: &OcrConfig) -> Result<Vec<OcrToken>, OcrError>;

    /// Installed language packs
    fn languages(&self) -> Result<Vec<String>, OcrError>;
}

type TokenPattern = Box<dyn Fn(&RgbImage) -> Vec<OcrToken> + Send + Sync>;

/// In-memory engine for tests and dry runs: tokens are derived from the
/// image by a caller-supplied pattern.
pub struct MockOcrEngine {
    pattern: Option<TokenPattern>,
    failure: Option<String>,
}

impl MockOcrEngine {
    pub fn new() -> Self {
        Self {
            pattern: None,
            failure: None,
        }
    }

    pub fn with_pattern<F>(pattern: F) -> Self
    where
        F: Fn(&RgbImage) -> Vec<OcrToken> + Send + Sync + 'static,
    {
        Self {
            pattern: Some(Box::new(pattern)),
            failure: None,
        }
    }

    /// Same tokens for every image
    pub fn with_tokens(tokens: Vec<OcrToken>) -> Self {
        Self::with_pattern(move |_| tokens.clone())
    }

    /// Every image yields the given words at full confidence
    pub fn with_text(text: &str) -> Self {
        let tokens = text
            .split_whitespace()
            .map(|word| OcrToken::new(word, "96"))
            .collect();
        Self::with_tokens(tokens)
    }

    /// Every call fails, as a missing binary would
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            pattern: None,
            failure: Some(message.into()),
        }
    }

    fn tokens(&self, image: &RgbImage) -> Result<Vec<OcrToken>, OcrError> {
        if let Some(message) = &self.failure {
            return Err(OcrError::Failed {
                status: "mock".to_string(),
                stderr: message.clone(),
            });
        }
        Ok(self.pattern.as_ref().map(|p| p(image)).unwrap_or_default())
    }
}

impl Default for MockOcrEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for MockOcrEngine {
    fn image_to_string(&self, image: &RgbImage, _config: &OcrConfig) -> Result<String, OcrError> {
        let words: Vec<String> = self.tokens(image)?.into_iter().map(|t| t.text).collect();
        Ok(words.join(" "))
    }

    fn image_to_data(&self, image: &RgbImage, _config: &OcrConfig) -> Result<Vec<OcrToken>, OcrError> {
        self.tokens(image)
    }

    fn languages(&self) -> Result<Vec<String>, OcrError> {
        match &self.failure {
            Some(message) => Err(OcrError::Failed {
                status: "mock".to_string(),
                stderr: message.clone(),
            }),
            None => Ok(vec!["eng".to_string(), "osd".to_string()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(value: u8) -> RgbImage {
        RgbImage::from_pixel(8, 8, image::Rgb([value, value, value]))
    }

    #[test]
    fn test_mock_with_text() {
        let engine = MockOcrEngine::with_text("SALE today");
        let tokens = engine.image_to_data(&blank(0), &OcrConfig::default()).unwrap();
        assert_eq!(tokens, vec![OcrToken::new("SALE", "96"), OcrToken::new("today", "96")]);
        let text = engine.image_to_string(&blank(0), &OcrConfig::default()).unwrap();
        assert_eq!(text, "SALE today");
    }

    #[test]
    fn test_mock_with_pattern() {
        let engine = MockOcrEngine::with_pattern(|img| {
            if img.get_pixel(0, 0)[0] > 128 {
                vec![OcrToken::new("WATERMARK", "88")]
            } else {
                Vec::new()
            }
        });

        assert_eq!(engine.image_to_data(&blank(255), &OcrConfig::default()).unwrap().len(), 1);
        assert!(engine.image_to_data(&blank(0), &OcrConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn test_mock_failing() {
        let engine = MockOcrEngine::failing("tesseract not found");
        assert!(engine.image_to_string(&blank(0), &OcrConfig::default()).is_err());
        assert!(engine.languages().is_err());
    }
}
