//! 帧分类器 - 保留或移除
//!
//! 1. 颜色离群 - 平均色与语料均值的距离（批量两遍）
//! 2. 拼写检查 - OCR 文本中的单词大多拼写正确则视为含文字
//! 3. 置信度 - 任一 OCR token 置信度达标则视为含文字

pub mod color;
pub mod confidence;
pub mod decision;
pub mod spelling;

pub use color::{classify_by_color, AverageColor, ColorConfig, CorpusMean, DEFAULT_COLOR_THRESHOLD};
pub use confidence::{
    classify_by_confidence, first_qualifying_token, judge_tokens, ConfidenceClassifier, ConfidenceConfig,
    DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_LETTERS,
};
pub use decision::{Decision, Evidence, Verdict};
pub use spelling::{
    classify_by_spelling, extract_words, judge_spelling, EmptyTextPolicy, SpellingClassifier, SpellingConfig,
    DEFAULT_MAX_MISSPELLED, DEFAULT_MIN_WORD_LENGTH,
};

use crate::core::error::FrameError;
use image::RgbImage;

/// A per-frame text policy. Implementations hold only immutable services and
/// configuration, so the same image always yields the same decision.
pub trait FrameClassifier: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, image: &RgbImage) -> Result<Decision, FrameError>;
}
