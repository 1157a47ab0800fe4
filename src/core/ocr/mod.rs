//! OCR 引擎 - token 与置信度提取

pub mod config;
pub mod engine;
pub mod error;
pub mod tesseract;

pub use config::{OcrConfig, DEFAULT_CHAR_WHITELIST, DEFAULT_LANG};
pub use engine::{MockOcrEngine, OcrEngine, OcrToken};
pub use error::OcrError;
pub use tesseract::{parse_languages, parse_tsv, TesseractCli, DEFAULT_TESSERACT_CMD};
