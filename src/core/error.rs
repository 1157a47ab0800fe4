use crate::core::ocr::OcrError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure while handling a single frame. Logged and skipped; never aborts a
/// batch.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has no pixels")]
    EmptyImage,
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
    #[error("Move failed: {0}")]
    Move(#[from] std::io::Error),
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),
}

/// Fatal errors: bad arguments or a broken environment, detected before any
/// frame is touched.
#[derive(Debug, Error)]
pub enum CuratorError {
    #[error("--input is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read dictionary {}: {source}", .path.display())]
    Dictionary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Dictionary {} contains no words", .0.display())]
    EmptyDictionary(PathBuf),
    #[error("Invalid --tess-config: {0}")]
    TessConfig(#[source] OcrError),
    #[error("OCR engine unavailable: {0}")]
    Environment(#[from] OcrError),
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
