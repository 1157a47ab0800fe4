use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Failed to launch tesseract at {cmd}: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error while talking to tesseract: {0}")]
    Io(#[from] std::io::Error),
    #[error("Tesseract exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("Tesseract output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    #[error("Malformed tesseract output: {0}")]
    Malformed(String),
    #[error("Failed to encode image for OCR: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Invalid OCR config: {0}")]
    InvalidConfig(String),
}
