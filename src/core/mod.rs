pub mod classify;
pub mod dictionary;
pub mod error;
pub mod frame;
pub mod ocr;
pub mod pipeline;

pub use dictionary::{Dictionary, WordList, DEFAULT_DICTIONARY_PATH};
pub use error::{CuratorError, FrameError};
pub use pipeline::{FrameCurator, FrameOutcome, Outcome, RunConfig, RunReport, RunSummary};
