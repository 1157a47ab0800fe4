//! Command-line arguments

use crate::core::classify::{
    ColorConfig, ConfidenceConfig, EmptyTextPolicy, SpellingConfig, DEFAULT_COLOR_THRESHOLD,
    DEFAULT_MAX_MISSPELLED, DEFAULT_MIN_WORD_LENGTH,
};
use crate::core::error::CuratorError;
use crate::core::ocr::{OcrConfig, TesseractCli, DEFAULT_TESSERACT_CMD};
use crate::core::pipeline::RunConfig;
use crate::core::DEFAULT_DICTIONARY_PATH;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_TESS_CONFIG: &str =
    "--psm 11 --oem 3 -c tessedit_char_whitelist=ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Parser, Debug)]
#[command(
    name = "frame-curator",
    version,
    about = "Move color outliers and frames with on-screen text out of a folder of extracted video frames"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move frames whose average color is far from the mean of all frames
    Color(ColorArgs),
    /// Move frames whose OCR text is made of correctly spelled words
    Spelling(SpellingArgs),
    /// Move frames with any confidently recognized OCR token
    Confidence(ConfidenceArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DirArgs {
    /// Directory containing frames to scan (.jpg/.jpeg/.png)
    #[arg(long)]
    pub input: PathBuf,

    /// Directory to move excluded frames into (created if missing)
    #[arg(long)]
    pub excluded: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of parallel workers (default: CPU count)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Process frames one at a time on the main thread
    #[arg(long)]
    pub no_parallel: bool,

    /// Print every decision and the final summary as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl RunArgs {
    pub fn run_config(&self) -> RunConfig {
        let workers = self.workers.unwrap_or_else(num_cpus::get).max(1);
        RunConfig {
            workers,
            parallel: !self.no_parallel,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OcrArgs {
    /// Tesseract options [default: --psm 11 --oem 3 -c tessedit_char_whitelist=<A-Za-z0-9>]
    #[arg(long, allow_hyphen_values = true)]
    pub tess_config: Option<String>,

    /// Path to the tesseract binary (default: `tesseract` on PATH)
    #[arg(long)]
    pub tesseract_cmd: Option<PathBuf>,

    /// Directory holding the *.traineddata files
    #[arg(long)]
    pub tessdata_dir: Option<PathBuf>,

    /// Recognition language, overrides any -l in --tess-config
    #[arg(long)]
    pub lang: Option<String>,

    /// Print available tesseract languages and exit
    #[arg(long)]
    pub print_langs: bool,
}

impl OcrArgs {
    pub fn engine(&self) -> TesseractCli {
        let cmd = self
            .tesseract_cmd
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TESSERACT_CMD));
        let engine = TesseractCli::new(cmd);
        match &self.tessdata_dir {
            Some(dir) => engine.with_tessdata_dir(dir),
            None => engine,
        }
    }

    /// `base` applies unless `--tess-config` is given
    pub fn ocr_config(&self, base: OcrConfig) -> Result<OcrConfig, CuratorError> {
        let config = match &self.tess_config {
            Some(raw) => OcrConfig::parse(raw).map_err(CuratorError::TessConfig)?,
            None => base,
        };
        Ok(match &self.lang {
            Some(lang) => config.with_lang(lang.clone()),
            None => config,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct ColorArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Maximum distance (0-441) from the mean color before a frame is moved
    #[arg(long, default_value_t = DEFAULT_COLOR_THRESHOLD)]
    pub threshold: f64,
}

impl ColorArgs {
    pub fn color_config(&self) -> ColorConfig {
        ColorConfig {
            threshold: self.threshold,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SpellingArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    /// Ignore recognized words shorter than this
    #[arg(long, default_value_t = DEFAULT_MIN_WORD_LENGTH)]
    pub min_word_length: usize,

    /// Move a frame when at most this many distinct words are misspelled
    #[arg(long, default_value_t = DEFAULT_MAX_MISSPELLED)]
    pub max_misspelled: usize,

    /// Keep frames where OCR found no word long enough to check
    #[arg(long)]
    pub keep_when_no_words: bool,

    /// Word list, one word per line
    #[arg(long, default_value = DEFAULT_DICTIONARY_PATH)]
    pub dictionary: PathBuf,
}

impl SpellingArgs {
    pub fn spelling_config(&self) -> Result<SpellingConfig, CuratorError> {
        Ok(SpellingConfig {
            ocr: self.ocr.ocr_config(OcrConfig::default())?,
            min_word_length: self.min_word_length,
            max_misspelled: self.max_misspelled,
            empty_text: if self.keep_when_no_words {
                EmptyTextPolicy::Keep
            } else {
                EmptyTextPolicy::Remove
            },
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct ConfidenceArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    #[command(flatten)]
    pub run: RunArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    /// Minimum token confidence, 0-100, inclusive [default: 75, 58 with --second-pass]
    #[arg(long)]
    pub min_conf: Option<i32>,

    /// Minimum ASCII letters in a token
    #[arg(long)]
    pub min_letters: Option<usize>,

    /// Start from the second-pass preset (--psm 3 --oem 3, min conf 58)
    #[arg(long)]
    pub second_pass: bool,
}

impl ConfidenceArgs {
    pub fn confidence_config(&self) -> Result<ConfidenceConfig, CuratorError> {
        let base = if self.second_pass {
            ConfidenceConfig::second_pass()
        } else {
            ConfidenceConfig::default()
        };

        Ok(ConfidenceConfig {
            ocr: self.ocr.ocr_config(base.ocr)?,
            min_letters: self.min_letters.unwrap_or(base.min_letters),
            min_confidence: self.min_conf.map(|c| c as f32).unwrap_or(base.min_confidence),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_tess_config_matches_ocr_default() {
        assert_eq!(OcrConfig::parse(DEFAULT_TESS_CONFIG).unwrap(), OcrConfig::default());
    }

    #[test]
    fn test_color_defaults() {
        let cli = parse(&["frame-curator", "color", "--input", "in", "--excluded", "out"]);
        let Command::Color(args) = cli.command else {
            panic!("expected color command");
        };
        assert_eq!(args.color_config().threshold, 85.0);
        assert!(!args.run.json);
    }

    #[test]
    fn test_spelling_args() {
        let cli = parse(&[
            "frame-curator",
            "spelling",
            "--input",
            "in",
            "--excluded",
            "out",
            "--min-word-length",
            "6",
            "--keep-when-no-words",
            "--tess-config",
            "--psm 6 --oem 1",
            "--no-parallel",
        ]);
        let Command::Spelling(args) = cli.command else {
            panic!("expected spelling command");
        };

        let config = args.spelling_config().unwrap();
        assert_eq!(config.min_word_length, 6);
        assert_eq!(config.max_misspelled, 1);
        assert_eq!(config.empty_text, EmptyTextPolicy::Keep);
        assert_eq!(config.ocr.psm, Some(6));
        assert_eq!(config.ocr.oem, Some(1));
        assert!(!args.run.run_config().is_parallel());
        assert_eq!(args.dictionary, PathBuf::from(DEFAULT_DICTIONARY_PATH));
    }

    #[test]
    fn test_confidence_defaults_and_overrides() {
        let cli = parse(&["frame-curator", "confidence", "--input", "in", "--excluded", "out"]);
        let Command::Confidence(args) = cli.command else {
            panic!("expected confidence command");
        };
        assert_eq!(args.confidence_config().unwrap(), ConfidenceConfig::default());

        let cli = parse(&[
            "frame-curator",
            "confidence",
            "--input",
            "in",
            "--excluded",
            "out",
            "--second-pass",
            "--min-conf",
            "70",
            "--lang",
            "deu",
            "--workers",
            "3",
        ]);
        let Command::Confidence(args) = cli.command else {
            panic!("expected confidence command");
        };
        let config = args.confidence_config().unwrap();
        assert_eq!(config.min_confidence, 70.0);
        assert_eq!(config.min_letters, 1);
        assert_eq!(config.ocr.psm, Some(3));
        assert_eq!(config.ocr.lang, "deu");
        assert_eq!(args.run.run_config().workers, 3);
    }

    #[test]
    fn test_input_and_excluded_are_required() {
        assert!(Cli::try_parse_from(["frame-curator", "color", "--input", "in"]).is_err());
        assert!(Cli::try_parse_from(["frame-curator", "confidence", "--excluded", "out"]).is_err());
    }

    #[test]
    fn test_bad_tess_config_is_usage_error() {
        let cli = parse(&[
            "frame-curator",
            "spelling",
            "--input",
            "in",
            "--excluded",
            "out",
            "--tess-config",
            "--psm x",
        ]);
        let Command::Spelling(args) = cli.command else {
            panic!("expected spelling command");
        };
        assert!(matches!(args.spelling_config(), Err(CuratorError::TessConfig(_))));
    }
}
