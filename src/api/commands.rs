//! 命令执行 - 组装服务并运行批处理

use super::cli::{Cli, ColorArgs, Command, ConfidenceArgs, OcrArgs, RunArgs, SpellingArgs};
use crate::core::classify::{ConfidenceClassifier, FrameClassifier, SpellingClassifier};
use crate::core::error::CuratorError;
use crate::core::ocr::{OcrEngine, TesseractCli};
use crate::core::pipeline::{FrameCurator, RunReport};
use crate::core::WordList;
use log::info;
use std::path::Path;
use std::sync::Arc;

/// Run one CLI invocation. Returns `None` when nothing was curated (e.g.
/// `--print-langs`).
pub fn execute(cli: Cli) -> Result<Option<RunReport>, CuratorError> {
    match cli.command {
        Command::Color(args) => run_color(&args).map(Some),
        Command::Spelling(args) => run_spelling(&args),
        Command::Confidence(args) => run_confidence(&args),
    }
}

pub fn run_color(args: &ColorArgs) -> Result<RunReport, CuratorError> {
    let curator = FrameCurator::new(&args.dirs.input, &args.dirs.excluded, &args.run.run_config())?;
    let report = curator.run_color(&args.color_config())?;
    emit_json(&args.run, &report)?;
    Ok(report)
}

pub fn run_spelling(args: &SpellingArgs) -> Result<Option<RunReport>, CuratorError> {
    let Some(engine) = start_engine(&args.ocr)? else {
        return Ok(None);
    };
    let config = args.spelling_config()?;
    let dictionary = WordList::load(&args.dictionary)?;

    let classifier = SpellingClassifier::new(engine, Arc::new(dictionary), config);
    run_text(&args.dirs.input, &args.dirs.excluded, &args.run, &classifier).map(Some)
}

pub fn run_confidence(args: &ConfidenceArgs) -> Result<Option<RunReport>, CuratorError> {
    let Some(engine) = start_engine(&args.ocr)? else {
        return Ok(None);
    };
    let config = args.confidence_config()?;

    let classifier = ConfidenceClassifier::new(engine, config);
    run_text(&args.dirs.input, &args.dirs.excluded, &args.run, &classifier).map(Some)
}

fn run_text(
    input: &Path,
    excluded: &Path,
    run: &RunArgs,
    classifier: &dyn FrameClassifier,
) -> Result<RunReport, CuratorError> {
    let curator = FrameCurator::new(input, excluded, &run.run_config())?;
    let report = curator.run_classifier(classifier)?;
    emit_json(run, &report)?;
    Ok(report)
}

/// Locate tesseract before touching any frame. With `--print-langs` the
/// languages are listed and `None` is returned.
fn start_engine(args: &OcrArgs) -> Result<Option<Arc<dyn OcrEngine>>, CuratorError> {
    let engine: TesseractCli = args.engine();
    let version = engine.version()?;
    info!("🔧 Using {} ({})", engine.cmd().display(), version);

    if args.print_langs {
        for lang in engine.languages()? {
            println!("{}", lang);
        }
        return Ok(None);
    }

    let engine: Arc<dyn OcrEngine> = Arc::new(engine);
    Ok(Some(engine))
}

fn emit_json(run: &RunArgs, report: &RunReport) -> Result<(), CuratorError> {
    if !run.json {
        return Ok(());
    }
    for outcome in &report.outcomes {
        println!("{}", serde_json::to_string(outcome)?);
    }
    println!("{}", serde_json::to_string(&report.summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_missing_input_is_fatal() {
        let excluded = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "frame-curator",
            "color",
            "--input",
            "/nonexistent/frame-curator/frames",
            "--excluded",
            excluded.path().to_str().unwrap(),
        ])
        .unwrap();

        assert!(matches!(execute(cli), Err(CuratorError::NotADirectory(_))));
    }

    #[test]
    fn test_missing_tesseract_is_fatal() {
        let input = tempfile::tempdir().unwrap();
        let excluded = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "frame-curator",
            "confidence",
            "--input",
            input.path().to_str().unwrap(),
            "--excluded",
            excluded.path().to_str().unwrap(),
            "--tesseract-cmd",
            "/nonexistent/frame-curator/tesseract",
        ])
        .unwrap();

        assert!(matches!(execute(cli), Err(CuratorError::Environment(_))));
    }

    #[test]
    fn test_color_command_on_empty_dir() {
        let input = tempfile::tempdir().unwrap();
        let excluded = tempfile::tempdir().unwrap();
        let cli = Cli::try_parse_from([
            "frame-curator",
            "color",
            "--input",
            input.path().to_str().unwrap(),
            "--excluded",
            excluded.path().to_str().unwrap(),
            "--no-parallel",
        ])
        .unwrap();

        let report = execute(cli).unwrap().unwrap();
        assert_eq!(report.summary.scanned, 0);
        assert!(report.corpus_mean.is_none());
    }
}
