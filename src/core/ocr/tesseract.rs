//! Tesseract CLI backend
//!
//! Frames are encoded to PNG and streamed over stdin, results come back on
//! stdout (`tesseract stdin stdout ...`), so no temporary files are written.

use super::config::OcrConfig;
use super::engine::{OcrEngine, OcrToken};
use super::error::OcrError;
use image::{ImageOutputFormat, RgbImage};
use log::debug;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

/// Column count of tesseract's TSV renderer
const TSV_COLUMNS: usize = 12;
const TSV_CONF: usize = 10;
const TSV_TEXT: usize = 11;

#[derive(Debug, Clone)]
pub struct TesseractCli {
    cmd: PathBuf,
    tessdata_dir: Option<PathBuf>,
}

impl TesseractCli {
    pub fn new(cmd: impl Into<PathBuf>) -> Self {
        Self {
            cmd: cmd.into(),
            tessdata_dir: None,
        }
    }

    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    pub fn cmd(&self) -> &Path {
        &self.cmd
    }

    /// First line of `tesseract --version`. Used at startup to fail fast when
    /// the binary is missing.
    pub fn version(&self) -> Result<String, OcrError> {
        let output = self.spawn_output(self.command().arg("--version"))?;
        let text = Self::diagnostic_text(&output)?;
        let version = text.lines().next().unwrap_or_default().trim().to_string();
        debug!("tesseract version: {}", version);
        Ok(version)
    }

    fn command(&self) -> Command {
        Command::new(&self.cmd)
    }

    fn tessdata_args(&self) -> Vec<String> {
        match &self.tessdata_dir {
            Some(dir) => vec!["--tessdata-dir".to_string(), dir.to_string_lossy().into_owned()],
            None => Vec::new(),
        }
    }

    /// Arguments for one recognition call. `renderer` selects an output
    /// config such as `tsv`; plain text when `None`.
    fn recognize_args(&self, config: &OcrConfig, renderer: Option<&str>) -> Vec<String> {
        let mut args = vec!["stdin".to_string(), "stdout".to_string()];
        args.extend(self.tessdata_args());
        args.extend(config.args());
        if let Some(renderer) = renderer {
            args.push(renderer.to_string());
        }
        args
    }

    fn spawn_output(&self, command: &mut Command) -> Result<Output, OcrError> {
        command.output().map_err(|source| OcrError::Spawn {
            cmd: self.cmd.display().to_string(),
            source,
        })
    }

    fn recognize(&self, image: &RgbImage, config: &OcrConfig, renderer: Option<&str>) -> Result<String, OcrError> {
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)?;

        let args = self.recognize_args(config, renderer);
        debug!("running {} {}", self.cmd.display(), args.join(" "));

        let mut child = self
            .command()
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| OcrError::Spawn {
                cmd: self.cmd.display().to_string(),
                source,
            })?;

        // tesseract reads the whole image before it writes anything
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(&png),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(String::from_utf8(output.stdout)?)
    }

    /// Older tesseract builds print diagnostics on stderr instead of stdout.
    fn diagnostic_text(output: &Output) -> Result<String, OcrError> {
        if !output.status.success() {
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stream = if output.stdout.iter().any(|b| !b.is_ascii_whitespace()) {
            &output.stdout
        } else {
            &output.stderr
        };
        Ok(String::from_utf8(stream.clone())?)
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_CMD)
    }
}

impl OcrEngine for TesseractCli {
    fn image_to_string(&self, image: &RgbImage, config: &OcrConfig) -> Result<String, OcrError> {
        self.recognize(image, config, None)
    }

    fn image_to_data(&self, image: &RgbImage, config: &OcrConfig) -> Result<Vec<OcrToken>, OcrError> {
        let tsv = self.recognize(image, config, Some("tsv"))?;
        parse_tsv(&tsv)
    }

    fn languages(&self) -> Result<Vec<String>, OcrError> {
        let mut command = self.command();
        command.args(self.tessdata_args()).arg("--list-langs");
        let output = self.spawn_output(&mut command)?;
        Ok(parse_languages(&Self::diagnostic_text(&output)?))
    }
}

/// Parse tesseract's TSV output into tokens, one per row.
///
/// Structural rows (page, block, paragraph, line) are kept with their `-1`
/// confidence; callers filter them like any other unqualified token.
pub fn parse_tsv(tsv: &str) -> Result<Vec<OcrToken>, OcrError> {
    let mut lines = tsv.lines().map(|l| l.trim_end_matches('\r'));

    match lines.next() {
        None => return Ok(Vec::new()),
        Some(header) if header.trim().is_empty() => return Ok(Vec::new()),
        Some(header) if !header.starts_with("level") => {
            return Err(OcrError::Malformed(format!("unexpected TSV header: {header}")));
        }
        Some(_) => {}
    }

    let tokens = lines
        .filter_map(|line| {
            let fields: Vec<&str> = line.splitn(TSV_COLUMNS, '\t').collect();
            if fields.len() < TSV_COLUMNS {
                return None;
            }
            Some(OcrToken::new(fields[TSV_TEXT], fields[TSV_CONF]))
        })
        .collect();

    Ok(tokens)
}

/// `--list-langs` prints a heading line followed by one language per line.
pub fn parse_languages(listing: &str) -> Vec<String> {
    listing
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
