//! 批量处理 - 扫描目录、分类、移动
//!
//! Every frame is handled independently: a failure is logged, counted and
//! the file stays where it is. Only setup problems (missing input
//! directory, unusable worker pool) abort a run.

use crate::core::classify::{classify_by_color, AverageColor, ColorConfig, CorpusMean, Decision, FrameClassifier};
use crate::core::error::{CuratorError, FrameError};
use crate::core::frame::{file_name, move_into, scan_frames, Frame};
use log::{error, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub workers: usize,
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            parallel: true,
        }
    }
}

impl RunConfig {
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            parallel: false,
        }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            parallel: true,
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel && self.workers > 1
    }
}

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    Kept { decision: Decision },
    Removed { decision: Decision, destination: PathBuf },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameOutcome {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub scanned: u64,
    pub kept: u64,
    pub removed: u64,
    pub failed: u64,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[FrameOutcome]) -> Self {
        let mut summary = Self {
            scanned: outcomes.len() as u64,
            ..Self::default()
        };
        for frame in outcomes {
            match frame.outcome {
                Outcome::Kept { .. } => summary.kept += 1,
                Outcome::Removed { .. } => summary.removed += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub policy: &'static str,
    /// Set only by the color policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus_mean: Option<AverageColor>,
    pub outcomes: Vec<FrameOutcome>,
    pub summary: RunSummary,
}

impl RunReport {
    fn new(policy: &'static str, corpus_mean: Option<AverageColor>, outcomes: Vec<FrameOutcome>) -> Self {
        let summary = RunSummary::from_outcomes(&outcomes);
        info!(
            "✅ {} run complete: {} scanned, {} kept, {} removed, {} failed",
            policy, summary.scanned, summary.kept, summary.removed, summary.failed
        );
        Self {
            policy,
            corpus_mean,
            outcomes,
            summary,
        }
    }
}

/// Moves frames out of `input` into `excluded` according to a policy
pub struct FrameCurator {
    input: PathBuf,
    excluded: PathBuf,
    pool: Option<rayon::ThreadPool>,
}

impl FrameCurator {
    /// Validates `input` and creates `excluded` up front, before any worker
    /// starts.
    pub fn new(input: &Path, excluded: &Path, run: &RunConfig) -> Result<Self, CuratorError> {
        if !input.is_dir() {
            return Err(CuratorError::NotADirectory(input.to_path_buf()));
        }
        fs::create_dir_all(excluded)?;

        let pool = if run.is_parallel() {
            Some(rayon::ThreadPoolBuilder::new().num_threads(run.workers).build()?)
        } else {
            None
        };

        info!(
            "🎬 FrameCurator: {} -> {} ({})",
            input.display(),
            excluded.display(),
            if run.is_parallel() {
                format!("{} workers", run.workers)
            } else {
                "sequential".to_string()
            }
        );

        Ok(Self {
            input: input.to_path_buf(),
            excluded: excluded.to_path_buf(),
            pool,
        })
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn excluded(&self) -> &Path {
        &self.excluded
    }

    /// Apply `f` to every item, on the pool when there is one
    fn map_frames<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(&f).collect()),
            None => items.iter().map(&f).collect(),
        }
    }

    /// Run a per-frame text policy over the input directory
    pub fn run_classifier(&self, classifier: &dyn FrameClassifier) -> Result<RunReport, CuratorError> {
        let paths = scan_frames(&self.input)?;
        info!("🔍 Checking {} frames for text ({})", paths.len(), classifier.name());

        let outcomes = self.map_frames(&paths, |path| {
            let result = Frame::open(path).and_then(|frame| classifier.classify(&frame.image));
            self.finish(path, result)
        });

        Ok(RunReport::new(classifier.name(), None, outcomes))
    }

    /// Two passes: every frame's average color, then the distance of each
    /// frame to the corpus mean. Pass 2 starts only after pass 1 is done.
    pub fn run_color(&self, config: &ColorConfig) -> Result<RunReport, CuratorError> {
        let paths = scan_frames(&self.input)?;
        info!("🎨 Scanning {} frames and calculating their average colors", paths.len());

        let averages: Vec<Result<AverageColor, FrameError>> = self.map_frames(&paths, |path| {
            let average = Frame::open(path).and_then(|frame| AverageColor::of(&frame.image));
            if let Ok(avg) = &average {
                info!("Processed {}, Average Color: {:.2?}", file_name(path), avg.0);
            }
            average
        });

        let mut outcomes = Vec::with_capacity(paths.len());
        let mut measured = Vec::with_capacity(paths.len());
        for (path, average) in paths.into_iter().zip(averages) {
            match average {
                Ok(avg) => measured.push((path, avg)),
                Err(err) => outcomes.push(self.failed(&path, err)),
            }
        }

        let colors: Vec<AverageColor> = measured.iter().map(|(_, avg)| *avg).collect();
        let Some(mean) = CorpusMean::from_averages(&colors) else {
            warn!("No decodable frames in {}, nothing to compare", self.input.display());
            return Ok(RunReport::new("color", None, outcomes));
        };
        info!("Overall Average Color: {:.2?}", mean.color().0);
        info!("Filtering frames farther than {:.2} from the mean", config.threshold);

        outcomes.extend(self.map_frames(&measured, |(path, avg)| {
            let decision = classify_by_color(avg, &mean, config.threshold);
            self.finish(path, Ok(decision))
        }));

        Ok(RunReport::new("color", Some(mean.color()), outcomes))
    }

    /// Apply a decision to the file on disk and log it
    fn finish(&self, path: &Path, result: Result<Decision, FrameError>) -> FrameOutcome {
        let decision = match result {
            Ok(decision) => decision,
            Err(err) => return self.failed(path, err),
        };

        if !decision.is_remove() {
            info!("Kept {} ({})", file_name(path), decision.evidence);
            return FrameOutcome {
                path: path.to_path_buf(),
                outcome: Outcome::Kept { decision },
            };
        }

        match move_into(path, &self.excluded) {
            Ok(destination) => {
                info!("--MOVED {} ({})", file_name(path), decision.evidence);
                FrameOutcome {
                    path: path.to_path_buf(),
                    outcome: Outcome::Removed { decision, destination },
                }
            }
            Err(err) => self.failed(path, err),
        }
    }

    fn failed(&self, path: &Path, err: FrameError) -> FrameOutcome {
        error!("❌ Error processing {}: {}", file_name(path), err);
        FrameOutcome {
            path: path.to_path_buf(),
            outcome: Outcome::Failed { error: err.to_string() },
        }
    }
}
