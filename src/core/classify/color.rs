//! 颜色离群检测 - 两遍算法
//!
//! Pass 1 folds every frame's average color into the corpus mean; pass 2
//! measures each frame against it. The mean only exists once the whole
//! batch has been seen.

use super::decision::{Decision, Evidence};
use crate::core::error::FrameError;
use image::RgbImage;
use serde::Serialize;

/// Largest possible distance between two RGB colors, `255 * sqrt(3)`
pub const MAX_COLOR_DISTANCE: f64 = 441.672_955_930_063_7;

pub const DEFAULT_COLOR_THRESHOLD: f64 = 85.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ColorConfig {
    /// Frames farther than this from the corpus mean are removed
    pub threshold: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_COLOR_THRESHOLD,
        }
    }
}

/// Per-channel mean of an image, `[r, g, b]` in 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageColor(pub [f64; 3]);

impl AverageColor {
    pub fn of(image: &RgbImage) -> Result<Self, FrameError> {
        let pixel_count = (image.width() as u64) * (image.height() as u64);
        if pixel_count == 0 {
            return Err(FrameError::EmptyImage);
        }

        let mut sums = [0u64; 3];
        for rgb in image.as_raw().chunks_exact(3) {
            sums[0] += rgb[0] as u64;
            sums[1] += rgb[1] as u64;
            sums[2] += rgb[2] as u64;
        }

        let n = pixel_count as f64;
        Ok(Self([
            sums[0] as f64 / n,
            sums[1] as f64 / n,
            sums[2] as f64 / n,
        ]))
    }

    /// Euclidean distance in RGB space
    pub fn distance(&self, other: &AverageColor) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

/// Mean of the per-frame averages, each frame weighted equally regardless
/// of its resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorpusMean(AverageColor);

impl CorpusMean {
    /// `None` for an empty corpus
    pub fn from_averages(averages: &[AverageColor]) -> Option<Self> {
        if averages.is_empty() {
            return None;
        }

        let mut sums = [0f64; 3];
        for avg in averages {
            for (sum, channel) in sums.iter_mut().zip(avg.0.iter()) {
                *sum += channel;
            }
        }

        let n = averages.len() as f64;
        Some(Self(AverageColor([sums[0] / n, sums[1] / n, sums[2] / n])))
    }

    pub fn color(&self) -> AverageColor {
        self.0
    }
}

/// REMOVE when the frame's average is strictly farther than `threshold`
/// from the corpus mean.
pub fn classify_by_color(average: &AverageColor, mean: &CorpusMean, threshold: f64) -> Decision {
    let distance = average.distance(&mean.color());
    let evidence = Evidence::ColorDistance { distance, threshold };

    if distance > threshold {
        Decision::remove(evidence)
    } else {
        Decision::keep(evidence)
    }
}
