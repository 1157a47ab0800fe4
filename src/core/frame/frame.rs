use crate::core::error::FrameError;
use image::RgbImage;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// 帧数据结构 - 一张磁盘上的图片及其 RGB 像素
#[derive(Debug, Clone)]
pub struct Frame {
    pub path: PathBuf,
    pub image: RgbImage,
}

impl Frame {
    pub fn new(path: impl Into<PathBuf>, image: RgbImage) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }

    /// Decode any supported format and convert to 8-bit RGB
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FrameError> {
        let path = path.into();
        let image = image::open(&path)?.into_rgb8();
        Ok(Self { path, image })
    }

    pub fn file_name(&self) -> Cow<'_, str> {
        file_name(&self.path)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel_count(&self) -> usize {
        (self.image.width() as usize) * (self.image.height() as usize)
    }
}

/// Final path component for log lines, falling back to the whole path
pub fn file_name(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}
