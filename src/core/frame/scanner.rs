use crate::core::error::CuratorError;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions considered frames, compared case-insensitively
pub const FRAME_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FRAME_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Frame files directly inside `dir`, sorted by name. Not recursive.
pub fn scan_frames(dir: &Path) -> Result<Vec<PathBuf>, CuratorError> {
    if !dir.is_dir() {
        return Err(CuratorError::NotADirectory(dir.to_path_buf()));
    }

    let mut frames = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_frame_file(&path) {
            frames.push(path);
        }
    }

    frames.sort();
    Ok(frames)
}
