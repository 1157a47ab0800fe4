use crate::core::error::FrameError;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Move `src` into `dest_dir`, keeping its file name. Returns the new path.
///
/// Existing files in `dest_dir` are never overwritten. When a plain rename
/// fails (e.g. across filesystems) the file is copied and the source removed.
pub fn move_into(src: &Path, dest_dir: &Path) -> Result<PathBuf, FrameError> {
    let name = src.file_name().ok_or_else(|| {
        FrameError::Move(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("no file name in {}", src.display()),
        ))
    })?;
    let dest = dest_dir.join(name);

    if dest.exists() {
        return Err(FrameError::DestinationExists(dest));
    }

    match fs::rename(src, &dest) {
        Ok(()) => {}
        Err(err) if src.is_file() && !dest.exists() => {
            debug!("rename {} failed ({}), copying instead", src.display(), err);
            fs::copy(src, &dest)?;
            fs::remove_file(src)?;
        }
        Err(err) => return Err(err.into()),
    }

    Ok(dest)
}
