//! Script file output.
//!
//! Scripts land in a fixed directory three levels above the current working
//! directory, matching the build-output layout the scripts are consumed
//! from. Writes are skipped silently when there is nothing to write.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;

/// Resolve the output directory: three levels up from the current working
/// directory. Returns `None` when the path is too shallow.
pub fn resolve_output_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let dir = cwd.ancestors().nth(3).map(Path::to_path_buf);
    if dir.is_none() {
        debug!("Output directory could not be resolved from {:?}", cwd);
    }
    dir
}

/// Write a script file, overwriting any existing file at that path.
///
/// The write is skipped (returning `Ok(None)`) when the file name or the
/// text is empty or whitespace-only. A skipped write never touches a
/// pre-existing file of the same name.
pub fn write_script(dir: &Path, file_name: &str, text: &str) -> Result<Option<PathBuf>> {
    if file_name.trim().is_empty() {
        debug!("Skipping write: empty file name");
        return Ok(None);
    }
    if text.trim().is_empty() {
        debug!("Skipping {}: no content", file_name);
        return Ok(None);
    }

    let path = dir.join(file_name);
    std::fs::write(&path, text)?;
    info!("Wrote {:?} ({} bytes)", path, text.len());
    Ok(Some(path))
}
