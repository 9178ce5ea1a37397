use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::paths::Layout;

/// Remove and recreate the staging tree. Anything left over from a previous
/// run is destroyed; a partially-cleaned stage must not be built upon, so any
/// filesystem error other than "already absent" aborts.
pub fn prepare(layout: &Layout) -> Result<()> {
    for dir in [layout.stage_dir(), layout.static_dir(), layout.bindgen_dir()] {
        remove_dir_if_present(&dir)
            .with_context(|| format!("failed to clear {}", dir.display()))?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    debug!("prepared staging tree at {}", layout.stage_dir().display());
    Ok(())
}

fn remove_dir_if_present(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Copy one file, creating the destination's parent directories. A missing
/// source file is an error.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Recursively copy every file under `src` to the same relative path under
/// `dst`. Files already present at the destination are overwritten.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    let entries =
        fs::read_dir(src).with_context(|| format!("failed to read {}", src.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", src.display()))?;
        let target = dst.join(entry.file_name());
        if entry
            .file_type()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?
            .is_dir()
        {
            copy_tree(&entry.path(), &target)?;
        } else {
            copy_file(&entry.path(), &target)?;
        }
    }
    Ok(())
}
