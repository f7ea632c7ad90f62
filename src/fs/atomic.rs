//! Atomic file replacement.
//!
//! Writes follow the same pattern everywhere:
//! 1. Write content to `.{filename}.tmp` in the target's directory
//! 2. Sync the temp file to disk
//! 3. Rename it over the target
//!
//! `rename` replaces the destination atomically when both paths live on the
//! same filesystem, which holds because the temp file is a sibling.

use crate::error::{PromptgenError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Read the target document as UTF-8 text.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        PromptgenError::Io(format!("failed to read '{}': {}", path.display(), e))
    })
}

/// Atomically replace `path` with `content`.
///
/// Missing parent directories are created. On failure the temp file is
/// removed and the original target is left untouched.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            PromptgenError::Io(format!(
                "failed to create directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content.as_bytes())?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PromptgenError::Io(format!("failed to replace '{}': {}", path.display(), e))
    })?;

    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            PromptgenError::Io(format!("invalid file path '{}'", target.display()))
        })?;
    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        PromptgenError::Io(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        PromptgenError::Io(format!("failed to write temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        PromptgenError::Io(format!("failed to sync temporary file: {}", e))
    })?;

    Ok(())
}
