// src/discover.rs

use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};
use tracing::debug;

/// List the `.csv` files directly inside `dir` (no recursion).
///
/// A missing or empty directory yields an empty list; the caller decides whether
/// that is fatal. Order is whatever the directory walk returns.
pub fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/*.csv", Pattern::escape(&dir.to_string_lossy()));
    let files: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    debug!(dir = %dir.display(), count = files.len(), "discovered csv files");
    Ok(files)
}
