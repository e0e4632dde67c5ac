// src/process/mod.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::store::RecordSink;

pub mod csv_processor;
pub mod normalize;
pub mod record;
pub mod utils;

/// Parse one season file completely, then provision the table and store its records.
///
/// Nothing is written until the whole file has parsed, so a read failure anywhere aborts
/// the file with no rows stored. Returns the number of records stored.
#[tracing::instrument(level = "info", skip(sink, path), fields(file = %path.display()))]
pub async fn ingest_file<S: RecordSink>(sink: &mut S, path: &Path) -> Result<u64> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // parsing is blocking file I/O; keep it off the async workers
    let owned = path.to_path_buf();
    let parsed = tokio::task::spawn_blocking(move || csv_processor::load_receiving_csv(&owned))
        .await
        .with_context(|| format!("parse task for {} did not complete", name))??;

    sink.ensure_table().await?;
    let stored = sink
        .insert_records(&parsed.records)
        .await
        .with_context(|| format!("storing records from {}", name))?;

    info!("loaded {} rows from {} into {}", stored, name, sink.table());
    Ok(stored)
}

/// Ingest `files` one after another, stopping at the first failure.
pub async fn ingest_all<S: RecordSink>(sink: &mut S, files: &[PathBuf]) -> Result<u64> {
    let mut total = 0;
    for path in files {
        total += ingest_file(sink, path).await?;
    }
    Ok(total)
}
