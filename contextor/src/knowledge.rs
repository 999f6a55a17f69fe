//! Flat-file knowledge base: a JSON array of [`KnowledgeEntry`] on disk.
//!
//! Reads parse the whole file; writes replace it atomically by writing a
//! sibling temporary file and renaming it over the original.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::api_types::KnowledgeEntry;
use crate::error::ContextorError;

/// In-memory copy of the knowledge file plus the time it was loaded.
#[derive(Debug)]
pub struct KnowledgeBase {
    path: PathBuf,
    entries: Vec<KnowledgeEntry>,
    loaded_at: Instant,
}

impl KnowledgeBase {
    /// Loads the knowledge file at `path`.
    ///
    /// # Errors
    /// [`ContextorError::KnowledgeRead`] if the file cannot be read,
    /// [`ContextorError::KnowledgeFormat`] if it is not a JSON array of entries.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, ContextorError> {
        let path = path.into();
        let entries = read_entries(&path).await?;
        info!(path = %path.display(), entries = entries.len(), "knowledge loaded");
        Ok(Self {
            path,
            entries,
            loaded_at: Instant::now(),
        })
    }

    /// Re-reads the file. On error the current entries and load time are kept.
    pub async fn reload(&mut self) -> Result<(), ContextorError> {
        let entries = read_entries(&self.path).await?;
        info!(
            path = %self.path.display(),
            before = self.entries.len(),
            after = entries.len(),
            "knowledge reloaded"
        );
        self.entries = entries;
        self.loaded_at = Instant::now();
        Ok(())
    }

    /// `true` once strictly more than `interval` has passed since the last load.
    pub fn is_stale(&self, interval: Duration) -> bool {
        self.loaded_at.elapsed() > interval
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Id for a new entry: highest existing id plus one (`1` when empty).
    ///
    /// # Errors
    /// [`ContextorError::IdOverflow`] when the highest id is already `i64::MAX`.
    pub fn next_id(&self) -> Result<i64, ContextorError> {
        match self.entries.iter().map(|e| e.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or(ContextorError::IdOverflow {
                path: self.path.clone(),
                max,
            }),
        }
    }

    /// Appends `entry` and rewrites the whole file.
    ///
    /// If persisting fails the entry is removed again, so memory and disk
    /// stay in sync.
    pub async fn append(&mut self, entry: KnowledgeEntry) -> Result<(), ContextorError> {
        self.entries.push(entry);
        if let Err(e) = write_entries_atomic(&self.path, &self.entries).await {
            self.entries.pop();
            return Err(e);
        }
        Ok(())
    }
}

/// Parses the knowledge file at `path`.
pub async fn read_entries(path: &Path) -> Result<Vec<KnowledgeEntry>, ContextorError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ContextorError::KnowledgeRead {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|source| ContextorError::KnowledgeFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `entries` as pretty JSON (2-space indent, UTF-8 kept as is) to a
/// temporary sibling of `path`, flushes it, then renames it over `path`.
pub async fn write_entries_atomic(
    path: &Path,
    entries: &[KnowledgeEntry],
) -> Result<(), ContextorError> {
    let body = serde_json::to_vec_pretty(entries)?;
    let tmp = temp_sibling(path);
    let write_err = |source| ContextorError::KnowledgeWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut file = tokio::fs::File::create(&tmp).await.map_err(write_err)?;
    let written = async {
        file.write_all(&body).await?;
        file.sync_all().await
    }
    .await;
    drop(file);

    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(write_err(e));
    }

    debug!(path = %path.display(), entries = entries.len(), bytes = body.len(), "knowledge persisted");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "knowledge.json".to_string());
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}
