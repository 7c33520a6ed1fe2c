//! Recent files use case

use std::path::PathBuf;
use std::time::SystemTime;

use thiserror::Error;
use tokio::fs;

use crate::domain::content::{ClipboardPayload, FileList};
use crate::domain::recent::Duration;

use super::ports::{ClipboardAccessError, ClipboardPort};

/// Errors from the recent files use case
#[derive(Debug, Error)]
pub enum RecentError {
    #[error("No directories to search. Set 'recent.dirs' or pass --dir")]
    NoDirectories,

    #[error("No files modified in the last {0}")]
    NoneFound(Duration),

    #[error("Failed to scan {path}: {message}")]
    Scan { path: PathBuf, message: String },

    #[error(transparent)]
    Clipboard(#[from] ClipboardAccessError),
}

/// Search parameters
#[derive(Debug, Clone)]
pub struct RecentQuery {
    /// How far back to look
    pub lookback: Duration,
    /// Directories scanned (not recursively)
    pub dirs: Vec<PathBuf>,
    /// Maximum number of files returned
    pub limit: usize,
    /// Reference point for the lookback window
    pub now: SystemTime,
}

impl RecentQuery {
    pub fn new(lookback: Duration, dirs: Vec<PathBuf>, limit: usize) -> Self {
        Self {
            lookback,
            dirs,
            limit,
            now: SystemTime::now(),
        }
    }

    fn cutoff(&self) -> SystemTime {
        self.now
            .checked_sub(self.lookback.as_std())
            .unwrap_or(SystemTime::UNIX_EPOCH)
    }
}

/// A file found by the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentFile {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Find recently modified files and place them on the clipboard
pub struct RecentFilesUseCase<C>
where
    C: ClipboardPort,
{
    clipboard: C,
}

impl<C> RecentFilesUseCase<C>
where
    C: ClipboardPort,
{
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    /// See [`find_recent_files`]
    pub async fn find(&self, query: &RecentQuery) -> Result<Vec<RecentFile>, RecentError> {
        find_recent_files(query).await
    }

    /// Find recent files and copy them as a file reference list
    pub async fn copy(&self, query: &RecentQuery) -> Result<Vec<RecentFile>, RecentError> {
        let files = self.find(query).await?;

        let paths = files
            .iter()
            .map(|f| std::path::absolute(&f.path).unwrap_or_else(|_| f.path.clone()))
            .collect();
        let list = FileList::new(paths).ok_or(RecentError::NoneFound(query.lookback))?;

        self.clipboard
            .write(&ClipboardPayload::FileList(list))
            .await?;
        Ok(files)
    }
}

/// Regular, non-hidden files modified within the lookback window,
/// newest first.
pub async fn find_recent_files(query: &RecentQuery) -> Result<Vec<RecentFile>, RecentError> {
    if query.dirs.is_empty() {
        return Err(RecentError::NoDirectories);
    }

    let cutoff = query.cutoff();
    let mut found = Vec::new();

    for dir in &query.dirs {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "skipping missing directory");
                continue;
            }
            Err(e) => {
                return Err(RecentError::Scan {
                    path: dir.clone(),
                    message: e.to_string(),
                })
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    return Err(RecentError::Scan {
                        path: dir.clone(),
                        message: e.to_string(),
                    })
                }
            };

            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            // Follows symlinks; dangling links are skipped
            let Ok(metadata) = fs::metadata(&path).await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            if modified >= cutoff {
                found.push(RecentFile { path, modified });
            }
        }
    }

    found.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
    found.truncate(query.limit);

    tracing::debug!(
        dirs = query.dirs.len(),
        lookback = %query.lookback,
        matches = found.len(),
        "scanned for recent files"
    );
    if found.is_empty() {
        return Err(RecentError::NoneFound(query.lookback));
    }
    Ok(found)
}
