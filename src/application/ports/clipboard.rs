//! Clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::content::{ClipboardPayload, FileList};

/// Clipboard access errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardAccessError {
    #[error("{0} not found. Install it or choose another backend")]
    ToolNotFound(String),

    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write to clipboard: {0}")]
    WriteFailed(String),

    #[error("Failed to read from clipboard: {0}")]
    ReadFailed(String),

    #[error("This clipboard backend cannot handle {0}")]
    Unsupported(String),
}

/// Port for clipboard operations.
///
/// Adapters must encode each payload the way the platform expects:
/// text as UTF-8, file lists as absolute paths (or `file://` URIs where the
/// platform uses `text/uri-list`), rich text as RTF.
#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Short adapter name for diagnostics
    fn name(&self) -> &'static str;

    /// Replace the clipboard contents with `payload`.
    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardAccessError>;

    /// Read clipboard text. `Ok(None)` when the clipboard holds no text.
    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError>;

    /// Read the clipboard file list. `Ok(None)` when the clipboard holds no files.
    async fn read_files(&self) -> Result<Option<FileList>, ClipboardAccessError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl ClipboardPort for Box<dyn ClipboardPort> {
    fn name(&self) -> &'static str {
        self.as_ref().name()
    }

    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardAccessError> {
        self.as_ref().write(payload).await
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError> {
        self.as_ref().read_text().await
    }

    async fn read_files(&self) -> Result<Option<FileList>, ClipboardAccessError> {
        self.as_ref().read_files().await
    }
}
