//! Paste use case

use thiserror::Error;

use crate::domain::content::FileList;

use super::ports::{ClipboardAccessError, ClipboardPort};

/// Errors from the paste use case
#[derive(Debug, Error)]
pub enum PasteError {
    #[error("Clipboard contains no {0}")]
    Empty(&'static str),

    #[error(transparent)]
    Clipboard(#[from] ClipboardAccessError),
}

/// Read text or file lists from the clipboard
pub struct PasteUseCase<C>
where
    C: ClipboardPort,
{
    clipboard: C,
}

impl<C> PasteUseCase<C>
where
    C: ClipboardPort,
{
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    /// Current clipboard text
    pub async fn paste_text(&self) -> Result<String, PasteError> {
        tracing::debug!(backend = self.clipboard.name(), "reading clipboard text");
        match self.clipboard.read_text().await? {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(PasteError::Empty("text")),
        }
    }

    /// Current clipboard file references
    pub async fn paste_files(&self) -> Result<FileList, PasteError> {
        tracing::debug!(backend = self.clipboard.name(), "reading clipboard files");
        self.clipboard
            .read_files()
            .await?
            .ok_or(PasteError::Empty("files"))
    }
}
