//! Native clipboard adapter using clipboard-rs
//!
//! Talks to the macOS pasteboard, the Win32 clipboard or X11 directly.

use async_trait::async_trait;
use clipboard_rs::{Clipboard, ClipboardContent, ClipboardContext, ContentFormat};

use crate::application::ports::{ClipboardAccessError, ClipboardPort};
use crate::domain::content::{ClipboardPayload, FileList};
use crate::domain::error::NonUnicodePath;

/// Native clipboard adapter using clipboard-rs
pub struct NativeClipboard;

impl NativeClipboard {
    /// Create a new native clipboard adapter
    pub fn new() -> Self {
        Self
    }

    /// Representations offered for a payload, most specific first
    fn contents(payload: &ClipboardPayload) -> Result<Vec<ClipboardContent>, ClipboardAccessError> {
        let contents = match payload {
            ClipboardPayload::Text(text) => vec![ClipboardContent::Text(text.clone())],
            ClipboardPayload::FileList(files) => {
                let entries =
                    file_entries(files).map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))?;
                vec![ClipboardContent::Files(entries)]
            }
            ClipboardPayload::RichText(rich) => {
                let rtf = String::from_utf8(rich.rtf().to_vec())
                    .map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))?;
                vec![
                    ClipboardContent::Rtf(rtf),
                    ClipboardContent::Text(rich.plain().to_string()),
                ]
            }
            ClipboardPayload::Binary { data, mime } => {
                vec![ClipboardContent::Other(mime.as_str().to_string(), data.clone())]
            }
        };
        Ok(contents)
    }
}

impl Default for NativeClipboard {
    fn default() -> Self {
        Self::new()
    }
}

/// X11 exchanges file lists as `file://` URIs; macOS and Windows use paths
#[cfg(target_os = "linux")]
fn file_entries(files: &FileList) -> Result<Vec<String>, NonUnicodePath> {
    files.to_uris()
}

#[cfg(not(target_os = "linux"))]
fn file_entries(files: &FileList) -> Result<Vec<String>, NonUnicodePath> {
    files.to_path_strings()
}

fn open() -> Result<ClipboardContext, ClipboardAccessError> {
    ClipboardContext::new().map_err(|e| ClipboardAccessError::Unavailable(e.to_string()))
}

#[async_trait]
impl ClipboardPort for NativeClipboard {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardAccessError> {
        let contents = Self::contents(payload)?;

        // clipboard-rs calls are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let clipboard = open()?;
            clipboard
                .set(contents)
                .map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardAccessError::WriteFailed(format!("Task join error: {}", e)))?
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError> {
        tokio::task::spawn_blocking(move || {
            let clipboard = open()?;
            if !clipboard.has(ContentFormat::Text) {
                return Ok(None);
            }
            clipboard
                .get_text()
                .map(Some)
                .map_err(|e| ClipboardAccessError::ReadFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardAccessError::ReadFailed(format!("Task join error: {}", e)))?
    }

    async fn read_files(&self) -> Result<Option<FileList>, ClipboardAccessError> {
        tokio::task::spawn_blocking(move || {
            let clipboard = open()?;
            if !clipboard.has(ContentFormat::Files) {
                return Ok(None);
            }
            let entries = clipboard
                .get_files()
                .map_err(|e| ClipboardAccessError::ReadFailed(e.to_string()))?;
            Ok(FileList::from_uri_list(&entries.join("\n")))
        })
        .await
        .map_err(|e| ClipboardAccessError::ReadFailed(format!("Task join error: {}", e)))?
    }
}
