//! Wayland clipboard adapter using wl-copy / wl-paste

use async_trait::async_trait;

use crate::application::ports::{ClipboardAccessError, ClipboardPort};
use crate::domain::content::{ClipboardPayload, FileList};

use super::command::{capture, decode_text, pipe_to};

const URI_LIST: &str = "text/uri-list";
const RTF: &str = "text/rtf";

/// Wayland clipboard adapter using wl-clipboard
pub struct WaylandClipboard;

impl WaylandClipboard {
    /// Create a new Wayland clipboard adapter
    pub fn new() -> Self {
        Self
    }

    /// `wl-copy` arguments and stdin bytes for a payload.
    ///
    /// wl-copy offers a single MIME type per invocation, so rich text is
    /// offered as RTF only.
    fn copy_args(
        payload: &ClipboardPayload,
    ) -> Result<(Vec<&'static str>, Vec<u8>), ClipboardAccessError> {
        let args = match payload {
            ClipboardPayload::Text(text) => (vec![], text.as_bytes().to_vec()),
            ClipboardPayload::FileList(files) => {
                let list = files
                    .to_uri_list()
                    .map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))?;
                (vec!["--type", URI_LIST], list.into_bytes())
            }
            ClipboardPayload::RichText(rich) => (vec!["--type", RTF], rich.rtf().to_vec()),
            ClipboardPayload::Binary { data, mime } => (vec!["--type", mime.as_str()], data.clone()),
        };
        Ok(args)
    }

    async fn offered_types(&self) -> Result<Vec<String>, ClipboardAccessError> {
        let types = capture("wl-paste", &["--list-types"]).await?;
        Ok(types
            .map(|bytes| {
                String::from_utf8_lossy(&bytes)
                    .lines()
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty())
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl Default for WaylandClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardPort for WaylandClipboard {
    fn name(&self) -> &'static str {
        "wayland"
    }

    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardAccessError> {
        let (args, input) = Self::copy_args(payload)?;
        if matches!(payload, ClipboardPayload::RichText(_)) {
            tracing::debug!("wl-copy offers rich text without a plain-text alternative");
        }
        pipe_to("wl-copy", &args, &input).await
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError> {
        match capture("wl-paste", &["--no-newline", "--type", "text"]).await? {
            Some(bytes) => decode_text(bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn read_files(&self) -> Result<Option<FileList>, ClipboardAccessError> {
        if !self.offered_types().await?.iter().any(|t| t == URI_LIST) {
            return Ok(None);
        }
        match capture("wl-paste", &["--no-newline", "--type", URI_LIST]).await? {
            Some(bytes) => Ok(FileList::from_uri_list(&String::from_utf8_lossy(&bytes))),
            None => Ok(None),
        }
    }
}
