//! X11 clipboard adapter using xclip
//!
//! xclip forks and keeps serving the selection after this process exits,
//! which an in-process X11 owner cannot do.

use async_trait::async_trait;

use crate::application::ports::{ClipboardAccessError, ClipboardPort};
use crate::domain::content::{ClipboardPayload, FileList};

use super::command::{capture, decode_text, pipe_to};

const UTF8_STRING: &str = "UTF8_STRING";
const URI_LIST: &str = "text/uri-list";
const RTF: &str = "text/rtf";

/// X11 clipboard adapter via `xclip -selection clipboard`
pub struct XclipClipboard;

impl XclipClipboard {
    pub fn new() -> Self {
        Self
    }

    fn target(payload: &ClipboardPayload) -> &'static str {
        match payload {
            ClipboardPayload::Text(_) => UTF8_STRING,
            ClipboardPayload::FileList(_) => URI_LIST,
            ClipboardPayload::RichText(_) => RTF,
            ClipboardPayload::Binary { mime, .. } => mime.as_str(),
        }
    }

    async fn targets(&self) -> Result<Vec<String>, ClipboardAccessError> {
        let raw = capture("xclip", &["-selection", "clipboard", "-o", "-t", "TARGETS"]).await?;
        Ok(raw
            .map(|bytes| {
                String::from_utf8_lossy(&bytes)
                    .lines()
                    .map(|line| line.trim().to_string())
                    .collect()
            })
            .unwrap_or_default())
    }
}

impl Default for XclipClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClipboardPort for XclipClipboard {
    fn name(&self) -> &'static str {
        "xclip"
    }

    async fn write(&self, payload: &ClipboardPayload) -> Result<(), ClipboardAccessError> {
        let target = Self::target(payload);
        let input: Vec<u8> = match payload {
            ClipboardPayload::Text(text) => text.as_bytes().to_vec(),
            ClipboardPayload::FileList(files) => files
                .to_uri_list()
                .map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))?
                .into_bytes(),
            ClipboardPayload::RichText(rich) => rich.rtf().to_vec(),
            ClipboardPayload::Binary { data, .. } => data.clone(),
        };
        pipe_to(
            "xclip",
            &["-selection", "clipboard", "-i", "-t", target],
            &input,
        )
        .await
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardAccessError> {
        match capture("xclip", &["-selection", "clipboard", "-o", "-t", UTF8_STRING]).await? {
            Some(bytes) => decode_text(bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn read_files(&self) -> Result<Option<FileList>, ClipboardAccessError> {
        if !self.targets().await?.iter().any(|t| t == URI_LIST) {
            return Ok(None);
        }
        match capture("xclip", &["-selection", "clipboard", "-o", "-t", URI_LIST]).await? {
            Some(bytes) => Ok(FileList::from_uri_list(&String::from_utf8_lossy(&bytes))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{MimeHint, RichText};

    #[test]
    fn targets_per_payload() {
        assert_eq!(
            XclipClipboard::target(&ClipboardPayload::Text("x".into())),
            "UTF8_STRING"
        );
        assert_eq!(
            XclipClipboard::target(&ClipboardPayload::RichText(RichText::new(vec![], ""))),
            "text/rtf"
        );
        assert_eq!(
            XclipClipboard::target(&ClipboardPayload::Binary {
                data: vec![],
                mime: MimeHint::Pdf
            }),
            "application/pdf"
        );
    }
}
