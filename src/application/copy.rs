//! Copy use case

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::content::{ClipboardPayload, PeekableStream, SourceInput};

use super::ports::{ClipboardAccessError, ClipboardPort, ConversionError, RichTextRenderer};
use super::resolver::{ContentResolver, ResolutionError};

/// Errors from the copy use case
#[derive(Debug, Error)]
pub enum CopyError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Markdown conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardAccessError),
}

/// What to copy
#[derive(Debug)]
pub enum CopySource {
    /// Literal text
    Text(String),
    /// One or more files
    Files(Vec<PathBuf>),
    /// A byte stream such as stdin
    Stream(PeekableStream),
}

/// Input parameters for the copy use case
#[derive(Debug)]
pub struct CopyInput {
    pub source: CopySource,
    /// Treat text as markdown and place it as rich text
    pub markdown: bool,
}

/// Output from the copy use case
#[derive(Debug, Clone)]
pub struct CopyOutput {
    /// Variant placed on the clipboard
    pub kind: &'static str,
    /// Human-readable description of the payload
    pub description: String,
    /// Size of the clipboard representation in bytes
    pub size_bytes: usize,
    /// Number of file references placed (0 unless a file list)
    pub file_count: usize,
    /// Whether markdown was rendered to rich text
    pub converted: bool,
}

/// Copy text, files or streams to the clipboard
pub struct CopyUseCase<C, R>
where
    C: ClipboardPort,
    R: RichTextRenderer,
{
    clipboard: C,
    resolver: ContentResolver<R>,
}

impl<C, R> CopyUseCase<C, R>
where
    C: ClipboardPort,
    R: RichTextRenderer,
{
    /// Create a new use case instance
    pub fn new(clipboard: C, resolver: ContentResolver<R>) -> Self {
        Self {
            clipboard,
            resolver,
        }
    }

    /// Resolve the input and write it to the clipboard
    pub async fn execute(&self, input: CopyInput) -> Result<CopyOutput, CopyError> {
        let payload = match input.source {
            CopySource::Text(text) => self.resolver.resolve(SourceInput::Text(text))?,
            CopySource::Files(paths) => self.resolver.resolve_paths(&paths)?,
            CopySource::Stream(stream) => self.resolver.resolve(SourceInput::Stream(stream))?,
        };

        let payload = if input.markdown {
            if !matches!(payload, ClipboardPayload::Text(_)) {
                tracing::info!(kind = payload.kind_name(), "markdown ignored for non-text content");
            }
            self.resolver.render_payload(payload).await?
        } else {
            payload
        };

        tracing::debug!(backend = self.clipboard.name(), payload = %payload, "writing clipboard");
        self.clipboard.write(&payload).await?;

        Ok(CopyOutput {
            kind: payload.kind_name(),
            description: payload.to_string(),
            size_bytes: payload.size_bytes(),
            file_count: match &payload {
                ClipboardPayload::FileList(files) => files.len(),
                _ => 0,
            },
            converted: matches!(payload, ClipboardPayload::RichText(_)),
        })
    }
}
