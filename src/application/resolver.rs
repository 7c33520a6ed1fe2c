//! Content resolution: text vs binary sniffing and markdown conversion

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, Parser};
use thiserror::Error;

use crate::domain::config::{AppConfig, DEFAULT_SNIFF_SIZE_LIMIT, DEFAULT_SNIFF_WINDOW};
use crate::domain::content::{
    has_text_extension, ClipboardPayload, ContentKind, FileList, MimeHint, PeekableStream,
    RichText, SourceInput, RTF_HEADER,
};

use super::ports::{ConversionError, RichTextRenderer};

/// Errors reading or classifying an input
#[derive(Debug, Clone, Error)]
pub enum ResolutionError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a regular file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Failed to read {origin}: {message}")]
    Io { origin: String, message: String },

    #[error("Nothing to copy: {0} is empty")]
    Empty(String),
}

impl ResolutionError {
    fn io(origin: impl Into<String>, err: io::Error) -> Self {
        Self::Io {
            origin: origin.into(),
            message: err.to_string(),
        }
    }

    fn from_metadata(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::io(path.display().to_string(), err)
        }
    }
}

/// Resolver tuning, passed in at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Bytes inspected when sniffing
    pub sniff_window: usize,
    /// Files above this size are classified by extension only
    pub sniff_size_limit: u64,
    /// Reject empty inputs with `ResolutionError::Empty`
    pub require_non_empty: bool,
    /// Reject markdown that renders to nothing with `ConversionError::EmptyOutput`
    pub require_rendered_content: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            sniff_window: DEFAULT_SNIFF_WINDOW,
            sniff_size_limit: DEFAULT_SNIFF_SIZE_LIMIT,
            require_non_empty: true,
            require_rendered_content: false,
        }
    }
}

impl ResolverConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            sniff_window: config.sniff_window_or_default(),
            sniff_size_limit: config.sniff_size_limit_or_default(),
            ..Self::default()
        }
    }
}

/// Decides how an input lands on the clipboard and performs conversions
pub struct ContentResolver<R>
where
    R: RichTextRenderer,
{
    renderer: R,
    config: ResolverConfig,
}

impl<R> ContentResolver<R>
where
    R: RichTextRenderer,
{
    pub fn new(renderer: R, config: ResolverConfig) -> Self {
        Self { renderer, config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Classify an input as text or binary.
    ///
    /// Reads at most `sniff_window` bytes. Stream bytes inspected here remain
    /// buffered in the stream and are still returned by later reads.
    pub fn classify(&self, input: &mut SourceInput) -> Result<ContentKind, ResolutionError> {
        match input {
            SourceInput::Path(path) => self.classify_path(path),
            SourceInput::Stream(stream) => self.classify_stream(stream),
            SourceInput::Text(text) => {
                if text.is_empty() && self.config.require_non_empty {
                    return Err(ResolutionError::Empty("text".to_string()));
                }
                Ok(ContentKind::Text)
            }
        }
    }

    fn classify_path(&self, path: &Path) -> Result<ContentKind, ResolutionError> {
        let metadata = fs::metadata(path).map_err(|e| ResolutionError::from_metadata(path, e))?;
        if !metadata.is_file() {
            return Err(ResolutionError::NotAFile(path.to_path_buf()));
        }

        let len = metadata.len();
        if len == 0 {
            if self.config.require_non_empty {
                return Err(ResolutionError::Empty(path.display().to_string()));
            }
            return Ok(ContentKind::Text);
        }

        if len > self.config.sniff_size_limit {
            let kind = if has_text_extension(path) {
                ContentKind::Text
            } else {
                ContentKind::Binary(MimeHint::from_extension(path).unwrap_or_default())
            };
            tracing::debug!(path = %path.display(), size = len, %kind, "classified by extension");
            return Ok(kind);
        }

        let mut prefix = Vec::with_capacity(self.config.sniff_window.min(len as usize));
        File::open(path)
            .and_then(|file| {
                file.take(self.config.sniff_window as u64)
                    .read_to_end(&mut prefix)
            })
            .map_err(|e| ResolutionError::io(path.display().to_string(), e))?;

        let complete = len <= self.config.sniff_window as u64;
        let kind = sniff(&prefix, complete, Some(path));
        tracing::debug!(path = %path.display(), sniffed = prefix.len(), %kind, "classified file");
        Ok(kind)
    }

    fn classify_stream(&self, stream: &mut PeekableStream) -> Result<ContentKind, ResolutionError> {
        let window = self.config.sniff_window;
        let prefix = stream
            .peek(window)
            .map_err(|e| ResolutionError::io("stream", e))?;

        if prefix.is_empty() && self.config.require_non_empty {
            return Err(ResolutionError::Empty("input stream".to_string()));
        }

        let complete = prefix.len() < window;
        let kind = sniff(prefix, complete, None);
        tracing::debug!(sniffed = prefix.len(), %kind, "classified stream");
        Ok(kind)
    }

    /// Turn an input into the payload that should be placed on the clipboard.
    ///
    /// Text files become their contents; binary files become a file
    /// reference; binary streams keep their bytes.
    pub fn resolve(&self, mut input: SourceInput) -> Result<ClipboardPayload, ResolutionError> {
        let kind = self.classify(&mut input)?;

        match input {
            SourceInput::Text(text) => Ok(ClipboardPayload::Text(text)),
            SourceInput::Path(path) => match kind {
                ContentKind::Text => match fs::read(&path) {
                    Ok(bytes) => match String::from_utf8(bytes) {
                        Ok(text) => Ok(ClipboardPayload::Text(text)),
                        Err(_) => {
                            tracing::debug!(path = %path.display(), "invalid UTF-8 past sniff window, copying as file");
                            file_reference(&[path])
                        }
                    },
                    Err(e) => Err(ResolutionError::io(path.display().to_string(), e)),
                },
                ContentKind::Binary(_) => file_reference(&[path]),
            },
            SourceInput::Stream(mut stream) => {
                let mut data = Vec::new();
                stream
                    .read_to_end(&mut data)
                    .map_err(|e| ResolutionError::io("stream", e))?;

                match kind {
                    ContentKind::Text => match String::from_utf8(data) {
                        Ok(text) => Ok(ClipboardPayload::Text(text)),
                        Err(e) => {
                            let data = e.into_bytes();
                            let mime = MimeHint::detect(&data, None);
                            Ok(ClipboardPayload::Binary { data, mime })
                        }
                    },
                    ContentKind::Binary(mime) => Ok(ClipboardPayload::Binary { data, mime }),
                }
            }
        }
    }

    /// Resolve one or more paths.
    ///
    /// A single regular file goes through [`ContentResolver::resolve`];
    /// directories and multiple paths are placed as a file reference list.
    pub fn resolve_paths(&self, paths: &[PathBuf]) -> Result<ClipboardPayload, ResolutionError> {
        if let [single] = paths {
            let metadata =
                fs::metadata(single).map_err(|e| ResolutionError::from_metadata(single, e))?;
            if metadata.is_dir() {
                return file_reference(paths);
            }
            return self.resolve(SourceInput::Path(single.clone()));
        }

        if paths.is_empty() {
            return Err(ResolutionError::Empty("file list".to_string()));
        }
        for path in paths {
            fs::metadata(path).map_err(|e| ResolutionError::from_metadata(path, e))?;
        }
        file_reference(paths)
    }

    /// Render markdown into an RTF document.
    ///
    /// Empty input yields a minimal document unless
    /// `require_rendered_content` is set.
    pub async fn convert_markdown_to_rich_text(
        &self,
        markdown: &str,
    ) -> Result<Vec<u8>, ConversionError> {
        if self.config.require_rendered_content && !has_renderable_content(markdown) {
            return Err(ConversionError::EmptyOutput);
        }

        let rtf = self.renderer.render(markdown).await?;
        if !rtf.starts_with(RTF_HEADER) {
            return Err(ConversionError::MalformedOutput);
        }
        // Clipboard APIs carry RTF as a string
        std::str::from_utf8(&rtf).map_err(|e| ConversionError::Encoding(e.to_string()))?;

        tracing::debug!(
            renderer = self.renderer.name(),
            input = markdown.len(),
            output = rtf.len(),
            "rendered markdown"
        );
        Ok(rtf)
    }

    /// Convert a text payload into rich text, keeping the markdown as the
    /// plain-text alternative. Other payloads pass through unchanged.
    pub async fn render_payload(
        &self,
        payload: ClipboardPayload,
    ) -> Result<ClipboardPayload, ConversionError> {
        match payload {
            ClipboardPayload::Text(markdown) => {
                let rtf = self.convert_markdown_to_rich_text(&markdown).await?;
                Ok(ClipboardPayload::RichText(RichText::new(rtf, markdown)))
            }
            other => Ok(other),
        }
    }
}

/// Classify a byte prefix.
///
/// `complete` means the prefix is the whole input, so a multi-byte sequence
/// cut off at the end is a real encoding error rather than a window artifact.
fn sniff(prefix: &[u8], complete: bool, path: Option<&Path>) -> ContentKind {
    if prefix.contains(&0) {
        return ContentKind::Binary(MimeHint::detect(prefix, path));
    }
    match std::str::from_utf8(prefix) {
        Ok(_) => ContentKind::Text,
        Err(e) if e.error_len().is_none() && !complete => ContentKind::Text,
        Err(_) => ContentKind::Binary(MimeHint::detect(prefix, path)),
    }
}

fn file_reference(paths: &[PathBuf]) -> Result<ClipboardPayload, ResolutionError> {
    let absolute = paths
        .iter()
        .map(|p| std::path::absolute(p).map_err(|e| ResolutionError::io(p.display().to_string(), e)))
        .collect::<Result<Vec<_>, _>>()?;
    FileList::new(absolute)
        .map(ClipboardPayload::FileList)
        .ok_or_else(|| ResolutionError::Empty("file list".to_string()))
}

/// Whether markdown yields anything visible once parsed
fn has_renderable_content(markdown: &str) -> bool {
    Parser::new(markdown).any(|event| match event {
        Event::Text(text) | Event::Code(text) => !text.trim().is_empty(),
        Event::Rule | Event::TaskListMarker(_) => true,
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_plain_text() {
        assert_eq!(sniff(b"hello world\n", true, None), ContentKind::Text);
        assert_eq!(sniff("héllo ✓".as_bytes(), true, None), ContentKind::Text);
    }

    #[test]
    fn sniff_nul_is_binary() {
        assert!(matches!(
            sniff(b"abc\x00def", true, None),
            ContentKind::Binary(MimeHint::OctetStream)
        ));
    }

    #[test]
    fn sniff_invalid_utf8_is_binary() {
        assert!(!sniff(b"\xff\xfe\xfd", true, None).is_text());
    }

    #[test]
    fn sniff_truncated_sequence_at_window_edge_is_text() {
        let bytes = "ab✓".as_bytes();
        let cut = &bytes[..bytes.len() - 1];
        assert_eq!(sniff(cut, false, None), ContentKind::Text);
        assert!(!sniff(cut, true, None).is_text());
    }

    #[test]
    fn sniff_uses_magic_for_mime() {
        let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
        assert_eq!(sniff(png, true, None), ContentKind::Binary(MimeHint::Png));
    }

    #[test]
    fn renderable_content_detection() {
        assert!(!has_renderable_content(""));
        assert!(!has_renderable_content("   \n\n"));
        assert!(!has_renderable_content("<!-- hidden -->"));
        assert!(has_renderable_content("**bold**"));
        assert!(has_renderable_content("---"));
        assert!(has_renderable_content("`code`"));
    }
}
