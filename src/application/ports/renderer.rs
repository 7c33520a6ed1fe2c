//! Rich text renderer port interface

use async_trait::async_trait;
use thiserror::Error;

/// Markdown to rich text conversion errors
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    #[error("{0} not found. Install it or set 'renderer = \"builtin\"'")]
    ToolNotFound(String),

    #[error("Failed to render rich text: {0}")]
    Render(String),

    #[error("Rich text is not valid text: {0}")]
    Encoding(String),

    #[error("Markdown produced no renderable content")]
    EmptyOutput,

    #[error("Renderer output does not start with an RTF header")]
    MalformedOutput,
}

/// Port for rendering markdown into RTF bytes
#[async_trait]
pub trait RichTextRenderer: Send + Sync {
    /// Short renderer name for diagnostics
    fn name(&self) -> &'static str;

    /// Render `markdown` into an RTF document.
    ///
    /// Empty input must still produce a minimal valid document.
    async fn render(&self, markdown: &str) -> Result<Vec<u8>, ConversionError>;
}

/// Blanket implementation for boxed renderer types
#[async_trait]
impl RichTextRenderer for Box<dyn RichTextRenderer> {
    fn name(&self) -> &'static str {
        self.as_ref().name()
    }

    async fn render(&self, markdown: &str) -> Result<Vec<u8>, ConversionError> {
        self.as_ref().render(markdown).await
    }
}
