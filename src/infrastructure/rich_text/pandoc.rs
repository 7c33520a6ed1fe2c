//! Markdown to RTF via an external `pandoc` binary

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::{ConversionError, RichTextRenderer};

/// Pandoc-backed renderer (`pandoc -f markdown -t rtf -s`)
pub struct PandocRenderer {
    program: String,
}

impl PandocRenderer {
    pub fn new() -> Self {
        Self::with_program("pandoc")
    }

    /// Use a specific pandoc executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PandocRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RichTextRenderer for PandocRenderer {
    fn name(&self) -> &'static str {
        "pandoc"
    }

    async fn render(&self, markdown: &str) -> Result<Vec<u8>, ConversionError> {
        let mut child = Command::new(&self.program)
            .args(["-f", "markdown", "-t", "rtf", "-s"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ConversionError::ToolNotFound(self.program.clone())
                } else {
                    ConversionError::Render(e.to_string())
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(markdown.as_bytes())
                .await
                .map_err(|e| ConversionError::Render(e.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| ConversionError::Render(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConversionError::Render(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(bytes = output.stdout.len(), "pandoc rendered rich text");
        Ok(output.stdout)
    }
}
