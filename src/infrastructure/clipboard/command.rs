//! Subprocess helpers shared by the command-line clipboard adapters

use std::io::ErrorKind;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::ClipboardAccessError;

/// Spawn `program args...`, write `input` to its stdin and wait for it.
pub(super) async fn pipe_to(
    program: &str,
    args: &[&str],
    input: &[u8],
) -> Result<(), ClipboardAccessError> {
    tracing::trace!(program, ?args, bytes = input.len(), "spawning clipboard writer");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ClipboardAccessError::ToolNotFound(program.to_string())
            } else {
                ClipboardAccessError::WriteFailed(e.to_string())
            }
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input)
            .await
            .map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))?;
        // stdin dropped here so the tool sees EOF
    }

    let status = child
        .wait()
        .await
        .map_err(|e| ClipboardAccessError::WriteFailed(e.to_string()))?;

    if !status.success() {
        return Err(ClipboardAccessError::WriteFailed(format!(
            "{} exited with status: {}",
            program, status
        )));
    }

    Ok(())
}

/// Run `program args...` and capture stdout.
///
/// A non-zero exit means the requested content is not on the clipboard and
/// yields `Ok(None)`; these tools report "no selection" that way.
pub(super) async fn capture(
    program: &str,
    args: &[&str],
) -> Result<Option<Vec<u8>>, ClipboardAccessError> {
    tracing::trace!(program, ?args, "spawning clipboard reader");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ClipboardAccessError::ToolNotFound(program.to_string())
            } else {
                ClipboardAccessError::ReadFailed(e.to_string())
            }
        })?;

    if !output.status.success() {
        tracing::debug!(
            program,
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "clipboard reader returned nothing"
        );
        return Ok(None);
    }

    Ok(Some(output.stdout))
}

/// Check if a tool binary is available using `which`
pub async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Decode clipboard text bytes, rejecting invalid UTF-8
pub(super) fn decode_text(bytes: Vec<u8>) -> Result<String, ClipboardAccessError> {
    String::from_utf8(bytes)
        .map_err(|e| ClipboardAccessError::ReadFailed(format!("clipboard text is not UTF-8: {}", e)))
}
