//! Clipboard backend factory with automatic detection

use std::fmt;

#[cfg(target_os = "linux")]
use std::env;

use crate::application::ports::{ClipboardAccessError, ClipboardPort};
use crate::domain::config::BackendPreference;

use super::native::NativeClipboard;
#[cfg(target_os = "linux")]
use super::command::is_tool_available;
#[cfg(target_os = "linux")]
use super::wayland::WaylandClipboard;
#[cfg(target_os = "linux")]
use super::xclip::XclipClipboard;

/// Clipboard backends that can be selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    /// clipboard-rs (macOS pasteboard, Win32, X11)
    Native,
    /// wl-copy / wl-paste
    Wayland,
    /// xclip
    Xclip,
}

impl fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardBackend::Native => write!(f, "native"),
            ClipboardBackend::Wayland => write!(f, "wayland"),
            ClipboardBackend::Xclip => write!(f, "xclip"),
        }
    }
}

/// Detect the best clipboard backend for this session
///
/// On Windows/macOS: always Native.
/// On Linux: wl-copy in a Wayland session, then xclip, then Native.
/// An in-process X11 owner loses the selection when clipctl exits, so the
/// forking tools come first.
pub async fn detect_clipboard_backend() -> ClipboardBackend {
    #[cfg(not(target_os = "linux"))]
    {
        ClipboardBackend::Native
    }

    #[cfg(target_os = "linux")]
    {
        let wayland_session = env::var_os("WAYLAND_DISPLAY").is_some_and(|v| !v.is_empty());
        if wayland_session && is_tool_available("wl-copy").await {
            return ClipboardBackend::Wayland;
        }

        if is_tool_available("xclip").await {
            return ClipboardBackend::Xclip;
        }

        ClipboardBackend::Native
    }
}

/// Create a clipboard adapter for the given preference.
///
/// Returns the adapter and the backend actually chosen. Explicitly
/// requesting a tool-based backend fails when the tool is missing.
pub async fn create_clipboard(
    preference: BackendPreference,
) -> Result<(Box<dyn ClipboardPort>, ClipboardBackend), ClipboardAccessError> {
    let backend = match preference {
        BackendPreference::Auto => detect_clipboard_backend().await,
        BackendPreference::Native => ClipboardBackend::Native,
        BackendPreference::Wayland => ClipboardBackend::Wayland,
        BackendPreference::Xclip => ClipboardBackend::Xclip,
    };
    tracing::debug!(%preference, %backend, "selecting clipboard backend");

    create_specific_backend(backend).await
}

#[cfg(target_os = "linux")]
async fn create_specific_backend(
    backend: ClipboardBackend,
) -> Result<(Box<dyn ClipboardPort>, ClipboardBackend), ClipboardAccessError> {
    match backend {
        ClipboardBackend::Native => Ok((
            Box::new(NativeClipboard::new()) as Box<dyn ClipboardPort>,
            ClipboardBackend::Native,
        )),
        ClipboardBackend::Wayland => {
            if is_tool_available("wl-copy").await {
                Ok((
                    Box::new(WaylandClipboard::new()) as Box<dyn ClipboardPort>,
                    ClipboardBackend::Wayland,
                ))
            } else {
                Err(ClipboardAccessError::ToolNotFound("wl-copy".to_string()))
            }
        }
        ClipboardBackend::Xclip => {
            if is_tool_available("xclip").await {
                Ok((
                    Box::new(XclipClipboard::new()) as Box<dyn ClipboardPort>,
                    ClipboardBackend::Xclip,
                ))
            } else {
                Err(ClipboardAccessError::ToolNotFound("xclip".to_string()))
            }
        }
    }
}

#[cfg(not(target_os = "linux"))]
async fn create_specific_backend(
    backend: ClipboardBackend,
) -> Result<(Box<dyn ClipboardPort>, ClipboardBackend), ClipboardAccessError> {
    match backend {
        ClipboardBackend::Native => Ok((
            Box::new(NativeClipboard::new()) as Box<dyn ClipboardPort>,
            ClipboardBackend::Native,
        )),
        other => Err(ClipboardAccessError::Unsupported(format!(
            "the {} backend on this platform",
            other
        ))),
    }
}
