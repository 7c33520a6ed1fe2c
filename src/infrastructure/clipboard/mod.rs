//! Clipboard infrastructure module
//!
//! Provides cross-platform clipboard support using clipboard-rs, with
//! wl-clipboard and xclip preferred on Linux desktops.

mod command;
mod factory;
mod native;
mod wayland;
mod xclip;

pub use command::is_tool_available;
pub use factory::{create_clipboard, detect_clipboard_backend, ClipboardBackend};
pub use native::NativeClipboard;
pub use wayland::WaylandClipboard;
pub use xclip::XclipClipboard;
