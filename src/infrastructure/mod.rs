//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the system clipboard, pandoc and the config file.

pub mod clipboard;
pub mod config;
pub mod rich_text;

// Re-export adapters
pub use clipboard::{create_clipboard, ClipboardBackend};
pub use config::XdgConfigStore;
pub use rich_text::{create_renderer, BuiltinRtfRenderer, PandocRenderer};
