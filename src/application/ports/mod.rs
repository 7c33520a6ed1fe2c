//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod renderer;

// Re-export common types
pub use clipboard::{ClipboardAccessError, ClipboardPort};
pub use config::ConfigStore;
pub use renderer::{ConversionError, RichTextRenderer};
