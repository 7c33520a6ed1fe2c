//! Domain layer - Core business logic
//!
//! Contains value objects and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod content;
pub mod error;
pub mod recent;

// Re-export common types
pub use config::{AppConfig, BackendPreference, LogLevel, RendererPreference};
pub use content::{ClipboardPayload, ContentKind, FileList, MimeHint, RichText, SourceInput};
pub use error::*;
pub use recent::Duration;
