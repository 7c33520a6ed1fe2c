//! Application layer - Use cases and port interfaces
//!
//! Contains the content resolver, the clipboard operations built on it,
//! and trait definitions for external system interactions.

pub mod copy;
pub mod paste;
pub mod ports;
pub mod recent;
pub mod resolver;

// Re-export use cases
pub use copy::{CopyError, CopyInput, CopyOutput, CopySource, CopyUseCase};
pub use paste::{PasteError, PasteUseCase};
pub use recent::{find_recent_files, RecentError, RecentFile, RecentFilesUseCase, RecentQuery};
pub use resolver::{ContentResolver, ResolutionError, ResolverConfig};
