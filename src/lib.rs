//! clipctl - clipboard copy and paste from the command line
//!
//! Copies text, files, stdin and markdown (as rich text) to the system
//! clipboard and reads text or file lists back out.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Payload types, content sniffing hints, durations, config and errors
//! - **Application**: Content resolver, use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (clipboard-rs, wl-clipboard, xclip, pandoc)
//! - **CLI**: Command-line interface, argument parsing and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
