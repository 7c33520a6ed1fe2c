//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// clipctl - copy and paste text and files from the command line
#[derive(Parser, Debug)]
#[command(name = "clipctl")]
#[command(version)]
#[command(about = "Copy and paste text, files and rich text via the system clipboard")]
#[command(long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Print progress details
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Print debug diagnostics
    #[arg(long, global = true)]
    pub debug: bool,

    /// Clipboard backend (auto, native, wayland, xclip)
    #[arg(long, global = true, value_name = "BACKEND", env = "CLIPCTL_BACKEND")]
    pub backend: Option<String>,

    /// Markdown renderer (builtin, pandoc)
    #[arg(long, global = true, value_name = "RENDERER", env = "CLIPCTL_RENDERER")]
    pub renderer: Option<String>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy text arguments, or stdin when none are given
    Copy {
        /// Text to copy (joined with spaces)
        text: Vec<String>,

        /// Render the text as markdown into rich text
        #[arg(short = 'm', long)]
        markdown: bool,
    },
    /// Copy files: text files by content, anything else as file references
    #[command(visible_alias = "cf")]
    CopyFile {
        /// Files to copy
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Render a text file as markdown into rich text
        #[arg(short = 'm', long)]
        markdown: bool,
    },
    /// Print clipboard text to stdout
    Paste,
    /// Print the clipboard file list, one path per line
    Files,
    /// Copy recently modified files as file references
    Recent {
        /// Lookback window: minutes (e.g., 10) or a duration like 30s, 2h30m
        #[arg(value_name = "DURATION")]
        duration: Option<String>,

        /// Only list the files, do not copy them
        #[arg(short = 'p', long)]
        print: bool,

        /// Directory to scan (repeatable, overrides recent.dirs)
        #[arg(short = 'd', long = "dir", value_name = "DIR")]
        dirs: Vec<PathBuf>,

        /// Maximum number of files
        #[arg(short = 'n', long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "backend",
    "renderer",
    "verbose",
    "recent.duration",
    "recent.dirs",
    "recent.limit",
    "sniff.window",
    "sniff.size_limit",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
