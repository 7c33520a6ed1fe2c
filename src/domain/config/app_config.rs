//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{BackendPreference, RendererPreference};
use crate::domain::error::{InvalidChoiceError, InvalidDurationError};
use crate::domain::recent::Duration;

/// Default number of bytes inspected when sniffing content (8 KiB)
pub const DEFAULT_SNIFF_WINDOW: usize = 8 * 1024;

/// Largest accepted sniff window (1 MiB)
pub const MAX_SNIFF_WINDOW: usize = 1024 * 1024;

/// Files larger than this are classified by extension (32 MiB)
pub const DEFAULT_SNIFF_SIZE_LIMIT: u64 = 32 * 1024 * 1024;

/// Default maximum number of recent files copied at once
pub const DEFAULT_RECENT_LIMIT: usize = 50;

/// Recent files configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentConfig {
    pub duration: Option<String>,
    pub dirs: Option<Vec<String>>,
    pub limit: Option<usize>,
}

/// Content sniffing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SniffConfig {
    pub window: Option<usize>,
    pub size_limit: Option<u64>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: Option<String>,
    pub renderer: Option<String>,
    pub verbose: Option<bool>,
    pub recent: Option<RecentConfig>,
    pub sniff: Option<SniffConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            backend: Some(BackendPreference::default().to_string()),
            renderer: Some(RendererPreference::default().to_string()),
            verbose: Some(false),
            recent: Some(RecentConfig {
                duration: Some(Duration::default_lookback().to_string()),
                dirs: None,
                limit: Some(DEFAULT_RECENT_LIMIT),
            }),
            sniff: Some(SniffConfig {
                window: Some(DEFAULT_SNIFF_WINDOW),
                size_limit: Some(DEFAULT_SNIFF_SIZE_LIMIT),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            backend: other.backend.or(self.backend),
            renderer: other.renderer.or(self.renderer),
            verbose: other.verbose.or(self.verbose),
            recent: Self::merge_recent(self.recent, other.recent),
            sniff: Self::merge_sniff(self.sniff, other.sniff),
        }
    }

    fn merge_recent(base: Option<RecentConfig>, other: Option<RecentConfig>) -> Option<RecentConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(RecentConfig {
                duration: o.duration.or(b.duration),
                dirs: o.dirs.or(b.dirs),
                limit: o.limit.or(b.limit),
            }),
        }
    }

    fn merge_sniff(base: Option<SniffConfig>, other: Option<SniffConfig>) -> Option<SniffConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(SniffConfig {
                window: o.window.or(b.window),
                size_limit: o.size_limit.or(b.size_limit),
            }),
        }
    }

    /// Clipboard backend preference; auto when unset
    pub fn backend_preference(&self) -> Result<BackendPreference, InvalidChoiceError> {
        match self.backend.as_deref() {
            Some(value) => value.parse(),
            None => Ok(BackendPreference::default()),
        }
    }

    /// Rich text renderer preference; builtin when unset
    pub fn renderer_preference(&self) -> Result<RendererPreference, InvalidChoiceError> {
        match self.renderer.as_deref() {
            Some(value) => value.parse(),
            None => Ok(RendererPreference::default()),
        }
    }

    /// Recent lookback; 5 minutes when unset
    pub fn recent_duration(&self) -> Result<Duration, InvalidDurationError> {
        match self.recent.as_ref().and_then(|r| r.duration.as_deref()) {
            Some(text) => text.parse(),
            None => Ok(Duration::default_lookback()),
        }
    }

    /// Configured recent directories, if any
    pub fn recent_dirs(&self) -> Option<Vec<PathBuf>> {
        self.recent
            .as_ref()
            .and_then(|r| r.dirs.as_ref())
            .filter(|dirs| !dirs.is_empty())
            .map(|dirs| dirs.iter().map(PathBuf::from).collect())
    }

    /// Get recent file limit, or 50 if not set
    pub fn recent_limit_or_default(&self) -> usize {
        self.recent
            .as_ref()
            .and_then(|r| r.limit)
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_RECENT_LIMIT)
    }

    /// Get sniff window, or 8 KiB if not set. Capped at 1 MiB.
    pub fn sniff_window_or_default(&self) -> usize {
        self.sniff
            .as_ref()
            .and_then(|s| s.window)
            .filter(|window| *window > 0)
            .map_or(DEFAULT_SNIFF_WINDOW, |window| window.min(MAX_SNIFF_WINDOW))
    }

    /// Get sniff size limit, or 32 MiB if not set
    pub fn sniff_size_limit_or_default(&self) -> u64 {
        self.sniff
            .as_ref()
            .and_then(|s| s.size_limit)
            .unwrap_or(DEFAULT_SNIFF_SIZE_LIMIT)
    }
}
