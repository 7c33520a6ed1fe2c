//! Configuration domain module

mod app_config;
mod preferences;

pub use app_config::{
    AppConfig, RecentConfig, SniffConfig, DEFAULT_RECENT_LIMIT, DEFAULT_SNIFF_SIZE_LIMIT,
    DEFAULT_SNIFF_WINDOW, MAX_SNIFF_WINDOW,
};
pub use preferences::{BackendPreference, LogLevel, RendererPreference};
