//! TOML config file under the platform config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "clipctl";
const FILE_NAME: &str = "config.toml";

/// Prepended to the file written by `config init`
const INIT_HEADER: &str = "\
# clipctl configuration
#
# backend: auto | native | wayland | xclip
# renderer: builtin | pandoc
# recent.duration: minutes (10) or a duration (30s, 2h30m)
# sniff.window / sniff.size_limit: bytes

";

/// Config store backed by `$XDG_CONFIG_HOME/clipctl/config.toml`
/// (the platform equivalent on macOS and Windows)
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        Self {
            path: default_config_dir().join(APP_DIR).join(FILE_NAME),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn render(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    /// `<path>: <error>` so messages point at the file
    fn located(&self, err: impl std::fmt::Display) -> String {
        format!("{}: {}", self.path.display(), err)
    }

    async fn ensure_parent(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(self.located(e))),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform config dir, then `~/.config`, then the working directory
fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Self::parse(&content).map_err(|e| match e {
                ConfigError::ParseError(msg) => ConfigError::ParseError(self.located(msg)),
                other => other,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(AppConfig::empty()),
            Err(e) => Err(ConfigError::ReadError(self.located(e))),
        }
    }

    /// Writes a sibling temp file and renames it over the config, so a
    /// failed write never leaves a truncated file behind.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.ensure_parent().await?;
        let content = Self::render(config)?;

        let temp = self.temp_path();
        fs::write(&temp, content)
            .await
            .map_err(|e| ConfigError::WriteError(self.located(e)))?;
        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(ConfigError::WriteError(self.located(e)));
        }

        tracing::debug!(path = %self.path.display(), "saved config");
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        self.ensure_parent().await?;
        let body = Self::render(&AppConfig::defaults())?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    ConfigError::AlreadyExists(self.path.display().to_string())
                }
                _ => ConfigError::WriteError(self.located(e)),
            })?;

        let content = format!("{}{}", INIT_HEADER, body);
        file.write_all(content.as_bytes())
            .await
            .map_err(|e| ConfigError::WriteError(self.located(e)))?;
        file.flush()
            .await
            .map_err(|e| ConfigError::WriteError(self.located(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{RecentConfig, SniffConfig};
    use tempfile::TempDir;

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.ends_with(Path::new(APP_DIR).join(FILE_NAME)));
    }

    #[test]
    fn parse_sections() {
        let content = r#"
backend = "wayland"
renderer = "pandoc"

[recent]
duration = "15m"
dirs = ["/tmp/a", "/tmp/b"]
limit = 3

[sniff]
window = 4096
"#;

        let config = XdgConfigStore::parse(content).unwrap();
        assert_eq!(config.backend, Some("wayland".to_string()));
        assert_eq!(config.renderer, Some("pandoc".to_string()));
        assert_eq!(config.recent_limit_or_default(), 3);
        assert_eq!(config.recent_dirs().map(|d| d.len()), Some(2));
        assert_eq!(config.sniff_window_or_default(), 4096);
    }

    #[tokio::test]
    async fn parse_error_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(FILE_NAME);
        std::fs::write(&path, "backend = [").unwrap();

        let err = XdgConfigStore::with_path(&path).load().await.unwrap_err();
        match err {
            ConfigError::ParseError(msg) => assert!(msg.contains(&path.display().to_string())),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_path_is_read_error() {
        let dir = TempDir::new().unwrap();
        let err = XdgConfigStore::with_path(dir.path()).load().await.unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join(FILE_NAME));
        assert_eq!(store.load().await.unwrap(), AppConfig::empty());
    }

    #[tokio::test]
    async fn save_replaces_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join(FILE_NAME));
        let config = AppConfig {
            backend: Some("xclip".to_string()),
            recent: Some(RecentConfig {
                duration: Some("1h".to_string()),
                dirs: Some(vec!["/srv/drop".to_string()]),
                limit: Some(9),
            }),
            sniff: Some(SniffConfig {
                window: Some(512),
                size_limit: Some(1024),
            }),
            ..Default::default()
        };

        store.save(&AppConfig::defaults()).await.unwrap();
        store.save(&config).await.unwrap();

        assert_eq!(store.load().await.unwrap(), config);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn init_writes_commented_defaults_once() {
        let dir = TempDir::new().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join(FILE_NAME));

        store.init().await.unwrap();
        assert!(store.path().is_file());
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("# clipctl configuration"));
        assert_eq!(store.load().await.unwrap(), AppConfig::defaults());

        let err = store.init().await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }
}
