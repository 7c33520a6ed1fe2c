//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{
    AppConfig, BackendPreference, RecentConfig, RendererPreference, SniffConfig, MAX_SNIFF_WINDOW,
};
use crate::domain::error::ConfigError;
use crate::domain::recent::Duration;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "backend" => {
            let pref = value
                .parse::<BackendPreference>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.backend = Some(pref.to_string());
        }
        "renderer" => {
            let pref = value
                .parse::<RendererPreference>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.renderer = Some(pref.to_string());
        }
        "verbose" => {
            config.verbose = Some(
                parse_bool(value)
                    .map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?,
            );
        }
        "recent.duration" => {
            value
                .parse::<Duration>()
                .map_err(|e| invalid(key, e.to_string()))?;
            recent_mut(config).duration = Some(value.trim().to_string());
        }
        "recent.dirs" => {
            let dirs = parse_dirs(value);
            recent_mut(config).dirs = if dirs.is_empty() { None } else { Some(dirs) };
        }
        "recent.limit" => {
            recent_mut(config).limit = Some(parse_positive(key, value)?);
        }
        "sniff.window" => {
            let window = parse_positive(key, value)?;
            if window > MAX_SNIFF_WINDOW {
                return Err(invalid(
                    key,
                    format!("Value must be at most {} bytes", MAX_SNIFF_WINDOW),
                ));
            }
            sniff_mut(config).window = Some(window);
        }
        "sniff.size_limit" => {
            let limit = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid(key, "Value must be a number of bytes"))?;
            sniff_mut(config).size_limit = Some(limit);
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    let recent = config.recent.as_ref();
    let sniff = config.sniff.as_ref();
    match key {
        "backend" => config.backend.clone(),
        "renderer" => config.renderer.clone(),
        "verbose" => config.verbose.map(|b| b.to_string()),
        "recent.duration" => recent.and_then(|r| r.duration.clone()),
        "recent.dirs" => recent.and_then(|r| r.dirs.as_ref()).map(|d| d.join(",")),
        "recent.limit" => recent.and_then(|r| r.limit).map(|n| n.to_string()),
        "sniff.window" => sniff.and_then(|s| s.window).map(|n| n.to_string()),
        "sniff.size_limit" => sniff.and_then(|s| s.size_limit).map(|n| n.to_string()),
        _ => None,
    }
}

fn recent_mut(config: &mut AppConfig) -> &mut RecentConfig {
    config.recent.get_or_insert_with(RecentConfig::default)
}

fn sniff_mut(config: &mut AppConfig) -> &mut SniffConfig {
    config.sniff.get_or_insert_with(SniffConfig::default)
}

/// Comma-separated directories; blanks are dropped
fn parse_dirs(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive(key: &str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(key, "Value must be a positive integer")),
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
