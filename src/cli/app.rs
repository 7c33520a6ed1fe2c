//! Command runners

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::application::ports::{ClipboardPort, ConfigStore};
use crate::application::{
    find_recent_files, ContentResolver, CopyInput, CopySource, CopyUseCase, PasteUseCase,
    RecentFile, RecentFilesUseCase, RecentQuery, ResolverConfig,
};
use crate::domain::config::{AppConfig, LogLevel};
use crate::domain::error::ConfigError;
use crate::domain::content::PeekableStream;
use crate::domain::recent::Duration;
use crate::infrastructure::{create_clipboard, create_renderer, XdgConfigStore};

use super::args::{Cli, Commands};
use super::config_cmd::handle_config_command;
use super::logging::init_logging;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Options for the `recent` command, before defaults are applied
#[derive(Debug, Clone, Default)]
pub struct RecentOptions {
    pub duration: Option<String>,
    pub print: bool,
    pub dirs: Vec<PathBuf>,
    pub limit: Option<usize>,
}

/// Run the command parsed by clap
pub async fn run(cli: Cli) -> ExitCode {
    let cli_config = AppConfig {
        backend: cli.global.backend.clone(),
        renderer: cli.global.renderer.clone(),
        verbose: if cli.global.verbose { Some(true) } else { None },
        ..Default::default()
    };

    let store = XdgConfigStore::new();
    let (config, load_error) = match load_merged_config(&store, cli_config.clone()).await {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::defaults().merge(cli_config), Some(e)),
    };
    let level = LogLevel::from_flags(config.verbose.unwrap_or(false), cli.global.debug);

    init_logging(level);
    let presenter = Presenter::new(level);
    presenter.debug(&format!("config file: {}", store.path().display()));
    if let Some(e) = load_error {
        presenter.warn(&format!("Ignoring config file: {}", e));
    }

    match cli.command {
        Commands::Config { action } => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Commands::Copy { text, markdown } => {
            let source = if text.is_empty() {
                if io::stdin().is_terminal() {
                    presenter.info("Reading from stdin (Ctrl-D to finish)");
                }
                CopySource::Stream(PeekableStream::new(io::stdin()))
            } else {
                CopySource::Text(text.join(" "))
            };
            run_copy(&config, &presenter, CopyInput { source, markdown }).await
        }
        Commands::CopyFile { paths, markdown } => {
            let input = CopyInput {
                source: CopySource::Files(paths),
                markdown,
            };
            run_copy(&config, &presenter, input).await
        }
        Commands::Paste => run_paste(&config, &presenter).await,
        Commands::Files => run_files(&config, &presenter).await,
        Commands::Recent {
            duration,
            print,
            dirs,
            limit,
        } => {
            let options = RecentOptions {
                duration,
                print,
                dirs,
                limit,
            };
            run_recent(&config, &presenter, options).await
        }
    }
}

/// Copy text, stdin or files
pub async fn run_copy(config: &AppConfig, presenter: &Presenter, input: CopyInput) -> ExitCode {
    let renderer_pref = match config.renderer_preference() {
        Ok(pref) => pref,
        Err(e) => return usage_error(presenter, e.to_string()),
    };
    let clipboard = match open_clipboard(config, presenter).await {
        Ok(clipboard) => clipboard,
        Err(code) => return code,
    };

    let resolver = ContentResolver::new(
        create_renderer(renderer_pref),
        ResolverConfig::from_app_config(config),
    );
    let use_case = CopyUseCase::new(clipboard, resolver);

    match use_case.execute(input).await {
        Ok(output) => {
            if output.converted {
                presenter.verbose(&format!("Rendered markdown with {}", renderer_pref));
            }
            presenter.success(&format!("Copied {}", output.description));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print clipboard text without adding a newline
pub async fn run_paste(config: &AppConfig, presenter: &Presenter) -> ExitCode {
    let clipboard = match open_clipboard(config, presenter).await {
        Ok(clipboard) => clipboard,
        Err(code) => return code,
    };

    match PasteUseCase::new(clipboard).paste_text().await {
        Ok(text) => match presenter.output_raw(&text) {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                presenter.error(&format!("Failed to write to stdout: {}", e));
                ExitCode::from(EXIT_ERROR)
            }
        },
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Print clipboard file references, one per line
pub async fn run_files(config: &AppConfig, presenter: &Presenter) -> ExitCode {
    let clipboard = match open_clipboard(config, presenter).await {
        Ok(clipboard) => clipboard,
        Err(code) => return code,
    };

    match PasteUseCase::new(clipboard).paste_files().await {
        Ok(files) => {
            for path in files.paths() {
                presenter.output(&path.to_string_lossy());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Copy or list recently modified files
pub async fn run_recent(
    config: &AppConfig,
    presenter: &Presenter,
    options: RecentOptions,
) -> ExitCode {
    let lookback = match options.duration.as_deref() {
        Some(text) => text.parse::<Duration>(),
        None => config.recent_duration(),
    };
    let lookback = match lookback {
        Ok(d) => d,
        Err(e) => return usage_error(presenter, e.to_string()),
    };

    let dirs = if options.dirs.is_empty() {
        config.recent_dirs().unwrap_or_else(default_recent_dirs)
    } else {
        options.dirs
    };
    let limit = match options.limit {
        Some(0) => {
            presenter.error("--limit must be at least 1");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        Some(n) => n,
        None => config.recent_limit_or_default(),
    };

    let query = RecentQuery::new(lookback, dirs, limit);
    presenter.verbose(&format!(
        "Looking back {} in {}",
        lookback,
        query
            .dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let result = if options.print {
        find_recent_files(&query).await
    } else {
        let clipboard = match open_clipboard(config, presenter).await {
            Ok(clipboard) => clipboard,
            Err(code) => return code,
        };
        RecentFilesUseCase::new(clipboard).copy(&query).await
    };

    match result {
        Ok(files) => {
            if options.print {
                print_recent(presenter, &files);
            } else {
                for file in &files {
                    presenter.verbose(&file.path.display().to_string());
                }
                let noun = if files.len() == 1 { "file" } else { "files" };
                presenter.success(&format!("Copied {} {}", files.len(), noun));
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn print_recent(presenter: &Presenter, files: &[RecentFile]) {
    for file in files {
        presenter.output(&file.path.display().to_string());
    }
}

/// Build the clipboard adapter for the configured backend
async fn open_clipboard(
    config: &AppConfig,
    presenter: &Presenter,
) -> Result<Box<dyn ClipboardPort>, ExitCode> {
    let preference = match config.backend_preference() {
        Ok(pref) => pref,
        Err(e) => return Err(usage_error(presenter, e.to_string())),
    };

    match create_clipboard(preference).await {
        Ok((clipboard, backend)) => {
            presenter.debug(&format!("clipboard backend: {}", backend));
            Ok(clipboard)
        }
        Err(e) => {
            presenter.error(&e.to_string());
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

fn usage_error(presenter: &Presenter, message: String) -> ExitCode {
    presenter.error(&message);
    ExitCode::from(EXIT_USAGE_ERROR)
}

/// Downloads and Desktop, when they exist
fn default_recent_dirs() -> Vec<PathBuf> {
    [dirs::download_dir(), dirs::desktop_dir()]
        .into_iter()
        .flatten()
        .filter(|dir| dir.is_dir())
        .collect()
}

/// Load and merge configuration from file and CLI (env arrives through clap)
pub async fn load_merged_config<S: ConfigStore>(
    store: &S,
    cli_config: AppConfig,
) -> Result<AppConfig, ConfigError> {
    let file_config = store.load().await?;

    // Merge: defaults < file < env/cli
    Ok(AppConfig::defaults().merge(file_config).merge(cli_config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_recent_dirs_exist() {
        for dir in default_recent_dirs() {
            assert!(dir.is_dir());
        }
    }

    #[tokio::test]
    async fn merged_config_layers() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = \"native\"\nrenderer = \"pandoc\"\n").unwrap();
        let store = XdgConfigStore::with_path(path.clone());

        let cli = AppConfig {
            backend: Some("xclip".to_string()),
            ..Default::default()
        };
        let merged = load_merged_config(&store, cli).await.unwrap();

        assert_eq!(merged.backend, Some("xclip".to_string()));
        assert_eq!(merged.renderer, Some("pandoc".to_string()));
        assert_eq!(merged.verbose, Some(false));
    }

    #[tokio::test]
    async fn unreadable_config_is_reported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "backend = [").unwrap();
        let store = XdgConfigStore::with_path(path.clone());

        let err = load_merged_config(&store, AppConfig::empty()).await.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
