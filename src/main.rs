mod action;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod event;
mod llm;
mod util;

use std::path::PathBuf;

use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{ConfigManager, SettingsField, Theme};

const LOG_FILE_NAME: &str = "completion-settings.log";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // The terminal belongs to the TUI, so logs go to a file.
    // Tail with: tail -f $TMPDIR/completion-settings.log
    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE_NAME));
    let (log_dir, log_name) = split_log_path(&log_path);
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (writer, _log_guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("completion_settings={}", cli.log_level)));
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    let mut config_manager = match cli.config_dir.clone() {
        Some(dir) => ConfigManager::with_dir(dir),
        None => ConfigManager::new()?,
    };
    tracing::info!("Using config dir {}", config_manager.config_dir().display());
    if let Err(e) = config_manager.write_default_theme() {
        tracing::warn!("Could not write default theme: {}", e);
    }

    if let Some(key) = cli.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
        // Session-only override, never written unless the user saves
        let settings = config_manager.settings().with_field(SettingsField::Key, key);
        config_manager.set_settings(settings);
    }

    if let Some(name) = cli.theme.as_deref() {
        match Theme::from_name(name) {
            Some(theme) => config_manager.set_theme(theme),
            None => tracing::warn!("Unknown theme '{}', keeping configured theme", name),
        }
    }

    let mut app = app::App::new(config_manager, cli.edit)?;
    app.mount();
    app.run()?;

    Ok(())
}

fn split_log_path(path: &std::path::Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME));
    (dir, name)
}
