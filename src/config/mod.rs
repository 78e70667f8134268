mod settings;
mod theme;

pub use settings::{OpenAiSettings, SettingsField};
pub use theme::Theme;

use directories::BaseDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SettingsError};

const CONFIG_DIR: &str = "completion-settings";
const SETTINGS_FILE: &str = "openai.toml";
const THEME_FILE: &str = "theme.toml";

/// Owns the on-disk settings and theme
pub struct ConfigManager {
    config_dir: PathBuf,
    settings: OpenAiSettings,
    theme: Theme,
}

impl ConfigManager {
    /// Load from the platform config directory
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self::with_dir(config_dir))
    }

    /// Load from an explicit directory
    pub fn with_dir(config_dir: PathBuf) -> Self {
        let settings = Self::load_settings(&config_dir);
        let theme = Self::load_theme(&config_dir);

        Self {
            config_dir,
            settings,
            theme,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Replace the in-memory settings without touching disk
    pub fn set_settings(&mut self, settings: OpenAiSettings) {
        self.settings = settings;
    }

    /// Replace and persist the settings
    pub fn save_settings(&mut self, settings: OpenAiSettings) -> Result<()> {
        settings.save(&self.settings_path())?;
        tracing::info!("Saved settings to {}", self.settings_path().display());
        self.settings = settings;
        Ok(())
    }

    fn get_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| SettingsError::Config("Could not determine config directory".to_string()))
    }

    fn load_settings(config_dir: &Path) -> OpenAiSettings {
        let path = config_dir.join(SETTINGS_FILE);
        OpenAiSettings::load(&path).unwrap_or_else(|e| {
            tracing::warn!("{}; using defaults", e);
            OpenAiSettings::default()
        })
    }

    fn load_theme(config_dir: &Path) -> Theme {
        let path = config_dir.join(THEME_FILE);
        Self::load_toml_file(&path).unwrap_or_default()
    }

    fn load_toml_file<T: for<'de> Deserialize<'de> + Default>(path: &Path) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| SettingsError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    /// Write a default theme file if none exists
    pub fn write_default_theme(&self) -> Result<()> {
        self.ensure_config_dir()?;

        let theme_path = self.config_dir.join(THEME_FILE);
        if !theme_path.exists() {
            let content = toml::to_string_pretty(&Theme::default())
                .map_err(|e| SettingsError::Config(format!("Failed to serialize theme: {}", e)))?;
            std::fs::write(&theme_path, content)
                .map_err(|e| SettingsError::Config(format!("Failed to write theme: {}", e)))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_dir_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        assert_eq!(manager.settings(), &OpenAiSettings::default());
        assert_eq!(manager.theme().name, "default");
    }

    #[test]
    fn test_save_settings_persists_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::with_dir(temp_dir.path().join("cfg"));

        let settings = OpenAiSettings::default().with_field(SettingsField::ModelId, "gpt-4o");
        manager.save_settings(settings.clone()).unwrap();
        assert_eq!(manager.settings(), &settings);

        let reloaded = ConfigManager::with_dir(temp_dir.path().join("cfg"));
        assert_eq!(reloaded.settings(), &settings);
    }

    #[test]
    fn test_malformed_settings_fall_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SETTINGS_FILE), "model_id = [").unwrap();

        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        assert_eq!(manager.settings(), &OpenAiSettings::default());
    }

    #[test]
    fn test_write_default_theme() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        manager.write_default_theme().unwrap();
        assert!(temp_dir.path().join(THEME_FILE).exists());

        let reloaded = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        assert_eq!(reloaded.theme().name, "default");
    }

    #[test]
    fn test_set_settings_is_memory_only() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::with_dir(temp_dir.path().to_path_buf());
        manager.set_settings(OpenAiSettings::default().with_field(SettingsField::Key, "sk-x"));
        assert_eq!(manager.settings().key, "sk-x");
        assert!(!manager.settings_path().exists());
    }
}
