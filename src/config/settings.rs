//! Connection settings for an OpenAI-compatible completion service
//!
//! Stored in `~/.config/completion-settings/openai.toml`

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SettingsError};

pub const DEFAULT_MODEL_ID: &str = "gpt-4o-mini";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";

/// Connection settings record. Edits produce a new copy via [`OpenAiSettings::with_field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// Secret API key
    pub key: String,
    /// Model identifier used for completions
    pub model_id: String,
    /// Base URL; blank means the public OpenAI endpoint
    pub base_url: String,
    /// Azure deployment name (only used for Azure hosts)
    pub azure_deployment_id: String,
    /// Azure `api-version` query parameter
    pub azure_api_version: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            base_url: String::new(),
            azure_deployment_id: String::new(),
            azure_api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }
}

/// The editable fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Key,
    ModelId,
    BaseUrl,
    AzureDeploymentId,
    AzureApiVersion,
}

impl SettingsField {
    pub const ALL: &'static [SettingsField] = &[
        SettingsField::Key,
        SettingsField::ModelId,
        SettingsField::BaseUrl,
        SettingsField::AzureDeploymentId,
        SettingsField::AzureApiVersion,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            SettingsField::Key => "API key",
            SettingsField::ModelId => "Model ID",
            SettingsField::BaseUrl => "URL",
            SettingsField::AzureDeploymentId => "Azure deployment ID",
            SettingsField::AzureApiVersion => "Azure API version",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            SettingsField::Key => 0,
            SettingsField::ModelId => 1,
            SettingsField::BaseUrl => 2,
            SettingsField::AzureDeploymentId => 3,
            SettingsField::AzureApiVersion => 4,
        }
    }
}

impl OpenAiSettings {
    /// Current value of a field
    pub fn field(&self, field: SettingsField) -> &str {
        match field {
            SettingsField::Key => &self.key,
            SettingsField::ModelId => &self.model_id,
            SettingsField::BaseUrl => &self.base_url,
            SettingsField::AzureDeploymentId => &self.azure_deployment_id,
            SettingsField::AzureApiVersion => &self.azure_api_version,
        }
    }

    /// Copy of these settings with exactly one field replaced
    pub fn with_field(&self, field: SettingsField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            SettingsField::Key => next.key = value,
            SettingsField::ModelId => next.model_id = value,
            SettingsField::BaseUrl => next.base_url = value,
            SettingsField::AzureDeploymentId => next.azure_deployment_id = value,
            SettingsField::AzureApiVersion => next.azure_api_version = value,
        }
        next
    }

    /// Load settings from a file path, defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Config(format!("Failed to read openai.toml: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SettingsError::Config(format!("Failed to parse openai.toml: {}", e)))
    }

    /// Save settings to a file path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    SettingsError::Config(format!("Failed to create config dir: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SettingsError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SettingsError::Config(format!("Failed to write openai.toml: {}", e)))?;

        Ok(())
    }
}
