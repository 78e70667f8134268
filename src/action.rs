use crate::config::OpenAiSettings;

/// Intents raised by the settings section towards its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// Refresh the remote model list
    LoadModels,
    /// Commit (or, inside the section, propose) a new settings record
    UpdateSettings(OpenAiSettings),
}

/// App-level actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Settings(SettingsEvent),
}

impl From<SettingsEvent> for Action {
    fn from(event: SettingsEvent) -> Self {
        Action::Settings(event)
    }
}
