// SettingsState - everything App dispatches to, minus the terminal
// Owns the config store, the settings section and the model loader.

use crossterm::event::Event;

use super::models_loader::ModelsLoader;
use crate::action::{Action, SettingsEvent};
use crate::components::{Component, SettingsSection};
use crate::config::ConfigManager;

pub struct SettingsState {
    pub config_manager: ConfigManager,
    pub section: SettingsSection,
    loader: ModelsLoader,
}

impl SettingsState {
    pub fn new(config_manager: ConfigManager, loader: ModelsLoader, initial_edit: bool) -> Self {
        let section = SettingsSection::new(config_manager.settings().clone(), initial_edit);
        Self {
            config_manager,
            section,
            loader,
        }
    }

    /// Run the section's mount effects (initial model load in edit mode)
    pub fn mount(&mut self) {
        let mut events = Vec::new();
        self.section.mount(&mut |e| events.push(e));
        self.handle_settings_events(events);
    }

    /// Route terminal input to the section. Returns true when it was consumed.
    pub fn handle_input(&mut self, event: &Event) -> bool {
        // Collect first: handling needs &mut self
        let mut events = Vec::new();
        let consumed = self.section.handle_event(event, &mut |e| events.push(e));
        self.handle_settings_events(events);
        consumed
    }

    pub fn tick(&mut self) {
        self.section.update(&Action::Tick);
    }

    /// Apply a finished model-list request. Returns true when the state changed.
    pub fn poll_models(&mut self) -> bool {
        match self.loader.poll() {
            Some(state) => {
                self.section.set_models(state);
                true
            }
            None => false,
        }
    }

    fn handle_settings_events(&mut self, events: Vec<SettingsEvent>) {
        for event in events {
            self.handle_settings_event(event);
        }
    }

    pub fn handle_settings_event(&mut self, event: SettingsEvent) {
        match event {
            SettingsEvent::LoadModels => {
                // Edits in progress live only in the section's pending copy
                let state = self.loader.request(self.section.pending().clone());
                self.section.set_models(state);
            }
            SettingsEvent::UpdateSettings(settings) => {
                if let Err(e) = self.config_manager.save_settings(settings.clone()) {
                    tracing::warn!("Failed to save settings: {}", e);
                    self.config_manager.set_settings(settings.clone());
                }
                self.section.set_settings(settings);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OpenAiSettings, SettingsField};
    use crate::llm::{ModelFetcher, ModelsState};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tempfile::TempDir;

    fn state_in(dir: &TempDir, initial_edit: bool) -> SettingsState {
        let config_manager = ConfigManager::with_dir(dir.path().to_path_buf());
        let loader = ModelsLoader::new(ModelFetcher::new().unwrap());
        SettingsState::new(config_manager, loader, initial_edit)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn wait_for_models(state: &mut SettingsState) -> ModelsState {
        for _ in 0..200 {
            if state.poll_models() {
                return state.section.models().clone();
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("model list request never completed");
    }

    #[tokio::test]
    async fn test_load_models_uses_pending_copy() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .match_header("authorization", "Bearer sk-typed")
            .with_status(200)
            .with_body(r#"{"data":[{"id":"gpt-4o"}]}"#)
            .create_async()
            .await;

        let dir = TempDir::new().unwrap();
        let stored = OpenAiSettings::default()
            .with_field(SettingsField::BaseUrl, format!("{}/v1", server.url()));
        ConfigManager::with_dir(dir.path().to_path_buf())
            .save_settings(stored)
            .unwrap();

        let mut state = state_in(&dir, false);
        state.handle_input(&key(KeyCode::Char('e')));
        for c in "sk-typed".chars() {
            state.handle_input(&key(KeyCode::Char(c)));
        }
        assert_eq!(state.section.models(), &ModelsState::Loading);
        assert_eq!(state.config_manager.settings().key, "");

        assert_eq!(
            wait_for_models(&mut state).await,
            ModelsState::Success(vec!["gpt-4o".to_string()])
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_mount_in_edit_mode_requests_models() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir, true);
        state.mount();

        assert_eq!(state.section.models(), &ModelsState::Loading);
        assert_eq!(
            wait_for_models(&mut state).await,
            ModelsState::Error("API key is not set".to_string())
        );
    }

    #[tokio::test]
    async fn test_update_settings_saves_and_feeds_section() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir, false);
        let next = OpenAiSettings::default().with_field(SettingsField::ModelId, "o1");

        state.handle_settings_event(SettingsEvent::UpdateSettings(next.clone()));

        assert_eq!(state.config_manager.settings(), &next);
        assert_eq!(state.section.settings(), &next);
        assert_eq!(state.section.pending(), &next);
        assert_eq!(
            ConfigManager::with_dir(dir.path().to_path_buf()).settings(),
            &next
        );
    }

    #[tokio::test]
    async fn test_save_from_edit_mode_persists_once() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir, false);

        state.handle_input(&key(KeyCode::Char('e')));
        state.handle_input(&key(KeyCode::Tab));
        state.handle_input(&key(KeyCode::Backspace));
        assert_eq!(state.config_manager.settings().model_id, "gpt-4o-mini");

        state.handle_input(&Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!state.section.is_editing());
        assert_eq!(state.config_manager.settings().model_id, "gpt-4o-min");
        assert!(state.config_manager.settings_path().exists());
    }
}
