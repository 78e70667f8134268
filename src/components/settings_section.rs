//! Connection settings section: read-only summary with an edit mode
//!
//! The section owns two pieces of transient state, the edit flag and a
//! pending copy of the settings. Edits from the form only touch the pending
//! copy; the owner hears `UpdateSettings` once, on save. `LoadModels`
//! requests pass straight through.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::action::{Action, SettingsEvent};
use crate::components::settings_form::SettingsForm;
use crate::components::settings_summary::summary_lines;
use crate::components::spinner::Spinner;
use crate::components::{Component, EventSink};
use crate::config::{OpenAiSettings, Theme};
use crate::llm::ModelsState;

const SECTION_TITLE: &str = "OpenAI";

pub struct SettingsSection {
    /// Settings as supplied by the owner
    settings: OpenAiSettings,
    /// Model list status as supplied by the owner
    models: ModelsState,
    editing: bool,
    /// Uncommitted working copy
    pending: OpenAiSettings,
    /// Present while editing; a fresh form per edit session
    form: Option<SettingsForm>,
    spinner: Spinner,
}

impl SettingsSection {
    pub fn new(settings: OpenAiSettings, initial_edit: bool) -> Self {
        Self {
            pending: settings.clone(),
            settings,
            models: ModelsState::None,
            editing: initial_edit,
            form: initial_edit.then(SettingsForm::new),
            spinner: Spinner::default(),
        }
    }

    /// Run one-shot effects of the initially shown view
    pub fn mount(&mut self, sink: &mut EventSink<'_>) {
        if let Some(form) = self.form.as_mut() {
            form.launch(sink);
        }
    }

    #[cfg(test)]
    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    pub fn pending(&self) -> &OpenAiSettings {
        &self.pending
    }

    pub fn models(&self) -> &ModelsState {
        &self.models
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    #[cfg(test)]
    pub fn form(&self) -> Option<&SettingsForm> {
        self.form.as_ref()
    }

    /// New settings from the owner; a changed value re-seeds the pending copy
    pub fn set_settings(&mut self, settings: OpenAiSettings) {
        if settings != self.settings {
            self.pending = settings.clone();
            self.settings = settings;
        }
    }

    pub fn set_models(&mut self, models: ModelsState) {
        self.models = models;
    }

    pub fn enter_edit(&mut self, sink: &mut EventSink<'_>) {
        if self.editing {
            return;
        }
        tracing::debug!("Entering edit mode");
        self.editing = true;
        self.pending = self.settings.clone();

        let mut form = SettingsForm::new();
        form.launch(sink);
        self.form = Some(form);
    }

    /// Commit the pending copy upstream and leave edit mode
    pub fn save(&mut self, sink: &mut EventSink<'_>) {
        if !self.editing {
            return;
        }
        tracing::debug!("Saving pending settings");
        sink(SettingsEvent::UpdateSettings(self.pending.clone()));
        self.leave_edit();
    }

    /// Leave edit mode, discarding the pending copy
    pub fn cancel(&mut self) {
        if !self.editing {
            return;
        }
        tracing::debug!("Edit cancelled");
        self.leave_edit();
        self.pending = self.settings.clone();
    }

    fn leave_edit(&mut self) {
        self.editing = false;
        self.form = None;
    }

    fn handle_key(&mut self, key: KeyEvent, sink: &mut EventSink<'_>) -> bool {
        if !self.editing {
            return match key.code {
                KeyCode::Char('e') | KeyCode::Enter => {
                    self.enter_edit(sink);
                    true
                }
                _ => false,
            };
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.save(sink);
            return true;
        }

        let Some(form) = self.form.as_mut() else {
            return false;
        };

        let current = self.pending.clone();
        let pending = &mut self.pending;
        let mut intercept = |event: SettingsEvent| match event {
            SettingsEvent::LoadModels => sink(SettingsEvent::LoadModels),
            SettingsEvent::UpdateSettings(next) => *pending = next,
        };

        if form.handle_key(key, &current, &self.models, &mut intercept) {
            return true;
        }

        if key.code == KeyCode::Esc {
            self.cancel();
            return true;
        }
        false
    }

    fn handle_paste(&mut self, text: &str, sink: &mut EventSink<'_>) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };

        let current = self.pending.clone();
        let pending = &mut self.pending;
        let mut intercept = |event: SettingsEvent| match event {
            SettingsEvent::LoadModels => sink(SettingsEvent::LoadModels),
            SettingsEvent::UpdateSettings(next) => *pending = next,
        };
        form.paste(&current, text, &mut intercept);
        true
    }

    pub fn header_line(&self, theme: &Theme) -> Line<'static> {
        let button = |label: &'static str, color| {
            Span::styled(format!("[ {} ]", label), Style::default().fg(color))
        };

        if self.editing {
            Line::from(vec![
                button("Save ^S", theme.colors.success.to_color()),
                Span::raw(" "),
                button("Cancel Esc", theme.colors.muted.to_color()),
            ])
        } else {
            Line::from(vec![button("Edit e", theme.colors.primary.to_color())])
        }
    }

    /// Body lines and the row that should stay visible
    pub fn body(&self, theme: &Theme) -> (Vec<Line<'static>>, usize) {
        match &self.form {
            Some(form) if self.editing => {
                let view = form.view(&self.pending, &self.models, self.spinner.current_frame(), theme);
                (view.lines, view.focus_row)
            }
            _ => (summary_lines(&self.settings, theme), 0),
        }
    }
}

impl Component for SettingsSection {
    fn handle_event(&mut self, event: &Event, sink: &mut EventSink<'_>) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key, sink),
            Event::Paste(text) if self.editing => self.handle_paste(text, sink),
            _ => false,
        }
    }

    fn update(&mut self, action: &Action) {
        if let Action::Tick = action {
            if self.models.is_loading() {
                self.spinner.tick();
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme) {
        let mode_indicator = if self.editing { " [EDITING]" } else { "" };

        let block = Block::default()
            .title(format!(" {}{} ", SECTION_TITLE, mode_indicator))
            .title_style(theme.title_style(focused))
            .title(self.header_line(theme).right_aligned())
            .borders(Borders::ALL)
            .border_style(theme.border_style(focused));

        let inner = block.inner(area);
        let (lines, focus_row) = self.body(theme);

        // Keep the focused field and its value line on screen
        let visible = inner.height as usize;
        let scroll = (focus_row + 2).saturating_sub(visible);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
        frame.render_widget(paragraph, area);
    }
}
