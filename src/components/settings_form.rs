//! Edit form for the connection settings
//!
//! The form never commits anything itself. Every change is proposed as an
//! `UpdateSettings` event carrying a copy with one field replaced, followed by
//! `LoadModels` so the model list follows what is being typed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::action::SettingsEvent;
use crate::components::model_dropdown::ModelDropdown;
use crate::components::EventSink;
use crate::config::{OpenAiSettings, SettingsField, Theme};
use crate::llm::{ModelsState, OPENAI_BASE_URL};
use crate::util::mask_api_key;

/// Rendered form plus the row of the focused field, for scrolling
pub struct FormView {
    pub lines: Vec<Line<'static>>,
    pub focus_row: usize,
}

#[derive(Debug, Clone)]
pub struct SettingsForm {
    focused: SettingsField,
    dropdown: ModelDropdown,
    launched: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsForm {
    pub fn new() -> Self {
        Self {
            focused: SettingsField::Key,
            dropdown: ModelDropdown::new(),
            launched: false,
        }
    }

    /// One-shot effect of the form being shown: request the model list once.
    pub fn launch(&mut self, sink: &mut EventSink<'_>) {
        if self.launched {
            return;
        }
        self.launched = true;
        sink(SettingsEvent::LoadModels);
    }

    #[cfg(test)]
    pub fn focused_field(&self) -> SettingsField {
        self.focused
    }

    #[cfg(test)]
    pub fn focus(&mut self, field: SettingsField) {
        self.focused = field;
    }

    pub fn focus_next(&mut self) {
        let next = (self.focused.index() + 1) % SettingsField::ALL.len();
        self.focused = SettingsField::ALL[next];
    }

    pub fn focus_prev(&mut self) {
        let len = SettingsField::ALL.len();
        let prev = (self.focused.index() + len - 1) % len;
        self.focused = SettingsField::ALL[prev];
    }

    #[cfg(test)]
    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown.is_expanded()
    }

    /// The model list affordance is only usable once a non-empty list loaded
    pub fn models_button_enabled(models: &ModelsState) -> bool {
        models.is_success() && !models.ids().is_empty()
    }

    pub fn open_models(&mut self, settings: &OpenAiSettings, models: &ModelsState) -> bool {
        self.dropdown.open(models, &settings.model_id)
    }

    /// Propose `field = value`, then ask for the model list again
    pub fn change_field(
        &self,
        settings: &OpenAiSettings,
        field: SettingsField,
        value: String,
        sink: &mut EventSink<'_>,
    ) {
        if settings.field(field) == value {
            return;
        }
        sink(SettingsEvent::UpdateSettings(settings.with_field(field, value)));
        sink(SettingsEvent::LoadModels);
    }

    pub fn input_char(&self, settings: &OpenAiSettings, c: char, sink: &mut EventSink<'_>) {
        let mut value = settings.field(self.focused).to_string();
        value.push(c);
        self.change_field(settings, self.focused, value, sink);
    }

    pub fn backspace(&self, settings: &OpenAiSettings, sink: &mut EventSink<'_>) {
        let mut value = settings.field(self.focused).to_string();
        if value.pop().is_some() {
            self.change_field(settings, self.focused, value, sink);
        }
    }

    pub fn clear(&self, settings: &OpenAiSettings, sink: &mut EventSink<'_>) {
        self.change_field(settings, self.focused, String::new(), sink);
    }

    /// Pasted text lands as a single change; line breaks and control chars are dropped.
    /// An open model list is closed since the edit triggers a reload.
    pub fn paste(&mut self, settings: &OpenAiSettings, text: &str, sink: &mut EventSink<'_>) {
        self.dropdown.close();
        let filtered: String = text.chars().filter(|c| !c.is_control()).collect();
        if filtered.is_empty() {
            return;
        }
        let mut value = settings.field(self.focused).to_string();
        value.push_str(&filtered);
        self.change_field(settings, self.focused, value, sink);
    }

    /// Returns true when the key was handled by the form
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        settings: &OpenAiSettings,
        models: &ModelsState,
        sink: &mut EventSink<'_>,
    ) -> bool {
        if self.dropdown.is_expanded() {
            if !models.ids().is_empty() {
                return self.dropdown.handle_key(key, settings, models, sink);
            }
            // The list went away underneath the menu (reload or empty result)
            self.dropdown.close();
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('o') if ctrl => {
                self.focused == SettingsField::ModelId && self.open_models(settings, models)
            }
            KeyCode::Down if alt => {
                self.focused == SettingsField::ModelId && self.open_models(settings, models)
            }
            KeyCode::Char('u') if ctrl => {
                self.clear(settings, sink);
                true
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            KeyCode::Backspace => {
                self.backspace(settings, sink);
                true
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                self.input_char(settings, c, sink);
                true
            }
            _ => false,
        }
    }

    pub fn view(
        &self,
        settings: &OpenAiSettings,
        models: &ModelsState,
        spinner_frame: &str,
        theme: &Theme,
    ) -> FormView {
        let mut lines = Vec::new();
        let mut focus_row = 0;

        for field in SettingsField::ALL {
            let is_focused = *field == self.focused;
            if is_focused {
                focus_row = lines.len();
            }

            lines.push(Line::from(Span::styled(field.title().to_string(), theme.label_style())));

            let mut spans = vec![
                Span::styled(
                    if is_focused {
                        format!("{} ", theme.focus.focus_indicator)
                    } else {
                        "  ".to_string()
                    },
                    Style::default().fg(theme.colors.accent.to_color()),
                ),
                Span::styled("[", theme.muted_style()),
            ];
            spans.extend(self.value_spans(settings, *field, is_focused, theme));
            spans.push(Span::styled("]", theme.muted_style()));

            if *field == SettingsField::ModelId {
                spans.push(Self::models_button(models, spinner_frame, theme));
            }
            lines.push(Line::from(spans));

            if *field == SettingsField::ModelId {
                lines.extend(self.dropdown.lines(models, &settings.model_id, theme));
            }

            lines.push(Line::default());
        }

        let hint = if self.dropdown.is_expanded() && !models.ids().is_empty() {
            "j/k move  ↵ select  Esc close"
        } else if self.focused == SettingsField::ModelId {
            "^O models  ^U clear  Tab next  ^S save  Esc cancel"
        } else {
            "^U clear  Tab next  ^S save  Esc cancel"
        };
        lines.push(Line::from(Span::styled(hint, theme.muted_style())));

        FormView { lines, focus_row }
    }

    fn value_spans(
        &self,
        settings: &OpenAiSettings,
        field: SettingsField,
        is_focused: bool,
        theme: &Theme,
    ) -> Vec<Span<'static>> {
        let raw = settings.field(field);
        let mut spans = Vec::new();

        if raw.is_empty() && field == SettingsField::BaseUrl {
            spans.push(Span::styled(OPENAI_BASE_URL, theme.muted_style()));
        } else {
            let shown = if field == SettingsField::Key {
                mask_api_key(raw)
            } else {
                raw.to_string()
            };
            spans.push(Span::styled(shown, theme.value_style()));
        }

        if is_focused {
            spans.push(Span::styled("█", Style::default().fg(theme.colors.accent.to_color())));
        }
        spans
    }

    fn models_button(models: &ModelsState, spinner_frame: &str, theme: &Theme) -> Span<'static> {
        if models.is_loading() {
            return Span::styled(
                format!(" {}", spinner_frame),
                Style::default().fg(theme.colors.warning.to_color()),
            );
        }

        let style = if Self::models_button_enabled(models) {
            Style::default()
                .fg(theme.colors.accent.to_color())
                .add_modifier(Modifier::BOLD)
        } else {
            theme.muted_style()
        };
        Span::styled(" ▼", style)
    }
}
