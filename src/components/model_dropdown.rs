//! Dropdown of fetched model identifiers, rendered per [`ModelsState`]

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::action::SettingsEvent;
use crate::components::EventSink;
use crate::config::{OpenAiSettings, SettingsField, Theme};
use crate::llm::ModelsState;

pub const NO_MODELS_TEXT: &str = "No models were found";
pub const UNABLE_TO_LOAD_TEXT: &str = "Unable to load models";

#[derive(Debug, Clone, Default)]
pub struct ModelDropdown {
    expanded: bool,
    selected: usize,
}

impl ModelDropdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Expand the menu. Only possible once a non-empty list loaded.
    pub fn open(&mut self, models: &ModelsState, current_model: &str) -> bool {
        if models.ids().is_empty() {
            return false;
        }
        self.selected = models
            .ids()
            .iter()
            .position(|id| id == current_model)
            .unwrap_or(0);
        self.expanded = true;
        true
    }

    pub fn close(&mut self) {
        self.expanded = false;
    }

    pub fn next(&mut self, models: &ModelsState) {
        let len = models.ids().len();
        if len > 0 {
            self.selected = (self.selected.min(len - 1) + 1) % len;
        }
    }

    pub fn prev(&mut self, models: &ModelsState) {
        let len = models.ids().len();
        if len > 0 {
            let current = self.selected.min(len - 1);
            self.selected = if current == 0 { len - 1 } else { current - 1 };
        }
    }

    /// Pick `ids[index]` as the model id and close the menu
    pub fn select(
        &mut self,
        index: usize,
        settings: &OpenAiSettings,
        models: &ModelsState,
        sink: &mut EventSink<'_>,
    ) {
        if let Some(id) = models.ids().get(index) {
            tracing::debug!("Model selected from list: {}", id);
            sink(SettingsEvent::UpdateSettings(
                settings.with_field(SettingsField::ModelId, id.clone()),
            ));
        }
        self.close();
    }

    /// Keys while expanded. The menu is modal, so every key is consumed.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        settings: &OpenAiSettings,
        models: &ModelsState,
        sink: &mut EventSink<'_>,
    ) -> bool {
        if !self.expanded {
            return false;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => self.next(models),
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => self.prev(models),
            KeyCode::Enter => self.select(self.selected, settings, models, sink),
            KeyCode::Esc => self.close(),
            _ => {}
        }
        true
    }

    pub fn lines(&self, models: &ModelsState, current_model: &str, theme: &Theme) -> Vec<Line<'static>> {
        match models {
            ModelsState::Success(ids) if ids.is_empty() => {
                card_lines(NO_MODELS_TEXT.to_string(), theme.muted_style(), theme)
            }
            ModelsState::Success(ids) => {
                if !self.expanded {
                    return Vec::new();
                }
                self.menu_lines(ids, current_model, theme)
            }
            ModelsState::Error(message) => card_lines(
                format!("{} {}", UNABLE_TO_LOAD_TEXT, message),
                Style::default().fg(theme.colors.error.to_color()),
                theme,
            ),
            ModelsState::Loading | ModelsState::None => Vec::new(),
        }
    }

    fn menu_lines(&self, ids: &[String], current_model: &str, theme: &Theme) -> Vec<Line<'static>> {
        let selected = self.selected.min(ids.len().saturating_sub(1));
        let border = theme.border_style(true);
        let width = ids.iter().map(|id| id.chars().count()).max().unwrap_or(0) + 6;

        let mut lines = vec![Line::from(Span::styled(
            format!("  ┌{}┐", "─".repeat(width)),
            border,
        ))];

        for (idx, id) in ids.iter().enumerate() {
            let is_selected = idx == selected;
            let is_current = id == current_model;

            let selector = if is_selected { "▸" } else { " " };
            let marker = if is_current { "●" } else { "○" };
            let name_style = if is_selected {
                Style::default()
                    .fg(theme.colors.accent.to_color())
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(theme.colors.primary.to_color())
            } else {
                theme.value_style()
            };
            let pad = width.saturating_sub(id.chars().count() + 5);

            lines.push(Line::from(vec![
                Span::styled("  │", border),
                Span::styled(format!(" {}", selector), Style::default().fg(theme.colors.accent.to_color())),
                Span::styled(format!(" {} ", marker), theme.muted_style()),
                Span::styled(id.clone(), name_style),
                Span::raw(" ".repeat(pad)),
                Span::styled("│", border),
            ]));
        }

        lines.push(Line::from(Span::styled(
            format!("  └{}┘", "─".repeat(width)),
            border,
        )));
        lines
    }
}

/// Outlined informational card
fn card_lines(text: String, text_style: Style, theme: &Theme) -> Vec<Line<'static>> {
    let border = theme.border_style(false);
    let width = text.chars().count() + 2;
    vec![
        Line::from(Span::styled(format!("  ╭{}╮", "─".repeat(width)), border)),
        Line::from(vec![
            Span::styled("  │ ", border),
            Span::styled(text, text_style),
            Span::styled(" │", border),
        ]),
        Line::from(Span::styled(format!("  ╰{}╯", "─".repeat(width)), border)),
    ]
}
