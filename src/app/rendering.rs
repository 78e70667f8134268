// Rendering - draw() method and layout helpers

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::App;
use crate::components::Component;
use crate::error::{Result, SettingsError};

const MAX_SECTION_WIDTH: u16 = 80;

impl App {
    pub(super) fn draw(&mut self) -> Result<()> {
        // Clone theme once - it's small (just color values)
        let theme = self.state.config_manager.theme().clone();
        let editing = self.state.section.is_editing();
        let section = &self.state.section;

        self.terminal
            .draw(|frame| {
                let (body, footer) = main_layout(frame.area());

                section.render(frame, body, true, &theme);

                let hint = if editing {
                    "^S save  Esc cancel  ^C quit"
                } else {
                    "e edit  q quit"
                };
                let footer_line = Line::from(Span::styled(hint, theme.muted_style()));
                frame.render_widget(Paragraph::new(footer_line).centered(), footer);
            })
            .map_err(|e| SettingsError::Terminal(e.to_string()))?;

        Ok(())
    }
}

/// Centered column for the section plus a one-line footer
fn main_layout(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let [column] = Layout::horizontal([Constraint::Max(MAX_SECTION_WIDTH)])
        .flex(Flex::Center)
        .areas(rows[0]);

    (column, rows[1])
}
