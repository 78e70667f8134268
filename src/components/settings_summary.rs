//! Read-only presentation of the connection settings

use ratatui::text::{Line, Span};

use crate::config::{OpenAiSettings, SettingsField, Theme};
use crate::llm::display_url;
use crate::util::mask_api_key;

pub fn summary_lines(settings: &OpenAiSettings, theme: &Theme) -> Vec<Line<'static>> {
    let key_line = if settings.key.is_empty() {
        Span::styled("not set", theme.muted_style())
    } else {
        Span::styled(mask_api_key(&settings.key), theme.value_style())
    };

    vec![
        Line::from(Span::styled(SettingsField::Key.title(), theme.label_style())),
        Line::from(vec![Span::raw("  "), key_line]),
        Line::default(),
        Line::from(Span::styled(SettingsField::ModelId.title(), theme.label_style())),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(settings.model_id.clone(), theme.value_style()),
        ]),
        Line::default(),
        Line::from(Span::styled(SettingsField::BaseUrl.title(), theme.label_style())),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(display_url(settings), theme.value_style()),
        ]),
    ]
}
