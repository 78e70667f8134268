pub mod model_dropdown;
pub mod settings_form;
pub mod settings_section;
pub mod settings_summary;
pub mod spinner;

use crossterm::event::Event;
use ratatui::{layout::Rect, Frame};

use crate::action::{Action, SettingsEvent};
use crate::config::Theme;

pub use settings_section::SettingsSection;

/// Receiver for the intents a component raises
pub type EventSink<'a> = dyn FnMut(SettingsEvent) + 'a;

pub trait Component {
    /// Returns true when the event was consumed
    fn handle_event(&mut self, event: &Event, sink: &mut EventSink<'_>) -> bool;

    fn update(&mut self, action: &Action);

    fn render(&self, frame: &mut Frame, area: Rect, focused: bool, theme: &Theme);
}
