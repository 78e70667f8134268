// Event loop - main run() method and input routing

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use super::{App, TICK_INTERVAL_MS};
use crate::action::Action;
use crate::error::{Result, SettingsError};

impl App {
    pub fn run(&mut self) -> Result<()> {
        loop {
            // ---- 1. Poll non-input sources ----

            if self.state.poll_models() {
                self.mark_dirty();
            }

            // Tick (drives the loading spinner)
            if self.last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
                self.dispatch(Action::Tick)?;
                self.last_tick = Instant::now();
                if self.state.section.models().is_loading() {
                    self.mark_dirty();
                }
            }

            // ---- 2. Poll user input ----

            if event::poll(Duration::from_millis(16)).map_err(|e| SettingsError::Terminal(e.to_string()))? {
                let event = event::read().map_err(|e| SettingsError::Terminal(e.to_string()))?;

                // Any user input implies we want to give UI feedback
                self.mark_dirty();

                if let Some(action) = self.global_action(&event) {
                    self.dispatch(action)?;
                } else {
                    self.state.handle_input(&event);
                }
            }

            if self.should_quit {
                break;
            }

            // ---- 3. Draw once if anything changed ----

            if self.needs_redraw {
                self.draw()?;
                self.needs_redraw = false;
            }
        }

        Ok(())
    }

    /// Keys handled above the section. Ctrl+C always quits; `q` only outside edit mode.
    fn global_action(&self, event: &Event) -> Option<Action> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
            KeyCode::Char('q') | KeyCode::Esc if !self.state.section.is_editing() => Some(Action::Quit),
            _ => None,
        }
    }
}
