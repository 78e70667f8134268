// App module - split into submodules
// - mod.rs: App struct, terminal setup/teardown, action dispatch
// - state.rs: Settings state (config store, section, model loader)
// - event_loop.rs: Main run() loop
// - rendering.rs: UI drawing (draw method)
// - models_loader.rs: Background model-list requests

mod event_loop;
mod models_loader;
mod rendering;
mod state;

use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::action::Action;
use crate::config::ConfigManager;
use crate::error::{Result, SettingsError};
use crate::llm::ModelFetcher;

pub use models_loader::ModelsLoader;
pub use state::SettingsState;

pub(super) const TICK_INTERVAL_MS: u64 = 100;

pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    should_quit: bool,
    needs_redraw: bool,
    last_tick: Instant,
    state: SettingsState,
}

impl App {
    pub fn new(config_manager: ConfigManager, initial_edit: bool) -> Result<Self> {
        let loader = ModelsLoader::new(ModelFetcher::new()?);
        let state = SettingsState::new(config_manager, loader, initial_edit);

        enable_raw_mode().map_err(|e| SettingsError::Terminal(e.to_string()))?;
        // Drop is not armed until Self exists
        let terminal = undo_on_error(Self::init_terminal(), restore_terminal)?;

        Ok(Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            last_tick: Instant::now(),
            state,
        })
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| SettingsError::Terminal(e.to_string()))?;

        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(|e| SettingsError::Terminal(e.to_string()))
    }

    pub fn mount(&mut self) {
        self.state.mount();
        self.mark_dirty();
    }

    pub(super) fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub(super) fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                self.state.tick();
            }
            Action::Settings(event) => {
                self.state.handle_settings_event(event);
                self.mark_dirty();
            }
        }
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
}

/// Run `undo` when `result` is an error, then pass the result through
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}
