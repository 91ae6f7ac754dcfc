// Module declarations
pub mod action;
pub mod app;
pub mod clipboard;
pub mod components;
pub mod document;
pub mod error;
pub mod keys;
pub mod widgets;

#[cfg(test)]
pub mod testing;

#[cfg(test)]
mod integration_tests;

pub use action::{Action, DialogAction};
pub use app::App;
pub use keys::key_to_action;

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use crate::config::Config;
use self::clipboard::Osc52Clipboard;

/// Main entry point for TUI mode
pub fn run(config: Config) -> anyhow::Result<()> {
    let mut app = App::new(&config, Box::new(Osc52Clipboard::stdout()))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        // Mutation records are delivered here, between frames
        app.tick();

        terminal.draw(|f| {
            let area = f.area();
            app.render(area, f.buffer_mut());
        })?;

        if app.should_quit() {
            tracing::debug!("ACTION: Quitting application");
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = key_to_action(key, app.dialog_open()) {
                    app.dispatch(action);
                }
            }
        }
    }
}
