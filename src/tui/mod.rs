//! Interactive terminal site editor with live sizing.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Application state and edit operations.
pub mod runtime;
mod style;

use std::io::{self, Stdout};

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use runtime::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode and the alternate screen, undone on drop even if drawing fails.
struct RawScreen;

impl RawScreen {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for RawScreen {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Runs the editor on `app` until the user quits.
///
/// # Errors
///
/// Returns an `io::Error` if the terminal cannot be set up or drawn to.
pub fn run(mut app: App) -> io::Result<()> {
    let _screen = RawScreen::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let outcome = edit_loop(&mut terminal, &mut app);
    let _ = terminal.show_cursor();
    outcome
}

/// Redraws after every key; the app recomputes inside each edit.
fn edit_loop(terminal: &mut Term, app: &mut App) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| layout::render(frame, app))?;
        if let Event::Key(key) = event::read()? {
            controls::handle_key(app, key);
        }
    }
    Ok(())
}
