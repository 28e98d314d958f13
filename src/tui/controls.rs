//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;
use crate::sizing::Scenario;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
/// While a load is being renamed, printable keys go to its name.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }
    if app.renaming {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => app.end_rename(),
            KeyCode::Backspace => app.pop_name_char(),
            KeyCode::Char(ch) => app.push_name_char(ch),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('1') => app.set_scenario(Scenario::PeakShaving),
        KeyCode::Char('2') => app.set_scenario(Scenario::PowerStability),
        KeyCode::Char('3') => app.set_scenario(Scenario::GeneratorHybrid),
        KeyCode::Char('4') => app.set_scenario(Scenario::GridAugmentation),
        KeyCode::Tab => app.cycle_focus(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('+' | '=') | KeyCode::Right => app.adjust_focused(1.0),
        KeyCode::Char('-') | KeyCode::Left => app.adjust_focused(-1.0),
        KeyCode::Char('a') => app.add_load(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
        KeyCode::Char('r') | KeyCode::Enter => app.begin_rename(),
        KeyCode::Char('s') => app.cycle_starter(),
        KeyCode::Char('p') => app.next_preset(),
        _ => {}
    }
}
