/// Keyboard event to action mapping
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::trace;

use super::action::{Action, DialogAction};

/// Handle global keys that work whether or not the dialog is open
fn handle_global_keys(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        _ => None,
    }
}

fn handle_dialog_keys(key_code: KeyCode) -> Option<Action> {
    let action = match key_code {
        KeyCode::Char('j') | KeyCode::Down => DialogAction::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => DialogAction::SelectPrev,
        KeyCode::Char('y') => DialogAction::Copy,
        KeyCode::Esc => DialogAction::Close,
        _ => return None,
    };
    Some(Action::Dialog(action))
}

fn handle_page_keys(key_code: KeyCode) -> Option<Action> {
    match key_code {
        KeyCode::Char('c') => Some(Action::ToggleToolbar),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ClickIcon),
        KeyCode::Char('l') => Some(Action::CycleLabel),
        KeyCode::Char('i') => Some(Action::ToggleIconUrl),
        KeyCode::Char('x') => Some(Action::CleanupIcons),
        KeyCode::Char('r') => Some(Action::RespawnIcon),
        _ => None,
    }
}

/// Convert a key press into an action. While the dialog is open, page keys
/// are ignored.
pub fn key_to_action(key: KeyEvent, dialog_open: bool) -> Option<Action> {
    let action = handle_global_keys(key).or_else(|| {
        if dialog_open {
            handle_dialog_keys(key.code)
        } else {
            handle_page_keys(key.code)
        }
    });
    trace!("KEY: {:?} (dialog open: {}) -> {:?}", key.code, dialog_open, action);
    action
}
