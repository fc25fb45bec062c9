use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::keys::control_id;
use crate::tui::app::{App, Pane};

/// Handle input and return true if the app should quit
pub fn handle_input(app: &mut App, key: KeyEvent) -> io::Result<bool> {
    // Global keys: Ctrl-C quits, Tab switches pane, Ctrl-R reloads, Ctrl-E enters
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('r') => app.reload_config(),
            KeyCode::Char('e') => app.enter_now(),
            _ => {}
        }
        return Ok(false);
    }
    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        app.cycle_pane();
        return Ok(false);
    }

    match app.focused_pane {
        Pane::Entry => handle_entry_input(app, key.code),
        Pane::Log => return Ok(handle_log_input(app, key.code)),
    }

    Ok(false)
}

fn handle_entry_input(app: &mut App, key: KeyCode) {
    // Every key goes to the entry as a control
    if let Some(id) = control_id(key) {
        app.press_control(&id);
    }
}

fn handle_log_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.log_scroll = app.log_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.log_scroll = app.log_scroll.saturating_add(1);
        }
        _ => {}
    }
    false
}
