mod entry_panel;
mod footer;
mod header;
mod log_panel;

use ratatui::prelude::*;

use crate::tui::app::App;

pub fn draw_ui(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),   // Compact header
            Constraint::Length(9),   // Entry block (raw, formatted, modifiers)
            Constraint::Length(6),   // History block
            Constraint::Min(6),      // Commit log
            Constraint::Length(2),   // Footer
        ])
        .split(frame.area());

    header::render(frame, app, root[0]);
    entry_panel::render(frame, app, root[1]);
    entry_panel::render_history(frame, app, root[2]);
    log_panel::render(frame, app, root[3]);
    footer::render(frame, app, root[4]);
}
