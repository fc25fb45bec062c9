use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Pane};
use crate::tui::theme::{theme, Theme};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    // Context-sensitive first line based on focused pane
    let line1 = match app.focused_pane {
        Pane::Entry => Line::from(vec![
            Span::styled("Keys are controls ~ ", t.text_muted()),
            Span::styled("Enter", t.key_hint()),
            Span::styled(":enter  ", t.text_muted()),
            Span::styled("Esc", t.key_hint()),
            Span::styled(":clear  ", t.text_muted()),
            Span::styled("F1-F3", t.key_hint()),
            Span::styled(":modifiers", t.text_muted()),
        ]),
        Pane::Log => Line::styled(
            format!("Commit log ~ {} lines", app.log_len()),
            t.text_muted(),
        ),
    };

    let line2 = Line::from(vec![
        Span::styled("Tab", t.key_hint()),
        Span::styled(":", t.text_muted()),
        pane_label("Entry", app.focused_pane == Pane::Entry, t),
        Span::styled(" ", t.text_muted()),
        pane_label("Log", app.focused_pane == Pane::Log, t),
        Span::styled("  ", t.text_muted()),
        Span::styled("Ctrl-E", t.key_hint()),
        Span::styled(":enter now  ", t.text_muted()),
        Span::styled("Ctrl-R", t.key_hint()),
        Span::styled(":reload config  ", t.text_muted()),
        Span::styled("Ctrl-C", t.key_hint()),
        Span::styled(":quit", t.text_muted()),
    ]);

    let footer = Paragraph::new(vec![line1, line2]);
    frame.render_widget(footer, area);
}

fn pane_label(name: &'static str, focused: bool, t: &Theme) -> Span<'static> {
    Span::styled(name, if focused { t.key_hint() } else { t.text_muted() })
}
