use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let display_path = match &app.config_path {
        Some(path) => path.display().to_string(),
        None => "default config".to_string(),
    };
    let count = display_path.chars().count();
    let path_display = if count > 45 {
        let tail: String = display_path.chars().skip(count - 42).collect();
        format!("...{}", tail)
    } else {
        display_path
    };

    let pending = app.entry.timeout_deadline().is_some();
    let state_label = if pending { "PENDING" } else { "IDLE" };

    let line = Line::from(vec![
        // App name
        Span::styled("dataentry ", t.text_primary().add_modifier(Modifier::BOLD)),
        // Timer badge
        Span::styled(format!("[{}] ", state_label), t.status_badge(pending)),
        // Config path
        Span::styled(path_display, t.text_muted()),
        // Spacer
        Span::raw(" "),
        Span::styled("Ctrl-C:quit", t.key_hint()),
    ]);

    let header = Paragraph::new(line).alignment(Alignment::Left);

    frame.render_widget(header, area);
}
