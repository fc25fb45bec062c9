use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Log;

    let block = Block::default()
        .title(t.panel_title("COMMIT LOG", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let log = app.log.borrow();
    if log.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "Nothing entered yet.",
            t.text_muted(),
        ));
        frame.render_widget(empty, inner);
        return;
    }

    // Calculate visible lines based on inner area height
    let visible_height = inner.height.max(1) as usize;
    let total_lines = log.len();

    // Clamp scroll position
    let max_scroll = total_lines.saturating_sub(visible_height);
    let scroll = app.log_scroll.min(max_scroll);

    let start = scroll;
    let end = (start + visible_height).min(total_lines);

    let lines: Vec<Line> = log[start..end]
        .iter()
        .map(|l| Line::styled(l.clone(), t.output_text()))
        .collect();

    let output = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(output, inner);
}
