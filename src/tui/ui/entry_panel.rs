use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::app::{App, Pane};
use crate::tui::theme::theme;

const LABEL_WIDTH: usize = 12;

fn label(text: &str) -> Span<'static> {
    Span::styled(
        format!("{:<width$}", text, width = LABEL_WIDTH),
        theme().setting_key(),
    )
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();
    let focused = app.focused_pane == Pane::Entry;

    let block = Block::default()
        .title(t.panel_title("ENTRY", focused))
        .borders(Borders::ALL)
        .border_style(t.panel_border(focused))
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Plain
        });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let snap = &app.snapshot;
    let config = app.entry.config();
    let auto = &config.auto_enter;

    let mut modifier_spans = vec![label("Modifiers")];
    for (slot, &on) in snap.modifiers.iter().enumerate() {
        modifier_spans.push(Span::styled(
            format!("[{}] {}  ", if on { "x" } else { " " }, slot),
            t.checkbox(on),
        ));
    }

    let criteria = [
        ("timeout", auto.on_timeout),
        ("raw len", auto.on_raw_length),
        ("fmt len", auto.on_formatted_length),
        ("regex", auto.on_regex),
    ];
    let mut criteria_spans = vec![label("Auto-enter")];
    criteria_spans.push(Span::styled(
        format!("{} ", auto.logic.to_string().to_uppercase()),
        t.text_secondary(),
    ));
    for (name, enabled) in criteria {
        criteria_spans.push(Span::styled(format!("{}  ", name), t.setting_value(enabled)));
    }

    let lines = vec![
        Line::from(vec![
            label("Entry"),
            Span::styled(snap.cursor.clone(), t.entry_text()),
        ]),
        Line::from(vec![
            label("Formatted"),
            Span::styled(snap.formatted.clone(), t.text_primary()),
        ]),
        Line::from(vec![
            label("Length"),
            Span::styled(
                format!("{} / {}", snap.raw_length, config.entry.max_length),
                t.text_secondary(),
            ),
            Span::styled("   cursor ", t.text_muted()),
            Span::styled(snap.cursor_position.to_string(), t.text_secondary()),
        ]),
        Line::from(vec![
            label("Format"),
            Span::styled(config.entry.format.clone(), t.text_secondary()),
        ]),
        Line::from(modifier_spans),
        Line::from(criteria_spans),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let t = theme();

    let block = Block::default()
        .title(t.panel_title("HISTORY", false))
        .borders(Borders::ALL)
        .border_style(t.panel_border(false))
        .border_type(BorderType::Plain);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let snap = &app.snapshot;
    let enter = &app.entry.config().enter;
    let lines = vec![
        Line::from(vec![
            label("Last"),
            Span::styled(snap.last.clone(), t.text_primary()),
            Span::styled(format!("  ({} chars)", snap.last_length), t.text_muted()),
        ]),
        Line::from(vec![
            label("Second last"),
            Span::styled(snap.second_last.clone(), t.text_secondary()),
        ]),
        Line::from(vec![
            label("Counter"),
            Span::styled(snap.counter.to_string(), t.text_primary()),
            Span::styled(
                format!("   copy {} / after {:?}", enter.copy, enter.after),
                t.text_muted(),
            ),
        ]),
        Line::styled(app.status.clone(), t.status_message()),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
