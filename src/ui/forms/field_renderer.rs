//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(label: &str, is_active: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

/// Draw a text input with its current value
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: Option<&str>,
    is_active: bool,
    is_multiline: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let cursor = if is_active { "▌" } else { "" };
    let cursor_span = Span::styled(cursor, Style::default().fg(Color::Cyan));

    let content = if value.is_empty() {
        let hint = placeholder.unwrap_or(if is_active { "" } else { "(empty)" });
        Paragraph::new(Line::from(vec![
            cursor_span,
            Span::styled(hint, Style::default().fg(Color::DarkGray)),
        ]))
    } else if is_multiline {
        let mut lines: Vec<Line> = value.split('\n').map(|l| Line::from(l.to_string())).collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span);
        }
        Paragraph::new(lines).style(style)
    } else {
        Paragraph::new(Line::from(vec![Span::styled(value, style), cursor_span]))
    };

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(field_block(label, is_active)),
        area,
    );
}

/// Draw a selector showing its current option between arrows
pub fn draw_choice(frame: &mut Frame, area: Rect, label: &str, value: &str, is_active: bool) {
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let (text, text_style) = if value.is_empty() {
        ("Select...", Style::default().fg(Color::DarkGray))
    } else {
        (value, Style::default().add_modifier(Modifier::BOLD))
    };

    let line = Line::from(vec![
        Span::styled("◀ ", arrow_style),
        Span::styled(text, text_style),
        Span::styled(" ▶", arrow_style),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(field_block(label, is_active)),
        area,
    );
}

/// Draw a single checkbox with an optional inline error hint
pub fn draw_checkbox(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    checked: bool,
    hint: Option<&str>,
    is_active: bool,
) {
    let mark = if checked { "[x] " } else { "[ ] " };
    let mut lines = vec![Line::from(vec![
        Span::styled(mark, border_style(is_active)),
        Span::raw(label.to_string()),
    ])];
    if let Some(hint) = hint {
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_active));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
