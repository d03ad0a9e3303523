//! Action button rendered inline with the form inputs

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the "+ Add Address" action under the GLN address list
///
/// Focus turns the border cyan and adds the Enter hint.
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, is_focused: bool) {
    let accent = if is_focused { Color::Cyan } else { Color::Green };
    let mut spans = vec![Span::styled(
        format!(" {content} "),
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    )];
    if is_focused {
        spans.push(Span::styled("(Enter)", Style::default().fg(Color::DarkGray)));
    }

    let border = if is_focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
