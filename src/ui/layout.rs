//! Layout components (progress header, status bar)

use crate::app::App;
use crate::state::{FieldKind, Step};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Header height: step strip plus its border
const HEADER_HEIGHT: u16 = 3;

/// Split the screen into progress header and step body
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    // Reserve bottom line for status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Progress
            Constraint::Min(0),                // Step body
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the seven-step progress strip
pub fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    let current = app.state.wizard.step();
    let mut spans = Vec::new();

    for (idx, step) in Step::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" ─ ", Style::default().fg(Color::DarkGray)));
        }
        let style = if *step == current {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if step.index() < current.index() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if step.index() < current.index() {
            "✔".to_string()
        } else {
            step.number().to_string()
        };
        spans.push(Span::styled(format!("{marker} {}", step.label()), style));
    }

    let block = Block::default()
        .title(" GS1 Pakistan Membership Application ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let step = app.state.wizard.step();
    let mut spans = vec![Span::styled(
        format!(" Step {}/{} ", step.number(), Step::ALL.len()),
        Style::default().fg(Color::Cyan),
    )];

    spans.push(Span::styled(
        field_hints(app.state.focused_kind(), step.is_last()),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        let color = if msg.starts_with("Delivery failed") || msg.contains("not available") {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Render quit hint on the right
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the focused input
fn field_hints(kind: Option<FieldKind>, last_step: bool) -> String {
    let field = match kind {
        Some(FieldKind::Text) => "type:edit  Tab:next",
        Some(FieldKind::Multiline) => "type:edit  Enter:newline  ^D:remove  Tab:next",
        Some(FieldKind::Choice) => "←/→:change  Tab:next",
        Some(FieldKind::Checkbox) => "Space:toggle  Tab:next",
        Some(FieldKind::Checklist) | Some(FieldKind::FeeTable) => "↑/↓:move  Space:select  Tab:next",
        Some(FieldKind::FilePath) => "type path  Enter:upload",
        Some(FieldKind::Button) => "Enter:add",
        None => "",
    };
    let submit = if last_step { "  ^S:submit" } else { "" };
    format!("{field}  ^N:next  ^P:back{submit}")
}
