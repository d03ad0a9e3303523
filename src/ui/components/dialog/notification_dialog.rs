//! Notification dialog component

use super::base::{render_dialog, DialogConfig};
use crate::state::{Notification, NotificationKind};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render the pending notification as a modal overlay
pub fn render_notification_dialog(frame: &mut Frame, notification: &Notification) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Got it, thanks! "),
        Span::styled("Enter", key_style),
        Span::raw(" / "),
        Span::styled("Esc", key_style),
    ];

    let accent = match notification.kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
    };

    render_dialog(
        frame,
        DialogConfig {
            title: notification.title(),
            accent,
            message: &notification.message,
            bullets: notification.details(),
            hint: Some(hint),
            max_width: 72,
        },
    );
}
