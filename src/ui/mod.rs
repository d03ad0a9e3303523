//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod steps;
mod widgets;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, body_area) = layout::create_layout(frame.area());

    layout::draw_progress(frame, header_area, app);
    steps::draw(frame, body_area, app);
    layout::draw_status_bar(frame, app);

    // Modal goes last so it sits above everything
    if let Some(notification) = app.state.wizard.notification() {
        components::render_notification_dialog(frame, notification);
    }
}
