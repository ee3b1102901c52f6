//! UI module for rendering the TUI

mod acknowledgment;
mod components;
mod forms;
mod layout;
mod photos;
mod widgets;

use crate::app::App;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, content_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area);

    if app.controller.acknowledgment().is_some() {
        acknowledgment::draw(frame, content_area, app);
    } else {
        let (form_area, photo_area) = layout::split_panels(content_area);
        forms::draw_quote_form(frame, form_area, app);
        photos::draw(frame, photo_area, app);
    }

    layout::draw_status_bar(frame, status_area, app);

    if let Some(message) = &app.error_dialog {
        render_error_dialog(frame, message);
    }
}
