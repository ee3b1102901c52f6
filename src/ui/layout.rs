//! Layout components (header, panels, status bar)

use crate::app::{App, Panel};
use crate::platform::{PANEL_SHORTCUT, SUBMIT_SHORTCUT, UPLOAD_SHORTCUT};
use crate::state::Phase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Split the content area into the form and the photo panel
pub fn split_panels(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    (chunks[0], chunks[1])
}

pub fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Mother's Touch Cleaning",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Get Your Personalized Cleaning Quote",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

/// Draw the status bar at the bottom
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", view_hints(app)),
        Style::default().fg(Color::White),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let quit_hint = " ^C:quit ";
    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Keyboard hints for the current screen
fn view_hints(app: &App) -> String {
    if app.error_dialog.is_some() {
        return "Enter/Esc:dismiss".to_string();
    }
    match (app.controller.phase(), app.panel) {
        (Phase::Acknowledged(_), _) => "n:new request  q:quit".to_string(),
        (Phase::Submitting, _) => "Sending...".to_string(),
        (Phase::Editing, Panel::Form) => {
            format!("Tab:next  {SUBMIT_SHORTCUT}:send  {PANEL_SHORTCUT}:photos")
        }
        (Phase::Editing, Panel::Photos) => {
            format!("Enter:add  {UPLOAD_SHORTCUT}:upload  {PANEL_SHORTCUT}:form")
        }
    }
}
