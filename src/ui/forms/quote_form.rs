//! Quote request form panel

use super::field_renderer::field_lines;
use crate::app::{App, FormRow, Panel};
use crate::platform::{PANEL_SHORTCUT, SUBMIT_SHORTCUT};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use crate::ui::widgets::render_scrollable_list;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const SERVICE_NOTES: &str = "We bring all the supplies for your convenience. \
Appliances are cleaned on the outside only; window glass and dishes are not included.";

/// Draw the form fields with the submit button underneath
pub fn draw_quote_form(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.panel == Panel::Form;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Get Your Personalized Cleaning Quote ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),                // Fields
            Constraint::Length(2),             // Service notes
            Constraint::Length(1),             // Notice
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Help text
        ])
        .split(inner);

    let form = app.controller.form();
    let active = app.active_form_row();
    let fields: Vec<_> = form.visible_fields();

    let items: Vec<ListItem> = fields
        .iter()
        .map(|field| {
            let is_active = focused && active == FormRow::Field(*field);
            let mut lines = field_lines(form, *field, is_active);
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let selected = match active {
        FormRow::Field(field) => fields.iter().position(|f| *f == field).unwrap_or(0),
        FormRow::Submit => fields.len().saturating_sub(1),
    };
    render_scrollable_list(frame, chunks[0], List::new(items), selected);

    frame.render_widget(
        Paragraph::new(SERVICE_NOTES)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    if let Some(notice) = app.controller.notice() {
        frame.render_widget(
            Paragraph::new(notice).style(Style::default().fg(Color::Red)),
            chunks[2],
        );
    }

    let submitting = app.controller.is_submitting();
    let label = if submitting {
        "Sending..."
    } else {
        "Send Quote Request to My Email"
    };
    render_button(
        frame,
        chunks[3],
        label,
        focused && active == FormRow::Submit,
        !submitting,
        Color::Magenta,
    );

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next  "),
        Span::styled("←/→", Style::default().fg(Color::Cyan)),
        Span::raw(": choose  "),
        Span::styled(SUBMIT_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": send  "),
        Span::styled(PANEL_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": photos"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[4]);
}
