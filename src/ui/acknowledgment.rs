//! Confirmation screen shown after a quote request is sent

use crate::app::App;
use crate::platform::COPY_SHORTCUT;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(ack) = app.controller.acknowledgment() else {
        return;
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(Span::styled(
            "Thank You!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Your quote request has been received."),
        Line::from(""),
        Line::from(vec![
            Span::raw("Please send photos of your home and the quote PDF to "),
            Span::styled(ack.contact_email.clone(), bold.fg(Color::Cyan)),
        ]),
        Line::from(""),
        Line::from(Span::styled("Photos we need:", bold)),
    ];
    lines.extend(
        ack.required_photos
            .iter()
            .map(|place| Line::from(format!("  • {place}"))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Submitted {}",
            ack.submitted_at.format("%Y-%m-%d %H:%M UTC")
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("n", Style::default().fg(Color::Cyan)),
        Span::raw(": new request  "),
        Span::styled(COPY_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": copy email  "),
        Span::styled("q", Style::default().fg(Color::Cyan)),
        Span::raw(": quit"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
