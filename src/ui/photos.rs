//! Photo staging panel

use super::widgets::render_scrollable_list;
use crate::app::{App, Panel};
use crate::platform::UPLOAD_SHORTCUT;
use crate::state::{format_file_size, StatusKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the path input, the staged and uploaded lists, and upload feedback
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.panel == Panel::Photos;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .title(" Photos of Your Space ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Path input
            Constraint::Min(3),    // Photo lists
            Constraint::Length(2), // Status
            Constraint::Length(1), // Help text
        ])
        .split(inner);

    let cursor = if focused { "▌" } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.photo_input.as_str()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" Image paths (space separated, Enter to add) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(input, chunks[0]);

    draw_photo_list(frame, chunks[1], app, focused);

    let status = if app.photos.is_uploading() {
        Some(Line::from(Span::styled(
            "Uploading...",
            Style::default().fg(Color::Yellow),
        )))
    } else {
        app.photos.status().map(|status| {
            let color = match status.kind {
                StatusKind::Warning => Color::Yellow,
                StatusKind::Error => Color::Red,
                StatusKind::Success => Color::Green,
            };
            Line::from(Span::styled(
                status.message.clone(),
                Style::default().fg(color),
            ))
        })
    };
    if let Some(line) = status {
        frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), chunks[2]);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(": select  "),
        Span::styled("Del", Style::default().fg(Color::Cyan)),
        Span::raw(": remove  "),
        Span::styled(UPLOAD_SHORTCUT, Style::default().fg(Color::Cyan)),
        Span::raw(": upload  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": form"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn draw_photo_list(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let staged = app.photos.staged();
    let uploaded = app.photos.uploaded();

    if staged.is_empty() && uploaded.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from("No photos selected."),
            Line::from(""),
            Line::from("Type the path of an image (JPG, PNG, ...) up to 10MB."),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let row_style = |index: usize| {
        if focused && index == app.photo_cursor {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let mut items: Vec<ListItem> = Vec::with_capacity(staged.len() + uploaded.len() + 2);
    if !staged.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("Selected photos ({})", staged.len()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))));
    }
    for (i, photo) in staged.iter().enumerate() {
        let mut lines = vec![Line::from(vec![
            Span::raw(format!("  {}", photo.name())),
            Span::styled(
                format!("  {}", format_file_size(photo.size())),
                Style::default().fg(Color::DarkGray),
            ),
        ])];
        if focused && i == app.photo_cursor {
            lines.push(Line::from(format!("    preview {}", photo.preview_uri())));
        }
        items.push(ListItem::new(lines).style(row_style(i)));
    }

    if !uploaded.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("Uploaded photos ({})", uploaded.len()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))));
    }
    for (i, photo) in uploaded.iter().enumerate() {
        items.push(
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("  ✓ ", Style::default().fg(Color::Green)),
                    Span::raw(photo.original_name.clone()),
                    Span::styled(
                        format!("  {}", format_file_size(photo.size)),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("    {}", photo.absolute_url(&app.backend_url)),
                    Style::default().fg(Color::Blue),
                )),
            ])
            .style(row_style(staged.len() + i)),
        );
    }

    // Account for the section headers when scrolling
    let staged_header = usize::from(!staged.is_empty());
    let selected = if app.photo_cursor < staged.len() {
        app.photo_cursor + staged_header
    } else {
        app.photo_cursor + staged_header + 1
    };
    render_scrollable_list(frame, area, List::new(items), selected);
}
