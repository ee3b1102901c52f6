//! Field rendering utilities for forms

use crate::state::{option_label, FieldId, FieldKind, FormState};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const DEEP_CLEANING_DETAILS: &[&str] = &[
    "baseboards",
    "doors - portals included -",
    "light switches",
    "moving fridge and stove out of place to clean - if possible -",
];

const REGULAR_CLEANING_DETAILS: &[&str] = &[
    "washrooms",
    "vacuuming and mopping floors",
    "dusting",
    "cleaning the kitchen",
];

/// Lines describing one field: label, value, and any extra notes
pub fn field_lines(form: &FormState, field: FieldId, is_active: bool) -> Vec<Line<'static>> {
    let label_style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let indent = if field.overflow_parent().is_some() { "    " } else { "" };

    let mut label = vec![Span::styled(format!("{indent}{}", field.label()), label_style)];
    if field.is_required() {
        label.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    let mut lines = vec![Line::from(label)];

    let value_line = match field.kind() {
        FieldKind::Flag => {
            let checked = form.flag(field).unwrap_or(false);
            let mark = if checked { "[x]" } else { "[ ]" };
            Line::from(vec![
                Span::styled(format!("{indent}  {mark} "), value_style(is_active, true)),
                Span::styled(
                    "Space to toggle",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        FieldKind::Choice(_) => {
            let value = form.text(field).unwrap_or_default();
            let (text, filled) = if value.is_empty() {
                (field.placeholder().to_string(), false)
            } else {
                (option_label(value).to_string(), true)
            };
            let arrows = if is_active { ("◀ ", " ▶") } else { ("", "") };
            Line::from(vec![
                Span::raw(format!("{indent}  {}", arrows.0)),
                Span::styled(text, value_style(is_active, filled)),
                Span::raw(arrows.1),
            ])
        }
        FieldKind::Text { multiline } => {
            let value = form.text(field).unwrap_or_default();
            let cursor = if is_active { "▌" } else { "" };
            if value.is_empty() {
                Line::from(vec![
                    Span::raw(format!("{indent}  ")),
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                    Span::styled(
                        field.placeholder().to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            } else if multiline {
                let mut parts: Vec<&str> = value.split('\n').collect();
                let last = parts.pop().unwrap_or_default();
                for part in parts {
                    lines.push(Line::from(Span::styled(
                        format!("{indent}  {part}"),
                        value_style(is_active, true),
                    )));
                }
                Line::from(vec![
                    Span::styled(format!("{indent}  {last}"), value_style(is_active, true)),
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                ])
            } else {
                Line::from(vec![
                    Span::styled(format!("{indent}  {value}"), value_style(is_active, true)),
                    Span::styled(cursor, Style::default().fg(Color::Cyan)),
                ])
            }
        }
    };
    lines.push(value_line);

    if let Some(child) = field.overflow_field().filter(|_| form.shows_overflow(field)) {
        lines.push(Line::from(Span::styled(
            format!("  ↓ {} below", child.label().to_lowercase()),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let details = match field {
        FieldId::DeepCleaning => Some(("Deep cleaning includes detailing:", DEEP_CLEANING_DETAILS)),
        FieldId::RegularCleaning => Some(("The regular cleaning includes:", REGULAR_CLEANING_DETAILS)),
        _ => None,
    };
    if let Some((heading, items)) = details {
        let note = Style::default().fg(Color::DarkGray);
        lines.push(Line::from(Span::styled(format!("      {heading}"), note)));
        lines.extend(
            items
                .iter()
                .map(|item| Line::from(Span::styled(format!("        • {item}"), note))),
        );
    }

    lines
}

fn value_style(is_active: bool, filled: bool) -> Style {
    match (is_active, filled) {
        (_, false) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Cyan),
        (false, true) => Style::default().fg(Color::Gray),
    }
}
