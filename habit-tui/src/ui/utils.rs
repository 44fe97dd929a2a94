use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::app::TextInput;

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Spans for a text input, with a block cursor when focused.
pub fn input_spans(input: &TextInput, focused: bool, masked: bool) -> Vec<Span<'static>> {
    let render = |s: &str| {
        if masked {
            "•".repeat(s.chars().count())
        } else {
            s.to_string()
        }
    };
    let text = Style::default().fg(Color::White);

    if !focused {
        return vec![Span::styled(render(&input.value), text)];
    }

    let (before, after) = input.split_at_cursor();
    let focused_text = text.add_modifier(Modifier::BOLD);
    vec![
        Span::styled(render(before), focused_text),
        Span::styled("█", Style::default().fg(Color::Yellow)),
        Span::styled(render(after), focused_text),
    ]
}

pub fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}
