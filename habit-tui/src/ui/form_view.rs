use super::utils::input_spans;
use super::*;
use crate::app::{FlashKind, FormField};

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::ActivityType => "Activity",
        FormField::Company => "Company",
        FormField::Position => "Position",
        FormField::Duration => "Duration (hours)",
        FormField::Date => "Date",
        FormField::Time => "Time",
        FormField::Description => "Description",
    }
}

pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let pane_focused = app.pane == Pane::Form;

    let mut lines = vec![Line::from("")];
    for field in form.visible_fields() {
        let focused = pane_focused && form.focused == field;
        let label_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(field_label(field), label_style)));

        let value = match field {
            FormField::ActivityType => {
                let style = if focused {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                vec![
                    Span::styled("< ", label_style),
                    Span::styled(form.activity_type.label(), style),
                    Span::styled(" >", label_style),
                ]
            }
            FormField::Company => input_spans(&form.company, focused, false),
            FormField::Position => input_spans(&form.position, focused, false),
            FormField::Duration => input_spans(&form.duration, focused, false),
            FormField::Date => input_spans(&form.date, focused, false),
            FormField::Time => input_spans(&form.time, focused, false),
            FormField::Description => input_spans(&form.description, focused, false),
        };
        let mut row = vec![Span::raw("  ")];
        row.extend(value);
        lines.push(Line::from(row));
        lines.push(Line::from(""));
    }

    if form.submitting {
        lines.push(Line::from(Span::styled(
            "Adding...",
            Style::default().fg(Color::DarkGray),
        )));
    } else if let Some(flash) = form.flash() {
        let color = match flash.kind {
            FlashKind::Success => Color::Green,
            FlashKind::Error => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            flash.text.clone(),
            Style::default().fg(color),
        )));
    }

    let border = if pane_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Log Activity ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}
