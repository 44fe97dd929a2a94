use super::*;
use crate::app::list::EMPTY_MESSAGE;
use crate::format::{format_duration, format_timestamp};

pub fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let list = &app.list;
    let pane_focused = app.pane == Pane::List;

    let border = if pane_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" Activities · {} ", list.filter.label()))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    if let Some(err) = &list.error {
        frame.render_widget(
            Paragraph::new(Span::styled(err.clone(), Style::default().fg(Color::Red))),
            rows[0],
        );
    }

    if list.records.is_empty() {
        let message = if list.loading {
            "Loading activities..."
        } else {
            EMPTY_MESSAGE
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center),
            rows[1],
        );
        return;
    }

    let items: Vec<ListItem> = list
        .records
        .iter()
        .map(|record| {
            let data = &record.data;
            let mut header = vec![
                Span::styled(
                    format_timestamp(data.timestamp, app.zone),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw("  "),
                Span::styled(data.activity_type.label().to_string(), Style::default().fg(Color::Cyan)),
            ];
            if let Some(hours) = data.duration {
                let formatted = format_duration(hours);
                if !formatted.is_empty() {
                    header.push(Span::raw("  "));
                    header.push(Span::styled(formatted, Style::default().fg(Color::Magenta)));
                }
            }

            let mut lines = vec![Line::from(header)];
            if let (Some(company), Some(position)) = (&data.company, &data.position) {
                lines.push(Line::from(Span::styled(
                    format!("  {} · {}", company, position),
                    Style::default().fg(Color::White),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!("  {}", data.description),
                Style::default().fg(Color::Gray),
            )));
            ListItem::new(lines)
        })
        .collect();

    let highlight = if pane_focused {
        Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let widget = List::new(items).highlight_style(highlight);
    let mut state = ListState::default();
    state.select(Some(list.selected));
    frame.render_stateful_widget(widget, rows[1], &mut state);

    let footer = if list.loading {
        Span::styled("Loading...", Style::default().fg(Color::DarkGray))
    } else if list.can_load_more() {
        Span::styled("[m] Load More", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!("{} activities", list.records.len()),
            Style::default().fg(Color::DarkGray),
        )
    };
    frame.render_widget(Paragraph::new(Line::from(footer)), rows[2]);
}
