use super::*;

const LABEL: &str = " Habit Tracker";

pub fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let row = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(16), Constraint::Min(0)])
        .split(row);

    let throbber_area = Rect {
        width: 1,
        ..cols[0]
    };
    let label_area = Rect {
        x: cols[0].x + 1,
        width: cols[0].width.saturating_sub(1),
        ..cols[0]
    };

    let throbber = throbber_widgets_tui::Throbber::default()
        .style(Style::default().fg(Color::Yellow))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
        .use_type(if app.is_loading() {
            throbber_widgets_tui::WhichUse::Spin
        } else {
            throbber_widgets_tui::WhichUse::Full
        });
    frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    frame.render_widget(
        Paragraph::new(Span::styled(LABEL, Style::default().fg(Color::Yellow))),
        label_area,
    );

    let mut spans = Vec::new();
    if let Some(status) = &app.status_message {
        spans.push(Span::styled(status.clone(), Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw("   "));
    }
    if let Some(greeting) = app.greeting() {
        spans.push(Span::styled(
            greeting,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        cols[1],
    );
}
