use super::utils::{centered_rect, input_spans};
use super::*;
use crate::app::LoginField;

pub fn render_login_view(frame: &mut Frame, app: &App, body: Rect) {
    let state = &app.login;
    let area = centered_rect(60, 12, body);
    frame.render_widget(Clear, area);

    let label_style = |field: LoginField| {
        if state.focused_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut email = vec![Span::styled("Email:    ", label_style(LoginField::Email))];
    email.extend(input_spans(
        &state.email_input,
        state.focused_field == LoginField::Email,
        false,
    ));
    let mut password = vec![Span::styled("Password: ", label_style(LoginField::Password))];
    password.extend(input_spans(
        &state.password_input,
        state.focused_field == LoginField::Password,
        true,
    ));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Sign in to start tracking.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(email),
        Line::from(password),
        Line::from(""),
    ];

    if let Some(err) = &state.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(" Login ", Style::default().fg(Color::Yellow)))
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(paragraph, area);
}
