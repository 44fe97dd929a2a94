use crate::app::{App, Pane, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod delete_dialog;
mod form_view;
mod header;
mod list_view;
mod login_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render_header(frame, root[0], app);

    let body = root[1];
    match app.current_view {
        View::Loading => render_loading(frame, body),
        View::Login => login_view::render_login_view(frame, app, body),
        View::Main => render_main_view(frame, app, body),
        View::ConfirmDelete => delete_dialog::render_delete_confirm_dialog(frame, app, body),
    }

    render_key_hints(frame, root[2], app);
}

pub fn render_main_view(frame: &mut Frame, app: &App, body: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(body);

    form_view::render_form(frame, app, cols[0]);
    list_view::render_list(frame, app, cols[1]);
}

fn render_loading(frame: &mut Frame, body: Rect) {
    let area = utils::centered_rect(30, 3, body);
    let paragraph = Paragraph::new(Span::styled(
        "Checking session...",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_key_hints(frame: &mut Frame, area: Rect, app: &App) {
    let pairs: &[(&'static str, &'static str)] = match (app.current_view, app.pane) {
        (View::Loading, _) => &[("q", ": Quit")],
        (View::Login, _) => &[
            ("Tab", ": Switch field  "),
            ("Enter", ": Sign in  "),
            ("Esc", ": Quit"),
        ],
        (View::Main, Pane::Form) => &[
            ("Tab/↑↓", ": Field  "),
            ("←→", ": Type  "),
            ("Enter", ": Add  "),
            ("Esc", ": List"),
        ],
        (View::Main, Pane::List) => &[
            ("j/k", ": Move  "),
            ("f/F", ": Filter  "),
            ("m", ": More  "),
            ("d", ": Delete  "),
            ("i", ": Form  "),
            ("o", ": Logout  "),
            ("q", ": Quit"),
        ],
        (View::ConfirmDelete, _) => &[("y", ": Delete  "), ("n", ": Cancel")],
    };

    let mut spans = vec![Span::raw("  ")];
    for (key, label) in pairs {
        spans.extend(utils::key_hint(*key, *label));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
