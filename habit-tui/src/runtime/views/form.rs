use crate::app::{App, FormField, Pane};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => submit(app, action_tx),
        KeyCode::Char('s') if ctrl => submit(app, action_tx),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_previous(),
        KeyCode::Left if app.form.focused == FormField::ActivityType => app.form.cycle_type(false),
        KeyCode::Right if app.form.focused == FormField::ActivityType => app.form.cycle_type(true),
        KeyCode::Left => app.form.move_cursor(true),
        KeyCode::Right => app.form.move_cursor(false),
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Esc => app.focus_pane(Pane::List),
        KeyCode::Char(c) if !ctrl => app.form.input_char(c),
        _ => {}
    }
}

fn submit(app: &App, action_tx: &ActionTx) {
    if !app.form.submitting {
        enqueue_action(action_tx, Action::SubmitActivity);
    }
}
