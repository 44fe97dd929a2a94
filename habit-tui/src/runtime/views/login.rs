use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_login_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.next_field();
        }
        KeyCode::Enter => {
            enqueue_action(action_tx, Action::SubmitLogin);
        }
        KeyCode::Esc => app.quit(),
        KeyCode::Backspace => app.login.focused_input_mut().backspace(),
        KeyCode::Left => app.login.focused_input_mut().move_left(),
        KeyCode::Right => app.login.focused_input_mut().move_right(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.focused_input_mut().insert(c);
        }
        _ => {}
    }
}
