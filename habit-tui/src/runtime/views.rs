use crate::app::{App, Pane, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod confirm_delete;
mod form;
mod list;
mod login;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.current_view {
        View::Loading => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.quit();
            }
        }
        View::Login => login::handle_login_key(key, app, action_tx),
        View::Main => match app.pane {
            Pane::Form => form::handle_form_key(key, app, action_tx),
            Pane::List => list::handle_list_key(key, app, action_tx),
        },
        View::ConfirmDelete => confirm_delete::handle_confirm_delete_key(key, app, action_tx),
    }
}
