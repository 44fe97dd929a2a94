use crate::app::{App, Pane};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.list.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.list.select_previous(),
        KeyCode::Char('f') => app.list.cycle_filter(true),
        KeyCode::Char('F') => app.list.cycle_filter(false),
        KeyCode::Char('m') => {
            if app.list.can_load_more() {
                enqueue_action(action_tx, Action::LoadMore);
            }
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::RefreshList),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => app.enter_delete_confirm(),
        KeyCode::Char('i') | KeyCode::Tab | KeyCode::Enter | KeyCode::Esc => {
            app.focus_pane(Pane::Form)
        }
        KeyCode::Char('o') => enqueue_action(action_tx, Action::Logout),
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}
