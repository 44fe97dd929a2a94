use std::sync::Arc;
use std::time::Instant;

use skapi::{Backend, DeleteQuery, RecordStore, SessionProvider};

use crate::app::{App, DeleteContext, FetchMode, FetchTicket, PendingSubmit, SubmitOutcome, View};

use super::action_queue::{Action, ActionTx};

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    store: &Arc<dyn Backend>,
    action_tx: &ActionTx,
) {
    match action {
        Action::CheckSession => {
            app.controller.check_session(store.as_ref()).await;
            app.sync_view();
        }
        Action::SubmitLogin => {
            handle_login_submit(app, store.as_ref()).await;
        }
        Action::Logout => {
            if let Err(e) = store.logout().await {
                tracing::warn!(error = %e, "logout failed");
                app.set_status(format!("Logout failed: {}", e), Instant::now());
            }
        }
        Action::SubmitActivity => {
            // Busy and invalid forms are reported by the form itself.
            if let Ok(pending) = app.form.begin_submit(app.zone, Instant::now()) {
                spawn_submit(pending, store, action_tx);
            }
        }
        Action::SubmitFinished { data, result } => {
            let outcome = app.form.finish_submit(data, result, Instant::now());
            if let SubmitOutcome::Added(_) = outcome {
                app.controller.activity_added();
            }
        }
        Action::RefreshList => {
            if let Some(ticket) = app.list.begin_fetch(FetchMode::Replace) {
                spawn_fetch(ticket, store, action_tx);
            }
        }
        Action::LoadMore => {
            if let Some(ticket) = app.list.begin_fetch(FetchMode::Append) {
                spawn_fetch(ticket, store, action_tx);
            }
        }
        Action::ApplyPage { ticket, result } => {
            app.list.apply_page(ticket, result);
        }
        Action::ConfirmDelete => {
            app.current_view = View::Main;
            if let Some(ctx) = app.delete_context.take() {
                spawn_delete(ctx, store, action_tx);
            }
        }
        Action::DeleteFinished { ctx, result } => {
            if app.list.finish_delete(&ctx.record_id, result) {
                app.set_status(
                    format!("Deleted {} ({})", ctx.display_label, ctx.display_date),
                    Instant::now(),
                );
            }
        }
    }
}

/// Run a page fetch off the event loop. The result comes back as
/// [`Action::ApplyPage`], where stale tickets are dropped.
fn spawn_fetch(ticket: FetchTicket, store: &Arc<dyn Backend>, action_tx: &ActionTx) {
    let store = Arc::clone(store);
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let result = store.get_records(&ticket.query, &ticket.options).await;
        let _ = action_tx.send(Action::ApplyPage { ticket, result });
    });
}

fn spawn_submit(pending: PendingSubmit, store: &Arc<dyn Backend>, action_tx: &ActionTx) {
    let store = Arc::clone(store);
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let result = store.post_record(pending.value, &pending.config).await;
        let _ = action_tx.send(Action::SubmitFinished {
            data: pending.data,
            result,
        });
    });
}

fn spawn_delete(ctx: DeleteContext, store: &Arc<dyn Backend>, action_tx: &ActionTx) {
    let store = Arc::clone(store);
    let action_tx = action_tx.clone();
    tokio::spawn(async move {
        let query = DeleteQuery {
            record_id: ctx.record_id.clone(),
        };
        let result = store.delete_records(&query).await;
        let _ = action_tx.send(Action::DeleteFinished { ctx, result });
    });
}

async fn handle_login_submit(app: &mut App, store: &dyn Backend) {
    let email = app.login.email_input.value.trim().to_string();
    let password = app.login.password_input.value.clone();
    if email.is_empty() || password.is_empty() {
        app.login.error = Some("Email and password are required".to_string());
        return;
    }

    app.login.error = None;
    // The session event moves the app to the main view.
    if let Err(e) = store.login(&email, &password).await {
        tracing::warn!(error = %e, "login failed");
        app.login.error = Some(e.to_string());
        app.login.password_input.clear();
    }
}
