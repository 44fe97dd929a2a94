use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use skapi::{Backend, SessionProvider};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::action_queue::{channel, Action};
use super::actions::run_action;
use super::views::handle_view_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: Arc<dyn Backend>,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let mut session_rx = store.subscribe();
    let _ = action_tx.send(Action::CheckSession);

    loop {
        terminal.draw(|f| ui::render(f, app))?;
        app.tick(Instant::now());

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(event) = session_rx.try_recv() {
            app.handle_session_event(event);
        }

        // Refetch page 1 on first sight and whenever the filter or the
        // refresh trigger moves.
        if app.controller.is_authenticated() && app.list.observe(app.controller.refresh_trigger())
        {
            let _ = action_tx.send(Action::RefreshList);
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, &store, &action_tx).await;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
