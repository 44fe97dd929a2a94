mod activity;
mod api;
mod app;
mod cli;
mod config;
mod format;
mod logging;
mod login;
mod runtime;
mod session_store;
#[cfg(test)]
mod testing;
mod time_utils;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use config::{HabitConfig, ServiceConfig};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use skapi::{Backend, SessionProvider, SkapiClient};
use std::io;
use std::sync::Arc;
use time_utils::LocalZone;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let mut cfg = HabitConfig::load()?;

    match cli.command {
        cli::Commands::ConfigPath => {
            let path = HabitConfig::config_path()?;
            if !path.exists() {
                cfg.save()?;
                println!("Created default config at {}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
        cli::Commands::Login => {
            let client = connect(&cfg, None)?;
            login::run_login(&client, &mut cfg).await?;
        }
        cli::Commands::Logout => {
            if let Some(token) = session_store::load_session()? {
                match connect(&cfg, Some(token)) {
                    Ok(client) => {
                        if let Err(e) = client.logout().await {
                            eprintln!("Warning: could not end the remote session: {}", e);
                        }
                    }
                    Err(e) => eprintln!("Warning: {}", e),
                }
            }
            session_store::clear_session()?;
            println!("Logged out. Local session removed.");
        }
        cli::Commands::Run => {
            let token = session_store::load_session()?;
            let client = Arc::new(connect(&cfg, token)?);
            logging::enable_logging(&config::root_path()?)?;
            tracing::info!(api_url = %cfg.api_url, "starting");

            let store: Arc<dyn Backend> = client.clone();
            run_tui(store, &cfg).await?;

            // Persist whatever session the UI ended with.
            match client.session_token() {
                Some(token) => session_store::save_session(&token)?,
                None => session_store::clear_session()?,
            }
        }
        cli::Commands::Dev => {
            logging::enable_logging(&config::root_path()?)?;
            let dev = ServiceConfig::dev();
            tracing::info!(service_id = %dev.service_id, "starting in dev mode");

            let store: Arc<dyn Backend> = Arc::new(api::dev_store(LocalZone::System));
            let dev_cfg = HabitConfig {
                last_email: Some(api::DEV_EMAIL.to_string()),
                ..cfg
            };
            run_tui(store, &dev_cfg).await?;
        }
    }

    Ok(())
}

fn connect(cfg: &HabitConfig, token: Option<String>) -> Result<SkapiClient> {
    let service = ServiceConfig::from_env().context("Cannot reach the record service")?;
    Ok(SkapiClient::new(&cfg.api_url, &service.service_id, token))
}

async fn run_tui(store: Arc<dyn Backend>, cfg: &HabitConfig) -> Result<()> {
    let mut app = App::new(
        LocalZone::System,
        cfg.last_email.as_deref().unwrap_or_default(),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = runtime::run_app(&mut terminal, &mut app, store).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "event loop failed");
    }
    res
}
