use anyhow::{Context, Result};
use skapi::{SessionProvider, SkapiClient};
use std::io::{self, BufRead, Write};

use crate::config::HabitConfig;
use crate::session_store;

/// Prompt for credentials, sign in and save the session token.
pub async fn run_login(client: &SkapiClient, config: &mut HabitConfig) -> Result<()> {
    let email = prompt_email(config.last_email.as_deref())?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let profile = client
        .login(&email, &password)
        .await
        .context("Login failed")?;
    let token = client
        .session_token()
        .context("Service did not return a session token")?;
    session_store::save_session(&token)?;

    config.last_email = Some(email);
    if let Err(e) = config.save() {
        tracing::warn!(error = %e, "could not remember login email");
    }

    println!("Logged in as {}. Session saved.", profile.display_name());
    Ok(())
}

fn prompt_email(default: Option<&str>) -> Result<String> {
    match default {
        Some(default) => print!("Email [{}]: ", default),
        None => print!("Email: "),
    }
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read email")?;

    let email = line.trim();
    match (email.is_empty(), default) {
        (false, _) => Ok(email.to_string()),
        (true, Some(default)) => Ok(default.to_string()),
        (true, None) => anyhow::bail!("Email is required"),
    }
}
