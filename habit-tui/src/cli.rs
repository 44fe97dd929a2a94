use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "habit-tui")]
#[command(about = "Terminal UI for tracking habits and activities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the record service
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Sign in with email and password and save the session
    Login,
    /// Sign out and remove the local session
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
