use std::path::Path;

use anyhow::Result;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "habit_tui=info,skapi=info";

/// Log to a daily rolling file under `root/logs`. The terminal belongs to the
/// UI, so nothing is written to stdout.
pub fn enable_logging(root: &Path) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix("habit-tui")
        .filename_suffix("log")
        .build(root.join("logs"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;
    Ok(())
}
