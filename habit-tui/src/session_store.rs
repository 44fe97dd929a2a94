use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::config::root_path;

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn session_path() -> Result<PathBuf> {
    Ok(root_path()?.join("session"))
}

/// The saved session token, if any.
pub fn load_session() -> Result<Option<String>> {
    read_token(&session_path()?)
}

pub fn save_session(token: &str) -> Result<()> {
    secure_write(&session_path()?, token)
}

pub fn clear_session() -> Result<()> {
    remove_token(&session_path()?)
}

fn read_token(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let token = std::fs::read_to_string(path).context("Failed to read session file")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token))
}

fn remove_token(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("habit-tui-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn token_round_trips_through_file() {
        let path = temp_path("session-roundtrip");
        secure_write(&path, "tok-123\n").unwrap();
        assert_eq!(read_token(&path).unwrap().as_deref(), Some("tok-123"));

        remove_token(&path).unwrap();
        assert_eq!(read_token(&path).unwrap(), None);
        // Removing twice is fine.
        remove_token(&path).unwrap();
    }

    #[test]
    fn blank_file_means_no_session() {
        let path = temp_path("session-blank");
        secure_write(&path, "  \n").unwrap();
        assert_eq!(read_token(&path).unwrap(), None);
        remove_token(&path).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_path("session-mode");
        secure_write(&path, "tok").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        remove_token(&path).unwrap();
    }
}
