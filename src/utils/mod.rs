pub mod task_tracker;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory holding the optional `config.json`.
///
/// `NAVIGATOR_HOME` wins over `~/.navigator`.
pub fn get_navigator_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("NAVIGATOR_HOME") {
        return Ok(PathBuf::from(home));
    }
    Ok(dirs::home_dir()
        .context("Could not determine home directory")?
        .join(".navigator"))
}

/// Local wall-clock time as rendered in status blocks and Resonance Logs.
pub fn format_timestamp(now: &chrono::DateTime<chrono::Local>) -> String {
    now.format("%Y-%m-%d %H:%M:%S").to_string()
}
