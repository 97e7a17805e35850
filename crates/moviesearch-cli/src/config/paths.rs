//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Config file name inside the app directory.
const CONFIG_FILE: &str = "config.toml";

/// Log file name used by the interactive browser.
const LOG_FILE: &str = "moviesearch.log";

/// Resolves the app directory.
///
/// - If `dir` is `Some`, returns it unchanged.
/// - Otherwise returns `~/.config/moviesearch`.
fn resolve_app_dir(dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.to_path_buf());
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home).join(".config").join("moviesearch"))
}

/// Resolves the config file path (`{dir}/config.toml`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_app_dir(dir)?.join(CONFIG_FILE))
}

/// Resolves the log file path (`{dir}/moviesearch.log`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_log_path(dir: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_app_dir(dir)?.join(LOG_FILE))
}
