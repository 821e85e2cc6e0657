//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/mr-show/`
//! - macOS: `~/Library/Application Support/mr-show/`
//! - Windows: `%APPDATA%\mr-show\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "mr-show";

/// Get the application config directory
///
/// The directory is not created; mr-show only ever reads from it.
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to the global config file
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
