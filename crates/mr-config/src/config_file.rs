use std::path::{Path, PathBuf};

/// Name of the per-project config file
pub const CONFIG_FILE: &str = ".mr-show.toml";

/// Find the config file to use, looking in `cwd` first
///
/// Searches for:
/// 1. `.mr-show.toml` in `cwd`
/// 2. `config.toml` in the mr-show config directory
pub fn find_config_file(cwd: &Path) -> Option<PathBuf> {
    let local = cwd.join(CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    crate::paths::app_config_path()
        .ok()
        .filter(|path| path.is_file())
}

/// Load config file content from the current directory first, then the
/// config directory
///
/// Returns the path and content if found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    let cwd = std::env::current_dir().ok()?;
    let path = find_config_file(&cwd)?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            log::debug!("Loaded config from {}", path.display());
            Some((path, content))
        }
        Err(e) => {
            log::warn!("Failed to read config file {}: {}", path.display(), e);
            None
        }
    }
}
