//! Configuration for mr-show
//!
//! This crate provides:
//! - Config directory lookup
//! - Configuration file discovery (TOML)
//! - Render configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, ViewMode};
pub use config_file::{find_config_file, load_config_file, CONFIG_FILE};
