//! Application configuration
//!
//! Configuration loaded from .mr-show.toml file.

use anyhow::{Context, Result};
use mr_diff_render::render::{
    DEFAULT_EXCERPT_CONTEXT, DEFAULT_GUTTER_WIDTH, DEFAULT_TIMESTAMP_FORMAT,
};
use mr_diff_render::{DiffView, RenderOptions, ThreadOrder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from .mr-show.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Width of each line-number column
    #[serde(default = "default_gutter_width")]
    pub gutter_width: usize,

    /// chrono format string for comment timestamps
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Which thread of a context line comes first: "old-first" or "new-first"
    #[serde(default)]
    pub thread_order: ThreadOrder,

    /// Print the author on "commented at" lines
    #[serde(default)]
    pub show_author: bool,

    /// "full" or "excerpts"
    #[serde(default)]
    pub view: ViewMode,

    /// Rows shown before each commented line in excerpt view
    #[serde(default = "default_excerpt_context")]
    pub excerpt_context: usize,
}

/// How much of the diff is printed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    Full,
    Excerpts,
}

fn default_gutter_width() -> usize {
    DEFAULT_GUTTER_WIDTH
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_excerpt_context() -> usize {
    DEFAULT_EXCERPT_CONTEXT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gutter_width: default_gutter_width(),
            timestamp_format: default_timestamp_format(),
            thread_order: ThreadOrder::default(),
            show_author: false,
            view: ViewMode::default(),
            excerpt_context: default_excerpt_context(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then the config directory, or use defaults
    pub fn load() -> Self {
        if let Some((path, content)) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {}: {}", path.display(), e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicitly named file
    ///
    /// Unlike [`AppConfig::load`], a missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("Loaded app config from {}", path.display());
        Ok(config)
    }

    /// Render options described by this config
    pub fn render_options(&self) -> RenderOptions {
        let view = match self.view {
            ViewMode::Full => DiffView::Full,
            ViewMode::Excerpts => DiffView::Excerpts {
                context: self.excerpt_context,
            },
        };

        RenderOptions {
            gutter_width: self.gutter_width,
            timestamp_format: self.timestamp_format.clone(),
            thread_order: self.thread_order,
            show_author: self.show_author,
            view,
        }
    }
}
