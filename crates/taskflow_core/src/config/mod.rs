//! Optional JSON configuration for the desktop tool.
//!
//! Everything has a default; the file only exists to override the store
//! location and the CLI palette. A missing file is normal, a corrupt file
//! falls back to defaults with the error surfaced.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "taskflow.json";
const CONFIG_ENV_VAR: &str = "TASKFLOW_CONFIG_PATH";

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the default `tasks.json` store location.
    #[serde(default)]
    pub data_file: Option<String>,
    /// CLI palette name; `plain` (default) or `noir`.
    #[serde(default)]
    pub theme: Option<String>,
}

/// Config plus the load error, when the file existed but was unusable.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

/// ANSI styling for the CLI. Empty codes mean no styling.
#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    match theme.map(|name| name.trim().to_ascii_lowercase()) {
        Some(name) if name == "noir" || name == "dark" => Palette {
            accent: "\x1b[38;5;208m",
            muted: "\x1b[38;5;245m",
            reset: "\x1b[0m",
        },
        _ => Palette {
            accent: "",
            muted: "",
            reset: "",
        },
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_config_with_fallback() -> ConfigLoad {
    load_config_with_fallback_from_path(&config_path())
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })
}
