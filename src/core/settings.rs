use crate::shared::paths::{ensure_dir, get_settings_path};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Language used for weekday labels and generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiSettings {
    pub model: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AiSettings {
    /// Caller-side deadline for one generation request (at least one second).
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub locale: Locale,
    pub ai: AiSettings,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Loads settings from `{storage_dir}/settings.json`, using defaults when the
/// file is missing or invalid.
pub fn load_settings(storage_dir: &Path) -> AppSettings {
    let path = get_settings_path(storage_dir);

    if !path.exists() {
        return AppSettings::default();
    }

    match load_settings_from_file(&path) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(target: "system", "Ignoring invalid settings file {:?}: {}", path, e);
            AppSettings::default()
        }
    }
}

/// Like [`load_settings`], but writes the defaults on first run so the file
/// can be edited by hand.
pub fn load_or_init_settings(storage_dir: &Path) -> AppSettings {
    let settings = load_settings(storage_dir);

    if !get_settings_path(storage_dir).exists() {
        match save_settings(storage_dir, &settings) {
            Ok(()) => tracing::info!(target: "system", "Wrote default settings to {:?}", storage_dir),
            Err(e) => tracing::warn!(target: "system", "Failed to write default settings: {}", e),
        }
    }

    settings
}

fn load_settings_from_file(path: &Path) -> Result<AppSettings, SettingsError> {
    let contents = std::fs::read_to_string(path)?;
    let settings = serde_json::from_str(&contents)?;
    Ok(settings)
}

pub fn save_settings(storage_dir: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    ensure_dir(storage_dir)?;

    let path = get_settings_path(storage_dir);
    let contents = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, contents)?;
    Ok(())
}
