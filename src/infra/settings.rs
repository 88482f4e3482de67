// ============================================================
// Layer 6 — Settings Store
// ============================================================
// Saves and restores the full run configuration as JSON so a
// tuned setup (endpoints, chunk sizes, length bands) can be
// reused without repeating every flag.
//
// File layout:
//   {
//     "chat":  { "summary_chunk_chars": 800, ... },
//     "model": { "qa_url": "...", "timeout_secs": 60, ... }
//   }
//
// Missing fields fall back to their defaults, so a settings
// file only needs the values that differ.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::application::chat_use_case::ChatConfig;
use crate::ml::client::ModelConfig;

/// Everything a run can be configured with
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub chat:  ChatConfig,
    pub model: ModelConfig,
}

impl AppSettings {
    /// Check every section, whichever source its values came from.
    pub fn validate(&self) -> Result<()> {
        self.chat.validate().context("Invalid chat settings")?;
        self.model.validate().context("Invalid model settings")?;
        Ok(())
    }
}

/// Reads and writes AppSettings at a fixed path.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load settings from JSON.
    pub fn load(&self) -> Result<AppSettings> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!("Cannot read settings from '{}'", self.path.display())
        })?;

        let settings = serde_json::from_str(&json).with_context(|| {
            format!("Invalid settings file '{}'", self.path.display())
        })?;

        tracing::debug!("Loaded settings from '{}'", self.path.display());
        Ok(settings)
    }

    /// Save settings as pretty-printed JSON.
    /// The API token is never written to disk.
    pub fn save(&self, settings: &AppSettings) -> Result<()> {
        let mut settings = settings.clone();
        settings.model.api_token = None;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(&settings)?;
        fs::write(&self.path, json).with_context(|| {
            format!("Cannot write settings to '{}'", self.path.display())
        })?;

        tracing::info!("Saved settings to '{}'", self.path.display());
        Ok(())
    }
}
