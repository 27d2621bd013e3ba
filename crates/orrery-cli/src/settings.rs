//! Render settings persistence
//!
//! Settings are stored as JSON in `{config_dir}/orrery/settings.json`, or in
//! any file passed with `--config`.

use anyhow::{Context, Result, bail};
use orrery_render::RenderSettings;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the path to the default settings file
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("orrery").join("settings.json"))
}

/// Read settings from `path`. Missing fields take their defaults.
pub fn load_from(path: &Path) -> Result<RenderSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: RenderSettings = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid settings file {}", path.display()))?;
    settings
        .validate()
        .with_context(|| format!("Invalid settings file {}", path.display()))?;
    Ok(settings)
}

/// Resolve the settings for this run.
///
/// An explicit file must load. The default file is optional, and a broken one
/// is reported and replaced by defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<RenderSettings> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "Loading settings");
        return load_from(path);
    }

    let Some(path) = settings_path() else {
        return Ok(RenderSettings::default());
    };

    if !path.exists() {
        return Ok(RenderSettings::default());
    }

    match load_from(&path) {
        Ok(settings) => {
            tracing::debug!(path = %path.display(), "Loaded settings");
            Ok(settings)
        }
        Err(e) => {
            tracing::warn!("{e:#}; using default settings");
            Ok(RenderSettings::default())
        }
    }
}

/// Write `settings` to `path`, creating parent directories
pub fn save_settings(settings: &RenderSettings, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, json).context("Failed to write settings file")
}

/// Default settings file, or an error if the platform has no config directory
pub fn default_path() -> Result<PathBuf> {
    let Some(path) = settings_path() else {
        bail!("Could not determine config directory");
    };
    Ok(path)
}
