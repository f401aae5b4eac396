use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::config_dirs::{ensure_dirs_exist, settings_path};
use crate::errors::{ConfigError, SettingsError};
use crate::window::{DebounceProfile, WindowConfig};

/// Scroll event handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    /// Debounce interval preset (`gecko`, `standard`, or `{ custom = ms }`).
    pub profile: DebounceProfile,
    /// Pixels within which a boundary row counts as having entered the viewport.
    pub sentinel_margin: f64,
    /// Rows moved per mouse wheel notch.
    pub wheel_rows: usize,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        ScrollSettings {
            profile: DebounceProfile::Standard,
            sentinel_margin: 0.0,
            wheel_rows: 3,
        }
    }
}

/// Terminal host appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub theme: String,
    pub mouse_enabled: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            theme: "dark".to_string(),
            mouse_enabled: true,
        }
    }
}

/// Everything persisted in `settings.toml`. Missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowConfig,
    pub scroll: ScrollSettings,
    pub ui: UiSettings,
}

impl Settings {
    /// The window configuration, validated.
    pub fn window_config(&self) -> Result<WindowConfig, ConfigError> {
        self.window.validate()?;
        Ok(self.window.clone())
    }
}

/// Persist settings to the default location.
pub fn save_settings(settings: &Settings) -> Result<(), SettingsError> {
    ensure_dirs_exist()?;
    save_settings_to(settings_path()?, settings)
}

/// Persist settings to `path`.
pub fn save_settings_to(path: impl AsRef<Path>, settings: &Settings) -> Result<(), SettingsError> {
    let path = path.as_ref();
    let text = toml::to_string_pretty(settings)?;
    std::fs::write(path, text).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "settings saved");
    Ok(())
}
