use std::path::PathBuf;

use directories_next::ProjectDirs;

use crate::errors::SettingsError;

const SETTINGS_FILE: &str = "settings.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "vlist")
}

/// Per-user configuration directory (`~/.config/vlist` on Linux).
pub fn project_config_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Per-user cache directory; log files go here.
pub fn user_cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// Location of the default settings file.
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    project_config_dir()
        .map(|d| d.join(SETTINGS_FILE))
        .ok_or(SettingsError::NoConfigDir)
}

/// Create the config and cache directories if they are missing.
pub fn ensure_dirs_exist() -> Result<(), SettingsError> {
    for dir in [project_config_dir(), user_cache_dir()].into_iter().flatten() {
        std::fs::create_dir_all(&dir).map_err(|source| SettingsError::Io {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(())
}
