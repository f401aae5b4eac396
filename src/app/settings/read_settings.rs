use std::path::Path;

use tracing::debug;

use super::config_dirs::settings_path;
use super::write_settings::Settings;
use crate::errors::SettingsError;

/// Load settings from the default location, falling back to defaults when
/// the file does not exist.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let path = settings_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, using defaults");
        return Ok(Settings::default());
    }
    load_settings_from(&path)
}

/// Load and validate settings from `path`.
pub fn load_settings_from(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = toml::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    settings.window.validate()?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::settings::save_settings_to;
    use crate::window::DebounceProfile;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "[window]\nwindow_item_count = 60\n\n[scroll]\nprofile = \"gecko\"\n",
        )
        .unwrap();
        let s = load_settings_from(&path).unwrap();
        assert_eq!(s.window.window_item_count, 60);
        assert_eq!(s.window.item_height, 36.0);
        assert_eq!(s.scroll.profile, DebounceProfile::Gecko);
        assert_eq!(s.ui.theme, "dark");
    }

    #[test]
    fn invalid_window_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[window]\nitem_height = 0.0\n").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(SettingsError::Config(_))
        ));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut s = Settings::default();
        s.scroll.profile = DebounceProfile::Custom(40);
        s.window.multi_select = true;
        s.ui.theme = "light".into();
        save_settings_to(&path, &s).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), s);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[window\n").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
