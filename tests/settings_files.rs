use assert_fs::prelude::*;
use vlist::app::settings::{load_settings_from, save_settings_to, Settings};
use vlist::errors::SettingsError;
use vlist::ui::themes::Theme;
use vlist::window::DebounceProfile;

#[test]
fn custom_profile_round_trips_through_toml() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("settings.toml");
    let mut s = Settings::default();
    s.scroll.profile = DebounceProfile::Custom(250);
    s.scroll.sentinel_margin = 18.0;
    s.window.window_item_count = 90;
    save_settings_to(file.path(), &s).unwrap();

    file.assert(predicates::str::contains("window_item_count = 90"));
    let loaded = load_settings_from(file.path()).unwrap();
    assert_eq!(loaded.scroll.profile.interval().as_millis(), 250);
    assert_eq!(loaded.window.window_item_count, 90);
    assert_eq!(loaded.window_config().unwrap().quarter(), 22.5);
}

#[test]
fn zero_window_is_rejected_at_load() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("settings.toml");
    file.write_str("[window]\nwindow_item_count = 0\n").unwrap();
    assert!(matches!(
        load_settings_from(file.path()),
        Err(SettingsError::Config(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let err = load_settings_from(dir.child("nope.toml").path()).unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn theme_file_overrides_palette() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("solarized.toml");
    file.write_str(
        "[palette]\nbg = \"#002b36\"\nfg = \"#839496\"\naccent = \"#b58900\"\nmuted = \"#586e75\"\n",
    )
    .unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    let t = Theme::from_toml(&text).unwrap();
    assert_ne!(t.accent, Theme::dark().accent);
    assert_eq!(t.muted, ratatui::style::Color::Rgb(0x58, 0x6e, 0x75));
}
