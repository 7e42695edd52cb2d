//! Settings file loading, both directly and through the plugin.
//!
//! Run: cargo test --test config_file

use std::io::Write;

use bevy::prelude::*;
use level_zones::{
  ConfigError, ConfigurationError, LevelZoneConfig, LevelZoneConfigPlugin, ViewportConfig,
};
use tempfile::NamedTempFile;

const CUSTOM: &str = r#"
[viewport]
aspect_ratio = [4, 3]
orthographic_size = 6.0

[camera]
default_speed = 12.5

[transition]
duration_secs = 0.25

[debug]
line_width = 2.0
draw_perimeters = false
"#;

fn write_config(text: &str) -> NamedTempFile {
  let mut file = NamedTempFile::new().unwrap();
  file.write_all(text.as_bytes()).unwrap();
  file
}

fn app_with_config(path: impl Into<std::path::PathBuf>) -> App {
  let mut app = App::new();
  app
    .add_plugins(MinimalPlugins)
    .add_plugins(LevelZoneConfigPlugin::new(path));
  app.update();
  app
}

#[test]
fn load_reads_every_section() {
  let file = write_config(CUSTOM);
  let config = LevelZoneConfig::load(file.path()).unwrap();

  assert_eq!(config.viewport.aspect_ratio, [4, 3]);
  assert_eq!(config.camera.default_speed, 12.5);
  assert_eq!(config.transition.duration_secs, 0.25);
  assert_eq!(config.debug.line_width, 2.0);
  assert!(!config.debug.draw_perimeters);
  // Omitted keys keep their defaults.
  assert!(config.debug.draw_zones);
}

#[test]
fn load_reports_missing_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("absent.config.toml");
  match LevelZoneConfig::load(&path) {
    Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
    other => panic!("expected an io error, got {other:?}"),
  }
}

#[test]
fn load_rejects_bad_values() {
  let file = write_config("[camera]\ndefault_speed = -1.0\n");
  assert!(matches!(
    LevelZoneConfig::load(file.path()),
    Err(ConfigError::Invalid(ConfigurationError::InvalidCameraSpeed(_)))
  ));

  let file = write_config("[camera\n");
  assert!(matches!(
    LevelZoneConfig::load(file.path()),
    Err(ConfigError::Parse(_))
  ));
}

#[test]
fn plugin_applies_file_at_startup() {
  let file = write_config(CUSTOM);
  let app = app_with_config(file.path());

  let config = app.world().resource::<LevelZoneConfig>();
  assert_eq!(config.camera.default_speed, 12.5);

  let viewport = app.world().resource::<ViewportConfig>();
  assert!((viewport.aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
  assert_eq!(viewport.orthographic_size, 6.0);
}

#[test]
fn plugin_falls_back_to_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let app = app_with_config(dir.path().join("missing.config.toml"));
  assert_eq!(
    *app.world().resource::<LevelZoneConfig>(),
    LevelZoneConfig::default()
  );
  assert_eq!(
    *app.world().resource::<ViewportConfig>(),
    ViewportConfig::default()
  );

  let file = write_config("[transition]\nduration_secs = -3.0\n");
  let app = app_with_config(file.path());
  assert_eq!(
    *app.world().resource::<LevelZoneConfig>(),
    LevelZoneConfig::default()
  );
}

#[test]
fn shipped_settings_file_is_valid() {
  let config = LevelZoneConfig::load(level_zones::config::DEFAULT_CONFIG_PATH).unwrap();
  assert_eq!(config, LevelZoneConfig::default());
}
