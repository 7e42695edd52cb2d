use std::path::PathBuf;

#[cfg(not(target_family = "wasm"))]
use bevy::{asset::AssetEvent, ecs::message::MessageReader};
use bevy::prelude::*;
#[cfg(not(target_family = "wasm"))]
use bevy_common_assets::toml::TomlAssetPlugin;

use super::{DEFAULT_CONFIG_PATH, LevelZoneConfig, ViewportConfig};

/// Loads [`LevelZoneConfig`] at startup and, on native targets, hot-reloads
/// it when the file changes under the asset server.
pub struct LevelZoneConfigPlugin {
  /// Settings file, relative to the working directory.
  pub path: PathBuf,
}

impl Default for LevelZoneConfigPlugin {
  fn default() -> Self {
    Self {
      path: PathBuf::from(DEFAULT_CONFIG_PATH),
    }
  }
}

impl LevelZoneConfigPlugin {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Path of the settings file inside the `assets` folder, if it lives there.
  fn asset_path(&self) -> Option<String> {
    self
      .path
      .strip_prefix("assets")
      .ok()
      .map(|p| p.to_string_lossy().replace('\\', "/"))
  }
}

#[derive(Resource, Clone, Debug)]
struct ConfigSource {
  path: PathBuf,
  asset_path: Option<String>,
}

#[derive(Resource)]
pub struct ConfigHandle(pub Handle<LevelZoneConfig>);

impl Plugin for LevelZoneConfigPlugin {
  fn build(&self, app: &mut App) {
    // Native: asset-based config with hot-reload, when an asset server exists
    #[cfg(not(target_family = "wasm"))]
    if app.is_plugin_added::<AssetPlugin>() {
      app
        .add_plugins(TomlAssetPlugin::<LevelZoneConfig>::new(&["config.toml"]))
        .add_systems(Update, watch_config_changes);
    }

    app
      .insert_resource(ConfigSource {
        path: self.path.clone(),
        asset_path: self.asset_path(),
      })
      .init_resource::<LevelZoneConfig>()
      .init_resource::<ViewportConfig>()
      .add_systems(PreStartup, load_config_sync);
  }
}

fn load_config_sync(
  mut commands: Commands,
  source: Res<ConfigSource>,
  asset_server: Option<Res<AssetServer>>,
) {
  #[cfg(not(target_family = "wasm"))]
  if let (Some(asset_server), Some(asset_path)) = (asset_server, source.asset_path.as_ref()) {
    let handle: Handle<LevelZoneConfig> = asset_server.load(asset_path.clone());
    commands.insert_resource(ConfigHandle(handle));
  }
  #[cfg(target_family = "wasm")]
  let _ = asset_server;

  // WASM: embed config at compile time
  #[cfg(target_family = "wasm")]
  let loaded = LevelZoneConfig::from_toml_str(include_str!(
    "../../assets/config/level_zones.config.toml"
  ));
  #[cfg(not(target_family = "wasm"))]
  let loaded = LevelZoneConfig::load(&source.path);

  let config = match loaded {
    Ok(config) => {
      info!("Loaded level zone settings from {}", source.path.display());
      config
    }
    Err(e) => {
      warn!("{e}; using default level zone settings");
      LevelZoneConfig::default()
    }
  };

  commands.insert_resource(config.viewport());
  commands.insert_resource(config);
}

#[cfg(not(target_family = "wasm"))]
fn watch_config_changes(
  mut commands: Commands,
  config_handle: Option<Res<ConfigHandle>>,
  mut messages: MessageReader<AssetEvent<LevelZoneConfig>>,
  configs: Res<Assets<LevelZoneConfig>>,
) {
  let Some(config_handle) = config_handle else {
    return;
  };
  for event in messages.read() {
    if let AssetEvent::Modified { id } = event
      && config_handle.0.id() == *id
      && let Some(config) = configs.get(&config_handle.0)
    {
      match config.validate() {
        Ok(()) => {
          info!("Level zone settings reloaded");
          commands.insert_resource(config.clone());
        }
        Err(e) => warn!("Ignoring reloaded level zone settings: {e}"),
      }
    }
  }
}
