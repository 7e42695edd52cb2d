mod plugin;

use std::path::Path;

use bevy::{asset::Asset, prelude::*, reflect::TypePath};
pub use plugin::{ConfigHandle, LevelZoneConfigPlugin};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigurationError};

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/level_zones.config.toml";

/// Settings file contents. Missing sections and keys take their defaults.
#[derive(Asset, TypePath, Resource, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct LevelZoneConfig {
  pub viewport: ViewportSettings,
  pub camera: CameraSettings,
  pub transition: TransitionSettings,
  pub debug: DebugSettings,
}

/// Fallback viewport, used while no zone camera projection is available.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ViewportSettings {
  pub aspect_ratio: [u32; 2],
  pub orthographic_size: f32,
}

impl Default for ViewportSettings {
  fn default() -> Self {
    Self {
      aspect_ratio: [16, 9],
      orthographic_size: 8.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
  /// Lerp rate for actors that do not set their own.
  pub default_speed: f32,
}

impl Default for CameraSettings {
  fn default() -> Self {
    Self {
      default_speed: 45.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct TransitionSettings {
  /// Entrance teleport duration. Zero jumps in a single tick.
  pub duration_secs: f32,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DebugSettings {
  pub line_width: f32,
  pub draw_zones: bool,
  pub draw_camera_bounds: bool,
  pub draw_perimeters: bool,
}

impl Default for DebugSettings {
  fn default() -> Self {
    Self {
      line_width: 8.0,
      draw_zones: true,
      draw_camera_bounds: true,
      draw_perimeters: true,
    }
  }
}

impl LevelZoneConfig {
  /// Parses and validates settings from TOML text.
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads and parses a settings file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&text)
  }

  pub fn validate(&self) -> Result<(), ConfigurationError> {
    crate::director::validate_camera_speed(self.camera.default_speed)?;
    let duration = self.transition.duration_secs;
    if !duration.is_finite() || duration < 0.0 {
      return Err(ConfigurationError::InvalidDuration(duration));
    }
    Ok(())
  }

  /// Viewport implied by the fallback settings.
  pub fn viewport(&self) -> ViewportConfig {
    let [w, h] = self.viewport.aspect_ratio;
    let fallback = ViewportConfig::default();
    let aspect_ratio = if w > 0 && h > 0 {
      w as f32 / h as f32
    } else {
      fallback.aspect_ratio
    };
    let orthographic_size = if self.viewport.orthographic_size > 0.0 {
      self.viewport.orthographic_size
    } else {
      fallback.orthographic_size
    };
    ViewportConfig {
      aspect_ratio,
      orthographic_size,
    }
  }
}

/// Live viewport parameters feeding every camera-bounds computation.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ViewportConfig {
  /// Width over height.
  pub aspect_ratio: f32,
  /// Half of the visible world height.
  pub orthographic_size: f32,
}

impl Default for ViewportConfig {
  fn default() -> Self {
    Self {
      aspect_ratio: 16.0 / 9.0,
      orthographic_size: 8.0,
    }
  }
}

impl ViewportConfig {
  pub fn new(aspect_ratio: f32, orthographic_size: f32) -> Self {
    Self {
      aspect_ratio,
      orthographic_size,
    }
  }

  /// Half of the area a camera sees.
  #[inline]
  pub fn camera_half_extents(&self) -> Vec2 {
    Vec2::new(
      self.orthographic_size * self.aspect_ratio,
      self.orthographic_size,
    )
  }
}
