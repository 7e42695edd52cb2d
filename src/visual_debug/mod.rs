//! Gizmo drawing for zones, markers and traced camera footprints.
//!
//! Added by [`crate::LevelZonePlugin`] when rendering is available. Toggles
//! and line width come from the `[debug]` section of the settings file.

mod systems;

use bevy::prelude::*;

/// Palette for non-zone debug shapes.
pub(crate) mod colors {
  use bevy::prelude::Color;

  /// Marker outline when the owner has no color.
  pub const GREY: Color = Color::srgba(0.5, 0.5, 0.5, 0.4);

  /// Traced union outline, gold #FFD700.
  pub const PERIMETER: Color = Color::srgb(1.0, 0.843, 0.0);
}

/// Plugin that draws level zone gizmos.
pub struct LevelZoneDebugPlugin;

impl Plugin for LevelZoneDebugPlugin {
  fn build(&self, app: &mut App) {
    app.add_systems(
      Update,
      (
        systems::apply_line_width,
        (
          systems::draw_zones,
          systems::draw_markers,
          systems::draw_perimeters,
        )
          .after(crate::systems::refresh_zone_perimeters),
      ),
    );
  }
}
