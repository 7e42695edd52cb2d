//! Level zones - camera scroll zones for 2D Bevy games.
//!
//! The world is split into axis-aligned zones. Each zone tells the camera
//! which axes to follow while an actor is inside it, and zones nest into a
//! tree whose combined camera footprint can be traced for debug drawing.
//!
//! The geometry and director modules have no ECS dependency; the plugin wires
//! them into fixed-tick systems.

use bevy::prelude::*;

pub mod bounds;
pub mod components;
pub mod config;
pub mod director;
pub mod error;
pub mod messages;
pub mod perimeter;
pub mod snapping;
pub mod systems;
pub mod transition;
#[cfg(feature = "visual_debug")]
pub mod visual_debug;
pub mod zone;

pub use bounds::ZoneRect;
pub use components::{ActorVelocity, LevelZoneNode, ZoneActor, ZoneCamera};
pub use config::{LevelZoneConfig, LevelZoneConfigPlugin, ViewportConfig};
pub use director::{ActorState, TickOutcome};
pub use error::{ConfigError, ConfigurationError, ZoneGraphError};
pub use messages::{ActiveZoneChanged, ZoneExitReached, ZoneOverlap};
pub use perimeter::Perimeter;
pub use snapping::{Edge, MovementAxes, round_to_nearest_edge, valid_movement_axes};
pub use systems::ZonePerimeters;
pub use transition::{MarkerAction, Transition};
#[cfg(feature = "visual_debug")]
pub use visual_debug::LevelZoneDebugPlugin;
pub use zone::{
  Entrance, EntranceStyle, Exit, NodeId, NodeKind, Placement, ScrollMode, Zone, ZoneGraph,
};

/// Fixed-tick phases, run in declaration order.
///
/// Hosts that report overlaps themselves (for example from physics sensors)
/// should write [`ZoneOverlap`] in [`LevelZoneSet::Overlaps`].
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelZoneSet {
  /// Entity transforms are copied into the graph.
  Sync,
  /// Actor/node overlaps are reported.
  Overlaps,
  /// Entrances and exits fire.
  Markers,
  /// Entrance teleports advance.
  Transitions,
  /// Cameras move.
  Director,
}

/// Plugin for zone-driven cameras.
///
/// Insert nodes into the [`ZoneGraph`] resource, link entities to them with
/// [`LevelZoneNode`], and give actors a [`ZoneActor`] pointing at a camera
/// marked [`ZoneCamera`].
pub struct LevelZonePlugin {
  /// Report overlaps from actor rectangles. Disable when the host writes
  /// [`ZoneOverlap`] itself.
  pub builtin_overlaps: bool,
  /// Keep nested zones and markers flush against their owner's camera
  /// bounds whenever the graph changes.
  pub snap_placement: bool,
}

impl Default for LevelZonePlugin {
  fn default() -> Self {
    Self {
      builtin_overlaps: true,
      snap_placement: false,
    }
  }
}

impl LevelZonePlugin {
  pub fn without_builtin_overlaps(mut self) -> Self {
    self.builtin_overlaps = false;
    self
  }

  pub fn with_snap_placement(mut self) -> Self {
    self.snap_placement = true;
    self
  }
}

impl Plugin for LevelZonePlugin {
  fn build(&self, app: &mut App) {
    // Users can add the config plugin first to point at another file
    if !app.is_plugin_added::<LevelZoneConfigPlugin>() {
      app.add_plugins(LevelZoneConfigPlugin::default());
    }

    app
      .init_resource::<ZoneGraph>()
      .init_resource::<ZonePerimeters>()
      .add_message::<ZoneOverlap>()
      .add_message::<ZoneExitReached>()
      .add_message::<ActiveZoneChanged>()
      .configure_sets(
        FixedUpdate,
        (
          LevelZoneSet::Sync,
          LevelZoneSet::Overlaps,
          LevelZoneSet::Markers,
          LevelZoneSet::Transitions,
          LevelZoneSet::Director,
        )
          .chain(),
      )
      .add_systems(
        FixedUpdate,
        (
          systems::sync_node_positions.in_set(LevelZoneSet::Sync),
          systems::handle_marker_contacts.in_set(LevelZoneSet::Markers),
          systems::advance_transitions.in_set(LevelZoneSet::Transitions),
          systems::direct_cameras.in_set(LevelZoneSet::Director),
        ),
      )
      .add_systems(PostUpdate, systems::sync_viewport_from_camera)
      .add_systems(Update, systems::refresh_zone_perimeters);

    if self.builtin_overlaps {
      app.add_systems(
        FixedUpdate,
        systems::detect_zone_overlaps.in_set(LevelZoneSet::Overlaps),
      );
    }

    if self.snap_placement {
      app.add_systems(
        Update,
        systems::snap_placed_nodes.before(systems::refresh_zone_perimeters),
      );
    }

    #[cfg(feature = "visual_debug")]
    if app.is_plugin_added::<bevy::render::RenderPlugin>() {
      app.add_plugins(LevelZoneDebugPlugin);
    }
  }
}
