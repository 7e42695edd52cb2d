//! Entrance and exit marker behavior.
//!
//! Crossing an entrance moves the camera and/or the actor into the owning
//! zone; crossing an exit asks the host to load another scene. Teleports
//! play out over [`Transition`], advanced once per tick.

use bevy::math::Vec2;

use crate::config::ViewportConfig;
use crate::zone::{Entrance, NodeKind, Placement, ScrollMode, Zone};

/// An in-flight move from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
  pub in_progress: bool,
  pub start: Vec2,
  pub end: Vec2,
  pub elapsed: f32,
  pub duration: f32,
}

impl Transition {
  pub fn new(start: Vec2, end: Vec2, duration: f32) -> Self {
    Self {
      in_progress: true,
      start,
      end,
      elapsed: 0.0,
      duration: duration.max(0.0),
    }
  }

  /// Steps the transition and returns the position for this tick.
  ///
  /// A zero duration lands on `end` at the first step.
  pub fn advance(&mut self, dt: f32) -> Vec2 {
    if !self.in_progress {
      return self.end;
    }
    self.elapsed += dt.max(0.0);
    if self.duration <= 0.0 || self.elapsed >= self.duration {
      self.in_progress = false;
      self.elapsed = self.duration;
      return self.end;
    }
    self.start.lerp(self.end, self.elapsed / self.duration)
  }
}

/// Where crossing `entrance` puts the camera (and actor) inside `owner`.
pub fn entrance_end_position(entrance: &Entrance, owner: &Zone, viewport: &ViewportConfig) -> Vec2 {
  if owner.scroll_mode == ScrollMode::Fixed {
    return owner.camera_bounds(viewport).center;
  }
  let bounds = owner.local_bounds();
  if entrance.to_edge_center || owner.force_edge_center_transitions {
    bounds.nearest_edge_center(entrance.position, owner.scroll_mode)
  } else {
    bounds.clamp_point(entrance.position)
  }
}

/// Point a marker leads to, for debug lines.
pub fn marker_transition_point(marker: &NodeKind, owner: &Zone, viewport: &ViewportConfig) -> Option<Vec2> {
  match marker {
    NodeKind::Entrance(entrance) => Some(entrance_end_position(entrance, owner, viewport)),
    NodeKind::Exit(exit) => Some(owner.local_bounds().clamp_point(exit.position)),
    NodeKind::Zone(_) => None,
  }
}

/// True when `velocity` heads toward `zone_position`. Actors without a
/// velocity always pass.
pub fn is_entering(velocity: Option<Vec2>, actor: Vec2, zone_position: Vec2) -> bool {
  velocity.is_none_or(|v| v.dot(zone_position - actor) > 0.0)
}

/// True when `velocity` heads away from `zone_position`. Actors without a
/// velocity always pass.
pub fn is_leaving(velocity: Option<Vec2>, actor: Vec2, zone_position: Vec2) -> bool {
  velocity.is_none_or(|v| v.dot(actor - zone_position) > 0.0)
}

/// What the host should do after an actor touched a marker.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerAction {
  /// Move the camera and/or actor to `end`.
  Teleport {
    end: Vec2,
    camera: bool,
    actor: bool,
  },
  /// Leave the level for `scene`.
  Exit { scene: String },
}

/// Resolves an actor touching `marker`, owned by `owner`.
///
/// Returns `None` when the actor moves the wrong way for the marker.
pub fn on_marker_entered(
  marker: &NodeKind,
  owner: &Zone,
  actor: Vec2,
  velocity: Option<Vec2>,
  viewport: &ViewportConfig,
) -> Option<MarkerAction> {
  match marker {
    NodeKind::Entrance(entrance) => {
      is_entering(velocity, actor, owner.position).then(|| MarkerAction::Teleport {
        end: entrance_end_position(entrance, owner, viewport),
        camera: entrance.style.moves_camera(),
        actor: entrance.style.moves_actor(),
      })
    }
    NodeKind::Exit(exit) => is_leaving(velocity, actor, owner.position).then(|| MarkerAction::Exit {
      scene: exit.scene.clone(),
    }),
    NodeKind::Zone(_) => None,
  }
}
