//! Per-tick camera target resolution.
//!
//! Each actor remembers at most one active zone. Every tick the zones the
//! actor overlaps are offered to [`ActorState::tick`] in turn; only the active
//! one moves the camera. Stepping outside a zone hands the actor back to
//! whichever zone claims it next, so neighboring zones need no explicit
//! entrance markers.

use bevy::math::{Vec2, Vec3};

use crate::error::ConfigurationError;
use crate::zone::{NodeId, Placement, ScrollMode, Zone, ZoneGraph};

pub fn validate_camera_speed(speed: f32) -> Result<(), ConfigurationError> {
  if speed.is_finite() && speed >= 0.0 {
    Ok(())
  } else {
    Err(ConfigurationError::InvalidCameraSpeed(speed))
  }
}

/// What one tick did to an actor's camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
  /// No zone drove the camera; it stays where it is.
  Unassigned,
  /// The zone offered was not the actor's active zone.
  Skipped,
  /// The camera moved toward `target`.
  Moved { target: Vec2, camera: Vec3 },
}

/// Director state for one actor.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorState {
  pub position: Vec2,
  pub active_zone: Option<NodeId>,
  /// Lerp rate per second.
  pub camera_speed: f32,
}

impl ActorState {
  pub fn new(position: Vec2, camera_speed: f32) -> Self {
    Self {
      position,
      active_zone: None,
      camera_speed,
    }
  }

  /// Runs the director for one zone the actor overlaps.
  pub fn tick(&mut self, zone_id: NodeId, zone: &Zone, camera: Vec3, dt: f32) -> TickOutcome {
    if self.active_zone.is_none() {
      log::trace!("actor claimed by zone {zone_id}");
      self.active_zone = Some(zone_id);
    }
    if self.active_zone != Some(zone_id) {
      return TickOutcome::Skipped;
    }

    let mut target = provisional_target(zone, self.position);
    if !zone.local_bounds().contains(self.position) {
      log::trace!("actor left zone {zone_id}");
      self.active_zone = None;
      // Fixed zones keep pulling the camera onto their own target.
      if zone.scroll_mode != ScrollMode::Fixed {
        target = exit_target(zone, self.position, camera.truncate());
      }
    }

    let t = (dt * self.camera_speed).clamp(0.0, 1.0);
    let moved = camera.truncate().lerp(target, t);
    TickOutcome::Moved {
      target,
      camera: moved.extend(camera.z),
    }
  }

  /// Runs the director over every node the actor overlaps this tick, in
  /// order, feeding each camera move into the next.
  ///
  /// An active zone missing from `overlaps` is dropped first. Markers and
  /// removed nodes are ignored.
  pub fn tick_overlapping(
    &mut self,
    overlaps: &[NodeId],
    graph: &ZoneGraph,
    camera: Vec3,
    dt: f32,
  ) -> TickOutcome {
    if let Some(active) = self.active_zone
      && (!overlaps.contains(&active) || graph.zone(active).is_none())
    {
      log::trace!("actor no longer overlaps zone {active}");
      self.active_zone = None;
    }

    let mut camera = camera;
    let mut outcome = TickOutcome::Unassigned;
    for &id in overlaps {
      let Some(zone) = graph.zone(id) else {
        continue;
      };
      if let moved @ TickOutcome::Moved { camera: next, .. } = self.tick(id, zone, camera, dt) {
        camera = next;
        outcome = moved;
      }
    }
    outcome
  }
}

/// Camera target while the actor is inside `zone`.
pub fn provisional_target(zone: &Zone, actor: Vec2) -> Vec2 {
  let center = zone.local_bounds().center;
  let base = match zone.scroll_mode {
    ScrollMode::Horizontal => Vec2::new(actor.x, center.y),
    ScrollMode::Vertical => Vec2::new(center.x, actor.y),
    ScrollMode::FollowActor => actor,
    ScrollMode::Fixed => center,
  };
  base + zone.camera_offset_for_mode()
}

/// Nearest edge point of `zone`, or nearest allowed edge midpoint when the
/// zone forces edge-center transitions.
pub fn edge_target(zone: &Zone, reference: Vec2) -> Vec2 {
  let bounds = zone.local_bounds();
  if zone.force_edge_center_transitions {
    bounds.nearest_edge_center(reference, zone.scroll_mode)
  } else {
    bounds.clamp_point(reference)
  }
}

/// Camera target once the actor has stepped outside a scrolling zone.
///
/// With a diagonal offset the camera's own position is offset from the edge
/// it lerps toward, so the actor is the reference and the offset is added
/// back afterwards.
pub fn exit_target(zone: &Zone, actor: Vec2, camera: Vec2) -> Vec2 {
  if zone.has_diagonal_offset() {
    edge_target(zone, actor) + zone.camera_offset_for_mode()
  } else {
    edge_target(zone, camera)
  }
}
