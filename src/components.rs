use bevy::prelude::*;

use crate::transition::Transition;
use crate::zone::NodeId;

/// Links an entity to a [`crate::zone::ZoneGraph`] node. The entity's
/// translation is copied into the node every fixed tick.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LevelZoneNode(pub NodeId);

/// Camera driven by zone actors.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct ZoneCamera;

/// Actor velocity, used to tell entering from leaving at markers.
///
/// Actors without it pass every direction check.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct ActorVelocity(pub Vec2);

/// An entity whose camera is steered by the zones it stands in.
#[derive(Component, Clone, Debug)]
pub struct ZoneActor {
  /// Camera entity, which must carry [`ZoneCamera`].
  pub camera: Entity,
  /// Lerp rate; the configured default applies when unset.
  pub camera_speed: Option<f32>,
  /// Half extents of the actor's overlap rectangle.
  pub half_size: Vec2,
  pub active_zone: Option<NodeId>,
  /// Markers touched last tick; markers fire on first contact only.
  pub marker_contacts: Vec<NodeId>,
  pub camera_transition: Option<Transition>,
  pub actor_transition: Option<Transition>,
}

impl ZoneActor {
  pub fn new(camera: Entity) -> Self {
    Self {
      camera,
      camera_speed: None,
      half_size: Vec2::new(0.5, 1.0),
      active_zone: None,
      marker_contacts: Vec::new(),
      camera_transition: None,
      actor_transition: None,
    }
  }

  pub fn with_camera_speed(mut self, speed: f32) -> Self {
    self.camera_speed = Some(speed);
    self
  }

  pub fn with_half_size(mut self, half_size: Vec2) -> Self {
    self.half_size = half_size;
    self
  }

  /// True while an entrance is still moving this actor's camera.
  pub fn camera_in_transition(&self) -> bool {
    self.camera_transition.is_some_and(|t| t.in_progress)
  }
}
