use bevy::prelude::*;

use crate::zone::NodeId;

/// An actor overlaps a zone or marker this tick.
///
/// Written by the built-in rectangle detector, or by the host (for example
/// from physics sensor contacts) before [`crate::LevelZoneSet::Markers`].
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneOverlap {
  pub actor: Entity,
  pub node: NodeId,
}

/// An actor walked out through an exit. Loading `scene` is up to the host.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct ZoneExitReached {
  pub actor: Entity,
  pub exit: NodeId,
  pub scene: String,
}

/// The zone driving an actor's camera changed during a tick.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveZoneChanged {
  pub actor: Entity,
  pub from: Option<NodeId>,
  pub to: Option<NodeId>,
}
