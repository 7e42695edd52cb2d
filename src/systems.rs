//! Fixed-tick systems driving cameras from the zone graph.

use std::collections::HashMap;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rayon::prelude::*;

use crate::bounds::ZoneRect;
use crate::components::{ActorVelocity, LevelZoneNode, ZoneActor, ZoneCamera};
use crate::config::{LevelZoneConfig, ViewportConfig};
use crate::director::{ActorState, TickOutcome};
use crate::messages::{ActiveZoneChanged, ZoneExitReached, ZoneOverlap};
use crate::perimeter::{self, Perimeter};
use crate::transition::{MarkerAction, Transition, on_marker_entered};
use crate::zone::{NodeId, Placement, ZoneGraph};

type CameraQuery<'w, 's> =
  Query<'w, 's, &'static mut Transform, (With<ZoneCamera>, Without<ZoneActor>)>;

/// Traced outline of every root zone's camera footprint.
#[derive(Resource, Default, Debug, Clone)]
pub struct ZonePerimeters {
  by_root: Vec<(NodeId, Perimeter)>,
}

impl ZonePerimeters {
  pub fn get(&self, root: NodeId) -> Option<&Perimeter> {
    self
      .by_root
      .iter()
      .find(|(id, _)| *id == root)
      .map(|(_, p)| p)
  }

  pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Perimeter)> {
    self.by_root.iter().map(|(id, p)| (*id, p))
  }

  pub fn len(&self) -> usize {
    self.by_root.len()
  }

  pub fn is_empty(&self) -> bool {
    self.by_root.is_empty()
  }
}

/// Groups this tick's overlaps by actor, keeping first-seen order.
fn overlaps_by_actor(reader: &mut MessageReader<ZoneOverlap>) -> HashMap<Entity, Vec<NodeId>> {
  let mut out: HashMap<Entity, Vec<NodeId>> = HashMap::new();
  for overlap in reader.read() {
    let nodes = out.entry(overlap.actor).or_default();
    if !nodes.contains(&overlap.node) {
      nodes.push(overlap.node);
    }
  }
  out
}

/// Copies entity translations into the graph.
pub fn sync_node_positions(
  nodes: Query<(&LevelZoneNode, &Transform), Changed<Transform>>,
  mut graph: ResMut<ZoneGraph>,
) {
  for (node, transform) in &nodes {
    let position = transform.translation.truncate();
    match graph.kind(node.0) {
      Some(kind) if kind.position() != position => {
        if let Err(e) = graph.set_position(node.0, position) {
          warn!("Failed to move zone node {}: {e}", node.0);
        }
      }
      Some(_) => {}
      None => debug!("Entity references removed zone node {}", node.0),
    }
  }
}

/// Writes a [`ZoneOverlap`] for every node an actor's rectangle overlaps.
pub fn detect_zone_overlaps(
  graph: Res<ZoneGraph>,
  actors: Query<(Entity, &Transform, &ZoneActor)>,
  mut overlaps: MessageWriter<ZoneOverlap>,
) {
  for (actor, transform, zone_actor) in &actors {
    let rect = ZoneRect::new(transform.translation.truncate(), zone_actor.half_size);
    for (node, entry) in graph.iter() {
      if rect.overlaps(&entry.kind.local_bounds()) {
        overlaps.write(ZoneOverlap { actor, node });
      }
    }
  }
}

/// Fires entrances and exits on the tick an actor first touches them.
pub fn handle_marker_contacts(
  mut reader: MessageReader<ZoneOverlap>,
  graph: Res<ZoneGraph>,
  viewport: Res<ViewportConfig>,
  config: Res<LevelZoneConfig>,
  mut actors: Query<(Entity, &mut ZoneActor, &Transform, Option<&ActorVelocity>)>,
  cameras: CameraQuery,
  mut exits: MessageWriter<ZoneExitReached>,
) {
  let overlaps = overlaps_by_actor(&mut reader);
  for (entity, mut actor, transform, velocity) in &mut actors {
    let contacts: Vec<NodeId> = overlaps
      .get(&entity)
      .into_iter()
      .flatten()
      .copied()
      .filter(|&id| graph.kind(id).is_some_and(|kind| kind.is_marker()))
      .collect();

    let fresh: Vec<NodeId> = contacts
      .iter()
      .copied()
      .filter(|id| !actor.marker_contacts.contains(id))
      .collect();

    let position = transform.translation.truncate();
    for marker in fresh {
      let (Some(kind), Some(owner)) = (
        graph.kind(marker),
        graph.parent(marker).and_then(|p| graph.zone(p)),
      ) else {
        continue;
      };
      let velocity = velocity.map(|v| v.0);
      match on_marker_entered(kind, owner, position, velocity, &viewport) {
        Some(MarkerAction::Teleport {
          end,
          camera,
          actor: moves_actor,
        }) => {
          debug!("Entrance {marker} sends {entity} to {end}");
          let duration = config.transition.duration_secs;
          if camera {
            match cameras.get(actor.camera) {
              Ok(camera_transform) => {
                let start = camera_transform.translation.truncate();
                actor.camera_transition = Some(Transition::new(start, end, duration));
              }
              Err(_) => warn!("Actor {entity} has no zone camera"),
            }
          }
          if moves_actor {
            actor.actor_transition = Some(Transition::new(position, end, duration));
          }
        }
        Some(MarkerAction::Exit { scene }) => {
          info!("Actor {entity} reached exit {marker} to {scene}");
          exits.write(ZoneExitReached {
            actor: entity,
            exit: marker,
            scene,
          });
        }
        None => {}
      }
    }
    actor.marker_contacts = contacts;
  }
}

/// Steps entrance teleports, keeping depth untouched.
pub fn advance_transitions(
  time: Res<Time>,
  mut actors: Query<(&mut ZoneActor, &mut Transform)>,
  mut cameras: CameraQuery,
) {
  let dt = time.delta_secs();
  for (mut actor, mut transform) in &mut actors {
    if let Some(mut transition) = actor.actor_transition {
      let p = transition.advance(dt);
      transform.translation = p.extend(transform.translation.z);
      actor.actor_transition = transition.in_progress.then_some(transition);
    }
    if let Some(mut transition) = actor.camera_transition {
      let p = transition.advance(dt);
      if let Ok(mut camera) = cameras.get_mut(actor.camera) {
        camera.translation = p.extend(camera.translation.z);
      }
      actor.camera_transition = transition.in_progress.then_some(transition);
    }
  }
}

/// Runs the camera director for every actor.
pub fn direct_cameras(
  time: Res<Time>,
  mut reader: MessageReader<ZoneOverlap>,
  graph: Res<ZoneGraph>,
  config: Res<LevelZoneConfig>,
  mut actors: Query<(Entity, &mut ZoneActor, &Transform)>,
  mut cameras: CameraQuery,
  mut changes: MessageWriter<ActiveZoneChanged>,
) {
  let dt = time.delta_secs();
  let overlaps = overlaps_by_actor(&mut reader);
  for (entity, mut actor, transform) in &mut actors {
    if actor.camera_in_transition() {
      continue;
    }
    let Ok(mut camera) = cameras.get_mut(actor.camera) else {
      continue;
    };

    let before = actor.active_zone;
    let mut state = ActorState {
      position: transform.translation.truncate(),
      active_zone: before,
      camera_speed: actor.camera_speed.unwrap_or(config.camera.default_speed),
    };
    let touching = overlaps.get(&entity).map_or(&[][..], Vec::as_slice);
    let outcome = state.tick_overlapping(touching, &graph, camera.translation, dt);
    trace!("Camera director for {entity}: {outcome:?}");
    if let TickOutcome::Moved { camera: next, .. } = outcome {
      camera.translation = next;
    }

    if state.active_zone != before {
      actor.active_zone = state.active_zone;
      changes.write(ActiveZoneChanged {
        actor: entity,
        from: before,
        to: state.active_zone,
      });
    }
  }
}

/// Keeps [`ViewportConfig`] in step with the zone camera's projection, or the
/// configured fallback when there is none.
pub fn sync_viewport_from_camera(
  cameras: Query<&Projection, With<ZoneCamera>>,
  config: Res<LevelZoneConfig>,
  mut viewport: ResMut<ViewportConfig>,
) {
  let from_camera = cameras.iter().find_map(|projection| match projection {
    Projection::Orthographic(ortho) if ortho.area.height() > 0.0 => Some(ViewportConfig::new(
      ortho.area.width() / ortho.area.height(),
      ortho.area.height() * 0.5,
    )),
    _ => None,
  });
  viewport.set_if_neq(from_camera.unwrap_or_else(|| config.viewport()));
}

/// Rounds every unlocked nested zone and marker onto its owner's edge and
/// mirrors the result back onto the linked entities.
pub fn snap_placed_nodes(
  mut graph: ResMut<ZoneGraph>,
  viewport: Res<ViewportConfig>,
  mut nodes: Query<(&LevelZoneNode, &mut Transform)>,
) {
  if !graph.is_changed() && !viewport.is_changed() {
    return;
  }
  let before: Vec<(NodeId, Vec2)> = graph
    .bypass_change_detection()
    .iter()
    .map(|(id, node)| (id, node.kind.position()))
    .collect();
  graph.bypass_change_detection().snap_all(&viewport);
  let moved = before
    .iter()
    .any(|(id, p)| graph.kind(*id).is_some_and(|kind| kind.position() != *p));
  if !moved {
    return;
  }
  graph.set_changed();

  for (node, mut transform) in &mut nodes {
    if let Some(kind) = graph.kind(node.0) {
      let p = kind.position();
      if transform.translation.truncate() != p {
        transform.translation = p.extend(transform.translation.z);
      }
    }
  }
}

/// Re-traces root zone outlines when the graph or viewport changed.
pub fn refresh_zone_perimeters(
  graph: Res<ZoneGraph>,
  viewport: Res<ViewportConfig>,
  mut perimeters: ResMut<ZonePerimeters>,
) {
  if !graph.is_changed() && !viewport.is_changed() {
    return;
  }
  let snapshots: Vec<(NodeId, Vec<ZoneRect>)> = graph
    .roots()
    .into_iter()
    .filter_map(|root| {
      graph
        .descendant_camera_bounds(root, &viewport)
        .ok()
        .map(|bounds| (root, bounds))
    })
    .collect();
  perimeters.by_root = snapshots
    .into_par_iter()
    .map(|(root, bounds)| (root, perimeter::trace(&bounds)))
    .collect();
  debug!("Traced {} zone perimeters", perimeters.by_root.len());
}
