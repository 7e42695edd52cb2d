use bevy::math::Vec2;

use super::*;
use crate::bounds::ZoneRect;
use crate::config::ViewportConfig;
use crate::error::{ConfigurationError, ZoneGraphError};

fn viewport() -> ViewportConfig {
  ViewportConfig::new(2.0, 4.0)
}

fn zone(x: f32, y: f32, w: f32, h: f32) -> Zone {
  Zone::new(Vec2::new(x, y), Vec2::new(w, h))
}

#[test]
fn camera_bounds_add_viewport_footprint() {
  let z = zone(10.0, 0.0, 20.0, 10.0);
  let bounds = z.camera_bounds(&viewport());
  assert_eq!(bounds, ZoneRect::new(Vec2::new(10.0, 0.0), Vec2::new(8.0, 4.0)));

  let follow = z.clone().with_scroll_mode(ScrollMode::FollowActor);
  assert_eq!(
    follow.camera_bounds(&viewport()).half_extents,
    Vec2::new(18.0, 9.0)
  );
}

#[test]
fn camera_offset_is_projected_per_mode() {
  let offset = Vec2::new(3.0, -2.0);
  let base = zone(0.0, 0.0, 10.0, 10.0).with_camera_offset(offset);
  let vp = viewport();

  let horizontal = base.clone().with_scroll_mode(ScrollMode::Horizontal);
  assert_eq!(horizontal.camera_offset_for_mode(), Vec2::new(0.0, -2.0));
  assert_eq!(horizontal.camera_bounds(&vp).center, Vec2::new(0.0, -2.0));
  assert!(!horizontal.has_diagonal_offset());

  let vertical = base.clone().with_scroll_mode(ScrollMode::Vertical);
  assert_eq!(vertical.camera_offset_for_mode(), Vec2::new(3.0, 0.0));

  let fixed = base.with_scroll_mode(ScrollMode::Fixed);
  assert_eq!(fixed.camera_offset_for_mode(), offset);
  assert!(fixed.has_diagonal_offset());
}

#[test]
fn camera_bounds_are_idempotent() {
  let mut graph = ZoneGraph::new();
  let id = graph
    .insert_zone(zone(1.0, 2.0, 6.0, 4.0).with_camera_offset(Vec2::ONE), None)
    .unwrap();
  let vp = viewport();
  assert_eq!(
    graph.camera_bounds_of(id, &vp).unwrap(),
    graph.camera_bounds_of(id, &vp).unwrap()
  );
}

#[test]
fn rejects_non_positive_sizes() {
  let mut graph = ZoneGraph::new();
  let err = graph.insert_zone(zone(0.0, 0.0, 0.0, 4.0), None).unwrap_err();
  assert!(matches!(
    err,
    ZoneGraphError::Configuration(ConfigurationError::NonPositiveSize { .. })
  ));
  assert!(graph.is_empty());
}

#[test]
fn resizing_is_validated() {
  let mut graph = ZoneGraph::new();
  let room = graph.insert_zone(zone(0.0, 0.0, 10.0, 10.0), None).unwrap();
  let door = graph.insert_marker(Entrance::new(Vec2::new(5.0, 0.0)), room).unwrap();

  graph.set_size(room, Vec2::new(20.0, 6.0)).unwrap();
  assert_eq!(graph.zone(room).unwrap().size, Vec2::new(20.0, 6.0));
  graph.set_size(door, Vec2::new(1.0, 3.0)).unwrap();
  assert_eq!(graph.kind(door).unwrap().size(), Vec2::new(1.0, 3.0));

  for bad in [Vec2::new(-4.0, 6.0), Vec2::new(4.0, 0.0), Vec2::new(f32::NAN, 1.0)] {
    assert!(matches!(
      graph.set_size(room, bad),
      Err(ZoneGraphError::Configuration(ConfigurationError::NonPositiveSize { .. }))
    ));
  }
  assert_eq!(graph.zone(room).unwrap().size, Vec2::new(20.0, 6.0));
}

#[test]
fn markers_need_a_zone_owner() {
  let mut graph = ZoneGraph::new();
  let room = graph.insert_zone(zone(0.0, 0.0, 10.0, 10.0), None).unwrap();
  let door = graph.insert_marker(Entrance::new(Vec2::new(5.0, 0.0)), room).unwrap();

  assert_eq!(
    graph.insert(Exit::new(Vec2::ZERO, "next").into(), None),
    Err(ZoneGraphError::Configuration(
      ConfigurationError::MarkerWithoutZone
    ))
  );
  assert_eq!(
    graph.insert_marker(Exit::new(Vec2::ZERO, "next"), door),
    Err(ZoneGraphError::Configuration(
      ConfigurationError::MarkerCannotOwnChildren(door)
    ))
  );
  assert!(graph.detach(door).is_err());
  assert_eq!(
    graph.camera_bounds_of(door, &viewport()),
    Err(ZoneGraphError::NotAZone(door))
  );
}

#[test]
fn attach_child_rejects_cycles() {
  let mut graph = ZoneGraph::new();
  let a = graph.insert_zone(zone(0.0, 0.0, 4.0, 4.0), None).unwrap();
  let b = graph.insert_zone(zone(10.0, 0.0, 4.0, 4.0), Some(a)).unwrap();
  let c = graph.insert_zone(zone(20.0, 0.0, 4.0, 4.0), Some(b)).unwrap();

  assert_eq!(
    graph.attach_child(c, a),
    Err(ZoneGraphError::Cycle {
      parent: c,
      child: a
    })
  );
  assert_eq!(
    graph.attach_child(a, a),
    Err(ZoneGraphError::Cycle {
      parent: a,
      child: a
    })
  );

  // Reparenting c directly under a is fine.
  graph.attach_child(a, c).unwrap();
  assert_eq!(graph.parent(c), Some(a));
  assert!(graph.children(b).is_empty());
  assert_eq!(graph.children(a), &[b, c]);
}

#[test]
fn ancestors_and_descendants() {
  let mut graph = ZoneGraph::new();
  let root = graph.insert_zone(zone(0.0, 0.0, 4.0, 4.0), None).unwrap();
  let left = graph.insert_zone(zone(-5.0, 0.0, 4.0, 4.0), Some(root)).unwrap();
  let deep = graph.insert_zone(zone(-9.0, 0.0, 4.0, 4.0), Some(left)).unwrap();
  let right = graph.insert_zone(zone(5.0, 0.0, 4.0, 4.0), Some(root)).unwrap();
  let door = graph.insert_marker(Entrance::new(Vec2::ZERO), right).unwrap();

  assert_eq!(graph.ancestors(deep).collect::<Vec<_>>(), vec![left, root]);
  assert_eq!(graph.descendants(root), vec![left, deep, right, door]);
  assert_eq!(graph.roots(), vec![root]);

  // Markers never contribute camera bounds.
  let bounds = graph.descendant_camera_bounds(root, &viewport()).unwrap();
  assert_eq!(bounds.len(), 4);
  assert_eq!(bounds[0].center, Vec2::ZERO);
}

#[test]
fn remove_requires_leaf_and_ids_are_not_reused() {
  let mut graph = ZoneGraph::new();
  let root = graph.insert_zone(zone(0.0, 0.0, 4.0, 4.0), None).unwrap();
  let child = graph.insert_zone(zone(4.0, 0.0, 4.0, 4.0), Some(root)).unwrap();

  assert_eq!(
    graph.remove(root),
    Err(ZoneGraphError::HasChildren {
      node: root,
      children: 1
    })
  );

  graph.remove(child).unwrap();
  assert!(!graph.contains(child));
  assert!(graph.children(root).is_empty());

  let replacement = graph.insert_zone(zone(4.0, 0.0, 4.0, 4.0), Some(root)).unwrap();
  assert_ne!(replacement, child);
  assert!(graph.get(child).is_none());
  assert_eq!(graph.remove(child), Err(ZoneGraphError::UnknownNode(child)));
}

#[test]
fn remove_subtree_clears_everything_below() {
  let mut graph = ZoneGraph::new();
  let root = graph.insert_zone(zone(0.0, 0.0, 4.0, 4.0), None).unwrap();
  let a = graph.insert_zone(zone(4.0, 0.0, 4.0, 4.0), Some(root)).unwrap();
  graph.insert_zone(zone(8.0, 0.0, 4.0, 4.0), Some(a)).unwrap();
  graph.insert_marker(Entrance::new(Vec2::ZERO), a).unwrap();
  let other = graph.insert_zone(zone(40.0, 0.0, 4.0, 4.0), None).unwrap();

  assert_eq!(graph.remove_subtree(a), Ok(3));
  assert_eq!(graph.len(), 2);
  assert!(graph.contains(root) && graph.contains(other));
  assert!(graph.children(root).is_empty());
}

#[test]
fn child_zones_snap_outside_parent_camera_bounds() {
  let vp = viewport();
  let mut graph = ZoneGraph::new();
  let root = graph.insert_zone(zone(0.0, 0.0, 10.0, 10.0), None).unwrap();
  // Parent camera bounds span x in [-8, 8], y in [-4, 4].
  let child = graph
    .insert_zone(zone(9.0, 1.0, 4.0, 2.0), Some(root))
    .unwrap();

  assert_eq!(graph.snap_to_parent(child, &vp), Ok(Some(Vec2::new(10.0, 1.0))));
  assert_eq!(graph.zone(child).unwrap().position, Vec2::new(10.0, 1.0));

  let axes = graph.movement_axes(child, &vp).unwrap();
  assert!(axes.flush_x && !axes.flush_y);

  // Roots never move.
  assert_eq!(graph.snap_to_parent(root, &vp), Ok(None));
}

#[test]
fn markers_snap_inside_owner_camera_bounds() {
  let vp = viewport();
  let mut graph = ZoneGraph::new();
  let root = graph.insert_zone(zone(0.0, 0.0, 10.0, 10.0), None).unwrap();
  let door = graph
    .insert_marker(Entrance::new(Vec2::new(1.0, 3.5)), root)
    .unwrap();

  // Marker is 2x2, so it stops one unit short of the top edge at y = 4.
  assert_eq!(graph.snap_to_parent(door, &vp), Ok(Some(Vec2::new(1.0, 3.0))));
}

#[test]
fn snap_lock_leaves_position_alone() {
  let vp = viewport();
  let mut graph = ZoneGraph::new();
  let root = graph.insert_zone(zone(0.0, 0.0, 10.0, 10.0), None).unwrap();
  let locked = graph
    .insert_zone(zone(3.0, 3.0, 2.0, 2.0).with_snap_lock(true), Some(root))
    .unwrap();
  assert_eq!(graph.snap_to_parent(locked, &vp), Ok(None));
  assert_eq!(graph.zone(locked).unwrap().position, Vec2::new(3.0, 3.0));
}

#[test]
fn zones_containing_uses_local_bounds() {
  let mut graph = ZoneGraph::new();
  let a = graph.insert_zone(zone(0.0, 0.0, 10.0, 10.0), None).unwrap();
  let b = graph.insert_zone(zone(10.0, 0.0, 10.0, 10.0), None).unwrap();
  graph.insert_marker(Entrance::new(Vec2::new(5.0, 0.0)), a).unwrap();

  assert_eq!(graph.zones_containing(Vec2::new(5.0, 0.0)).collect::<Vec<_>>(), vec![a, b]);
  assert_eq!(graph.zones_containing(Vec2::new(12.0, 0.0)).collect::<Vec<_>>(), vec![b]);
  assert_eq!(graph.zones_containing(Vec2::new(0.0, 50.0)).count(), 0);
}

#[test]
fn debug_colors_keep_shared_alpha() {
  let mut z = Zone::default();
  assert_eq!(z.debug_color(), ScrollMode::Horizontal.color());
  z.randomize_color();
  let color = z.debug_color().to_srgba();
  assert!((color.alpha - ZONE_COLOR_ALPHA).abs() < 1e-6);
}
