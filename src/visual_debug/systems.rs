use bevy::prelude::*;

use super::colors;
use crate::config::{LevelZoneConfig, ViewportConfig};
use crate::systems::ZonePerimeters;
use crate::transition::marker_transition_point;
use crate::zone::{Placement, ScrollMode, Zone, ZoneGraph};

pub fn apply_line_width(config: Res<LevelZoneConfig>, mut store: ResMut<GizmoConfigStore>) {
  if config.is_changed() {
    let (gizmo_config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    gizmo_config.line.width = config.debug.line_width.max(1.0);
  }
}

fn draw_scroll_line(gizmos: &mut Gizmos, zone: &Zone, color: Color) {
  let bounds = zone.local_bounds();
  let through = bounds.center + zone.camera_offset_for_mode();
  let (min, max) = (bounds.min(), bounds.max());
  match zone.scroll_mode {
    ScrollMode::Horizontal => {
      gizmos.line_2d(Vec2::new(min.x, through.y), Vec2::new(max.x, through.y), color)
    }
    ScrollMode::Vertical => {
      gizmos.line_2d(Vec2::new(through.x, min.y), Vec2::new(through.x, max.y), color)
    }
    ScrollMode::FollowActor | ScrollMode::Fixed => {}
  }
}

/// Zone rectangles, scroll lines and camera bounds.
pub fn draw_zones(
  mut gizmos: Gizmos,
  graph: Res<ZoneGraph>,
  viewport: Res<ViewportConfig>,
  config: Res<LevelZoneConfig>,
) {
  if !config.debug.draw_zones && !config.debug.draw_camera_bounds {
    return;
  }
  for (_, zone) in graph.zones().filter(|(_, z)| z.draw) {
    let color = zone.debug_color();
    if config.debug.draw_zones {
      let bounds = zone.local_bounds();
      gizmos.rect_2d(Isometry2d::from_translation(bounds.center), bounds.size(), color);
      draw_scroll_line(&mut gizmos, zone, color);
    }
    if config.debug.draw_camera_bounds {
      let camera = zone.camera_bounds(&viewport);
      gizmos.rect_2d(
        Isometry2d::from_translation(camera.center),
        camera.size(),
        color.with_alpha(1.0),
      );
    }
  }
}

/// Entrance/exit rectangles with a line to where they send the camera.
pub fn draw_markers(
  mut gizmos: Gizmos,
  graph: Res<ZoneGraph>,
  viewport: Res<ViewportConfig>,
  config: Res<LevelZoneConfig>,
) {
  if !config.debug.draw_zones {
    return;
  }
  for (id, node) in graph.iter().filter(|(_, n)| n.kind.is_marker()) {
    let owner = graph.parent(id).and_then(|p| graph.zone(p));
    if owner.is_some_and(|o| !o.draw) {
      continue;
    }
    let color = owner.map_or(colors::GREY, Zone::debug_color);
    let bounds = node.kind.local_bounds();
    gizmos.rect_2d(Isometry2d::from_translation(bounds.center), bounds.size(), color);
    if let Some(point) = owner.and_then(|o| marker_transition_point(&node.kind, o, &viewport)) {
      gizmos.line_2d(bounds.center, point, color);
    }
  }
}

/// Closed outline of each root zone's combined camera bounds.
pub fn draw_perimeters(
  mut gizmos: Gizmos,
  perimeters: Res<ZonePerimeters>,
  config: Res<LevelZoneConfig>,
) {
  if !config.debug.draw_perimeters {
    return;
  }
  for (_, perimeter) in perimeters.iter() {
    let points = perimeter.points();
    if let Some(&first) = points.first() {
      gizmos.linestrip_2d(
        points.iter().copied().chain(std::iter::once(first)),
        colors::PERIMETER,
      );
    }
  }
}
