//! Edge snapping for placement tooling.
//!
//! Nested zones and entrance/exit markers live flush against an edge of a
//! reference rectangle. [`round_to_nearest_edge`] pulls a point onto the
//! closest edge (one axis only) and [`valid_movement_axes`] reports which axes
//! a flush point may still slide along.

use bevy::math::Vec2;

use crate::bounds::ZoneRect;

/// Tolerance used when comparing edge distances.
pub const SNAP_EPSILON: f32 = 1e-3;

/// One side of a rectangle, in tie-break priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
  Left,
  Right,
  Bottom,
  Top,
}

impl Edge {
  /// All edges in tie-break priority order.
  pub const PRIORITY: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Bottom, Edge::Top];
}

/// Signed distances from a point to the four edges of an expanded rectangle.
///
/// Positive inside, negative past the edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeDistances {
  pub left: f32,
  pub right: f32,
  pub bottom: f32,
  pub top: f32,
}

impl EdgeDistances {
  pub fn new(min: Vec2, max: Vec2, point: Vec2) -> Self {
    Self {
      left: point.x - min.x,
      right: max.x - point.x,
      bottom: point.y - min.y,
      top: max.y - point.y,
    }
  }

  #[inline]
  pub fn get(&self, edge: Edge) -> f32 {
    match edge {
      Edge::Left => self.left,
      Edge::Right => self.right,
      Edge::Bottom => self.bottom,
      Edge::Top => self.top,
    }
  }

  /// Smallest of the four distances.
  pub fn min(&self) -> f32 {
    self.left.min(self.right).min(self.bottom).min(self.top)
  }

  /// The closest edge, resolving near-ties in [`Edge::PRIORITY`] order.
  pub fn nearest(&self) -> Edge {
    let d = self.min();
    Edge::PRIORITY
      .into_iter()
      .find(|&edge| (self.get(edge) - d).abs() < SNAP_EPSILON)
      .unwrap_or(Edge::Left)
  }
}

/// Expanded bounds used by both snapping queries.
#[inline]
fn expanded(reference: ZoneRect, offset: Vec2) -> (Vec2, Vec2) {
  (reference.min() - offset, reference.max() + offset)
}

/// Snaps `point` onto the nearest edge of `reference` grown by `offset`.
///
/// Returns the edge that was applied together with the snapped point. Only
/// the coordinate perpendicular to that edge changes, even at exact corners.
pub fn snap_to_nearest_edge(reference: ZoneRect, offset: Vec2, point: Vec2) -> (Edge, Vec2) {
  let (min, max) = expanded(reference, offset);
  let edge = EdgeDistances::new(min, max, point).nearest();
  let snapped = match edge {
    Edge::Left => Vec2::new(min.x, point.y),
    Edge::Right => Vec2::new(max.x, point.y),
    Edge::Bottom => Vec2::new(point.x, min.y),
    Edge::Top => Vec2::new(point.x, max.y),
  };
  (edge, snapped)
}

/// Rounds `point` onto the nearest edge of `reference` grown by `offset`.
///
/// A positive offset keeps a child outside the reference rectangle (its
/// half size), a negative one keeps it inside.
pub fn round_to_nearest_edge(reference: ZoneRect, offset: Vec2, point: Vec2) -> Vec2 {
  snap_to_nearest_edge(reference, offset, point).1
}

/// Which edges a placed point currently sits flush against.
///
/// `flush_x` means the point touches the left or right boundary, so tooling
/// may only slide it vertically. `flush_y` is the top/bottom counterpart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementAxes {
  pub flush_x: bool,
  pub flush_y: bool,
}

impl MovementAxes {
  /// Directions a handle may drag the point along.
  ///
  /// Slot 0 is `Vec2::Y` when flush on a left/right edge, slot 1 is `Vec2::X`
  /// when flush on a bottom/top edge.
  pub fn slide_directions(&self) -> [Option<Vec2>; 2] {
    [
      self.flush_x.then_some(Vec2::Y),
      self.flush_y.then_some(Vec2::X),
    ]
  }

  /// True when the point is not touching any edge.
  pub fn is_free(&self) -> bool {
    !self.flush_x && !self.flush_y
  }
}

/// Reports the axes along which `point` lies flush with `reference` grown by
/// `extents`.
pub fn valid_movement_axes(reference: ZoneRect, extents: Vec2, point: Vec2) -> MovementAxes {
  let (min, max) = expanded(reference, extents);
  let d = EdgeDistances::new(min, max, point);
  MovementAxes {
    flush_x: d.left.abs() < SNAP_EPSILON || d.right.abs() < SNAP_EPSILON,
    flush_y: d.bottom.abs() < SNAP_EPSILON || d.top.abs() < SNAP_EPSILON,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn reference() -> ZoneRect {
    ZoneRect::new(Vec2::ZERO, Vec2::new(10.0, 5.0))
  }

  fn on_boundary_along_one_axis(reference: ZoneRect, offset: Vec2, input: Vec2, out: Vec2) {
    let (min, max) = (reference.min() - offset, reference.max() + offset);
    let x_snapped = out.x == min.x || out.x == max.x;
    let y_snapped = out.y == min.y || out.y == max.y;
    let x_moved = out.x != input.x;
    let y_moved = out.y != input.y;
    assert!(!(x_moved && y_moved), "both axes moved: {input} -> {out}");
    if x_moved {
      assert!(x_snapped);
    }
    if y_moved {
      assert!(y_snapped);
    }
    assert!(x_snapped || y_snapped, "{out} is not on the boundary");
  }

  #[test]
  fn snaps_to_closest_edge_only() {
    let r = reference();
    assert_eq!(
      round_to_nearest_edge(r, Vec2::ZERO, Vec2::new(8.0, 1.0)),
      Vec2::new(10.0, 1.0)
    );
    assert_eq!(
      round_to_nearest_edge(r, Vec2::ZERO, Vec2::new(-2.0, -4.0)),
      Vec2::new(-2.0, -5.0)
    );
    assert_eq!(
      round_to_nearest_edge(r, Vec2::ZERO, Vec2::new(3.0, 30.0)),
      Vec2::new(3.0, 5.0)
    );
  }

  #[test]
  fn offset_grows_the_reference() {
    let r = reference();
    let out = round_to_nearest_edge(r, Vec2::new(2.0, 1.0), Vec2::new(11.0, 0.0));
    assert_eq!(out, Vec2::new(12.0, 0.0));
    let inside = round_to_nearest_edge(r, Vec2::new(-1.0, -1.0), Vec2::new(0.0, 4.5));
    assert_eq!(inside, Vec2::new(0.0, 4.0));
  }

  #[test]
  fn corner_ties_resolve_left_right_bottom_top() {
    let r = ZoneRect::new(Vec2::ZERO, Vec2::ONE);
    // Exactly on the bottom-left corner: left wins, y untouched.
    assert_eq!(
      snap_to_nearest_edge(r, Vec2::ZERO, Vec2::new(-1.0, -1.0)),
      (Edge::Left, Vec2::new(-1.0, -1.0))
    );
    // Top-right corner region: right beats top.
    assert_eq!(
      snap_to_nearest_edge(r, Vec2::ZERO, Vec2::new(0.5, 0.5)).0,
      Edge::Right
    );
    // Bottom beats top at the center of a wide rectangle.
    assert_eq!(
      snap_to_nearest_edge(reference(), Vec2::ZERO, Vec2::ZERO).0,
      Edge::Bottom
    );
  }

  #[test]
  fn snapped_points_sit_on_exactly_one_axis_boundary() {
    let r = ZoneRect::new(Vec2::new(4.0, -3.0), Vec2::new(6.0, 2.5));
    let offsets = [Vec2::ZERO, Vec2::new(1.0, 2.0), Vec2::new(-0.5, -0.5)];
    let points = [
      Vec2::new(0.0, 0.0),
      Vec2::new(20.0, -3.0),
      Vec2::new(4.0, -30.0),
      Vec2::new(9.9, -0.6),
      Vec2::new(-1.5, -5.4),
    ];
    for offset in offsets {
      for point in points {
        let out = round_to_nearest_edge(r, offset, point);
        on_boundary_along_one_axis(r, offset, point, out);
      }
    }
  }

  #[test]
  fn movement_axes_follow_flush_edges() {
    let r = reference();
    let half = Vec2::new(1.0, 1.0);
    // Flush against the right edge from outside.
    let right = valid_movement_axes(r, half, Vec2::new(11.0, 2.0));
    assert_eq!(
      right,
      MovementAxes {
        flush_x: true,
        flush_y: false
      }
    );
    assert_eq!(right.slide_directions(), [Some(Vec2::Y), None]);

    // Outer corner: flush on both.
    let corner = valid_movement_axes(r, half, Vec2::new(-11.0, 6.0));
    assert!(corner.flush_x && corner.flush_y);

    // Inside, away from every edge.
    assert!(valid_movement_axes(r, -half, Vec2::ZERO).is_free());
    // Inside and flush against the top.
    let top = valid_movement_axes(r, -half, Vec2::new(2.0, 4.0));
    assert_eq!(top.slide_directions(), [None, Some(Vec2::X)]);
  }
}
