//! Axis-aligned rectangle math.
//!
//! Every zone, marker and camera footprint is a [`ZoneRect`]. The queries here
//! are pure and shared by the camera director, edge snapping and placement
//! tooling.

use bevy::math::Vec2;

use crate::zone::ScrollMode;

/// Axis-aligned rectangle stored as center and half extents.
///
/// Half extents are never negative.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ZoneRect {
  pub center: Vec2,
  pub half_extents: Vec2,
}

impl ZoneRect {
  /// Creates a rectangle from its center and half extents.
  ///
  /// Negative half extents collapse to zero, leaving a degenerate rectangle.
  #[inline]
  pub fn new(center: Vec2, half_extents: Vec2) -> Self {
    Self {
      center,
      half_extents: half_extents.max(Vec2::ZERO),
    }
  }

  /// Creates a rectangle from its center and full width/height.
  #[inline]
  pub fn from_size(center: Vec2, size: Vec2) -> Self {
    Self::new(center, size * 0.5)
  }

  /// Creates a rectangle spanning two corners.
  pub fn from_corners(a: Vec2, b: Vec2) -> Self {
    let min = a.min(b);
    let max = a.max(b);
    Self::new((min + max) * 0.5, (max - min) * 0.5)
  }

  #[inline]
  pub fn min(&self) -> Vec2 {
    self.center - self.half_extents
  }

  #[inline]
  pub fn max(&self) -> Vec2 {
    self.center + self.half_extents
  }

  #[inline]
  pub fn size(&self) -> Vec2 {
    self.half_extents * 2.0
  }

  /// Returns true when the rectangle encloses no area.
  #[inline]
  pub fn is_degenerate(&self) -> bool {
    self.half_extents.x <= 0.0 || self.half_extents.y <= 0.0
  }

  /// Grows the rectangle by `amount` on every side.
  #[inline]
  pub fn inflated(&self, amount: Vec2) -> Self {
    Self::new(self.center, (self.half_extents + amount).max(Vec2::ZERO))
  }

  /// Inclusive containment: points on the boundary are inside.
  #[inline]
  pub fn contains(&self, p: Vec2) -> bool {
    let (min, max) = (self.min(), self.max());
    p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
  }

  /// Exclusive containment: points on the boundary are outside.
  #[inline]
  pub fn contains_strict(&self, p: Vec2) -> bool {
    let (min, max) = (self.min(), self.max());
    p.x > min.x && p.x < max.x && p.y > min.y && p.y < max.y
  }

  /// Returns true when the two rectangles share a region of positive area.
  pub fn overlaps(&self, other: &ZoneRect) -> bool {
    let (a_min, a_max) = (self.min(), self.max());
    let (b_min, b_max) = (other.min(), other.max());
    a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
  }

  /// Nearest point of the rectangle to `p`.
  ///
  /// Component-wise clamp, so points already inside come back unchanged.
  #[inline]
  pub fn clamp_point(&self, p: Vec2) -> Vec2 {
    p.clamp(self.min(), self.max())
  }

  /// Corners in counter-clockwise order starting at the bottom-left.
  pub fn corners(&self) -> [Vec2; 4] {
    let (min, max) = (self.min(), self.max());
    [
      min,
      Vec2::new(max.x, min.y),
      max,
      Vec2::new(min.x, max.y),
    ]
  }

  /// Edge midpoints a camera may lock to for the given scroll mode.
  ///
  /// Order is fixed: left, right, bottom, top. Horizontal zones only expose
  /// the left/right midpoints, vertical zones only bottom/top.
  pub fn edge_centers(&self, mode: ScrollMode) -> Vec<Vec2> {
    let (min, max, c) = (self.min(), self.max(), self.center);
    let left = Vec2::new(min.x, c.y);
    let right = Vec2::new(max.x, c.y);
    let bottom = Vec2::new(c.x, min.y);
    let top = Vec2::new(c.x, max.y);
    match mode {
      ScrollMode::Horizontal => vec![left, right],
      ScrollMode::Vertical => vec![bottom, top],
      ScrollMode::FollowActor | ScrollMode::Fixed => vec![left, right, bottom, top],
    }
  }

  /// Edge midpoint closest to `target`.
  ///
  /// Ties keep the earlier midpoint in [`ZoneRect::edge_centers`] order.
  pub fn nearest_edge_center(&self, target: Vec2, mode: ScrollMode) -> Vec2 {
    let mut nearest = self.center;
    let mut nearest_distance = f32::MAX;
    for edge_center in self.edge_centers(mode) {
      let distance = edge_center.distance(target);
      if distance < nearest_distance {
        nearest_distance = distance;
        nearest = edge_center;
      }
    }
    nearest
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unit_square() -> ZoneRect {
    ZoneRect::new(Vec2::ZERO, Vec2::ONE)
  }

  #[test]
  fn contains_is_inclusive_and_strict_is_not() {
    let r = unit_square();
    assert!(r.contains(Vec2::new(1.0, 1.0)));
    assert!(r.contains(Vec2::new(-1.0, 0.3)));
    assert!(!r.contains(Vec2::new(1.01, 0.0)));

    assert!(!r.contains_strict(Vec2::new(1.0, 0.0)));
    assert!(r.contains_strict(Vec2::new(0.99, -0.99)));
  }

  #[test]
  fn clamp_point_lands_inside_and_keeps_inner_points() {
    let r = ZoneRect::new(Vec2::new(3.0, -2.0), Vec2::new(4.0, 1.5));
    let samples = [
      Vec2::new(100.0, 100.0),
      Vec2::new(-50.0, 0.0),
      Vec2::new(3.0, -2.0),
      Vec2::new(6.9, -0.6),
      Vec2::new(0.0, -30.0),
    ];
    for p in samples {
      let clamped = r.clamp_point(p);
      assert!(r.contains(clamped), "{clamped} escaped {r:?}");
      if r.contains(p) {
        assert_eq!(clamped, p);
      }
    }
    assert_eq!(r.clamp_point(Vec2::new(100.0, -2.0)), Vec2::new(7.0, -2.0));
  }

  #[test]
  fn edge_centers_follow_scroll_mode() {
    let r = unit_square();
    assert_eq!(
      r.edge_centers(ScrollMode::Horizontal),
      vec![Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)]
    );
    assert_eq!(
      r.edge_centers(ScrollMode::Vertical),
      vec![Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0)]
    );
    assert_eq!(r.edge_centers(ScrollMode::Fixed).len(), 4);
  }

  #[test]
  fn nearest_edge_center_breaks_ties_by_order() {
    let r = unit_square();
    // Equidistant from the right and top midpoints: right comes first.
    assert_eq!(
      r.nearest_edge_center(Vec2::new(5.0, 5.0), ScrollMode::FollowActor),
      Vec2::new(1.0, 0.0)
    );
    // Horizontal zones never lock to the top midpoint.
    assert_eq!(
      r.nearest_edge_center(Vec2::new(0.0, 9.0), ScrollMode::Horizontal),
      Vec2::new(-1.0, 0.0)
    );
    assert_eq!(
      r.nearest_edge_center(Vec2::new(0.1, 9.0), ScrollMode::Vertical),
      Vec2::new(0.0, 1.0)
    );
  }

  #[test]
  fn negative_extents_collapse_to_zero() {
    let r = ZoneRect::from_size(Vec2::new(3.0, 1.0), Vec2::new(-4.0, 2.0));
    assert_eq!(r.half_extents, Vec2::new(0.0, 1.0));
    assert!(r.is_degenerate());
    assert!(r.contains(Vec2::new(3.0, 0.5)));
    assert!(!r.contains(Vec2::new(4.0, 0.5)));
  }

  #[test]
  fn overlap_requires_positive_area() {
    let a = unit_square();
    let touching = ZoneRect::new(Vec2::new(2.0, 0.0), Vec2::ONE);
    let crossing = ZoneRect::new(Vec2::new(1.5, 0.5), Vec2::ONE);
    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&crossing));
  }
}
