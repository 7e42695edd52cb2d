//! Outline of a union of axis-aligned rectangles.
//!
//! Used by debug drawing to show the combined camera footprint of a zone and
//! everything nested under it. The walk is deterministic and bounded: every
//! step follows a boundary edge of the union from one corner to the next, so
//! it either closes the loop or gives up with [`Perimeter::Untraceable`].

use std::collections::HashSet;

use bevy::math::Vec2;

use crate::bounds::ZoneRect;

/// Result of tracing a set of rectangles.
#[derive(Clone, Debug, PartialEq)]
pub enum Perimeter {
  /// Corners of the outer boundary, counter-clockwise, starting at the
  /// lowest-x (then lowest-y) corner. The last point connects back to the
  /// first. Empty for empty input.
  Polygon(Vec<Vec2>),
  /// The union is disconnected, or its outer boundary touches itself at a
  /// single point. Nothing should be drawn.
  Untraceable,
}

impl Perimeter {
  /// Outline points, empty when untraceable.
  pub fn points(&self) -> &[Vec2] {
    match self {
      Perimeter::Polygon(points) => points,
      Perimeter::Untraceable => &[],
    }
  }

  pub fn into_points(self) -> Vec<Vec2> {
    match self {
      Perimeter::Polygon(points) => points,
      Perimeter::Untraceable => Vec::new(),
    }
  }

  #[inline]
  pub fn is_traceable(&self) -> bool {
    matches!(self, Perimeter::Polygon(_))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
  Horizontal,
  Vertical,
}

/// One side of an input rectangle. `fixed` is the shared coordinate,
/// `from..to` the span along the other axis.
#[derive(Clone, Copy, Debug)]
struct Edge {
  axis: Axis,
  fixed: f32,
  from: f32,
  to: f32,
}

fn edges_of(rect: &ZoneRect) -> [Edge; 4] {
  let (min, max) = (rect.min(), rect.max());
  let h = |y| Edge {
    axis: Axis::Horizontal,
    fixed: y,
    from: min.x,
    to: max.x,
  };
  let v = |x| Edge {
    axis: Axis::Vertical,
    fixed: x,
    from: min.y,
    to: max.y,
  };
  [h(min.y), h(max.y), v(min.x), v(max.x)]
}

/// Where a horizontal and a vertical edge cross through each other's interior.
fn crossing(h: &Edge, v: &Edge) -> Option<Vec2> {
  let x_inside = v.fixed > h.from && v.fixed < h.to;
  let y_inside = h.fixed > v.from && h.fixed < v.to;
  (x_inside && y_inside).then(|| Vec2::new(v.fixed, h.fixed))
}

/// Hashable coordinate key; -0.0 and 0.0 collapse.
fn key(p: Vec2) -> (u32, u32) {
  ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Smallest gap between distinct values, used to size coverage probes.
fn min_gap(mut values: Vec<f32>) -> f32 {
  values.sort_by(f32::total_cmp);
  values.dedup();
  values
    .windows(2)
    .map(|w| w[1] - w[0])
    .fold(f32::INFINITY, f32::min)
}

/// Coverage of the four diagonal neighborhoods of a point, in the order
/// up-right, up-left, down-left, down-right.
#[derive(Clone, Copy, Debug)]
struct Quadrants([bool; 4]);

impl Quadrants {
  fn count(&self) -> usize {
    self.0.iter().filter(|&&c| c).count()
  }

  /// Two covered quadrants touching only at the point itself.
  fn is_pinch(&self) -> bool {
    let [ur, ul, dl, dr] = self.0;
    self.count() == 2 && ((ur && dl) || (ul && dr))
  }

  fn is_corner(&self) -> bool {
    matches!(self.count(), 1 | 3)
  }

  /// Signed unit step along `axis` that stays on the boundary.
  fn exit(&self, axis: Axis) -> Option<f32> {
    let [ur, ul, dl, dr] = self.0;
    let (positive, negative) = match axis {
      Axis::Horizontal => (ur != dr, ul != dl),
      Axis::Vertical => (ur != ul, dr != dl),
    };
    match (positive, negative) {
      (true, false) => Some(1.0),
      (false, true) => Some(-1.0),
      _ => None,
    }
  }
}

struct Coverage<'a> {
  rects: &'a [ZoneRect],
  probe: Vec2,
}

impl Coverage<'_> {
  fn covered(&self, p: Vec2) -> bool {
    self.rects.iter().any(|r| r.contains_strict(p))
  }

  fn quadrants(&self, p: Vec2) -> Quadrants {
    let Vec2 { x: ex, y: ey } = self.probe;
    Quadrants([
      self.covered(p + Vec2::new(ex, ey)),
      self.covered(p + Vec2::new(-ex, ey)),
      self.covered(p + Vec2::new(-ex, -ey)),
      self.covered(p + Vec2::new(ex, -ey)),
    ])
  }
}

/// Candidate boundary vertices: exterior corners plus edge crossings,
/// deduplicated by exact coordinate.
fn candidate_vertices(rects: &[ZoneRect]) -> Vec<Vec2> {
  let mut seen = HashSet::new();
  let mut out = Vec::new();
  let mut push = |p: Vec2| {
    if seen.insert(key(p)) {
      out.push(p);
    }
  };

  for (i, rect) in rects.iter().enumerate() {
    for corner in rect.corners() {
      let buried = rects
        .iter()
        .enumerate()
        .any(|(j, other)| j != i && other.contains_strict(corner));
      if !buried {
        push(corner);
      }
    }
  }

  let edges: Vec<Edge> = rects.iter().flat_map(edges_of).collect();
  let (horizontal, vertical): (Vec<&Edge>, Vec<&Edge>) =
    edges.iter().partition(|e| e.axis == Axis::Horizontal);
  for h in &horizontal {
    for v in &vertical {
      if let Some(p) = crossing(h, v) {
        push(p);
      }
    }
  }
  out
}

/// Even-odd ray cast.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
  let n = polygon.len();
  if n < 3 {
    return false;
  }
  let mut inside = false;
  let mut j = n - 1;
  for i in 0..n {
    let vi = polygon[i];
    let vj = polygon[j];
    if ((vi.y > point.y) != (vj.y > point.y))
      && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
    {
      inside = !inside;
    }
    j = i;
  }
  inside
}

/// Twice the signed area; positive for counter-clockwise winding.
fn signed_area2(points: &[Vec2]) -> f32 {
  let n = points.len();
  (0..n)
    .map(|i| points[i].perp_dot(points[(i + 1) % n]))
    .sum()
}

/// Nearest vertex from `from` along `axis` in direction `sign`.
fn next_along(vertices: &[Vec2], from: Vec2, axis: Axis, sign: f32) -> Option<usize> {
  vertices
    .iter()
    .enumerate()
    .filter_map(|(i, v)| {
      let delta = match axis {
        Axis::Horizontal if v.y == from.y => v.x - from.x,
        Axis::Vertical if v.x == from.x => v.y - from.y,
        _ => return None,
      };
      (delta * sign > 0.0).then_some((i, delta.abs()))
    })
    .min_by(|a, b| a.1.total_cmp(&b.1))
    .map(|(i, _)| i)
}

/// True when `p` lies on the axis-aligned segment `a..b`, endpoints excluded.
fn strictly_between(p: Vec2, a: Vec2, b: Vec2) -> bool {
  if a.y == b.y {
    p.y == a.y && p.x > a.x.min(b.x) && p.x < a.x.max(b.x)
  } else {
    p.x == a.x && p.y > a.y.min(b.y) && p.y < a.y.max(b.y)
  }
}

/// Traces the outer boundary of the union of `rects`.
///
/// Degenerate rectangles (zero width or height) contribute nothing.
pub fn trace(rects: &[ZoneRect]) -> Perimeter {
  let rects: Vec<ZoneRect> = rects.iter().copied().filter(|r| !r.is_degenerate()).collect();
  if rects.is_empty() {
    return Perimeter::Polygon(Vec::new());
  }

  let xs = rects.iter().flat_map(|r| [r.min().x, r.max().x]).collect();
  let ys = rects.iter().flat_map(|r| [r.min().y, r.max().y]).collect();
  let coverage = Coverage {
    rects: &rects,
    probe: Vec2::new(min_gap(xs), min_gap(ys)) * 0.25,
  };

  // Keep only true corners of the union: straight boundary points and
  // interior points drop out here.
  let mut vertices = Vec::new();
  let mut quadrants = Vec::new();
  let mut pinches = Vec::new();
  for p in candidate_vertices(&rects) {
    let q = coverage.quadrants(p);
    if q.is_pinch() {
      pinches.push(p);
    } else if q.is_corner() {
      vertices.push(p);
      quadrants.push(q);
    }
  }

  let Some(start) = (0..vertices.len()).min_by(|&a, &b| {
    let (pa, pb) = (vertices[a], vertices[b]);
    pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
  }) else {
    return Perimeter::Untraceable;
  };

  let mut visited = vec![false; vertices.len()];
  let mut walk = vec![start];
  visited[start] = true;
  let mut current = start;
  let mut axis = Axis::Horizontal;
  loop {
    let Some(sign) = quadrants[current].exit(axis) else {
      log::debug!("no boundary exit at {}; untraceable", vertices[current]);
      return Perimeter::Untraceable;
    };
    let Some(next) = next_along(&vertices, vertices[current], axis, sign) else {
      log::debug!("open boundary at {}; untraceable", vertices[current]);
      return Perimeter::Untraceable;
    };
    if let Some(p) = pinches
      .iter()
      .find(|&&p| strictly_between(p, vertices[current], vertices[next]))
    {
      log::debug!("perimeter pinches at {p}; untraceable");
      return Perimeter::Untraceable;
    }
    if next == start {
      break;
    }
    if visited[next] {
      log::debug!("boundary revisits {}; untraceable", vertices[next]);
      return Perimeter::Untraceable;
    }
    visited[next] = true;
    walk.push(next);
    current = next;
    axis = match axis {
      Axis::Horizontal => Axis::Vertical,
      Axis::Vertical => Axis::Horizontal,
    };
  }

  let mut points: Vec<Vec2> = walk.iter().map(|&i| vertices[i]).collect();

  // Corners left over are either holes (inside the outline) or a separate
  // island, which cannot be drawn as one closed loop.
  // Pinches between holes sit inside the outline and do not matter.
  let island = vertices
    .iter()
    .zip(&visited)
    .filter(|&(_, &seen)| !seen)
    .map(|(&p, _)| p)
    .chain(pinches.iter().copied())
    .any(|p| !point_in_polygon(p, &points));
  if island {
    log::debug!("rectangle union is disconnected; untraceable");
    return Perimeter::Untraceable;
  }

  if signed_area2(&points) < 0.0 {
    points[1..].reverse();
  }
  Perimeter::Polygon(points)
}
