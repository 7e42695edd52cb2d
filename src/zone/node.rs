//! Zone and marker node data.

use std::fmt;

use bevy::color::Color;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::bounds::ZoneRect;
use crate::config::ViewportConfig;
use crate::error::ConfigurationError;

/// Alpha used for all zone debug colors.
pub const ZONE_COLOR_ALPHA: f32 = 0.4;

/// Default zone footprint.
pub const DEFAULT_ZONE_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// Default entrance/exit footprint.
pub const DEFAULT_MARKER_SIZE: Vec2 = Vec2::new(2.0, 2.0);

/// Stable handle to a node of a [`super::ZoneGraph`].
///
/// Handles are never reused: a removed slot bumps its generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
  pub(crate) index: u32,
  pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}v{}", self.index, self.generation)
  }
}

/// Which axes of actor motion drive the camera inside a zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollMode {
  /// Camera tracks the actor's x, y comes from the zone.
  #[default]
  Horizontal,
  /// Camera tracks the actor's y, x comes from the zone.
  Vertical,
  /// Camera tracks both axes.
  FollowActor,
  /// Camera sits on the zone.
  Fixed,
}

impl ScrollMode {
  /// Projects a configured camera offset onto the axes this mode does not
  /// already drive from the actor.
  #[inline]
  pub fn project_offset(self, offset: Vec2) -> Vec2 {
    match self {
      ScrollMode::Horizontal => Vec2::new(0.0, offset.y),
      ScrollMode::Vertical => Vec2::new(offset.x, 0.0),
      ScrollMode::FollowActor | ScrollMode::Fixed => offset,
    }
  }

  /// Debug color used when a zone has no override.
  pub fn color(self) -> Color {
    match self {
      ScrollMode::Horizontal => Color::srgba(0.2, 0.2, 1.0, ZONE_COLOR_ALPHA),
      ScrollMode::Vertical => Color::srgba(1.0, 0.2, 0.2, ZONE_COLOR_ALPHA),
      ScrollMode::FollowActor => Color::srgba(0.2, 1.0, 0.2, ZONE_COLOR_ALPHA),
      ScrollMode::Fixed => Color::srgba(0.2, 0.2, 0.2, ZONE_COLOR_ALPHA),
    }
  }
}

/// Shared placement capability of zones and markers.
pub trait Placement {
  fn position(&self) -> Vec2;
  fn set_position(&mut self, position: Vec2);
  /// Full width and height.
  fn size(&self) -> Vec2;
  /// When set, placement tooling leaves the node where it is.
  fn snap_lock(&self) -> bool;

  fn local_bounds(&self) -> ZoneRect {
    ZoneRect::from_size(self.position(), self.size())
  }
}

fn validate_size(size: Vec2) -> Result<(), ConfigurationError> {
  if size.is_finite() && size.x > 0.0 && size.y > 0.0 {
    Ok(())
  } else {
    Err(ConfigurationError::NonPositiveSize { size })
  }
}

/// An axis-aligned region with a camera scroll policy.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
  pub position: Vec2,
  pub size: Vec2,
  pub scroll_mode: ScrollMode,
  pub camera_offset: Vec2,
  /// Lock cameras to edge midpoints when leaving this zone.
  pub force_edge_center_transitions: bool,
  pub snap_lock: bool,
  pub draw: bool,
  pub color_override: Option<Color>,
}

impl Default for Zone {
  fn default() -> Self {
    Self {
      position: Vec2::ZERO,
      size: DEFAULT_ZONE_SIZE,
      scroll_mode: ScrollMode::default(),
      camera_offset: Vec2::ZERO,
      force_edge_center_transitions: false,
      snap_lock: false,
      draw: true,
      color_override: None,
    }
  }
}

impl Zone {
  pub fn new(position: Vec2, size: Vec2) -> Self {
    Self {
      position,
      size,
      ..Default::default()
    }
  }

  pub fn with_scroll_mode(mut self, scroll_mode: ScrollMode) -> Self {
    self.scroll_mode = scroll_mode;
    self
  }

  pub fn with_camera_offset(mut self, offset: Vec2) -> Self {
    self.camera_offset = offset;
    self
  }

  pub fn with_edge_center_transitions(mut self, force: bool) -> Self {
    self.force_edge_center_transitions = force;
    self
  }

  pub fn with_snap_lock(mut self, lock: bool) -> Self {
    self.snap_lock = lock;
    self
  }

  pub fn validate(&self) -> Result<(), ConfigurationError> {
    validate_size(self.size)
  }

  /// Camera offset restricted to the axes the scroll mode leaves free.
  #[inline]
  pub fn camera_offset_for_mode(&self) -> Vec2 {
    self.scroll_mode.project_offset(self.camera_offset)
  }

  /// True when the effective offset has components on both axes.
  #[inline]
  pub fn has_diagonal_offset(&self) -> bool {
    let offset = self.camera_offset_for_mode();
    offset.x != 0.0 && offset.y != 0.0
  }

  /// Area the camera may occupy while this zone is active.
  ///
  /// One camera footprint around the (offset) zone center; follow zones add
  /// their own extent on top.
  pub fn camera_bounds(&self, viewport: &ViewportConfig) -> ZoneRect {
    let local = self.local_bounds();
    let camera = viewport.camera_half_extents();
    let half_extents = match self.scroll_mode {
      ScrollMode::FollowActor => local.half_extents + camera,
      _ => camera,
    };
    ZoneRect::new(local.center + self.camera_offset_for_mode(), half_extents)
  }

  pub fn debug_color(&self) -> Color {
    self.color_override.unwrap_or(self.scroll_mode.color())
  }

  /// Assigns a random override color, keeping the shared alpha.
  pub fn randomize_color(&mut self) {
    self.color_override = Some(Color::srgba(
      rand::random::<f32>(),
      rand::random::<f32>(),
      rand::random::<f32>(),
      ZONE_COLOR_ALPHA,
    ));
  }
}

impl Placement for Zone {
  fn position(&self) -> Vec2 {
    self.position
  }

  fn set_position(&mut self, position: Vec2) {
    self.position = position;
  }

  fn size(&self) -> Vec2 {
    self.size
  }

  fn snap_lock(&self) -> bool {
    self.snap_lock
  }
}

/// What an entrance moves when the actor passes through it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntranceStyle {
  /// Camera and actor.
  Full,
  /// Actor only.
  Actor,
  /// Camera only.
  #[default]
  Camera,
}

impl EntranceStyle {
  pub fn moves_camera(self) -> bool {
    matches!(self, EntranceStyle::Full | EntranceStyle::Camera)
  }

  pub fn moves_actor(self) -> bool {
    matches!(self, EntranceStyle::Full | EntranceStyle::Actor)
  }
}

/// Marker on a zone boundary that teleports the camera and/or actor into
/// the owning zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Entrance {
  pub position: Vec2,
  pub size: Vec2,
  pub style: EntranceStyle,
  pub to_edge_center: bool,
  pub snap_lock: bool,
}

impl Default for Entrance {
  fn default() -> Self {
    Self {
      position: Vec2::ZERO,
      size: DEFAULT_MARKER_SIZE,
      style: EntranceStyle::default(),
      to_edge_center: true,
      snap_lock: false,
    }
  }
}

impl Entrance {
  pub fn new(position: Vec2) -> Self {
    Self {
      position,
      ..Default::default()
    }
  }

  pub fn with_style(mut self, style: EntranceStyle) -> Self {
    self.style = style;
    self
  }

  pub fn with_edge_center(mut self, to_edge_center: bool) -> Self {
    self.to_edge_center = to_edge_center;
    self
  }
}

impl Placement for Entrance {
  fn position(&self) -> Vec2 {
    self.position
  }

  fn set_position(&mut self, position: Vec2) {
    self.position = position;
  }

  fn size(&self) -> Vec2 {
    self.size
  }

  fn snap_lock(&self) -> bool {
    self.snap_lock
  }
}

/// Marker on a zone boundary that asks the host to leave the level.
#[derive(Clone, Debug, PartialEq)]
pub struct Exit {
  pub position: Vec2,
  pub size: Vec2,
  /// Scene the host should load.
  pub scene: String,
  pub snap_lock: bool,
}

impl Exit {
  pub fn new(position: Vec2, scene: impl Into<String>) -> Self {
    Self {
      position,
      size: DEFAULT_MARKER_SIZE,
      scene: scene.into(),
      snap_lock: false,
    }
  }
}

impl Placement for Exit {
  fn position(&self) -> Vec2 {
    self.position
  }

  fn set_position(&mut self, position: Vec2) {
    self.position = position;
  }

  fn size(&self) -> Vec2 {
    self.size
  }

  fn snap_lock(&self) -> bool {
    self.snap_lock
  }
}

/// Payload of a graph node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
  Zone(Zone),
  Entrance(Entrance),
  Exit(Exit),
}

impl NodeKind {
  pub fn as_zone(&self) -> Option<&Zone> {
    match self {
      NodeKind::Zone(zone) => Some(zone),
      _ => None,
    }
  }

  pub fn as_zone_mut(&mut self) -> Option<&mut Zone> {
    match self {
      NodeKind::Zone(zone) => Some(zone),
      _ => None,
    }
  }

  #[inline]
  pub fn is_zone(&self) -> bool {
    matches!(self, NodeKind::Zone(_))
  }

  #[inline]
  pub fn is_marker(&self) -> bool {
    !self.is_zone()
  }

  pub fn validate(&self) -> Result<(), ConfigurationError> {
    validate_size(self.size())
  }

  /// Replaces the full size, rejecting sizes that are not positive.
  pub fn set_size(&mut self, size: Vec2) -> Result<(), ConfigurationError> {
    validate_size(size)?;
    match self {
      NodeKind::Zone(zone) => zone.size = size,
      NodeKind::Entrance(entrance) => entrance.size = size,
      NodeKind::Exit(exit) => exit.size = size,
    }
    Ok(())
  }

  fn placement(&self) -> &dyn Placement {
    match self {
      NodeKind::Zone(zone) => zone,
      NodeKind::Entrance(entrance) => entrance,
      NodeKind::Exit(exit) => exit,
    }
  }

  fn placement_mut(&mut self) -> &mut dyn Placement {
    match self {
      NodeKind::Zone(zone) => zone,
      NodeKind::Entrance(entrance) => entrance,
      NodeKind::Exit(exit) => exit,
    }
  }
}

impl Placement for NodeKind {
  fn position(&self) -> Vec2 {
    self.placement().position()
  }

  fn set_position(&mut self, position: Vec2) {
    self.placement_mut().set_position(position);
  }

  fn size(&self) -> Vec2 {
    self.placement().size()
  }

  fn snap_lock(&self) -> bool {
    self.placement().snap_lock()
  }
}

impl From<Zone> for NodeKind {
  fn from(zone: Zone) -> Self {
    NodeKind::Zone(zone)
  }
}

impl From<Entrance> for NodeKind {
  fn from(entrance: Entrance) -> Self {
    NodeKind::Entrance(entrance)
  }
}

impl From<Exit> for NodeKind {
  fn from(exit: Exit) -> Self {
    NodeKind::Exit(exit)
  }
}
