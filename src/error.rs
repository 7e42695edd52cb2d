//! Error types for zone graph edits and settings loading.
//!
//! Only edits are fallible. Per-tick camera work never returns an error, and a
//! union outline that cannot be traced is a [`crate::perimeter::Perimeter`]
//! value rather than an error.

use std::path::PathBuf;

use bevy::math::Vec2;
use thiserror::Error;

use crate::zone::NodeId;

/// A node was built or placed in a way the zone system cannot use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
  #[error("size must be positive and finite on both axes, got {size}")]
  NonPositiveSize { size: Vec2 },
  #[error("entrance/exit markers must be owned by a zone")]
  MarkerWithoutZone,
  #[error("node {0} is a marker and cannot own children")]
  MarkerCannotOwnChildren(NodeId),
  #[error("camera speed must be finite and non-negative, got {0}")]
  InvalidCameraSpeed(f32),
  #[error("transition duration must be finite and non-negative, got {0}")]
  InvalidDuration(f32),
}

/// Rejected [`crate::zone::ZoneGraph`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneGraphError {
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),
  #[error("attaching {child} under {parent} would create a cycle")]
  Cycle { parent: NodeId, child: NodeId },
  #[error("unknown node {0}")]
  UnknownNode(NodeId),
  #[error("node {0} is not a zone")]
  NotAZone(NodeId),
  #[error("node {node} still owns {children} children; reparent or remove them first")]
  HasChildren { node: NodeId, children: usize },
}

/// Failure to read the TOML settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path:?}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to parse settings: {0}")]
  Parse(#[from] toml::de::Error),
  #[error("invalid settings: {0}")]
  Invalid(#[from] ConfigurationError),
}
