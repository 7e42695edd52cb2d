//! Zones, entrance/exit markers and the tree that owns them.

mod graph;
mod node;

#[cfg(test)]
mod tests;

pub use graph::{ZoneGraph, ZoneNode};
pub use node::{
  DEFAULT_MARKER_SIZE, DEFAULT_ZONE_SIZE, Entrance, EntranceStyle, Exit, NodeId, NodeKind,
  Placement, ScrollMode, ZONE_COLOR_ALPHA, Zone,
};
