//! Arena-backed tree of zones and markers.

use bevy::math::Vec2;
use bevy::prelude::Resource;

use super::node::{NodeId, NodeKind, Placement, Zone};
use crate::bounds::ZoneRect;
use crate::config::ViewportConfig;
use crate::error::{ConfigurationError, ZoneGraphError};
use crate::snapping::{MovementAxes, round_to_nearest_edge, valid_movement_axes};

/// A node together with its tree edges.
#[derive(Clone, Debug)]
pub struct ZoneNode {
  pub kind: NodeKind,
  parent: Option<NodeId>,
  children: Vec<NodeId>,
}

impl ZoneNode {
  #[inline]
  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  #[inline]
  pub fn children(&self) -> &[NodeId] {
    &self.children
  }
}

#[derive(Clone, Debug, Default)]
struct Slot {
  generation: u32,
  node: Option<ZoneNode>,
}

/// Tree of zones, each owning child zones and entrance/exit markers.
///
/// Parents are stored as ids, so removing a node never leaves a dangling
/// owner: [`ZoneGraph::remove`] refuses nodes that still have children.
#[derive(Resource, Clone, Debug, Default)]
pub struct ZoneGraph {
  slots: Vec<Slot>,
  free: Vec<u32>,
  len: usize,
}

type GraphResult<T> = Result<T, ZoneGraphError>;

impl ZoneGraph {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn contains(&self, id: NodeId) -> bool {
    self.get(id).is_some()
  }

  pub fn get(&self, id: NodeId) -> Option<&ZoneNode> {
    self
      .slots
      .get(id.index as usize)
      .filter(|slot| slot.generation == id.generation)
      .and_then(|slot| slot.node.as_ref())
  }

  pub fn get_mut(&mut self, id: NodeId) -> Option<&mut ZoneNode> {
    self
      .slots
      .get_mut(id.index as usize)
      .filter(|slot| slot.generation == id.generation)
      .and_then(|slot| slot.node.as_mut())
  }

  fn node(&self, id: NodeId) -> GraphResult<&ZoneNode> {
    self.get(id).ok_or(ZoneGraphError::UnknownNode(id))
  }

  fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut ZoneNode> {
    self.get_mut(id).ok_or(ZoneGraphError::UnknownNode(id))
  }

  /// Node payload.
  pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
    self.get(id).map(|node| &node.kind)
  }

  pub fn zone(&self, id: NodeId) -> Option<&Zone> {
    self.kind(id).and_then(NodeKind::as_zone)
  }

  /// Direct access to a zone. Resize through [`ZoneGraph::set_size`] so the
  /// new size is validated.
  pub fn zone_mut(&mut self, id: NodeId) -> Option<&mut Zone> {
    self.get_mut(id).and_then(|node| node.kind.as_zone_mut())
  }

  fn require_zone(&self, id: NodeId) -> GraphResult<&Zone> {
    self
      .node(id)?
      .kind
      .as_zone()
      .ok_or(ZoneGraphError::NotAZone(id))
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.get(id).and_then(|node| node.parent)
  }

  pub fn children(&self, id: NodeId) -> &[NodeId] {
    self.get(id).map_or(&[], |node| node.children.as_slice())
  }

  /// Iterates live nodes in slot order.
  pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ZoneNode)> + '_ {
    self.slots.iter().enumerate().filter_map(|(index, slot)| {
      slot.node.as_ref().map(|node| {
        (
          NodeId {
            index: index as u32,
            generation: slot.generation,
          },
          node,
        )
      })
    })
  }

  /// Iterates live zones (markers skipped).
  pub fn zones(&self) -> impl Iterator<Item = (NodeId, &Zone)> + '_ {
    self
      .iter()
      .filter_map(|(id, node)| node.kind.as_zone().map(|zone| (id, zone)))
  }

  /// Zones without a parent.
  pub fn roots(&self) -> Vec<NodeId> {
    self
      .iter()
      .filter(|(_, node)| node.parent.is_none())
      .map(|(id, _)| id)
      .collect()
  }

  /// Walks parent links upwards, nearest ancestor first.
  pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(self.parent(id), move |&current| self.parent(current))
  }

  /// Every node below `id` in depth-first pre-order, `id` excluded.
  pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
    while let Some(current) = stack.pop() {
      out.push(current);
      stack.extend(self.children(current).iter().rev().copied());
    }
    out
  }

  /// Zones whose own bounds contain `point`.
  pub fn zones_containing(&self, point: Vec2) -> impl Iterator<Item = NodeId> + '_ {
    self
      .zones()
      .filter(move |(_, zone)| zone.local_bounds().contains(point))
      .map(|(id, _)| id)
  }

  fn allocate(&mut self, node: ZoneNode) -> NodeId {
    self.len += 1;
    if let Some(index) = self.free.pop() {
      let slot = &mut self.slots[index as usize];
      slot.node = Some(node);
      return NodeId {
        index,
        generation: slot.generation,
      };
    }
    self.slots.push(Slot {
      generation: 0,
      node: Some(node),
    });
    NodeId {
      index: (self.slots.len() - 1) as u32,
      generation: 0,
    }
  }

  /// Adds a zone, optionally under an existing parent zone.
  pub fn insert_zone(&mut self, zone: Zone, parent: Option<NodeId>) -> GraphResult<NodeId> {
    self.insert(NodeKind::Zone(zone), parent)
  }

  /// Adds an entrance or exit under its owning zone.
  pub fn insert_marker(&mut self, marker: impl Into<NodeKind>, owner: NodeId) -> GraphResult<NodeId> {
    self.insert(marker.into(), Some(owner))
  }

  /// Adds any node. Markers must be given an owning zone.
  pub fn insert(&mut self, kind: NodeKind, parent: Option<NodeId>) -> GraphResult<NodeId> {
    kind.validate().inspect_err(|e| log::warn!("rejected node: {e}"))?;
    match parent {
      Some(parent) => self.check_owner(parent)?,
      None if kind.is_marker() => {
        log::warn!("rejected marker without an owning zone");
        return Err(ConfigurationError::MarkerWithoutZone.into());
      }
      None => {}
    }
    let id = self.allocate(ZoneNode {
      kind,
      parent,
      children: Vec::new(),
    });
    if let Some(parent) = parent {
      self.node_mut(parent)?.children.push(id);
    }
    Ok(id)
  }

  fn check_owner(&self, parent: NodeId) -> GraphResult<()> {
    if self.node(parent)?.kind.is_marker() {
      return Err(ConfigurationError::MarkerCannotOwnChildren(parent).into());
    }
    Ok(())
  }

  /// Moves `child` (and its subtree) under `parent`.
  ///
  /// Rejected when `child` is `parent` itself or one of its ancestors.
  pub fn attach_child(&mut self, parent: NodeId, child: NodeId) -> GraphResult<()> {
    self.node(child)?;
    self.check_owner(parent)?;
    if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
      log::warn!("rejected attach of {child} under {parent}: cycle");
      return Err(ZoneGraphError::Cycle { parent, child });
    }
    self.unlink(child);
    self.node_mut(child)?.parent = Some(parent);
    self.node_mut(parent)?.children.push(child);
    Ok(())
  }

  /// Turns a zone into a root. Markers cannot be detached from their owner.
  pub fn detach(&mut self, id: NodeId) -> GraphResult<()> {
    if self.node(id)?.kind.is_marker() {
      return Err(ConfigurationError::MarkerWithoutZone.into());
    }
    self.unlink(id);
    self.node_mut(id)?.parent = None;
    Ok(())
  }

  fn unlink(&mut self, child: NodeId) {
    if let Some(old_parent) = self.parent(child)
      && let Some(node) = self.get_mut(old_parent)
    {
      node.children.retain(|&c| c != child);
    }
  }

  /// Removes a leaf node and returns its payload.
  ///
  /// Nodes that still own children are rejected; reparent the children or
  /// use [`ZoneGraph::remove_subtree`].
  pub fn remove(&mut self, id: NodeId) -> GraphResult<NodeKind> {
    let children = self.node(id)?.children.len();
    if children > 0 {
      return Err(ZoneGraphError::HasChildren { node: id, children });
    }
    self.unlink(id);
    let slot = &mut self.slots[id.index as usize];
    let node = slot.node.take().ok_or(ZoneGraphError::UnknownNode(id))?;
    slot.generation = slot.generation.wrapping_add(1);
    self.free.push(id.index);
    self.len -= 1;
    Ok(node.kind)
  }

  /// Removes a node together with everything below it.
  ///
  /// Returns the number of removed nodes.
  pub fn remove_subtree(&mut self, id: NodeId) -> GraphResult<usize> {
    self.node(id)?;
    let mut doomed = self.descendants(id);
    doomed.reverse();
    doomed.push(id);
    for node in &doomed {
      self.remove(*node)?;
    }
    Ok(doomed.len())
  }

  /// Moves a node to a new world position.
  pub fn set_position(&mut self, id: NodeId, position: Vec2) -> GraphResult<()> {
    self.node_mut(id)?.kind.set_position(position);
    Ok(())
  }

  /// Resizes a node, keeping its position.
  pub fn set_size(&mut self, id: NodeId, size: Vec2) -> GraphResult<()> {
    self
      .node_mut(id)?
      .kind
      .set_size(size)
      .inspect_err(|e| log::warn!("rejected resize of {id}: {e}"))?;
    Ok(())
  }

  /// Camera bounds of a zone, derived from its current state.
  pub fn camera_bounds_of(&self, id: NodeId, viewport: &ViewportConfig) -> GraphResult<ZoneRect> {
    Ok(self.require_zone(id)?.camera_bounds(viewport))
  }

  /// Camera bounds of a zone followed by every zone below it.
  pub fn descendant_camera_bounds(
    &self,
    id: NodeId,
    viewport: &ViewportConfig,
  ) -> GraphResult<Vec<ZoneRect>> {
    let mut bounds = vec![self.camera_bounds_of(id, viewport)?];
    bounds.extend(
      self
        .descendants(id)
        .into_iter()
        .filter_map(|d| self.zone(d))
        .map(|zone| zone.camera_bounds(viewport)),
    );
    Ok(bounds)
  }

  /// Reference rectangle and offset a node snaps against, if it has an owner.
  ///
  /// Zones sit outside their parent's camera bounds (offset = half size),
  /// markers sit inside their owner's camera bounds (offset = -half size).
  fn snap_frame(&self, id: NodeId, viewport: &ViewportConfig) -> GraphResult<Option<(ZoneRect, Vec2)>> {
    let node = self.node(id)?;
    let Some(parent) = node.parent else {
      return Ok(None);
    };
    let reference = self.camera_bounds_of(parent, viewport)?;
    let half = node.kind.size() * 0.5;
    let offset = if node.kind.is_zone() { half } else { -half };
    Ok(Some((reference, offset)))
  }

  /// Rounds a node's position onto the nearest edge of its owner.
  ///
  /// Returns the new position, or `None` for roots and snap-locked nodes.
  pub fn snap_to_parent(&mut self, id: NodeId, viewport: &ViewportConfig) -> GraphResult<Option<Vec2>> {
    if self.node(id)?.kind.snap_lock() {
      return Ok(None);
    }
    let Some((reference, offset)) = self.snap_frame(id, viewport)? else {
      return Ok(None);
    };
    let node = self.node_mut(id)?;
    let snapped = round_to_nearest_edge(reference, offset, node.kind.position());
    node.kind.set_position(snapped);
    Ok(Some(snapped))
  }

  /// Snaps every unlocked non-root node, parents before children.
  pub fn snap_all(&mut self, viewport: &ViewportConfig) {
    for root in self.roots() {
      for id in self.descendants(root) {
        if let Err(e) = self.snap_to_parent(id, viewport) {
          log::warn!("snap of {id} failed: {e}");
        }
      }
    }
  }

  /// Axes along which a placed node may still be dragged.
  pub fn movement_axes(&self, id: NodeId, viewport: &ViewportConfig) -> GraphResult<MovementAxes> {
    let Some((reference, offset)) = self.snap_frame(id, viewport)? else {
      return Ok(MovementAxes::default());
    };
    Ok(valid_movement_axes(
      reference,
      offset,
      self.node(id)?.kind.position(),
    ))
  }
}
