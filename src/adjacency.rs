use crate::{GraphError, NodeId, Position};
use std::collections::HashMap;
use tracing::{debug, trace};

/// The neighbors of a single node, indexed both by where they sit and by who
/// they are.
///
/// The two maps are exact inverses: `by_position[p] == n` iff
/// `by_identity[n] == p`. Neighbors are referenced by [`NodeId`] and never
/// owned.
///
/// The position map is a cache of the neighbors' positions at insertion
/// time. Nothing watches the neighbors, so after one of them moves the owner
/// must call [`AdjacencyIndex::update`] to bring it back in line.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    by_position: HashMap<Position, NodeId>,
    by_identity: HashMap<NodeId, Position>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.by_identity.contains_key(&node)
    }

    pub fn contains_position(&self, position: Position) -> bool {
        self.by_position.contains_key(&position)
    }

    pub fn neighbor_at(&self, position: Position) -> Option<NodeId> {
        self.by_position.get(&position).copied()
    }

    /// Position recorded for `node` when it was last added or updated.
    pub fn position_of(&self, node: NodeId) -> Option<Position> {
        self.by_identity.get(&node).copied()
    }

    /// Inserts `node` at `position` without checking for an existing entry.
    ///
    /// A stale entry for `node` is dropped, and a different neighbor already
    /// recorded at `position` is evicted from both maps and returned.
    pub fn add(&mut self, node: NodeId, position: Position) -> Option<NodeId> {
        if let Some(previous) = self.by_identity.insert(node, position) {
            if previous != position {
                self.by_position.remove(&previous);
            }
        }

        let evicted = self
            .by_position
            .insert(position, node)
            .filter(|&occupant| occupant != node);

        if let Some(occupant) = evicted {
            self.by_identity.remove(&occupant);
            debug!(?occupant, ?node, ?position, "evicted neighbor sharing a position");
        }

        evicted
    }

    /// Removes `node` from both maps, returning the position it was recorded at.
    pub fn remove(&mut self, node: NodeId) -> Result<Position, GraphError> {
        let position = self
            .by_identity
            .remove(&node)
            .ok_or(GraphError::NotANeighbor(node))?;
        self.by_position.remove(&position);
        trace!(?node, ?position, "removed neighbor");
        Ok(position)
    }

    /// All current neighbors, in no particular order.
    pub fn neighbors(&self) -> Vec<NodeId> {
        self.by_identity.keys().copied().collect()
    }

    /// Rebuilds the position map from the tracked identities, asking `locate`
    /// for each neighbor's current position.
    ///
    /// Neighbors are re-added in ascending id order. When two of them now
    /// share a position the later one keeps it; the evicted ones are returned.
    pub fn update<F>(&mut self, mut locate: F) -> Vec<NodeId>
    where
        F: FnMut(NodeId) -> Position,
    {
        let mut tracked: Vec<NodeId> = self.by_identity.keys().copied().collect();
        tracked.sort_unstable();

        self.by_position.clear();
        self.by_identity.clear();

        let evicted: Vec<NodeId> = tracked
            .into_iter()
            .filter_map(|node| {
                let position = locate(node);
                self.add(node, position)
            })
            .collect();

        if !evicted.is_empty() {
            debug!(count = evicted.len(), "neighbors lost to position collisions on update");
        }

        evicted
    }

    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    /// Whether both maps are exact inverses of each other.
    pub fn is_consistent(&self) -> bool {
        self.by_position.len() == self.by_identity.len()
            && self
                .by_identity
                .iter()
                .all(|(node, position)| self.by_position.get(position) == Some(node))
    }
}
