use crate::{AdjacencyIndex, GraphError, Position};
use std::mem;

/// Handle to a node owned by a [`Network`]. Equality is node identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// A grid-positioned node together with the index of the nodes it is
/// connected to.
#[derive(Debug, Clone)]
pub struct Node {
    position: Position,
    adjacency: AdjacencyIndex,
}

impl Node {
    fn new(position: Position) -> Self {
        Self {
            position,
            adjacency: AdjacencyIndex::new(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn adjacency(&self) -> &AdjacencyIndex {
        &self.adjacency
    }

    pub fn neighbors(&self) -> Vec<NodeId> {
        self.adjacency.neighbors()
    }

    pub fn is_neighbor(&self, other: NodeId) -> bool {
        self.adjacency.contains_node(other)
    }

    pub fn is_neighbor_at(&self, position: Position) -> bool {
        self.adjacency.contains_position(position)
    }
}

/// Arena owning every node. Connections are one-directional: connecting `a`
/// to `b` records `b` in `a`'s index only.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<Node>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn add_node(&mut self, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(position));
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(id.0).ok_or(GraphError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.nodes.get_mut(id.0).ok_or(GraphError::UnknownNode(id))
    }

    pub fn position(&self, id: NodeId) -> Result<Position, GraphError> {
        Ok(self.node(id)?.position)
    }

    /// Records `other` as a neighbor of `node`, keyed by `other`'s current
    /// position. Returns `false` if it was already a neighbor.
    pub fn connect(&mut self, node: NodeId, other: NodeId) -> Result<bool, GraphError> {
        if node == other {
            return Err(GraphError::SelfConnection(node));
        }
        let position = self.position(other)?;
        let adjacency = &mut self.node_mut(node)?.adjacency;

        if adjacency.contains_node(other) {
            return Ok(false);
        }
        adjacency.add(other, position);
        Ok(true)
    }

    /// Drops `other` from `node`'s neighbors. Returns `false` if it was not a
    /// neighbor.
    pub fn disconnect(&mut self, node: NodeId, other: NodeId) -> Result<bool, GraphError> {
        self.node(other)?;
        let adjacency = &mut self.node_mut(node)?.adjacency;

        if !adjacency.contains_node(other) {
            return Ok(false);
        }
        adjacency.remove(other)?;
        Ok(true)
    }

    pub fn neighbors(&self, node: NodeId) -> Result<Vec<NodeId>, GraphError> {
        Ok(self.node(node)?.neighbors())
    }

    pub fn is_neighbor(&self, node: NodeId, other: NodeId) -> Result<bool, GraphError> {
        Ok(self.node(node)?.is_neighbor(other))
    }

    pub fn is_neighbor_at(&self, node: NodeId, position: Position) -> Result<bool, GraphError> {
        Ok(self.node(node)?.is_neighbor_at(position))
    }

    /// Moves a node and returns its previous position.
    ///
    /// Indexes that track the node keep the old position until they are
    /// refreshed with [`Network::refresh`] or [`Network::refresh_all`].
    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<Position, GraphError> {
        let node = self.node_mut(id)?;
        Ok(mem::replace(&mut node.position, position))
    }

    /// Re-reads the current position of every neighbor of `id`. Returns the
    /// neighbors dropped because they now share a position with another.
    pub fn refresh(&mut self, id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let mut adjacency = mem::take(&mut self.node_mut(id)?.adjacency);
        let nodes = &self.nodes;
        let evicted = adjacency.update(|neighbor| nodes[neighbor.0].position);
        self.nodes[id.0].adjacency = adjacency;
        Ok(evicted)
    }

    pub fn refresh_all(&mut self) -> Vec<(NodeId, NodeId)> {
        let mut evicted = Vec::new();
        for index in 0..self.nodes.len() {
            let id = NodeId(index);
            let mut adjacency = mem::take(&mut self.nodes[index].adjacency);
            let nodes = &self.nodes;
            evicted.extend(
                adjacency
                    .update(|neighbor| nodes[neighbor.0].position)
                    .into_iter()
                    .map(|lost| (id, lost)),
            );
            self.nodes[index].adjacency = adjacency;
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }
}
