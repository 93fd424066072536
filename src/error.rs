use crate::NodeId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0:?} does not belong to this network")]
    UnknownNode(NodeId),
    #[error("Node {0:?} is not a tracked neighbor")]
    NotANeighbor(NodeId),
    #[error("Node {0:?} cannot be connected to itself")]
    SelfConnection(NodeId),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiMapError {
    #[error("Key not found")]
    KeyNotFound,
    #[error("Value not found")]
    ValueNotFound,
    #[error("Key is already mapped to a different value")]
    KeyCollision,
    #[error("Value is already mapped from a different key")]
    ValueCollision,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Grid contains no cells with value {target}")]
    Empty { target: u8 },
    #[error("Shape has no tiles")]
    NoTiles,
    #[error("Bounding box of {width}x{height} cells is too large to render")]
    TooLarge { width: u64, height: u64 },
}
