pub mod adjacency;
pub mod bimap;
pub mod error;
pub mod network;
pub mod polyomino;
pub mod position;

pub use adjacency::AdjacencyIndex;
pub use bimap::BidirectionalMap;
pub use error::{BiMapError, GraphError, ShapeError};
pub use network::{Network, Node, NodeId};
pub use polyomino::{Contraction, ContractionConfig, Contractor, Polyomino};
pub use position::{Direction, Neighborhood, Position};
