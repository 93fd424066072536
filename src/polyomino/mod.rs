//! Polyomino contraction with neighbor conservation.
//!
//! A shape read from a 0/1 grid is folded step by step: an arm of tiles
//! hinged at a joint tile is translated and rotated by quarter turns so that
//! the mean distance between tiles shrinks, while every tile stays adjacent
//! to all the tiles it touched originally.

mod contraction;
mod rotation;
mod shape;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use contraction::{
    conserves_relation, Contraction, ContractionConfig, Contractor, Fold, Pivot,
};
pub use rotation::QuarterTurn;
pub use shape::Polyomino;
