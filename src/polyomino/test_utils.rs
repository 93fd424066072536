use super::{conserves_relation, Contraction, Polyomino};
use crate::{Direction, Neighborhood, Position};
use ndarray::Array2;
use rand::prelude::*;
use std::collections::HashSet;
use tracing::warn;

/// Configuration for random shape generation
#[derive(Debug, Clone)]
pub struct ShapeConfig {
    /// Number of tiles in each generated shape (at least one).
    pub tiles: usize,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self { tiles: 12 }
    }
}

/// Generates random orthogonally connected polyominoes as 0/1 grids
pub struct ShapeGenerator {
    config: ShapeConfig,
    rng: StdRng,
}

impl ShapeGenerator {
    pub fn new(config: ShapeConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(config: ShapeConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Grows a shape one tile at a time from a random existing tile
    pub fn generate(&mut self) -> Array2<u8> {
        let mut positions = vec![Position::new(0, 0)];
        let mut occupied: HashSet<Position> = positions.iter().copied().collect();

        while positions.len() < self.config.tiles {
            let from = positions[self.rng.gen_range(0..positions.len())];
            let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
            let next = from.convert_direction(direction);
            if occupied.insert(next) {
                positions.push(next);
            }
        }

        Polyomino::with_positions(positions)
            .to_grid()
            .expect("generated shapes span at most `tiles` cells per axis")
            .mapv(|tile| u8::from(tile != 0))
    }

    pub fn generate_batch(&mut self, count: usize) -> Vec<Array2<u8>> {
        (0..count).map(|_| self.generate()).collect()
    }
}

/// Checks that a contraction kept every tile, conserved every original
/// neighbor relation and did not spread the shape out.
pub fn validate_contraction(contraction: &Contraction, neighborhood: Neighborhood) -> bool {
    let Contraction {
        original, shape, ..
    } = contraction;

    if original.len() != shape.len() {
        warn!(
            before = original.len(),
            after = shape.len(),
            "contraction changed the tile count"
        );
        return false;
    }

    let distinct: HashSet<Position> = shape.positions().iter().copied().collect();
    if distinct.len() != shape.len() {
        warn!("contraction stacked two tiles on one cell");
        return false;
    }

    let relation = original.relation(neighborhood);
    if !conserves_relation(&relation, shape, neighborhood) {
        warn!(?shape, "contraction broke an original neighbor relation");
        return false;
    }

    if shape.mean_distance() > original.mean_distance() {
        warn!(
            before = original.mean_distance(),
            after = shape.mean_distance(),
            "contraction increased the mean distance"
        );
        return false;
    }

    true
}
