use crate::{Neighborhood, Network, Position, ShapeError};
use itertools::Itertools;
use ndarray::{Array2, ArrayView2};
use std::collections::HashMap;

/// A set of grid tiles with a stable numbering.
///
/// Tile `i` keeps its number through every transformation, so two shapes
/// with the same tile count can be compared tile by tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyomino {
    positions: Vec<Position>,
    occupancy: HashMap<Position, usize>,
}

impl Polyomino {
    /// Largest bounding box, in cells, that [`Polyomino::to_grid`] renders.
    pub const MAX_GRID_CELLS: u64 = 1 << 24;

    /// Reads every cell equal to `target` as a tile, numbered in row-major
    /// order. Columns are `x`, rows are `y`.
    pub fn from_grid(grid: ArrayView2<'_, u8>, target: u8) -> Result<Self, ShapeError> {
        let positions: Vec<Position> = grid
            .indexed_iter()
            .filter(|(_, &value)| value == target)
            .map(|((row, column), _)| Position::new(column as i32, row as i32))
            .collect();

        if positions.is_empty() {
            return Err(ShapeError::Empty { target });
        }
        Self::from_positions(positions)
    }

    /// Builds a shape from tile positions in order. Repeated positions are
    /// collapsed into the first tile.
    pub fn from_positions(positions: Vec<Position>) -> Result<Self, ShapeError> {
        let positions: Vec<Position> = positions.into_iter().unique().collect();
        if positions.is_empty() {
            return Err(ShapeError::NoTiles);
        }
        Ok(Self::with_positions(positions))
    }

    /// Caller guarantees `positions` is non-empty and duplicate free.
    pub(crate) fn with_positions(positions: Vec<Position>) -> Self {
        let occupancy = positions
            .iter()
            .enumerate()
            .map(|(tile, &position)| (position, tile))
            .collect();
        Self {
            positions,
            occupancy,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn position(&self, tile: usize) -> Option<Position> {
        self.positions.get(tile).copied()
    }

    pub fn tile_at(&self, position: Position) -> Option<usize> {
        self.occupancy.get(&position).copied()
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupancy.contains_key(&position)
    }

    /// Mean Euclidean distance over every unordered pair of tiles.
    pub fn mean_distance(&self) -> f64 {
        let pairs = self.len() * self.len().saturating_sub(1) / 2;
        if pairs == 0 {
            return 0.0;
        }
        let total: f64 = self
            .positions
            .iter()
            .tuple_combinations()
            .map(|(a, b)| a.distance(b))
            .sum();
        total / pairs as f64
    }

    /// Number of tile sides not shared with another tile.
    pub fn circumference(&self) -> usize {
        self.positions
            .iter()
            .flat_map(|position| position.neighbors(Neighborhood::VonNeumann))
            .filter(|side| !self.is_occupied(*side))
            .count()
    }

    pub fn center(&self) -> (f64, f64) {
        let n = self.len() as f64;
        let (sum_x, sum_y) = self
            .positions
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + f64::from(p.x), sy + f64::from(p.y)));
        (sum_x / n, sum_y / n)
    }

    /// Smallest and largest corner of the bounding box.
    pub fn bounds(&self) -> (Position, Position) {
        let (min_x, max_x) = self
            .positions
            .iter()
            .map(|p| p.x)
            .minmax()
            .into_option()
            .unwrap_or((0, 0));
        let (min_y, max_y) = self
            .positions
            .iter()
            .map(|p| p.y)
            .minmax()
            .into_option()
            .unwrap_or((0, 0));
        (Position::new(min_x, min_y), Position::new(max_x, max_y))
    }

    /// Renders the bounding box as a grid where 0 is empty and tile `i` is
    /// written as `i + 1`.
    ///
    /// The box is measured on plain integers, without wrapping, and may hold
    /// at most [`Polyomino::MAX_GRID_CELLS`] cells.
    pub fn to_grid(&self) -> Result<Array2<usize>, ShapeError> {
        let (min, max) = self.bounds();
        let width = (i64::from(max.x) - i64::from(min.x) + 1) as u64;
        let height = (i64::from(max.y) - i64::from(min.y) + 1) as u64;

        if width.saturating_mul(height) > Self::MAX_GRID_CELLS {
            return Err(ShapeError::TooLarge { width, height });
        }

        let mut grid = Array2::zeros((height as usize, width as usize));
        for (tile, position) in self.positions.iter().enumerate() {
            let row = (i64::from(position.y) - i64::from(min.y)) as usize;
            let column = (i64::from(position.x) - i64::from(min.x)) as usize;
            grid[[row, column]] = tile + 1;
        }
        Ok(grid)
    }

    /// Network with one node per tile (node `i` is tile `i`), each connected
    /// to every occupied cell around it.
    pub fn relation(&self, neighborhood: Neighborhood) -> Network {
        let mut network = Network::with_capacity(self.len());
        let ids: Vec<_> = self
            .positions
            .iter()
            .map(|&position| network.add_node(position))
            .collect();

        for (tile, position) in self.positions.iter().enumerate() {
            for neighbor in position.neighbors(neighborhood) {
                if let Some(other) = self.tile_at(neighbor) {
                    let connected = network.connect(ids[tile], ids[other]);
                    debug_assert!(connected.is_ok(), "tiles are distinct nodes of this network");
                }
            }
        }
        network
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn square() -> Polyomino {
        Polyomino::from_grid(array![[1, 1], [1, 1]].view(), 1).unwrap()
    }

    #[test]
    fn test_from_grid_numbers_tiles_row_major() {
        let shape = Polyomino::from_grid(array![[0, 1, 1], [1, 0, 0]].view(), 1).unwrap();

        assert_eq!(shape.len(), 3);
        assert_eq!(shape.position(0), Some(Position::new(1, 0)));
        assert_eq!(shape.position(1), Some(Position::new(2, 0)));
        assert_eq!(shape.position(2), Some(Position::new(0, 1)));
        assert_eq!(shape.tile_at(Position::new(0, 1)), Some(2));
        assert!(!shape.is_occupied(Position::new(0, 0)));
    }

    #[test]
    fn test_from_grid_uses_target_value() {
        let grid = array![[2, 1], [2, 0]];
        let shape = Polyomino::from_grid(grid.view(), 2).unwrap();
        assert_eq!(shape.positions(), &[Position::new(0, 0), Position::new(0, 1)]);

        assert_eq!(
            Polyomino::from_grid(grid.view(), 7),
            Err(ShapeError::Empty { target: 7 })
        );
    }

    #[test]
    fn test_from_positions_collapses_duplicates() {
        let shape = Polyomino::from_positions(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 0),
        ])
        .unwrap();
        assert_eq!(shape.len(), 2);
        assert_eq!(Polyomino::from_positions(vec![]), Err(ShapeError::NoTiles));
    }

    #[test]
    fn test_mean_distance() {
        let line = Polyomino::from_grid(array![[1], [1], [1]].view(), 1).unwrap();
        assert!((line.mean_distance() - 4.0 / 3.0).abs() < 1e-12);

        let single = Polyomino::from_positions(vec![Position::new(4, 4)]).unwrap();
        assert_eq!(single.mean_distance(), 0.0);
    }

    #[test]
    fn test_circumference() {
        assert_eq!(square().circumference(), 8);

        let single = Polyomino::from_positions(vec![Position::new(0, 0)]).unwrap();
        assert_eq!(single.circumference(), 4);

        let line = Polyomino::from_grid(array![[1, 1, 1]].view(), 1).unwrap();
        assert_eq!(line.circumference(), 8);
    }

    #[test]
    fn test_center() {
        let line = Polyomino::from_grid(array![[1], [1], [1]].view(), 1).unwrap();
        assert_eq!(line.center(), (0.0, 1.0));
        assert_eq!(square().center(), (0.5, 0.5));
    }

    #[test]
    fn test_to_grid_normalises_bounds() {
        let shape = Polyomino::from_positions(vec![
            Position::new(-1, 3),
            Position::new(0, 3),
            Position::new(0, 4),
        ])
        .unwrap();

        assert_eq!(shape.to_grid(), Ok(array![[1usize, 2], [0, 3]]));
    }

    #[test]
    fn test_to_grid_rejects_huge_bounds() {
        let wide = Polyomino::from_positions(vec![
            Position::new(i32::MIN, 0),
            Position::new(i32::MAX, 0),
        ])
        .unwrap();
        assert_eq!(
            wide.to_grid(),
            Err(ShapeError::TooLarge {
                width: 1 << 32,
                height: 1
            })
        );

        let edge = Polyomino::from_positions(vec![
            Position::new(i32::MAX, i32::MIN),
            Position::new(i32::MAX - 1, i32::MIN),
        ])
        .unwrap();
        assert_eq!(edge.to_grid(), Ok(array![[2usize, 1]]));
    }

    #[test]
    fn test_relation_wraps_at_boundary() {
        let shape = Polyomino::from_positions(vec![
            Position::new(i32::MAX, 0),
            Position::new(i32::MIN, 0),
        ])
        .unwrap();

        let relation = shape.relation(Neighborhood::VonNeumann);
        let first = crate::NodeId::new(0);
        let second = crate::NodeId::new(1);
        assert_eq!(relation.is_neighbor(first, second), Ok(true));
        assert!(crate::polyomino::conserves_relation(
            &relation,
            &shape,
            Neighborhood::VonNeumann
        ));
        assert_eq!(shape.mean_distance(), 1.0);
    }

    #[test]
    fn test_relation_by_neighborhood() {
        let diagonal = Polyomino::from_positions(vec![Position::new(0, 0), Position::new(1, 1)])
            .unwrap();

        let moore = diagonal.relation(Neighborhood::Moore);
        let first = crate::NodeId::new(0);
        let second = crate::NodeId::new(1);
        assert_eq!(moore.is_neighbor(first, second), Ok(true));
        assert_eq!(moore.is_neighbor(second, first), Ok(true));

        let von_neumann = diagonal.relation(Neighborhood::VonNeumann);
        assert_eq!(von_neumann.is_neighbor(first, second), Ok(false));
    }
}
