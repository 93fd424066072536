use super::rotation::QuarterTurn;
use super::shape::Polyomino;
use crate::{Neighborhood, Network, NodeId, Position, ShapeError};
use ndarray::ArrayView2;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Three-cell groups that pin a tile in place. Offsets are relative to the
/// tile; if every cell of any group is occupied the tile cannot move.
const LOCKING_PATTERNS: [[(i32, i32); 3]; 8] = [
    [(-1, 0), (-1, -1), (0, -1)],
    [(-1, -1), (0, -1), (1, -1)],
    [(1, 0), (0, -1), (1, -1)],
    [(1, 1), (1, 0), (1, -1)],
    [(0, 1), (1, 1), (1, 0)],
    [(-1, 1), (0, 1), (1, 1)],
    [(-1, 1), (0, 1), (-1, 0)],
    [(-1, 1), (-1, 0), (-1, -1)],
];

/// Shapes whose mean distance differs by less than this are considered
/// equally compact. Summing the same distances in another order can shift the
/// last bits.
const IMPROVEMENT_TOLERANCE: f64 = 1e-9;

/// Settings for [`Contractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractionConfig {
    /// Which cells count as neighbors, both for the relation that must be
    /// conserved and for finding joints and free cells.
    pub neighborhood: Neighborhood,
    /// Grid value read as a tile by [`Contractor::contract_grid`].
    pub target: u8,
}

impl Default for ContractionConfig {
    fn default() -> Self {
        Self {
            neighborhood: Neighborhood::Moore,
            target: 1,
        }
    }
}

/// Where the arm is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pivot {
    /// Around the moving tile, without translating the arm.
    InPlace,
    /// Around the free cell, after translating the moving tile onto it.
    Target,
}

/// One candidate move: the arm hinged at `joint` that contains `tile` is
/// rotated by `turn` around `pivot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fold {
    pub tile: usize,
    pub joint: usize,
    pub target: Position,
    pub pivot: Pivot,
    pub turn: QuarterTurn,
}

#[derive(Debug, Clone)]
pub struct Contraction {
    pub original: Polyomino,
    pub shape: Polyomino,
    /// Number of folds applied.
    pub steps: usize,
}

impl Contraction {
    /// How much smaller the mean tile distance became, in percent.
    pub fn improvement(&self) -> f64 {
        let before = self.original.mean_distance();
        if before == 0.0 {
            return 0.0;
        }
        (before - self.shape.mean_distance()) / before * 100.0
    }
}

/// Greedy polyomino contraction with neighbor conservation.
///
/// Each step looks at every fold available to the movable tiles and applies
/// the one giving the lowest mean distance between tiles, as long as it is
/// clearly lower than the current one. Every tile keeps all the neighbors it
/// had in the original shape; it may gain new ones.
///
/// The search is greedy: it takes the best fold available now and never
/// trades a worse intermediate shape for a better final one.
#[derive(Debug, Clone, Default)]
pub struct Contractor {
    config: ContractionConfig,
}

impl Contractor {
    pub fn new(config: ContractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractionConfig {
        &self.config
    }

    pub fn contract_grid(&self, grid: ArrayView2<'_, u8>) -> Result<Contraction, ShapeError> {
        let shape = Polyomino::from_grid(grid, self.config.target)?;
        Ok(self.contract(&shape))
    }

    pub fn contract(&self, shape: &Polyomino) -> Contraction {
        let relation = shape.relation(self.config.neighborhood);
        let movable = self.movable_tiles(shape);
        debug!(tiles = shape.len(), movable = movable.len(), "starting contraction");

        let mut current = shape.clone();
        let mut score = current.mean_distance();
        let mut steps = 0;

        while let Some((fold, next, next_score)) =
            self.best_fold(&current, &relation, &movable, score)
        {
            steps += 1;
            debug!(step = steps, ?fold, from = score, to = next_score, "applied fold");
            current = next;
            score = next_score;
        }

        debug!(steps, score, "contraction converged");
        Contraction {
            original: shape.clone(),
            shape: current,
            steps,
        }
    }

    /// Tiles that are not pinned by a locking pattern and touch more than one
    /// other tile.
    pub fn movable_tiles(&self, shape: &Polyomino) -> Vec<usize> {
        shape
            .positions()
            .iter()
            .enumerate()
            .filter(|(_, position)| !is_locked(shape, **position))
            .filter(|(_, position)| {
                position
                    .neighbors(self.config.neighborhood)
                    .filter(|p| shape.is_occupied(*p))
                    .count()
                    > 1
            })
            .map(|(tile, _)| tile)
            .collect()
    }

    /// Every legal fold of `shape` for the given movable tiles, with the
    /// shape it produces. Rotating in place by [`QuarterTurn::None`] is
    /// skipped since it changes nothing.
    ///
    /// Joints without a free cell around them offer no folds at all.
    pub fn folds(
        &self,
        shape: &Polyomino,
        relation: &Network,
        movable: &[usize],
    ) -> Vec<(Fold, Polyomino)> {
        let neighborhood = self.config.neighborhood;
        let mut folds = Vec::new();

        for &tile in movable {
            let Some(origin) = shape.position(tile) else {
                continue;
            };

            for joint_position in origin.neighbors(neighborhood) {
                let Some(joint) = shape.tile_at(joint_position) else {
                    continue;
                };
                let targets: Vec<Position> = joint_position
                    .neighbors(neighborhood)
                    .filter(|p| !shape.is_occupied(*p))
                    .collect();
                if targets.is_empty() {
                    continue;
                }
                let arm = collect_arm(relation, tile, joint);

                for (index, &target) in targets.iter().enumerate() {
                    for turn in QuarterTurn::ALL {
                        for pivot in [Pivot::InPlace, Pivot::Target] {
                            // In-place folds ignore the target; try them once
                            if pivot == Pivot::InPlace && (turn == QuarterTurn::None || index > 0)
                            {
                                continue;
                            }
                            let fold = Fold {
                                tile,
                                joint,
                                target,
                                pivot,
                                turn,
                            };
                            if let Some(next) =
                                self.apply(shape, relation, &arm, origin, fold)
                            {
                                folds.push((fold, next));
                            }
                        }
                    }
                }
            }
        }

        trace!(count = folds.len(), "enumerated legal folds");
        folds
    }

    fn best_fold(
        &self,
        shape: &Polyomino,
        relation: &Network,
        movable: &[usize],
        score: f64,
    ) -> Option<(Fold, Polyomino, f64)> {
        let mut best: Option<(Fold, Polyomino, f64)> = None;
        let mut threshold = score - IMPROVEMENT_TOLERANCE;

        for (fold, next) in self.folds(shape, relation, movable) {
            let next_score = next.mean_distance();
            if next_score < threshold {
                threshold = next_score;
                best = Some((fold, next, next_score));
            }
        }

        best
    }

    /// Moves the arm as `fold` describes. Returns `None` when it would land on
    /// a tile outside the arm or break an original neighbor relation.
    fn apply(
        &self,
        shape: &Polyomino,
        relation: &Network,
        arm: &HashSet<usize>,
        origin: Position,
        fold: Fold,
    ) -> Option<Polyomino> {
        let (dx, dy, pivot) = match fold.pivot {
            Pivot::InPlace => (0, 0, origin),
            Pivot::Target => {
                let (dx, dy) = fold.target.delta(&origin);
                (dx, dy, fold.target)
            }
        };

        let mut positions = shape.positions().to_vec();
        for &tile in arm {
            let moved = fold.turn.rotate(positions[tile].offset(dx, dy), pivot);
            if shape.tile_at(moved).is_some_and(|other| !arm.contains(&other)) {
                return None;
            }
            positions[tile] = moved;
        }

        let next = Polyomino::with_positions(positions);
        conserves_relation(relation, &next, self.config.neighborhood).then_some(next)
    }
}

fn is_locked(shape: &Polyomino, position: Position) -> bool {
    LOCKING_PATTERNS.iter().any(|pattern| {
        pattern
            .iter()
            .all(|&(dx, dy)| shape.is_occupied(position.offset(dx, dy)))
    })
}

/// Tiles reachable from `tile` in `relation` without passing through `joint`.
fn collect_arm(relation: &Network, tile: usize, joint: usize) -> HashSet<usize> {
    let mut visited = HashSet::from([tile, joint]);
    let mut stack = vec![tile];
    let mut arm = HashSet::from([tile]);

    while let Some(current) = stack.pop() {
        let Ok(neighbors) = relation.neighbors(NodeId::new(current)) else {
            continue;
        };
        for neighbor in neighbors {
            let index = neighbor.index();
            if visited.insert(index) {
                arm.insert(index);
                stack.push(index);
            }
        }
    }

    arm
}

/// Whether every connection in `relation` still joins adjacent tiles in
/// `shape`. Node `i` of the relation is tile `i` of the shape.
pub fn conserves_relation(relation: &Network, shape: &Polyomino, neighborhood: Neighborhood) -> bool {
    relation.iter().all(|(id, node)| {
        let Some(position) = shape.position(id.index()) else {
            return false;
        };
        node.neighbors().into_iter().all(|neighbor| {
            shape
                .position(neighbor.index())
                .is_some_and(|other| position.is_adjacent(&other, neighborhood))
        })
    })
}
