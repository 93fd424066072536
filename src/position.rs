/// One step along a grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Which surrounding cells count as touching a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Neighborhood {
    /// The four orthogonal cells.
    VonNeumann,
    /// The four orthogonal cells plus the four diagonals.
    #[default]
    Moore,
}

const MOORE: [(i32, i32); 8] = [
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

const VON_NEUMANN: [(i32, i32); 4] = [(0, 1), (-1, 0), (1, 0), (0, -1)];

impl Neighborhood {
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Neighborhood::VonNeumann => &VON_NEUMANN,
            Neighborhood::Moore => &MOORE,
        }
    }
}

/// A cell on the grid.
///
/// Coordinates wrap at the `i32` boundary on both axes: the cell right of
/// `x = i32::MAX` is `x = i32::MIN`. Moves, neighbor lookups, adjacency,
/// distance and the offset between two positions all follow that rule, so
/// `i32::MAX` and `i32::MIN` are one step apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }

    /// The position one step away in `direction`. `Up` increases `y`.
    pub fn convert_direction(&self, direction: Direction) -> Self {
        match direction {
            Direction::Up => self.offset(0, 1),
            Direction::Down => self.offset(0, -1),
            Direction::Left => self.offset(-1, 0),
            Direction::Right => self.offset(1, 0),
        }
    }

    pub fn neighbors(&self, neighborhood: Neighborhood) -> impl Iterator<Item = Position> + '_ {
        neighborhood
            .offsets()
            .iter()
            .map(move |&(dx, dy)| self.offset(dx, dy))
    }

    /// Signed step from `other` to `self` on each axis, wrapped into `i32`.
    pub fn delta(&self, other: &Position) -> (i32, i32) {
        (self.x.wrapping_sub(other.x), self.y.wrapping_sub(other.y))
    }

    pub fn is_adjacent(&self, other: &Position, neighborhood: Neighborhood) -> bool {
        let (dx, dy) = self.delta(other);
        let (dx, dy) = (u64::from(dx.unsigned_abs()), u64::from(dy.unsigned_abs()));
        match neighborhood {
            Neighborhood::VonNeumann => dx + dy == 1,
            Neighborhood::Moore => dx.max(dy) == 1,
        }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let (dx, dy) = self.delta(other);
        f64::from(dx).hypot(f64::from(dy))
    }
}
