use crate::Position;

/// Counter-clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl QuarterTurn {
    pub const ALL: [QuarterTurn; 4] = [
        QuarterTurn::None,
        QuarterTurn::Quarter,
        QuarterTurn::Half,
        QuarterTurn::ThreeQuarter,
    ];

    pub fn degrees(self) -> u32 {
        match self {
            QuarterTurn::None => 0,
            QuarterTurn::Quarter => 90,
            QuarterTurn::Half => 180,
            QuarterTurn::ThreeQuarter => 270,
        }
    }

    /// Rotates `point` around `origin`, wrapping at the `i32` boundary like
    /// every other [`Position`] operation.
    pub fn rotate(self, point: Position, origin: Position) -> Position {
        let (dx, dy) = point.delta(&origin);
        let (rx, ry) = match self {
            QuarterTurn::None => (dx, dy),
            QuarterTurn::Quarter => (dy.wrapping_neg(), dx),
            QuarterTurn::Half => (dx.wrapping_neg(), dy.wrapping_neg()),
            QuarterTurn::ThreeQuarter => (dy, dx.wrapping_neg()),
        };
        origin.offset(rx, ry)
    }
}
