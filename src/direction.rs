use Direction::*;

/// Movement direction. Discriminants go clockwise, so opposite directions
/// are exactly two apart mod 4.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Right, Down, Left];

    pub fn is_opposite(self, other: Direction) -> bool {
        (self as u8 + 4 - other as u8) % 4 == 2
    }

    pub fn opposite(self) -> Direction {
        Self::ALL[(self as usize + 2) % 4]
    }

    pub fn offset(self) -> (isize, isize) {
        match self {
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }
}
