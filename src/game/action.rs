use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions in clockwise order starting from `Up`
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Rotate 90 degrees counter-clockwise as seen on screen
    pub fn turned_left(&self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Rotate 90 degrees clockwise as seen on screen
    pub fn turned_right(&self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// A turn expressed relative to the current heading
///
/// The discriminants double as the class indices of the predictor output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeMove {
    Left = 0,
    Forward = 1,
    Right = 2,
}

impl RelativeMove {
    pub const ALL: [RelativeMove; 3] = [
        RelativeMove::Left,
        RelativeMove::Forward,
        RelativeMove::Right,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Inverse of [`RelativeMove::index`]; out-of-range indices map to `None`
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// One-hot encoding used as the supervised training target
    pub fn one_hot(&self) -> [f32; 3] {
        let mut target = [0.0; 3];
        target[self.index()] = 1.0;
        target
    }

    /// New heading after applying this move to `heading`
    ///
    /// A zero heading (`None`, before the first move) is treated as `Up`, so
    /// forward starts the snake moving up and left/right rotate from there.
    pub fn apply(&self, heading: Option<Direction>) -> Direction {
        let current = heading.unwrap_or(Direction::Up);
        match self {
            RelativeMove::Left => current.turned_left(),
            RelativeMove::Forward => current,
            RelativeMove::Right => current.turned_right(),
        }
    }
}

/// Action that can be taken in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Steer to an absolute direction (manual mode, reversals are ignored)
    Move(Direction),
    /// Turn relative to the current heading (agent mode)
    Turn(RelativeMove),
    /// Continue in current direction
    Continue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_turn_table() {
        use Direction::*;
        use RelativeMove as M;

        let table = [
            (None, [Left, Up, Right]),
            (Some(Up), [Left, Up, Right]),
            (Some(Down), [Right, Down, Left]),
            (Some(Left), [Down, Left, Up]),
            (Some(Right), [Up, Right, Down]),
        ];

        for (heading, expected) in table {
            assert_eq!(M::Left.apply(heading), expected[0], "left from {heading:?}");
            assert_eq!(M::Forward.apply(heading), expected[1], "forward from {heading:?}");
            assert_eq!(M::Right.apply(heading), expected[2], "right from {heading:?}");
        }
    }

    #[test]
    fn test_moves_from_same_heading_are_distinct() {
        for heading in std::iter::once(None).chain(Direction::ALL.into_iter().map(Some)) {
            let results: Vec<Direction> =
                RelativeMove::ALL.iter().map(|mv| mv.apply(heading)).collect();
            assert_ne!(results[0], results[1]);
            assert_ne!(results[1], results[2]);
            assert_ne!(results[0], results[2]);
            // A relative move never reverses a live heading
            if let Some(current) = heading {
                assert!(results.iter().all(|d| !d.is_opposite(current)));
            }
        }
    }

    #[test]
    fn test_four_turns_return_to_start() {
        for start in Direction::ALL {
            let mut heading = start;
            for _ in 0..4 {
                heading = RelativeMove::Left.apply(Some(heading));
            }
            assert_eq!(heading, start);

            for _ in 0..4 {
                heading = RelativeMove::Right.apply(Some(heading));
            }
            assert_eq!(heading, start);
        }
    }

    #[test]
    fn test_relative_move_index_round_trip() {
        for mv in RelativeMove::ALL {
            assert_eq!(RelativeMove::from_index(mv.index()), Some(mv));
        }
        assert_eq!(RelativeMove::from_index(3), None);
        assert_eq!(RelativeMove::Right.one_hot(), [0.0, 0.0, 1.0]);
    }
}
