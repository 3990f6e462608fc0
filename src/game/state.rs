use serde::{Deserialize, Serialize};

use super::{action::Direction, board::Board};

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current heading; `None` until the first move
    pub heading: Option<Direction>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: Position, heading: Option<Direction>) -> Self {
        Self {
            body: vec![head],
            heading,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Push a new head, dropping the tail unless growing.
    ///
    /// Returns the vacated tail cell, if any.
    pub fn advance_to(&mut self, new_head: Position, grow: bool) -> Option<Position> {
        self.body.insert(0, new_head);
        if grow { None } else { self.body.pop() }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
    /// Too many ticks without eating
    Starvation,
}

/// Complete simulation context for one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub board: Board,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    /// Ticks since food was last eaten (or since the game started)
    pub ticks_since_food: u32,
    pub is_alive: bool,
    pub termination: Option<TerminationCause>,
}

impl GameState {
    /// Create a new game state, marking the snake on the occupancy board
    pub fn new(snake: Snake, food: Position, grid_size: usize) -> Self {
        let mut board = Board::new(grid_size);
        for &segment in &snake.body {
            board.set(segment);
        }

        Self {
            snake,
            food,
            board,
            grid_size,
            score: 0,
            steps: 0,
            ticks_since_food: 0,
            is_alive: true,
            termination: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.board.contains(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.board.is_occupied(pos)
    }

    /// Whether moving into `pos` would leave the grid or hit the body
    pub fn is_blocked(&self, pos: Position) -> bool {
        !self.is_in_bounds(pos) || self.is_occupied_by_snake(pos)
    }
}
