use super::{
    action::Action,
    config::GameConfig,
    state::{GameState, Position, Snake, TerminationCause},
};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use tracing::{debug, warn};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Why the game ended, if it ended this step
    pub termination: Option<TerminationCause>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn running(ate_food: bool) -> Self {
        Self {
            terminated: false,
            info: StepInfo {
                ate_food,
                termination: None,
            },
        }
    }

    fn ended(termination: Option<TerminationCause>) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                termination,
            },
        }
    }
}

/// The game engine that handles all game logic
///
/// Shared by keyboard play and agent self-play; the two differ only in the
/// [`Action`] they feed in and in their [`GameConfig`].
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start, self.config.initial_heading);
        let mut state = GameState::new(snake, self.config.start, self.config.grid_size);
        self.place_food(&mut state);
        state
    }

    /// Execute one step of the game
    ///
    /// A snake without a heading stays put: nothing moves and no starvation
    /// tick is counted until the first steering action arrives.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult::ended(None);
        }

        match action {
            Action::Move(new_direction) => {
                // Prevent 180° turns
                let reverses = state
                    .snake
                    .heading
                    .is_some_and(|current| current.is_opposite(new_direction));
                if !reverses {
                    state.snake.heading = Some(new_direction);
                }
            }
            Action::Turn(mv) => {
                state.snake.heading = Some(mv.apply(state.snake.heading));
            }
            Action::Continue => {}
        }

        let Some(heading) = state.snake.heading else {
            return StepResult::running(false);
        };

        let new_head = state.snake.head().moved_in_direction(heading);
        let ate_food = new_head == state.food;

        if let Some(cause) = self.check_collision(state, new_head, ate_food) {
            return self.end_game(state, cause);
        }

        if let Some(vacated) = state.snake.advance_to(new_head, ate_food) {
            state.board.clear(vacated);
        }
        state.board.set(new_head);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            state.ticks_since_food = 0;
            debug!(score = state.score, length = state.snake.len(), "food eaten");
            self.place_food(state);
            return StepResult::running(true);
        }

        state.ticks_since_food += 1;
        let starved = self
            .config
            .starvation_limit
            .is_some_and(|limit| state.ticks_since_food >= limit);
        if starved {
            return self.end_game(state, TerminationCause::Starvation);
        }

        StepResult::running(false)
    }

    /// Check if the new head position causes a collision
    ///
    /// The tail cell counts as free when the snake is not growing, since it
    /// is vacated in the same step.
    fn check_collision(
        &self,
        state: &GameState,
        pos: Position,
        growing: bool,
    ) -> Option<TerminationCause> {
        if !state.is_in_bounds(pos) {
            return Some(TerminationCause::Wall);
        }

        let leaving_tail = !growing && state.snake.len() > 1 && pos == state.snake.tail();
        if state.is_occupied_by_snake(pos) && !leaving_tail {
            return Some(TerminationCause::SelfCollision);
        }

        None
    }

    fn end_game(&self, state: &mut GameState, cause: TerminationCause) -> StepResult {
        state.is_alive = false;
        state.termination = Some(cause);
        state.steps += 1;
        debug!(?cause, score = state.score, steps = state.steps, "game over");
        StepResult::ended(Some(cause))
    }

    /// Move food to a uniformly random unoccupied cell
    fn place_food(&mut self, state: &mut GameState) {
        match state.board.free_cells().choose(&mut self.rng) {
            Some(&pos) => state.food = pos,
            None => warn!("board is full, food stays in place"),
        }
    }
}
