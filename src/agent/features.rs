use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::game::{Direction, GameState};

/// Number of values in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = 5;

/// What the snake sees, expressed in its own frame of reference
///
/// Obstacle flags look one cell to the snake's left, ahead and right.
/// `apple_x` is +1 when the food lies to the snake's right and -1 to its
/// left; `apple_y` is +1 when the food lies ahead and -1 behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FeatureVector {
    pub obstacle_left: bool,
    pub obstacle_forward: bool,
    pub obstacle_right: bool,
    pub apple_x: i8,
    pub apple_y: i8,
}

impl FeatureVector {
    pub fn to_array(&self) -> [f32; FEATURE_COUNT] {
        [
            f32::from(u8::from(self.obstacle_left)),
            f32::from(u8::from(self.obstacle_forward)),
            f32::from(u8::from(self.obstacle_right)),
            f32::from(self.apple_x),
            f32::from(self.apple_y),
        ]
    }

    /// Single-row input tensor with shape `[1, 5]`
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 2> {
        let data = TensorData::new(self.to_array().to_vec(), [1, FEATURE_COUNT]);
        Tensor::from_data(data, device)
    }
}

/// Encode the current state as seen from the snake's head
///
/// Before the first move there is no heading: obstacle flags stay clear and
/// the apple signals are the raw world-frame signs of the food offset.
pub fn encode_features(state: &GameState) -> FeatureVector {
    let head = state.snake.head();
    let (dx, dy) = (state.food.x - head.x, state.food.y - head.y);

    let Some(forward) = state.snake.heading else {
        return FeatureVector {
            apple_x: dx.signum() as i8,
            apple_y: dy.signum() as i8,
            ..Default::default()
        };
    };
    let left = forward.turned_left();
    let right = forward.turned_right();

    FeatureVector {
        obstacle_left: state.is_blocked(head.moved_in_direction(left)),
        obstacle_forward: state.is_blocked(head.moved_in_direction(forward)),
        obstacle_right: state.is_blocked(head.moved_in_direction(right)),
        apple_x: project(dx, dy, right),
        apple_y: project(dx, dy, forward),
    }
}

/// Sign of the offset `(dx, dy)` along `axis`
fn project(dx: i32, dy: i32, axis: Direction) -> i8 {
    let (ax, ay) = axis.delta();
    (dx * ax + dy * ay).signum() as i8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, Snake};
    use burn::backend::NdArray;
    use burn::backend::ndarray::NdArrayDevice;

    type TestBackend = NdArray<f32>;

    /// Map a position through a 90° clockwise rotation of a square grid
    fn rotate_cw(pos: Position, size: usize) -> Position {
        Position::new(size as i32 - 1 - pos.y, pos.x)
    }

    fn state_with(body: &[Position], heading: Option<Direction>, food: Position) -> GameState {
        let mut snake = Snake::new(body[0], heading);
        snake.body = body.to_vec();
        GameState::new(snake, food, 20)
    }

    #[test]
    fn test_zero_heading_uses_world_frame() {
        let state = state_with(&[Position::new(10, 10)], None, Position::new(10, 5));
        let features = encode_features(&state);

        assert_eq!(
            features,
            FeatureVector {
                obstacle_left: false,
                obstacle_forward: false,
                obstacle_right: false,
                apple_x: 0,
                apple_y: -1,
            }
        );
    }

    #[test]
    fn test_apple_signals_per_heading() {
        let head = Position::new(10, 10);
        // Food up and to the right on screen
        let food = Position::new(13, 7);

        let cases = [
            (Direction::Up, 1, 1),
            (Direction::Right, -1, 1),
            (Direction::Down, -1, -1),
            (Direction::Left, 1, -1),
        ];

        for (heading, apple_x, apple_y) in cases {
            let features = encode_features(&state_with(&[head], Some(heading), food));
            assert_eq!(features.apple_x, apple_x, "apple_x facing {heading:?}");
            assert_eq!(features.apple_y, apple_y, "apple_y facing {heading:?}");
        }
    }

    #[test]
    fn test_apple_straight_ahead_and_behind() {
        let head = Position::new(10, 10);

        let ahead = encode_features(&state_with(&[head], Some(Direction::Left), Position::new(2, 10)));
        assert_eq!((ahead.apple_x, ahead.apple_y), (0, 1));

        let behind = encode_features(&state_with(&[head], Some(Direction::Left), Position::new(15, 10)));
        assert_eq!((behind.apple_x, behind.apple_y), (0, -1));
    }

    #[test]
    fn test_wall_obstacles() {
        // Top-left corner facing up: wall ahead and to the left
        let state = state_with(&[Position::new(0, 0)], Some(Direction::Up), Position::new(5, 5));
        let features = encode_features(&state);
        assert!(features.obstacle_left);
        assert!(features.obstacle_forward);
        assert!(!features.obstacle_right);

        // Bottom edge facing right: wall on the right only
        let state = state_with(&[Position::new(5, 19)], Some(Direction::Right), Position::new(5, 5));
        let features = encode_features(&state);
        assert!(!features.obstacle_left);
        assert!(!features.obstacle_forward);
        assert!(features.obstacle_right);
    }

    #[test]
    fn test_body_obstacles() {
        // Head (5,5) facing up, body curls round on the left and ahead
        let body = [
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(4, 6),
            Position::new(4, 5),
            Position::new(4, 4),
            Position::new(5, 4),
        ];
        let features = encode_features(&state_with(&body, Some(Direction::Up), Position::new(15, 15)));

        assert!(features.obstacle_left);
        assert!(features.obstacle_forward);
        assert!(!features.obstacle_right);
    }

    #[test]
    fn test_rotation_invariance() {
        let size = 20;
        let body = [
            Position::new(3, 1),
            Position::new(3, 2),
            Position::new(2, 2),
            Position::new(2, 1),
            Position::new(2, 0),
        ];
        let food = Position::new(9, 14);

        let mut body_rotated = body.to_vec();
        let mut food_rotated = food;
        let mut heading = Direction::Up;
        let expected = encode_features(&state_with(&body, Some(heading), food));

        for _ in 0..4 {
            body_rotated = body_rotated.iter().map(|&p| rotate_cw(p, size)).collect();
            food_rotated = rotate_cw(food_rotated, size);
            heading = heading.turned_right();

            let features = encode_features(&state_with(&body_rotated, Some(heading), food_rotated));
            assert_eq!(features, expected, "facing {heading:?}");
        }
    }

    #[test]
    fn test_feature_array_and_tensor() {
        let features = FeatureVector {
            obstacle_left: true,
            obstacle_forward: false,
            obstacle_right: true,
            apple_x: -1,
            apple_y: 1,
        };
        assert_eq!(features.to_array(), [1.0, 0.0, 1.0, -1.0, 1.0]);

        let device = NdArrayDevice::default();
        let tensor = features.to_tensor::<TestBackend>(&device);
        assert_eq!(tensor.dims(), [1, FEATURE_COUNT]);
        let data = tensor.into_data();
        assert_eq!(data.as_slice::<f32>().unwrap(), &[1.0, 0.0, 1.0, -1.0, 1.0]);
    }
}
