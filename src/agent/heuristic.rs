//! Hindsight labels for supervised training
//!
//! After an episode ends, every logged [`FeatureVector`] is paired with the
//! move this fixed rule set would have made. The rules only look at the
//! five features; they are a training target, not a live policy.

use super::features::FeatureVector;
use crate::game::RelativeMove;

/// The move that should have been taken for `features`
///
/// Blocked directions are avoided first, then the food is followed.
pub fn expected_move(features: &FeatureVector) -> RelativeMove {
    use RelativeMove::{Forward, Left, Right};

    let FeatureVector {
        obstacle_left: left,
        obstacle_forward: forward,
        obstacle_right: right,
        apple_x,
        apple_y,
    } = *features;
    let apple_right = apple_x == 1;
    let apple_left = apple_x == -1;
    let apple_behind = apple_y == -1;

    match (left, forward, right) {
        (true, true, _) => Right,
        (true, false, true) => Forward,
        (false, true, true) => Left,
        (true, false, false) => {
            if apple_right || apple_behind {
                Right
            } else {
                Forward
            }
        }
        (false, true, false) => {
            if apple_right {
                Right
            } else {
                Left
            }
        }
        (false, false, true) => {
            if apple_left || apple_behind {
                Left
            } else {
                Forward
            }
        }
        (false, false, false) => match apple_x {
            -1 => Left,
            0 if apple_behind => Left,
            0 => Forward,
            _ => Right,
        },
    }
}
