// Player motion classification

use crate::engine::input::InputState;

/// What the player is doing this tick, as far as animation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionState {
    /// Standing still on ground
    #[default]
    Idle,
    /// A direction is held while on ground
    Walking,
    /// Not grounded (jumping or falling)
    Airborne,
}

impl MotionState {
    /// Classify from this tick's input and the post-step grounded flag
    pub fn classify(input: InputState, on_ground: bool) -> Self {
        if !on_ground {
            Self::Airborne
        } else if input.wants_horizontal_movement() {
            Self::Walking
        } else {
            Self::Idle
        }
    }

    /// Only walking advances the walk cycle
    pub fn animates(&self) -> bool {
        matches!(self, Self::Walking)
    }
}
