// Normalized per-tick input snapshot

use super::action::Action;
use std::ops::{BitOr, BitOrAssign};

/// What the simulation sees each tick: one flag per action.
///
/// Snapshots from independent devices are merged with `|`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl InputState {
    pub const NONE: InputState = InputState {
        left: false,
        right: false,
        up: false,
    };

    /// Build a snapshot from a set of held actions
    pub fn from_actions<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        actions.into_iter().fold(Self::NONE, |mut state, action| {
            state.set(action, true);
            state
        })
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::MoveLeft => self.left = pressed,
            Action::MoveRight => self.right = pressed,
            Action::Jump => self.up = pressed,
        }
    }

    /// Either horizontal direction is held
    pub fn wants_horizontal_movement(&self) -> bool {
        self.left || self.right
    }
}

impl BitOr for InputState {
    type Output = InputState;

    fn bitor(self, rhs: InputState) -> InputState {
        InputState {
            left: self.left || rhs.left,
            right: self.right || rhs.right,
            up: self.up || rhs.up,
        }
    }
}

impl BitOrAssign for InputState {
    fn bitor_assign(&mut self, rhs: InputState) {
        *self = *self | rhs;
    }
}

/// Anything that can report which actions it is holding right now.
///
/// Devices are polled once per tick; they never push into the simulation.
pub trait InputDevice {
    /// Short name for logging
    fn name(&self) -> &str;

    /// Current held state of this device alone
    fn snapshot(&self) -> InputState;

    /// Drop all held state (e.g. on focus loss)
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let state = InputState::default();
        assert_eq!(state, InputState::NONE);
        assert!(!state.wants_horizontal_movement());
    }

    #[test]
    fn test_from_actions() {
        let state = InputState::from_actions([Action::MoveRight, Action::Jump]);
        assert!(!state.left);
        assert!(state.right);
        assert!(state.up);
    }

    #[test]
    fn test_merge_is_logical_or() {
        let keyboard = InputState {
            left: true,
            ..InputState::NONE
        };
        let touch = InputState {
            up: true,
            ..InputState::NONE
        };

        let merged = keyboard | touch;
        assert_eq!(
            merged,
            InputState {
                left: true,
                right: false,
                up: true
            }
        );

        let mut acc = InputState::NONE;
        acc |= keyboard;
        acc |= InputState::NONE;
        assert_eq!(acc, keyboard);
    }

    #[test]
    fn test_set_and_clear() {
        let mut state = InputState::NONE;
        state.set(Action::MoveLeft, true);
        assert!(state.wants_horizontal_movement());

        state.set(Action::MoveLeft, false);
        assert_eq!(state, InputState::NONE);
    }
}
