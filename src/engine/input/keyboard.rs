// Keyboard input device

use super::action::InputSource;
use super::config::KeyBindings;
use super::state::{InputDevice, InputState};
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks held physical keys and resolves them through `KeyBindings`.
///
/// Keys are tracked individually, so releasing Space while ArrowUp is still
/// down keeps the jump action held.
#[derive(Debug)]
pub struct KeyboardInput {
    bindings: KeyBindings,
    held_keys: HashSet<KeyCode>,
}

impl KeyboardInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held_keys: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            match event.state {
                ElementState::Pressed if !event.repeat => self.press_key(key_code),
                ElementState::Pressed => {}
                ElementState::Released => self.release_key(key_code),
            }
        }
    }

    /// Register a key press. Unbound keys are ignored.
    pub fn press_key(&mut self, key_code: KeyCode) {
        if self.bindings.is_bound(InputSource::key(key_code)) {
            self.held_keys.insert(key_code);
        }
    }

    /// Register a key release
    pub fn release_key(&mut self, key_code: KeyCode) {
        self.held_keys.remove(&key_code);
    }

}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new(KeyBindings::standard())
    }
}

impl InputDevice for KeyboardInput {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn snapshot(&self) -> InputState {
        InputState::from_actions(
            self.held_keys
                .iter()
                .filter_map(|key| self.bindings.action_for(InputSource::key(*key))),
        )
    }

    fn reset(&mut self) {
        self.held_keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;

    #[test]
    fn test_press_and_release() {
        let mut keyboard = KeyboardInput::default();
        keyboard.press_key(KeyCode::ArrowLeft);
        assert!(keyboard.snapshot().left);

        keyboard.release_key(KeyCode::ArrowLeft);
        assert_eq!(keyboard.snapshot(), InputState::NONE);
    }

    #[test]
    fn test_unbound_keys_are_ignored() {
        let mut keyboard = KeyboardInput::default();
        keyboard.press_key(KeyCode::KeyQ);

        assert!(keyboard.held_keys.is_empty());
        assert_eq!(keyboard.snapshot(), InputState::NONE);
    }

    #[test]
    fn test_two_keys_for_one_action() {
        let mut keyboard = KeyboardInput::default();
        keyboard.press_key(KeyCode::Space);
        keyboard.press_key(KeyCode::ArrowUp);

        keyboard.release_key(KeyCode::Space);
        assert!(keyboard.snapshot().up, "ArrowUp still holds jump");

        keyboard.release_key(KeyCode::ArrowUp);
        assert!(!keyboard.snapshot().up);
    }

    #[test]
    fn test_both_directions_reported() {
        let mut keyboard = KeyboardInput::default();
        keyboard.press_key(KeyCode::ArrowLeft);
        keyboard.press_key(KeyCode::ArrowRight);

        let state = keyboard.snapshot();
        assert!(state.left);
        assert!(state.right);
    }

    #[test]
    fn test_custom_bindings() {
        let mut bindings = KeyBindings::standard();
        bindings.bind(InputSource::key(KeyCode::KeyA), Action::MoveLeft);
        let mut keyboard = KeyboardInput::new(bindings);

        keyboard.press_key(KeyCode::KeyA);
        assert!(keyboard.snapshot().left);

        keyboard.release_key(KeyCode::KeyA);
        keyboard.press_key(KeyCode::ArrowLeft);
        assert!(keyboard.snapshot().left, "defaults still bound");
    }

    #[test]
    fn test_reset_clears_held_keys() {
        let mut keyboard = KeyboardInput::default();
        keyboard.press_key(KeyCode::ArrowRight);
        keyboard.press_key(KeyCode::Space);

        keyboard.reset();
        assert_eq!(keyboard.snapshot(), InputState::NONE);
    }
}
