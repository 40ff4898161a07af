// Game action definitions and mappings

use serde::Deserialize;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Jump];
}

/// Represents a physical input that can be bound to an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    // Future: gamepad buttons
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings: arrows to move, up arrow or space to jump
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::ArrowUp), Action::Jump),
        (InputSource::key(KeyCode::Space), Action::Jump),
    ]
}
