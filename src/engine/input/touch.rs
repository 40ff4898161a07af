// On-screen touch buttons

use super::action::Action;
use super::state::{InputDevice, InputState};
use crate::core::math::Rect;
use glam::Vec2;
use std::collections::HashMap;
use winit::event::{Touch, TouchPhase};

/// Side length of a touch button in viewport pixels
pub const BUTTON_SIZE: f32 = 64.0;
/// Gap between buttons and the viewport edges
pub const BUTTON_MARGIN: f32 = 16.0;

/// Fill alpha of a held button
pub const PRESSED_ALPHA: f32 = 0.5;
/// Fill alpha of an idle button
pub const RELEASED_ALPHA: f32 = 0.3;

/// The three on-screen buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
}

impl TouchButton {
    pub const ALL: [TouchButton; 3] = [TouchButton::Left, TouchButton::Right, TouchButton::Jump];

    /// Action this button holds while touched
    pub fn action(&self) -> Action {
        match self {
            TouchButton::Left => Action::MoveLeft,
            TouchButton::Right => Action::MoveRight,
            TouchButton::Jump => Action::Jump,
        }
    }
}

/// Render-facing state of one button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonView {
    pub button: TouchButton,
    /// Rectangle in viewport (screen) coordinates
    pub rect: Rect,
    pub pressed: bool,
}

impl ButtonView {
    pub fn alpha(&self) -> f32 {
        if self.pressed {
            PRESSED_ALPHA
        } else {
            RELEASED_ALPHA
        }
    }
}

/// Touch device: movement buttons bottom-left, jump bottom-right.
///
/// A button is held while at least one touch that started on it is still
/// down. Touches that start outside every button are ignored, and sliding a
/// finger off a button does not release it.
#[derive(Debug)]
pub struct TouchControls {
    layout: Vec<(TouchButton, Rect)>,
    active_touches: HashMap<u64, TouchButton>,
}

impl TouchControls {
    /// Create controls laid out for a viewport of the given size
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let mut controls = Self {
            layout: Vec::with_capacity(TouchButton::ALL.len()),
            active_touches: HashMap::new(),
        };
        controls.relayout(viewport_width, viewport_height);
        controls
    }

    /// Recompute button rectangles after a viewport resize
    pub fn relayout(&mut self, viewport_width: f32, viewport_height: f32) {
        let y = viewport_height - BUTTON_MARGIN - BUTTON_SIZE;
        self.layout = vec![
            (
                TouchButton::Left,
                Rect::new(BUTTON_MARGIN, y, BUTTON_SIZE, BUTTON_SIZE),
            ),
            (
                TouchButton::Right,
                Rect::new(BUTTON_MARGIN * 2.0 + BUTTON_SIZE, y, BUTTON_SIZE, BUTTON_SIZE),
            ),
            (
                TouchButton::Jump,
                Rect::new(
                    viewport_width - BUTTON_MARGIN - BUTTON_SIZE,
                    y,
                    BUTTON_SIZE,
                    BUTTON_SIZE,
                ),
            ),
        ];
    }

    /// Process a winit touch event. `origin` is the top-left of the
    /// viewport inside the window, used to undo letterbox margins.
    pub fn process_event(&mut self, touch: &Touch, origin: Vec2) {
        let position = Vec2::new(touch.location.x as f32, touch.location.y as f32) - origin;
        self.handle_touch(touch.id, touch.phase, position);
    }

    /// Process one touch phase at a viewport-space position
    pub fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) {
        match phase {
            TouchPhase::Started => {
                if let Some(button) = self.button_at(position) {
                    self.active_touches.insert(id, button);
                }
            }
            TouchPhase::Moved => {}
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active_touches.remove(&id);
            }
        }
    }

    /// Which button (if any) covers a viewport-space point
    pub fn button_at(&self, position: Vec2) -> Option<TouchButton> {
        self.layout
            .iter()
            .find(|(_, rect)| rect.contains(position))
            .map(|(button, _)| *button)
    }

    pub fn is_pressed(&self, button: TouchButton) -> bool {
        self.active_touches.values().any(|b| *b == button)
    }

    /// Current button rectangles and pressed flags, in layout order
    pub fn buttons(&self) -> Vec<ButtonView> {
        self.layout
            .iter()
            .map(|(button, rect)| ButtonView {
                button: *button,
                rect: *rect,
                pressed: self.is_pressed(*button),
            })
            .collect()
    }
}

impl InputDevice for TouchControls {
    fn name(&self) -> &str {
        "touch"
    }

    fn snapshot(&self) -> InputState {
        InputState::from_actions(self.active_touches.values().map(TouchButton::action))
    }

    fn reset(&mut self) {
        self.active_touches.clear();
    }
}
