// Input manager - merges every device into one snapshot per tick

use super::keyboard::KeyboardInput;
use super::state::{InputDevice, InputState};
use super::touch::TouchControls;
use log::info;

/// Owns the built-in keyboard and touch devices plus any extra devices,
/// and ORs their snapshots together.
pub struct InputManager {
    keyboard: KeyboardInput,
    touch: TouchControls,
    extra_devices: Vec<Box<dyn InputDevice>>,
}

impl InputManager {
    pub fn new(keyboard: KeyboardInput, touch: TouchControls) -> Self {
        Self {
            keyboard,
            touch,
            extra_devices: Vec::new(),
        }
    }

    /// Register an additional device (gamepad, replay, scripted test input, ...)
    pub fn add_device(&mut self, device: Box<dyn InputDevice>) {
        info!("Input device registered: {}", device.name());
        self.extra_devices.push(device);
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardInput {
        &mut self.keyboard
    }

    pub fn touch(&self) -> &TouchControls {
        &self.touch
    }

    pub fn touch_mut(&mut self) -> &mut TouchControls {
        &mut self.touch
    }

    /// Merged state of every device for this tick
    pub fn snapshot(&self) -> InputState {
        self.extra_devices
            .iter()
            .fold(self.keyboard.snapshot() | self.touch.snapshot(), |acc, d| {
                acc | d.snapshot()
            })
    }

    /// Release everything on every device
    pub fn reset_all(&mut self) {
        self.keyboard.reset();
        self.touch.reset();
        for device in &mut self.extra_devices {
            device.reset();
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(KeyboardInput::default(), TouchControls::new(800.0, 450.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use winit::event::TouchPhase;
    use winit::keyboard::KeyCode;

    struct FixedDevice(InputState);

    impl InputDevice for FixedDevice {
        fn name(&self) -> &str {
            "fixed"
        }

        fn snapshot(&self) -> InputState {
            self.0
        }

        fn reset(&mut self) {
            self.0 = InputState::NONE;
        }
    }

    #[test]
    fn test_idle_manager() {
        let manager = InputManager::default();
        assert_eq!(manager.snapshot(), InputState::NONE);
        assert!(manager.extra_devices.is_empty());
    }

    #[test]
    fn test_keyboard_and_touch_are_ored() {
        let mut manager = InputManager::default();
        manager.keyboard_mut().press_key(KeyCode::ArrowRight);

        // Jump button sits bottom-right on the default 800x450 layout
        manager
            .touch_mut()
            .handle_touch(1, TouchPhase::Started, Vec2::new(750.0, 400.0));

        let state = manager.snapshot();
        assert!(state.right);
        assert!(state.up);
        assert!(!state.left);
    }

    #[test]
    fn test_release_on_one_device_keeps_other() {
        let mut manager = InputManager::default();
        manager.keyboard_mut().press_key(KeyCode::ArrowLeft);
        manager
            .touch_mut()
            .handle_touch(4, TouchPhase::Started, Vec2::new(40.0, 400.0));

        manager.keyboard_mut().release_key(KeyCode::ArrowLeft);
        assert!(manager.snapshot().left, "touch still holds left");

        manager
            .touch_mut()
            .handle_touch(4, TouchPhase::Ended, Vec2::new(40.0, 400.0));
        assert!(!manager.snapshot().left);
    }

    #[test]
    fn test_extra_device_is_merged() {
        let mut manager = InputManager::default();
        manager.add_device(Box::new(FixedDevice(InputState {
            up: true,
            ..InputState::NONE
        })));

        assert_eq!(manager.extra_devices.len(), 1);
        assert!(manager.snapshot().up);
    }

    #[test]
    fn test_reset_all() {
        let mut manager = InputManager::default();
        manager.keyboard_mut().press_key(KeyCode::Space);
        manager.add_device(Box::new(FixedDevice(InputState {
            right: true,
            ..InputState::NONE
        })));

        manager.reset_all();
        assert_eq!(manager.snapshot(), InputState::NONE);
    }
}
