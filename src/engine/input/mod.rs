// Input handling system
//
// Every device (keyboard, on-screen touch buttons, anything registered at
// runtime) keeps its own held state. Once per tick the manager polls each
// device and ORs the results into a single `InputState`.
//
// ## Architecture
//
// - `action`: Game actions and default key bindings
// - `config`: Key binding / remapping table
// - `state`: The per-tick `InputState` snapshot and the `InputDevice` trait
// - `keyboard`: Keyboard device fed by winit key events
// - `touch`: On-screen touch buttons fed by winit touch events
// - `manager`: Owns the devices and merges their snapshots
//
// ## Usage Example
//
// ```rust
// let mut input = InputManager::default();
//
// // In the event loop
// input.keyboard_mut().process_event(&key_event);
//
// // Once per tick
// let state = input.snapshot();
// if state.up { /* jump */ }
// ```

pub mod action;
pub mod config;
pub mod keyboard;
pub mod manager;
pub mod state;
pub mod touch;

pub use action::{Action, InputSource};
pub use config::KeyBindings;
pub use keyboard::KeyboardInput;
pub use manager::InputManager;
pub use state::{InputDevice, InputState};
pub use touch::{ButtonView, TouchButton, TouchControls};
