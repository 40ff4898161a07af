// Kinematic platformer physics: one body, static platforms, tick-based integration

pub mod body;
pub mod collision;
pub mod world;

pub use body::{BodyBuilder, KinematicBody};
pub use collision::Landing;
pub use world::{step, LevelError, StepOutcome, World};

use serde::Deserialize;

/// Default downward acceleration (units per tick per tick)
pub const GRAVITY: f32 = 0.6;
/// Default horizontal speed while a direction is held (units per tick)
pub const MOVE_SPEED: f32 = 4.0;
/// Default upward velocity applied on jump (units per tick)
pub const JUMP_POWER: f32 = 12.0;

/// Tunables for the physics step. All values are per tick, not per second.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_power: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_power: JUMP_POWER,
        }
    }
}
