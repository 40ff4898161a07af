use glam::Vec2;
use log::debug;

use super::body::KinematicBody;
use super::collision::{apply_landing, find_landing, Landing};
use super::PhysicsConfig;
use crate::core::math::Rect;
use crate::engine::input::InputState;

/// Errors raised while building a world from level data
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LevelError {
    #[error("Level has no platforms to spawn on")]
    NoPlatforms,

    #[error("Platform {index} has a non-positive or non-finite size")]
    InvalidPlatform { index: usize },

    #[error("World height must be positive, got {0}")]
    InvalidHeight(f32),
}

/// Static level geometry.
///
/// Platforms are kept in level order. The first platform is the spawn
/// platform. Nothing in the world changes after construction.
#[derive(Debug, Clone)]
pub struct World {
    platforms: Vec<Rect>,
    /// Bodies whose top edge passes below this y are respawned
    height: f32,
    spawn: Vec2,
}

impl World {
    /// Create a world, spawning bodies of `body_height` on top of the first platform
    pub fn new(
        platforms: Vec<Rect>,
        height: f32,
        spawn_x: f32,
        body_height: f32,
    ) -> Result<Self, LevelError> {
        if !(height.is_finite() && height > 0.0) {
            return Err(LevelError::InvalidHeight(height));
        }

        if let Some(index) = platforms.iter().position(|p| !p.has_positive_size()) {
            return Err(LevelError::InvalidPlatform { index });
        }

        let spawn_platform = platforms.first().ok_or(LevelError::NoPlatforms)?;
        let spawn = Vec2::new(spawn_x, spawn_platform.top() - body_height);

        Ok(Self {
            platforms,
            height,
            spawn,
        })
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Top-left spawn position for the player body
    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    /// Rightmost platform edge
    pub fn right_edge(&self) -> f32 {
        self.platforms
            .iter()
            .map(Rect::right)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Whether a body has dropped out of the playable area
    pub fn is_out_of_bounds(&self, body: &KinematicBody) -> bool {
        body.position.y > self.height
    }
}

/// Result of a single physics tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub body: KinematicBody,
    /// Platform the body landed on this tick
    pub landing: Option<Landing>,
    /// The body fell out of the world and was put back at spawn
    pub respawned: bool,
}

/// Advance `body` by one tick.
///
/// Order matters: horizontal control, jump, gravity, integration, landing
/// resolution, then world-fall recovery. Gravity is applied even while
/// grounded; the landing test pulls the body back onto the surface in the
/// same tick.
pub fn step(
    body: &KinematicBody,
    input: InputState,
    world: &World,
    config: &PhysicsConfig,
) -> StepOutcome {
    let mut next = *body;

    // Left wins ties
    next.velocity.x = if input.left {
        -config.move_speed
    } else if input.right {
        config.move_speed
    } else {
        0.0
    };

    // Level-triggered: holding jump re-jumps on every grounded tick
    if input.up && next.on_ground {
        next.velocity.y = -config.jump_power;
        next.on_ground = false;
    }

    next.velocity.y += config.gravity;
    next.position += next.velocity;

    next.on_ground = false;
    let landing = find_landing(&next, world.platforms());
    if let Some(landing) = landing {
        apply_landing(&mut next, landing);
    }

    let respawned = world.is_out_of_bounds(&next);
    if respawned {
        debug!(
            "Body fell below world (y = {:.1}), respawning at {:?}",
            next.position.y,
            world.spawn()
        );
        next.respawn(world.spawn());
    }

    StepOutcome {
        body: next,
        landing,
        respawned,
    }
}
