use crate::core::math::Rect;
use glam::Vec2;

/// Kinematic state of the player entity.
///
/// Position is the top-left corner in world units; velocity is in
/// world units per tick. The size never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    size: Vec2,
    pub on_ground: bool,
}

impl KinematicBody {
    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Y coordinate of the bottom edge
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_position_size(self.position, self.size)
    }

    /// Sprites face left only while travelling left
    pub fn facing_left(&self) -> bool {
        self.velocity.x < 0.0
    }

    /// Put the body back at `spawn` with zero velocity
    pub fn respawn(&mut self, spawn: Vec2) {
        self.position = spawn;
        self.velocity = Vec2::ZERO;
    }
}

/// Builder for bodies in a specific starting state (mostly for level setup and tests)
pub struct BodyBuilder {
    position: Vec2,
    velocity: Vec2,
    size: Vec2,
    on_ground: bool,
}

impl BodyBuilder {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            size: Vec2::new(width, height),
            on_ground: false,
        }
    }

    /// Set the top-left position
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the initial velocity (units per tick)
    #[cfg(test)]
    pub fn velocity(mut self, vx: f32, vy: f32) -> Self {
        self.velocity = Vec2::new(vx, vy);
        self
    }

    #[cfg(test)]
    pub fn grounded(mut self, on_ground: bool) -> Self {
        self.on_ground = on_ground;
        self
    }

    pub fn build(self) -> KinematicBody {
        KinematicBody {
            position: self.position,
            velocity: self.velocity,
            size: self.size,
            on_ground: self.on_ground,
        }
    }
}
