// The single controllable entity

use super::{MotionState, WalkCycle};
use crate::engine::input::InputState;
use crate::engine::physics::{step, BodyBuilder, KinematicBody, PhysicsConfig, StepOutcome, World};
use glam::Vec2;

/// Player body plus its animation state
#[derive(Debug, Clone)]
pub struct Player {
    body: KinematicBody,
    walk: WalkCycle,
    motion: MotionState,
}

impl Player {
    /// Player of `size` standing at the world's spawn point
    pub fn spawn(world: &World, size: Vec2, walk: WalkCycle) -> Self {
        Self {
            body: BodyBuilder::new(size.x, size.y)
                .position(world.spawn().x, world.spawn().y)
                .build(),
            walk,
            motion: MotionState::default(),
        }
    }

    /// Run one physics tick, then advance the animation from the result
    pub fn tick(
        &mut self,
        input: InputState,
        world: &World,
        physics: &PhysicsConfig,
    ) -> StepOutcome {
        let outcome = step(&self.body, input, world, physics);
        self.body = outcome.body;
        self.motion = MotionState::classify(input, self.body.on_ground);
        self.walk.update(self.motion);
        outcome
    }

    /// Move the player without simulating the path
    #[cfg(test)]
    pub fn teleport(&mut self, position: Vec2) {
        self.body.respawn(position);
        self.body.on_ground = false;
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    /// Current sprite frame
    pub fn frame(&self) -> usize {
        self.walk.frame()
    }

    /// Mirror the sprite while travelling left
    pub fn flip_x(&self) -> bool {
        self.body.facing_left()
    }
}
