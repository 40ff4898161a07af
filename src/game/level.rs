// Level layout

use super::config::GameConfig;
use crate::core::math::Rect;
use crate::engine::physics::{LevelError, World};

/// Intro level platforms: three ground segments with floating steps between
const INTRO_PLATFORMS: [Rect; 7] = [
    Rect::new(0.0, 400.0, 400.0, 50.0),
    Rect::new(450.0, 350.0, 120.0, 20.0),
    Rect::new(650.0, 300.0, 120.0, 20.0),
    Rect::new(850.0, 400.0, 400.0, 50.0),
    Rect::new(1300.0, 350.0, 120.0, 20.0),
    Rect::new(1500.0, 250.0, 120.0, 20.0),
    Rect::new(1700.0, 400.0, 400.0, 50.0),
];

/// Platform list in level order. The first platform is where the player spawns.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    name: String,
    platforms: Vec<Rect>,
}

impl Level {
    pub fn new(name: impl Into<String>, platforms: Vec<Rect>) -> Self {
        Self {
            name: name.into(),
            platforms,
        }
    }

    /// The built-in intro level
    pub fn intro() -> Self {
        Self::new("intro", INTRO_PLATFORMS.to_vec())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    /// Turn the layout into a physics world sized for the configured player
    pub fn build_world(&self, config: &GameConfig) -> Result<World, LevelError> {
        World::new(
            self.platforms.clone(),
            config.world_height,
            config.player.spawn_x,
            config.player.height,
        )
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::intro()
    }
}
