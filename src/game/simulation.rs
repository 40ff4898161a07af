// Per-tick game update and scene assembly

use super::characters::{Player, WalkCycle};
use super::config::GameConfig;
use super::level::Level;
use crate::engine::assets::{PendingAsset, SpriteSheet, TileTexture};
use crate::engine::input::{ButtonView, InputState};
use crate::engine::physics::{LevelError, PhysicsConfig, StepOutcome, World};
use crate::engine::renderer::{
    Camera, Fill, PlatformDraw, PlayerDraw, Scene, SceneAssets, Viewport, PLATFORM_COLOR,
    PLAYER_COLOR,
};
use glam::Vec2;
use log::{debug, info};

/// Everything that changes from tick to tick, plus the assets needed to draw it.
///
/// A tick runs physics, then the camera, then the walk cycle. Scenes are
/// built on demand from the state after the last tick.
pub struct Simulation {
    world: World,
    player: Player,
    camera: Camera,
    physics: PhysicsConfig,
    player_sprite: PendingAsset<SpriteSheet>,
    platform_tile: PendingAsset<TileTexture>,
    ticks: u64,
}

impl Simulation {
    pub fn new(
        config: &GameConfig,
        level: &Level,
        player_sprite: PendingAsset<SpriteSheet>,
        platform_tile: PendingAsset<TileTexture>,
    ) -> Result<Self, LevelError> {
        let world = level.build_world(config)?;
        let walk = WalkCycle::new(
            config.animation.frame_count as usize,
            config.animation.frame_duration_ticks,
        );
        let player = Player::spawn(
            &world,
            Vec2::new(config.player.width, config.player.height),
            walk,
        );
        let camera = if config.clamp_camera_to_level {
            Camera::clamped_to(world.right_edge())
        } else {
            Camera::new()
        };

        info!(
            "Level '{}' ready: {} platforms, spawn at {:?}",
            level.name(),
            world.platforms().len(),
            world.spawn()
        );

        Ok(Self {
            world,
            player,
            camera,
            physics: config.physics,
            player_sprite,
            platform_tile,
            ticks: 0,
        })
    }

    /// Advance the game by one tick
    pub fn tick(&mut self, input: InputState, viewport: Viewport) -> StepOutcome {
        let outcome = self.player.tick(input, &self.world, &self.physics);
        if outcome.respawned {
            debug!("Respawn on tick {}", self.ticks);
            self.camera.reset();
        }
        self.camera.follow(self.player.body(), viewport);
        self.ticks += 1;
        outcome
    }

    /// Pick up any asset that finished loading
    pub fn poll_assets(&mut self) {
        self.player_sprite.poll();
        self.platform_tile.poll();
    }

    /// Describe the current state for drawing
    pub fn scene(&self, viewport: Viewport, buttons: Vec<ButtonView>) -> Scene {
        let fill = if self.platform_tile().is_some() {
            Fill::Pattern
        } else {
            Fill::Color(PLATFORM_COLOR)
        };
        let platforms = self
            .world
            .platforms()
            .iter()
            .map(|&rect| PlatformDraw { rect, fill })
            .collect();

        let frame = self.player.frame();
        let source = self.player_sprite().map(|sheet| sheet.frame_rect(frame));
        let player = PlayerDraw {
            rect: self.player.body().bounds(),
            flip_x: self.player.flip_x(),
            frame,
            source,
            fallback_color: source.is_none().then_some(PLAYER_COLOR),
        };

        Scene {
            camera_x: self.camera.x(),
            viewport,
            platforms,
            player,
            buttons,
        }
    }

    /// The walk-cycle strip, once decoded
    pub fn player_sprite(&self) -> Option<&SpriteSheet> {
        self.player_sprite.state().loaded()
    }

    /// The platform tile, once decoded
    pub fn platform_tile(&self) -> Option<&TileTexture> {
        self.platform_tile.state().loaded()
    }

    /// Images to draw the current scene with
    pub fn assets(&self) -> SceneAssets<'_> {
        SceneAssets {
            player_sprite: self.player_sprite(),
            platform_tile: self.platform_tile(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Rect;
    use crate::engine::assets::SheetLayout;
    use crate::engine::input::Action;
    use approx::assert_relative_eq;
    use image::RgbaImage;
    use std::sync::mpsc;

    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 450.0,
    };

    fn simulation(config: &GameConfig) -> Simulation {
        Simulation::new(
            config,
            &Level::intro(),
            PendingAsset::failed("player.png"),
            PendingAsset::failed("platform.png"),
        )
        .unwrap()
    }

    fn settle(sim: &mut Simulation) {
        sim.tick(InputState::NONE, VIEWPORT);
        assert!(sim.player.body().on_ground);
    }

    #[test]
    fn test_resting_on_spawn_platform() {
        let mut sim = simulation(&GameConfig::default());
        for _ in 0..30 {
            sim.tick(InputState::NONE, VIEWPORT);
        }

        let body = sim.player.body();
        assert_eq!(body.position, Vec2::new(100.0, 350.0));
        assert_eq!(body.velocity.y, 0.0);
        assert!(body.on_ground);
        assert_eq!(sim.camera.x(), 0.0);
        assert_eq!(sim.ticks, 30);
    }

    #[test]
    fn test_jump_from_rest() {
        let mut sim = simulation(&GameConfig::default());
        settle(&mut sim);

        let outcome = sim.tick(InputState::from_actions([Action::Jump]), VIEWPORT);
        assert!(!outcome.body.on_ground);
        assert_relative_eq!(outcome.body.velocity.y, -11.4, epsilon = 1e-5);
        assert_relative_eq!(outcome.body.position.y, 338.6, epsilon = 1e-4);
    }

    #[test]
    fn test_camera_follows_far_right() {
        let mut sim = simulation(&GameConfig::default());
        sim.player.teleport(Vec2::new(2000.0, 350.0));
        sim.tick(InputState::NONE, VIEWPORT);

        assert!(sim.player.body().on_ground);
        assert_eq!(sim.camera.x(), 1620.0);
    }

    #[test]
    fn test_clamped_camera_stops_at_level_end() {
        let config = GameConfig {
            clamp_camera_to_level: true,
            ..GameConfig::default()
        };
        let mut sim = simulation(&config);
        sim.player.teleport(Vec2::new(2000.0, 350.0));
        sim.tick(InputState::NONE, VIEWPORT);

        assert_eq!(sim.camera.x(), 1300.0);
    }

    #[test]
    fn test_fall_into_gap_respawns() {
        let mut sim = simulation(&GameConfig::default());
        // Between the spawn ground and the first step
        sim.player.teleport(Vec2::new(405.0, 350.0));

        let mut respawned = false;
        for _ in 0..100 {
            if sim.tick(InputState::NONE, VIEWPORT).respawned {
                respawned = true;
                break;
            }
        }

        assert!(respawned);
        assert_eq!(sim.player.body().position, Vec2::new(100.0, 350.0));
        assert_eq!(sim.player.body().velocity, Vec2::ZERO);
        assert_eq!(sim.camera.x(), 0.0);
    }

    #[test]
    fn test_walk_animation_in_scene() {
        let mut sim = simulation(&GameConfig::default());
        let right = InputState::from_actions([Action::MoveRight]);
        for _ in 0..16 {
            sim.tick(right, VIEWPORT);
        }

        let scene = sim.scene(VIEWPORT, Vec::new());
        assert_eq!(scene.player.frame, 2);
        assert!(!scene.player.flip_x);
        assert_eq!(scene.player.rect, Rect::new(164.0, 350.0, 40.0, 50.0));

        sim.tick(InputState::NONE, VIEWPORT);
        assert_eq!(sim.scene(VIEWPORT, Vec::new()).player.frame, 0);
    }

    #[test]
    fn test_scene_uses_fallbacks_without_assets() {
        let sim = simulation(&GameConfig::default());
        let scene = sim.scene(VIEWPORT, Vec::new());

        assert_eq!(scene.platforms.len(), 7);
        assert!(scene
            .platforms
            .iter()
            .all(|p| p.fill == Fill::Color(PLATFORM_COLOR)));
        assert!(scene.player.uses_fallback());
        assert_eq!(scene.player.fallback_color, Some(PLAYER_COLOR));
    }

    #[test]
    fn test_scene_uses_loaded_assets() {
        let layout = SheetLayout::new(40, 50, 4);
        let sheet = SpriteSheet::from_image(RgbaImage::new(160, 50), layout).unwrap();
        let tile = TileTexture::from_bytes(&png_bytes(32, 32)).unwrap();

        let mut sim = Simulation::new(
            &GameConfig::default(),
            &Level::intro(),
            PendingAsset::ready("player.png", sheet),
            PendingAsset::ready("platform.png", tile),
        )
        .unwrap();

        let left = InputState::from_actions([Action::MoveLeft]);
        for _ in 0..8 {
            sim.tick(left, VIEWPORT);
        }

        let scene = sim.scene(VIEWPORT, Vec::new());
        assert!(scene.platforms.iter().all(|p| p.fill == Fill::Pattern));
        assert_eq!(scene.player.source, Some(Rect::new(40.0, 0.0, 40.0, 50.0)));
        assert_eq!(scene.player.fallback_color, None);
        assert!(scene.player.flip_x);
    }

    #[test]
    fn test_assets_swap_in_once_polled() {
        let (sheet_sender, sheet_receiver) = mpsc::channel();
        let (tile_sender, tile_receiver) = mpsc::channel();
        let mut sim = Simulation::new(
            &GameConfig::default(),
            &Level::intro(),
            PendingAsset::from_receiver("player.png", sheet_receiver),
            PendingAsset::from_receiver("platform.png", tile_receiver),
        )
        .unwrap();

        // Nothing has arrived: pending looks exactly like the fallback
        sim.poll_assets();
        let scene = sim.scene(VIEWPORT, Vec::new());
        assert!(scene.player.uses_fallback());
        assert!(scene
            .platforms
            .iter()
            .all(|p| p.fill == Fill::Color(PLATFORM_COLOR)));
        assert!(sim.assets().player_sprite.is_none());
        assert!(sim.assets().platform_tile.is_none());

        let layout = SheetLayout::new(40, 50, 4);
        sheet_sender
            .send(Ok(SpriteSheet::from_image(RgbaImage::new(160, 50), layout).unwrap()))
            .unwrap();
        tile_sender
            .send(Ok(TileTexture::from_bytes(&png_bytes(32, 32)).unwrap()))
            .unwrap();

        // Results only count once polled
        assert!(sim.scene(VIEWPORT, Vec::new()).player.uses_fallback());
        assert!(sim.player_sprite().is_none());

        sim.poll_assets();
        let scene = sim.scene(VIEWPORT, Vec::new());
        assert!(scene.platforms.iter().all(|p| p.fill == Fill::Pattern));
        assert_eq!(scene.player.source, Some(Rect::new(0.0, 0.0, 40.0, 50.0)));
        assert_eq!(scene.player.fallback_color, None);

        assert_eq!(sim.player_sprite().map(|s| s.image().width()), Some(160));
        assert_eq!(
            sim.platform_tile().map(|t| (t.width(), t.height())),
            Some((32, 32))
        );
        let assets = sim.assets();
        assert!(assets.player_sprite.is_some() && assets.platform_tile.is_some());
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        RgbaImage::new(width, height)
            .write_to(&mut bytes, image::ImageOutputFormat::Png)
            .unwrap();
        bytes.into_inner()
    }
}
