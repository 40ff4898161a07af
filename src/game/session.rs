// Frame driver: turns host frame callbacks into ticks and scenes

use super::config::GameConfig;
use super::level::Level;
use super::simulation::Simulation;
use crate::engine::assets::{AssetLoader, SheetLayout};
use crate::engine::game_loop::GameLoop;
use crate::engine::input::{
    InputManager, InputSource, KeyBindings, KeyboardInput, TouchControls,
};
use crate::engine::renderer::{Scene, SceneAssets, Viewport};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// What the game needs from whoever owns the window
pub trait FrameHost {
    /// Current drawable area
    fn viewport(&self) -> Viewport;

    /// Draw a finished frame with whichever images have loaded
    fn present(&mut self, scene: &Scene, assets: SceneAssets<'_>);

    /// Ask for another frame callback
    fn request_next_frame(&mut self);
}

/// A running game: loop timing, merged input and the simulation
pub struct GameSession {
    game_loop: GameLoop,
    input: InputManager,
    simulation: Simulation,
    /// Viewport the touch buttons were last laid out for
    layout_viewport: Viewport,
}

impl GameSession {
    /// Build the intro level and start loading its images in the background
    pub fn new(config: &GameConfig) -> Result<Self> {
        let loader = AssetLoader::new(&config.assets.directory);
        info!("Loading assets from {}", loader.base_path().display());

        let layout = SheetLayout::new(
            config.animation.frame_width,
            config.animation.frame_height,
            config.animation.frame_count,
        );
        let player_sprite = loader.load_sprite_sheet(&config.assets.player_sprite, layout);
        let platform_tile = loader.load_tile(&config.assets.platform_tile);

        let simulation = Simulation::new(config, &Level::intro(), player_sprite, platform_tile)
            .context("Failed to build intro level")?;

        let mut bindings = KeyBindings::standard();
        for &(key, action) in &config.extra_key_bindings {
            if let Some(previous) = bindings.bind(InputSource::key(key), action) {
                debug!("{:?} rebound from {:?} to {:?}", key, previous, action);
            }
        }

        let viewport = Viewport::new(config.base_width, config.base_height);
        let input = InputManager::new(
            KeyboardInput::new(bindings),
            TouchControls::new(viewport.width, viewport.height),
        );

        Ok(Self::from_parts(
            GameLoop::new(config.timestep),
            input,
            simulation,
            viewport,
        ))
    }

    /// Assemble a session from prepared parts. `viewport` is the size the
    /// touch buttons are currently laid out for.
    pub fn from_parts(
        game_loop: GameLoop,
        input: InputManager,
        simulation: Simulation,
        viewport: Viewport,
    ) -> Self {
        Self {
            game_loop,
            input,
            simulation,
            layout_viewport: viewport,
        }
    }

    /// Handle one frame callback from the host
    pub fn on_frame<H: FrameHost>(&mut self, host: &mut H) {
        self.on_frame_at(host, Instant::now());
    }

    /// Handle a frame callback delivered at `now`
    pub fn on_frame_at<H: FrameHost>(&mut self, host: &mut H, now: Instant) {
        let ticks = self.game_loop.begin_frame_at(now);
        let viewport = host.viewport();
        if viewport != self.layout_viewport {
            self.input
                .touch_mut()
                .relayout(viewport.width, viewport.height);
            self.layout_viewport = viewport;
        }

        self.simulation.poll_assets();
        for _ in 0..ticks {
            let input = self.input.snapshot();
            self.simulation.tick(input, viewport);
        }

        let scene = self.simulation.scene(viewport, self.input.touch().buttons());
        host.present(&scene, self.simulation.assets());
        host.request_next_frame();
    }

    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub fn game_loop(&self) -> &GameLoop {
        &self.game_loop
    }
}
