use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Fullscreen, Window, WindowBuilder},
};

mod core;
mod engine;
mod game;

use engine::renderer::{Letterbox, LogRenderer, Scene, SceneAssets, SceneRenderer, Viewport};
use game::{FrameHost, GameConfig, GameSession};

/// Window-backed frame host: letterboxes the game area and logs each scene
struct WindowHost {
    window: Window,
    renderer: LogRenderer,
    aspect: f32,
    letterbox: Letterbox,
}

impl WindowHost {
    fn new(window: Window, aspect: f32) -> Self {
        let size = window.inner_size();
        let letterbox = Viewport::letterbox(size.width as f32, size.height as f32, aspect);
        Self {
            window,
            renderer: LogRenderer::new(),
            aspect,
            letterbox,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.letterbox = Viewport::letterbox(width as f32, height as f32, self.aspect);
        debug!(
            "Window {}x{} -> viewport {:?} at {:?}",
            width, height, self.letterbox.viewport, self.letterbox.offset
        );
    }

    fn toggle_fullscreen(&self) {
        let fullscreen = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        info!("Fullscreen: {}", fullscreen.is_some());
        self.window.set_fullscreen(fullscreen);
    }
}

impl FrameHost for WindowHost {
    fn viewport(&self) -> Viewport {
        self.letterbox.viewport
    }

    fn present(&mut self, scene: &Scene, assets: SceneAssets<'_>) {
        self.renderer.present(scene, assets);
    }

    fn request_next_frame(&mut self) {
        self.window.request_redraw();
    }
}

fn is_fullscreen_toggle(event: &KeyEvent) -> bool {
    event.physical_key == PhysicalKey::Code(KeyCode::F11)
        && event.state == ElementState::Pressed
        && !event.repeat
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Intro Platformer...");

    let config = GameConfig::from_env().context("Invalid configuration")?;
    let mut session = GameSession::new(&config)?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Intro Platformer")
        .with_inner_size(LogicalSize::new(config.base_width, config.base_height))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut host = WindowHost::new(window, config.aspect_ratio());
    host.request_next_frame();

    // Main event loop
    event_loop
        .run(move |event, elwt| {
            let Event::WindowEvent { event, .. } = event else {
                return;
            };

            match event {
                WindowEvent::CloseRequested => {
                    let game_loop = session.game_loop();
                    info!(
                        "Close requested after {:.1?}: {} frames ({} presented), {} ticks, {:.1} fps",
                        game_loop.elapsed_since_start(Instant::now()),
                        game_loop.frame_count(),
                        host.renderer.frames_presented(),
                        game_loop.tick_count(),
                        game_loop.fps()
                    );
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    host.resize(physical_size.width, physical_size.height);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if is_fullscreen_toggle(&event) {
                        host.toggle_fullscreen();
                    } else {
                        session.input_mut().keyboard_mut().process_event(&event);
                    }
                }
                WindowEvent::Touch(touch) => {
                    let origin = host.letterbox.offset;
                    session.input_mut().touch_mut().process_event(&touch, origin);
                }
                WindowEvent::Focused(false) => {
                    // Key-up events are lost while unfocused
                    session.input_mut().reset_all();
                }
                WindowEvent::RedrawRequested => {
                    session.on_frame(&mut host);
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
