// Horizontal follow camera and viewport sizing

use crate::core::math::clamp;
use crate::engine::physics::KinematicBody;
use glam::Vec2;

/// Drawable area size in pixels (one pixel = one world unit)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest area of the given aspect ratio that fits inside the window,
    /// centred, with its size rounded to whole pixels.
    pub fn letterbox(window_width: f32, window_height: f32, aspect: f32) -> Letterbox {
        let mut width = window_width;
        let mut height = window_width / aspect;
        if height > window_height {
            height = window_height;
            width = height * aspect;
        }

        Letterbox {
            viewport: Viewport::new(width.round(), height.round()),
            offset: Vec2::new(
                (window_width - width) / 2.0,
                (window_height - height) / 2.0,
            ),
        }
    }
}

/// Result of fitting the game area into a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub viewport: Viewport,
    /// Top-left of the game area inside the window
    pub offset: Vec2,
}

/// Scroll offset that keeps the body horizontally centred, never left of 0
pub fn follow_x(body: &KinematicBody, viewport_width: f32) -> f32 {
    (body.position.x - viewport_width / 2.0 + body.width() / 2.0).max(0.0)
}

/// Side-scrolling camera.
///
/// Fully recomputed from the body every tick; the cached value only exists
/// for rendering. Optionally stops at the level's right edge.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    x: f32,
    /// Rightmost world x that may be shown, when clamping is enabled
    level_right_edge: Option<f32>,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera that never scrolls past `right_edge`
    pub fn clamped_to(right_edge: f32) -> Self {
        Self {
            x: 0.0,
            level_right_edge: Some(right_edge),
        }
    }

    /// Recompute the scroll offset for this tick
    pub fn follow(&mut self, body: &KinematicBody, viewport: Viewport) -> f32 {
        let x = follow_x(body, viewport.width);
        self.x = match self.level_right_edge {
            Some(right_edge) => clamp(x, 0.0, (right_edge - viewport.width).max(0.0)),
            None => x,
        };
        self.x
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }

    /// Current horizontal scroll offset
    pub fn x(&self) -> f32 {
        self.x
    }
}
