// Scene description handed to an external renderer
//
// Nothing here draws pixels. Each tick the game builds a `Scene` and gives
// it, together with whichever decoded images are ready, to whatever
// `SceneRenderer` the host provides.

mod camera;

pub use camera::{follow_x, Camera, Letterbox, Viewport};

use crate::core::math::Rect;
use crate::engine::assets::{SpriteSheet, TileTexture};
use crate::engine::input::ButtonView;
use log::{debug, trace};

/// RGBA colour, 8 bits per channel
pub type Rgba = [u8; 4];

/// `#654321`
pub const PLATFORM_COLOR: Rgba = [0x65, 0x43, 0x21, 0xff];
/// `#ff4444`
pub const PLAYER_COLOR: Rgba = [0xff, 0x44, 0x44, 0xff];

/// How a platform surface is filled
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// Repeat the platform tile texture, anchored at the platform's top-left
    Pattern,
    Color(Rgba),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformDraw {
    /// World-space rectangle
    pub rect: Rect,
    pub fill: Fill,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerDraw {
    /// World-space rectangle
    pub rect: Rect,
    /// Mirror the sprite horizontally (travelling left)
    pub flip_x: bool,
    /// Current walk-cycle frame
    pub frame: usize,
    /// Source rectangle in the sprite sheet, when the sheet is loaded
    pub source: Option<Rect>,
    /// Flat colour to draw instead, when the sheet is not available
    pub fallback_color: Option<Rgba>,
}

impl PlayerDraw {
    pub fn uses_fallback(&self) -> bool {
        self.source.is_none()
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Horizontal scroll applied to every world-space rectangle
    pub camera_x: f32,
    pub viewport: Viewport,
    /// Platforms in level order
    pub platforms: Vec<PlatformDraw>,
    pub player: PlayerDraw,
    /// On-screen buttons in viewport coordinates (not scrolled)
    pub buttons: Vec<ButtonView>,
}

/// Decoded images a renderer samples from. `None` until loaded.
///
/// `PlayerDraw::source` indexes into `player_sprite`; `Fill::Pattern`
/// repeats `platform_tile`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SceneAssets<'a> {
    pub player_sprite: Option<&'a SpriteSheet>,
    pub platform_tile: Option<&'a TileTexture>,
}

/// Consumer of finished scenes (a real backend, a recorder, a logger)
pub trait SceneRenderer {
    fn present(&mut self, scene: &Scene, assets: SceneAssets<'_>);
}

type TextureSize = Option<(u32, u32)>;

/// Renderer that only traces what it would draw
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames_presented: u64,
    /// Sprite sheet and tile sizes seen on the last frame
    texture_sizes: (TextureSize, TextureSize),
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl SceneRenderer for LogRenderer {
    fn present(&mut self, scene: &Scene, assets: SceneAssets<'_>) {
        self.frames_presented += 1;

        let sizes = (
            assets.player_sprite.map(|sheet| sheet.image().dimensions()),
            assets.platform_tile.map(|tile| (tile.width(), tile.height())),
        );
        if sizes != self.texture_sizes {
            debug!("Textures: sprite sheet {:?}, platform tile {:?}", sizes.0, sizes.1);
            self.texture_sizes = sizes;
        }

        trace!(
            "frame {}: camera_x={:.1} player=({:.1}, {:.1}) frame={} flip={} fallback={} \
             platforms={} button_alpha={:?}",
            self.frames_presented,
            scene.camera_x,
            scene.player.rect.x,
            scene.player.rect.y,
            scene.player.frame,
            scene.player.flip_x,
            scene.player.uses_fallback(),
            scene.platforms.len(),
            scene.buttons.iter().map(ButtonView::alpha).collect::<Vec<_>>()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene {
            camera_x: 0.0,
            viewport: Viewport::new(800.0, 450.0),
            platforms: vec![PlatformDraw {
                rect: Rect::new(0.0, 400.0, 400.0, 50.0),
                fill: Fill::Color(PLATFORM_COLOR),
            }],
            player: PlayerDraw {
                rect: Rect::new(100.0, 350.0, 40.0, 50.0),
                flip_x: false,
                frame: 0,
                source: None,
                fallback_color: Some(PLAYER_COLOR),
            },
            buttons: Vec::new(),
        }
    }

    #[test]
    fn test_fallback_detection() {
        let mut scene = scene();
        assert!(scene.player.uses_fallback());

        scene.player.source = Some(Rect::new(0.0, 0.0, 40.0, 50.0));
        scene.player.fallback_color = None;
        assert!(!scene.player.uses_fallback());
    }

    #[test]
    fn test_log_renderer_counts_frames() {
        let mut renderer = LogRenderer::new();
        renderer.present(&scene(), SceneAssets::default());
        renderer.present(&scene(), SceneAssets::default());
        assert_eq!(renderer.frames_presented(), 2);
        assert_eq!(renderer.texture_sizes, (None, None));
    }

    #[test]
    fn test_log_renderer_reads_loaded_textures() {
        use crate::engine::assets::SheetLayout;
        use image::RgbaImage;

        let sheet = SpriteSheet::from_image(RgbaImage::new(160, 50), SheetLayout::new(40, 50, 4))
            .unwrap();
        let mut renderer = LogRenderer::new();
        renderer.present(
            &scene(),
            SceneAssets {
                player_sprite: Some(&sheet),
                platform_tile: None,
            },
        );

        assert_eq!(renderer.texture_sizes, (Some((160, 50)), None));
    }

    #[test]
    fn test_colors_match_hex() {
        assert_eq!(PLATFORM_COLOR, [101, 67, 33, 255]);
        assert_eq!(PLAYER_COLOR, [255, 68, 68, 255]);
    }
}
