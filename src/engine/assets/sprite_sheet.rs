// Decoded image assets: the player sprite strip and the platform tile

use super::AssetError;
use crate::core::math::Rect;
use image::RgbaImage;

/// How frames are laid out in a sprite strip: `frame_count` frames of
/// `frame_width` x `frame_height`, left to right on the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frame_count: u32,
}

impl SheetLayout {
    pub fn new(frame_width: u32, frame_height: u32, frame_count: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            frame_count,
        }
    }

    /// Minimum image width needed to hold every frame
    pub fn required_width(&self) -> u32 {
        self.frame_width.saturating_mul(self.frame_count)
    }
}

/// A horizontal animation strip
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    image: RgbaImage,
    layout: SheetLayout,
}

impl SpriteSheet {
    /// Decode an encoded image (PNG/JPEG) and check it fits the layout
    pub fn from_bytes(bytes: &[u8], layout: SheetLayout) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_image(image, layout)
    }

    pub fn from_image(image: RgbaImage, layout: SheetLayout) -> Result<Self, AssetError> {
        let needed_width = layout.required_width();
        if image.width() < needed_width || image.height() < layout.frame_height {
            return Err(AssetError::SheetTooSmall {
                actual_width: image.width(),
                actual_height: image.height(),
                frame_width: layout.frame_width,
                frame_height: layout.frame_height,
                frame_count: layout.frame_count,
                needed_width,
            });
        }

        Ok(Self { image, layout })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Source rectangle of a frame in sheet pixels. Indices wrap.
    pub fn frame_rect(&self, frame_index: usize) -> Rect {
        let count = self.layout.frame_count.max(1) as usize;
        let column = (frame_index % count) as f32;
        let width = self.layout.frame_width as f32;

        Rect::new(column * width, 0.0, width, self.layout.frame_height as f32)
    }
}

/// An image repeated to fill platform surfaces
#[derive(Debug, Clone)]
pub struct TileTexture {
    image: RgbaImage,
}

impl TileTexture {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
