// Asset loading
//
// Images are read and decoded off the simulation thread. The game polls a
// `PendingAsset` once per tick; until it resolves (or if it never does) the
// renderer falls back to flat colours.

mod loader;
mod sprite_sheet;

pub use loader::{AssetLoader, PendingAsset};
pub use sprite_sheet::{SheetLayout, SpriteSheet, TileTexture};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error(
        "Sprite sheet is {actual_width}x{actual_height} but {frame_count} frames of \
         {frame_width}x{frame_height} need {needed_width}x{frame_height}"
    )]
    SheetTooSmall {
        actual_width: u32,
        actual_height: u32,
        frame_width: u32,
        frame_height: u32,
        frame_count: u32,
        needed_width: u32,
    },

    #[error("Failed to read asset: {0}")]
    Io(#[from] std::io::Error),
}

/// Progress of an asynchronous load
#[derive(Debug)]
pub enum AssetState<T> {
    /// Still loading. A steady state as far as the game is concerned.
    Pending,
    Loaded(T),
    /// Loading failed; the game keeps using its fallback for good
    Failed,
}

impl<T> AssetState<T> {
    /// The asset, if it finished loading
    pub fn loaded(&self) -> Option<&T> {
        match self {
            AssetState::Loaded(asset) => Some(asset),
            _ => None,
        }
    }
}
