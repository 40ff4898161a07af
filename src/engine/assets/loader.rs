// Asset loading functionality

use super::{AssetError, AssetState, SheetLayout, SpriteSheet, TileTexture};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// An asset being loaded on a background thread.
///
/// `poll` never blocks; call it once per tick.
#[derive(Debug)]
pub struct PendingAsset<T> {
    name: String,
    receiver: Option<Receiver<Result<T, AssetError>>>,
    state: AssetState<T>,
}

impl<T> PendingAsset<T> {
    /// An asset whose result will arrive on `receiver`
    pub fn from_receiver(
        name: impl Into<String>,
        receiver: Receiver<Result<T, AssetError>>,
    ) -> Self {
        Self {
            name: name.into(),
            receiver: Some(receiver),
            state: AssetState::Pending,
        }
    }

    /// An asset that is already available
    #[cfg(test)]
    pub fn ready(name: impl Into<String>, asset: T) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            state: AssetState::Loaded(asset),
        }
    }

    /// An asset that will never load
    pub fn failed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            receiver: None,
            state: AssetState::Failed,
        }
    }

    /// Pick up the background result if it arrived
    pub fn poll(&mut self) -> &AssetState<T> {
        let result = match &self.receiver {
            Some(receiver) => receiver.try_recv(),
            None => return &self.state,
        };

        match result {
            Ok(Ok(asset)) => {
                info!("Asset loaded: {}", self.name);
                self.state = AssetState::Loaded(asset);
                self.receiver = None;
            }
            Ok(Err(e)) => {
                warn!("Asset {} failed to load, using fallback: {}", self.name, e);
                self.state = AssetState::Failed;
                self.receiver = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                warn!("Asset loader for {} exited without a result", self.name);
                self.state = AssetState::Failed;
                self.receiver = None;
            }
        }

        &self.state
    }

    /// Last polled state
    pub fn state(&self) -> &AssetState<T> {
        &self.state
    }
}

/// Asset loader responsible for finding and loading asset files
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Start loading a sprite strip in the background
    pub fn load_sprite_sheet(&self, name: &str, layout: SheetLayout) -> PendingAsset<SpriteSheet> {
        self.spawn_load(name, move |bytes| SpriteSheet::from_bytes(bytes, layout))
    }

    /// Start loading a repeating tile in the background
    pub fn load_tile(&self, name: &str) -> PendingAsset<TileTexture> {
        self.spawn_load(name, TileTexture::from_bytes)
    }

    fn spawn_load<T, F>(&self, name: &str, decode: F) -> PendingAsset<T>
    where
        T: Send + 'static,
        F: FnOnce(&[u8]) -> Result<T, AssetError> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let path = self.resolve_path(name);

        let spawned = thread::Builder::new()
            .name(format!("asset-{}", name))
            .spawn(move || {
                let result = read_asset(&path).and_then(|bytes| decode(&bytes));
                // The game may have dropped the pending handle already
                let _ = sender.send(result);
            });

        match spawned {
            Ok(_) => PendingAsset::from_receiver(name, receiver),
            Err(e) => {
                warn!("Could not start loader thread for {}: {}", name, e);
                PendingAsset::failed(name)
            }
        }
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

fn read_asset(path: &Path) -> Result<Vec<u8>, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
    }

    Ok(std::fs::read(path)?)
}
