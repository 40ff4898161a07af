// Game layer: configuration, the intro level, the player and the per-frame driver

pub mod characters;
pub mod config;
pub mod level;
pub mod session;
pub mod simulation;

pub use config::{ConfigError, GameConfig};
pub use level::Level;
pub use session::{FrameHost, GameSession};
pub use simulation::Simulation;
