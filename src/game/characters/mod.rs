// Player character
//
// The body itself lives in the physics engine. This module wraps it with
// the per-tick motion classification and the walk-cycle animation.

pub mod animation;
pub mod player;
pub mod state;

pub use animation::{WalkCycle, FRAME_COUNT, FRAME_DURATION_TICKS};
pub use player::Player;
pub use state::MotionState;
