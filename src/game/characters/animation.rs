// Player walk-cycle animation

use super::state::MotionState;

/// Frames in the player's walk strip
pub const FRAME_COUNT: usize = 4;
/// Ticks each walk frame stays on screen
pub const FRAME_DURATION_TICKS: u32 = 8;

/// Fixed-rate walk cycle.
///
/// Advances one tick at a time while walking; any other tick snaps back to
/// frame 0 with the timer cleared, so every walk starts from the first frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkCycle {
    /// Current frame index, always below `frame_count`
    frame: usize,
    /// Ticks spent on the current frame
    timer: u32,
    frame_count: usize,
    frame_duration: u32,
}

impl Default for WalkCycle {
    fn default() -> Self {
        Self::new(FRAME_COUNT, FRAME_DURATION_TICKS)
    }
}

impl WalkCycle {
    /// Counts of zero are treated as one
    pub fn new(frame_count: usize, frame_duration: u32) -> Self {
        Self {
            frame: 0,
            timer: 0,
            frame_count: frame_count.max(1),
            frame_duration: frame_duration.max(1),
        }
    }

    /// Advance by one tick
    pub fn update(&mut self, motion: MotionState) {
        if !motion.animates() {
            self.reset();
            return;
        }

        self.timer += 1;
        if self.timer >= self.frame_duration {
            self.frame = (self.frame + 1) % self.frame_count;
            self.timer = 0;
        }
    }

    /// Back to frame 0
    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0;
    }

    /// Get the current frame index
    pub fn frame(&self) -> usize {
        self.frame
    }
}
