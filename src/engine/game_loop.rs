/// Game loop timing and control system
///
/// The host delivers frames at whatever cadence it likes. By default every
/// delivered frame runs exactly one simulation tick, so simulated speed
/// follows the display refresh rate. `TimestepMode::Fixed` instead
/// accumulates wall-clock time and runs as many 60 Hz ticks as fit.
use log::{debug, info};
use serde::Deserialize;
use std::collections::VecDeque;
use std::str::FromStr;
use std::time::{Duration, Instant};

const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// How often the FPS average is written to the debug log
const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// How host frames map to simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum TimestepMode {
    /// One tick per delivered frame
    #[default]
    PerFrame,
    /// Accumulate elapsed time, tick at a fixed 60 Hz
    Fixed,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown timestep mode '{0}', expected 'per-frame' or 'fixed'")]
pub struct UnknownTimestepMode(pub String);

impl FromStr for TimestepMode {
    type Err = UnknownTimestepMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-frame" | "perframe" | "frame" => Ok(TimestepMode::PerFrame),
            "fixed" => Ok(TimestepMode::Fixed),
            other => Err(UnknownTimestepMode(other.to_string())),
        }
    }
}

/// Loop lifecycle. There is no terminal state; the host ends the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame delivered yet
    Uninitialized,
    Running,
}

/// Game loop timing state
pub struct GameLoop {
    mode: TimestepMode,

    state: LoopState,

    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Option<Instant>,

    /// Time of the first frame
    start_time: Option<Instant>,

    /// Frame timing history for FPS calculation
    frame_times: VecDeque<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    last_fps_report: Option<Instant>,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new(mode: TimestepMode) -> Self {
        Self {
            mode,
            state: LoopState::Uninitialized,
            accumulator: Duration::ZERO,
            last_frame_time: None,
            start_time: None,
            frame_times: VecDeque::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
            last_fps_report: None,
        }
    }

    /// Begin a frame delivered at `now`, returns the number of ticks to run
    pub fn begin_frame_at(&mut self, now: Instant) -> u32 {
        let frame_time = match (self.state, self.last_frame_time) {
            (LoopState::Running, Some(last)) => now.saturating_duration_since(last),
            _ => {
                self.state = LoopState::Running;
                self.start_time = Some(now);
                self.last_fps_report = Some(now);
                info!("Game loop running ({:?} timestep)", self.mode);
                Duration::ZERO
            }
        };
        self.last_frame_time = Some(now);
        self.frame_count += 1;

        if self.frame_count > 1 {
            self.frame_times.push_back(frame_time);
            if self.frame_times.len() > FPS_WINDOW_SIZE {
                self.frame_times.pop_front();
            }
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }
        self.report_fps(now);

        let ticks = match self.mode {
            TimestepMode::PerFrame => 1,
            TimestepMode::Fixed => {
                self.accumulator += frame_time;

                let mut ticks = 0;
                while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_PHYSICS_STEPS {
                    self.accumulator -= FIXED_TIMESTEP_DURATION;
                    ticks += 1;
                }

                // Drop time we could not catch up on
                if ticks == MAX_PHYSICS_STEPS {
                    self.accumulator = self.accumulator.min(FIXED_TIMESTEP_DURATION);
                }
                ticks
            }
        };

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Time since the first frame
    pub fn elapsed_since_start(&self, now: Instant) -> Duration {
        self.start_time
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or(Duration::ZERO)
    }

    /// Get total number of frames delivered
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }

    fn report_fps(&mut self, now: Instant) {
        let due = self
            .last_fps_report
            .map(|last| now.saturating_duration_since(last) >= FPS_REPORT_INTERVAL)
            .unwrap_or(false);

        if due {
            debug!(
                "{:.1} fps, {} frames, {} ticks",
                self.current_fps, self.frame_count, self.tick_count
            );
            self.last_fps_report = Some(now);
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(TimestepMode::default())
    }
}
