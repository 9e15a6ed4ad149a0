// THEORY:
// The `pipeline` module is the final, top-level API for the entire wave
// detection engine. It owns every piece of per-stream session state: the
// previous frame baseline, the motion score, the cooldown counter, and the
// busy flag. Callers feed it one frame at a time and receive a single
// high-level verdict per frame. The busy and cooldown gates are arbitrated
// here, before any pixel work happens, so a stream that has already waved
// costs almost nothing until the application explicitly re-arms it.

use crate::core_modules::frame::GrayFrame;
use crate::core_modules::motion_delta::motion_delta;
use crate::core_modules::preprocessor;
use crate::core_modules::scorer;
use tracing::{debug, info};

// Re-export key data structures for the public API.
pub use crate::core_modules::frame::Frame;
pub use crate::error::WaveError;

const DEFAULT_BLUR_KERNEL: u32 = 21;
const DEFAULT_DIFF_THRESHOLD: u8 = 25;
const DEFAULT_DILATE_ITERATIONS: u32 = 2;
const DEFAULT_MIN_REGION_AREA: usize = 5000;
const DEFAULT_SCORE_THRESHOLD: u32 = 4;
const DEFAULT_COOLDOWN_TICKS: u32 = 15;

/// Configuration for the WavePipeline, allowing for tunable behavior.
#[derive(Debug, Clone)]
pub struct WaveConfig {
    /// Side length of the square box-blur kernel applied before differencing.
    pub blur_kernel: u32,
    /// Per-pixel intensity change that must be exceeded to count as changed.
    pub diff_threshold: u8,
    /// Number of dilation passes that fuse fragmented change regions.
    pub dilate_iterations: u32,
    /// A connected change region must exceed this pixel area to count as motion.
    pub min_region_area: usize,
    /// Consecutive-motion score at which the wave fires.
    pub score_threshold: u32,
    /// Ticks of enforced quiet after a wave fires.
    pub cooldown_ticks: u32,
    /// Optional safety valve: release the busy hold after this many busy
    /// ticks even if the application never calls reset. `None` holds forever.
    pub max_busy_ticks: Option<u32>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            blur_kernel: DEFAULT_BLUR_KERNEL,
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
            dilate_iterations: DEFAULT_DILATE_ITERATIONS,
            min_region_area: DEFAULT_MIN_REGION_AREA,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            cooldown_ticks: DEFAULT_COOLDOWN_TICKS,
            max_busy_ticks: None,
        }
    }
}

/// The externally observable phase of a detection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveState {
    /// No baseline frame stored yet; the next frame only establishes one.
    Bootstrap,
    /// A baseline is stored and motion is being scored.
    Armed,
    /// A wave fired recently; frames are consumed but not scored.
    Cooldown,
    /// A wave fired and the application has not called reset yet.
    Busy,
}

/// The primary output of the pipeline for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    NoWave,
    Wave,
}

/// The main, top-level struct for the wave detection engine.
pub struct WavePipeline {
    config: WaveConfig,
    previous_frame: Option<GrayFrame>,
    motion_score: u32,
    cooldown_remaining: u32,
    busy: bool,
    busy_ticks: u32,
}

impl WavePipeline {
    pub fn new(config: WaveConfig) -> Self {
        Self {
            config,
            previous_frame: None,
            motion_score: 0,
            cooldown_remaining: 0,
            busy: false,
            busy_ticks: 0,
        }
    }

    /// Convenience wrapper for callers that only want the boolean verdict.
    pub fn wave_detected(&mut self, frame_bytes: &[u8]) -> Result<bool, WaveError> {
        let outcome = self.tick(frame_bytes)?;
        Ok(matches!(outcome, TickOutcome::Wave))
    }

    /// Processes one encoded camera frame and advances the session by one tick.
    pub fn tick(&mut self, frame_bytes: &[u8]) -> Result<TickOutcome, WaveError> {
        let frame = Frame::from_bytes(frame_bytes)?;
        self.tick_frame(&frame)
    }

    /// Processes one already decoded frame. Dimensions must match the stored
    /// baseline; a mismatched or otherwise bad frame leaves the session
    /// exactly as it was.
    pub fn tick_frame(&mut self, frame: &Frame) -> Result<TickOutcome, WaveError> {
        // Stage 0: Session Gates
        if self.busy {
            return Ok(self.busy_tick());
        }
        if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
            debug!("Cooling down: {} ticks left", self.cooldown_remaining);
            return Ok(TickOutcome::NoWave);
        }

        // Stage 1: Preprocessing
        let current = preprocessor::preprocess(frame, self.config.blur_kernel);

        // Stage 2: Bootstrap or Motion Measurement
        let Some(previous) = self.previous_frame.as_ref() else {
            self.previous_frame = Some(current);
            debug!("Bootstrap frame stored; scoring starts next tick");
            return Ok(TickOutcome::NoWave);
        };
        // The delta runs before any state is replaced, so a failed tick
        // leaves the session untouched.
        let motion = motion_delta::detect_motion(
            previous,
            &current,
            self.config.diff_threshold,
            self.config.dilate_iterations,
            self.config.min_region_area,
        )?;

        // Stage 3: Temporal Scoring
        self.motion_score = scorer::next_score(self.motion_score, motion);
        self.previous_frame = Some(current);
        debug!("Motion: {}, score: {}", motion, self.motion_score);

        // Stage 4: Trigger Decision
        if self.motion_score >= self.config.score_threshold {
            self.motion_score = 0;
            self.cooldown_remaining = self.config.cooldown_ticks;
            self.busy = true;
            info!("Wave detected; holding busy until reset");
            return Ok(TickOutcome::Wave);
        }
        Ok(TickOutcome::NoWave)
    }

    fn busy_tick(&mut self) -> TickOutcome {
        if let Some(limit) = self.config.max_busy_ticks {
            self.busy_ticks += 1;
            if self.busy_ticks >= limit {
                info!("Busy hold released after {} ticks without a reset", self.busy_ticks);
                self.reset();
            }
        }
        TickOutcome::NoWave
    }

    /// Re-arms the detector once the application has finished reacting to a
    /// wave. The cooldown keeps whatever time it has left and drains over
    /// the following ticks, so motion left over from the gesture itself
    /// cannot immediately re-trigger. Once it reaches zero the next frame
    /// bootstraps a fresh baseline.
    pub fn reset(&mut self) {
        self.busy = false;
        self.motion_score = 0;
        self.previous_frame = None;
        self.busy_ticks = 0;
        info!("Detector reset");
    }

    pub fn get_state(&self) -> WaveState {
        if self.busy {
            WaveState::Busy
        } else if self.cooldown_remaining > 0 {
            WaveState::Cooldown
        } else if self.previous_frame.is_none() {
            WaveState::Bootstrap
        } else {
            WaveState::Armed
        }
    }

    pub fn get_motion_score(&self) -> u32 {
        self.motion_score
    }

    pub fn get_cooldown_remaining(&self) -> u32 {
        self.cooldown_remaining
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn get_config(&self) -> &WaveConfig {
        &self.config
    }
}
