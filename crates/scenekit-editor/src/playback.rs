//! Playback clock.
//!
//! Drives per-frame entity behavior while the scene is playing. Paused ticks
//! are ignored entirely, so elapsed time only accumulates during play.

use serde::{Deserialize, Serialize};

use scenekit_core::constants::REFERENCE_FRAME_RATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// Timing information handed to entity updates for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInfo {
    /// Wall-clock delta of this frame.
    pub delta_seconds: f64,
    /// Delta expressed in reference frames (1.0 at exactly 60 Hz).
    pub delta_frames: f64,
    /// Seconds played since the clock was last reset.
    pub elapsed: f64,
    /// 1-based index of this frame since the last reset.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
pub struct PlaybackClock {
    state: PlaybackState,
    reference_frame_rate: f64,
    elapsed: f64,
    frame_index: u64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::with_frame_rate(REFERENCE_FRAME_RATE)
    }

    /// Creates a clock whose frame unit refers to `fps`. Non-positive or
    /// non-finite rates fall back to the default reference rate.
    pub fn with_frame_rate(fps: f64) -> Self {
        let reference_frame_rate = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            tracing::warn!("Invalid reference frame rate {}, using {}", fps, REFERENCE_FRAME_RATE);
            REFERENCE_FRAME_RATE
        };
        Self {
            state: PlaybackState::Paused,
            reference_frame_rate,
            elapsed: 0.0,
            frame_index: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Pauses and clears elapsed time and frame count.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Paused;
        self.elapsed = 0.0;
        self.frame_index = 0;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn reference_frame_rate(&self) -> f64 {
        self.reference_frame_rate
    }

    /// Advances the clock by `dt_seconds`.
    ///
    /// Returns `None` while paused. Negative and non-finite deltas count as
    /// a zero-length frame.
    pub fn tick(&mut self, dt_seconds: f64) -> Option<FrameInfo> {
        if !self.is_playing() {
            return None;
        }

        let dt = if dt_seconds.is_finite() && dt_seconds > 0.0 {
            dt_seconds
        } else {
            0.0
        };

        self.elapsed += dt;
        self.frame_index += 1;

        Some(FrameInfo {
            delta_seconds: dt,
            delta_frames: dt * self.reference_frame_rate,
            elapsed: self.elapsed,
            frame_index: self.frame_index,
        })
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}
