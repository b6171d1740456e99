//! Countdown state machine: duration, remaining time and play/pause/reset

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const MIN_DURATION_SECONDS: u32 = 1;
/// One hour, matching the duration slider's range
pub const MAX_DURATION_SECONDS: u32 = 3600;
pub const DEFAULT_DURATION_SECONDS: u32 = 120;

/// Where the countdown is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Never started, or reset; remaining equals duration
    Idle,
    Running,
    Paused,
    /// Ran down to zero on its own
    Completed,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was not running
    Ignored,
    Counted { remaining_seconds: u32 },
    Completed,
}

/// Timer session for one countdown lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSession {
    duration_seconds: u32,
    remaining_seconds: u32,
    phase: TimerPhase,
}

impl TimerSession {
    /// Create an idle timer; `duration_seconds` is clamped into range
    pub fn new(duration_seconds: i64) -> Self {
        let duration_seconds = clamp_duration(duration_seconds);
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            phase: TimerPhase::Idle,
        }
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    /// Change the configured duration; returns the stored (clamped) value.
    ///
    /// A running countdown keeps its remaining time; the new duration
    /// applies on the next reset or start after completion.
    pub fn set_duration(&mut self, seconds: i64) -> u32 {
        self.duration_seconds = clamp_duration(seconds);
        if !self.is_running() {
            self.remaining_seconds = self.duration_seconds;
            self.phase = TimerPhase::Idle;
        }
        debug!("Duration set to {}s (phase {:?})", self.duration_seconds, self.phase);
        self.duration_seconds
    }

    /// Start or resume; returns whether the timer transitioned to running
    pub fn play(&mut self) -> bool {
        match self.phase {
            TimerPhase::Running => return false,
            TimerPhase::Idle | TimerPhase::Completed => {
                self.remaining_seconds = self.duration_seconds;
                info!("Countdown started from {}s", self.remaining_seconds);
            }
            TimerPhase::Paused => {
                info!("Countdown resumed at {}s", self.remaining_seconds);
            }
        }
        self.phase = TimerPhase::Running;
        true
    }

    /// Pause, keeping the remaining time; returns whether it was running
    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.phase = TimerPhase::Paused;
        info!("Countdown paused at {}s", self.remaining_seconds);
        true
    }

    /// Stop and restore the full duration
    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.remaining_seconds = self.duration_seconds;
        debug!("Countdown reset to {}s", self.remaining_seconds);
    }

    /// One elapsed second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Completed;
            info!("Countdown completed");
            TickOutcome::Completed
        } else {
            TickOutcome::Counted {
                remaining_seconds: self.remaining_seconds,
            }
        }
    }
}

impl Default for TimerSession {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECONDS as i64)
    }
}

/// Clamp arbitrary duration input into `[MIN_DURATION_SECONDS, MAX_DURATION_SECONDS]`
pub fn clamp_duration(seconds: i64) -> u32 {
    seconds.clamp(MIN_DURATION_SECONDS as i64, MAX_DURATION_SECONDS as i64) as u32
}
