//! Sustained-focus reward timer
//!
//! Converts continuous focused time into an incrementing counter: every
//! `focus_interval_ms` of uninterrupted focus earns one reward and restarts
//! the session clock at the current frame (not at start + interval). Any
//! unfocused frame discards partial progress.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Reward state snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardStatus {
    /// Total rewards earned this run. Never decreases.
    pub count: u64,
    /// Fraction of the current interval completed, 0 when no session is open.
    pub progress: f32,
    /// Whether this frame earned a reward.
    pub rewarded: bool,
}

#[derive(Debug)]
pub struct RewardTimer {
    interval_ms: u64,
    session_start_ms: Option<u64>,
    count: u64,
}

impl RewardTimer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            session_start_ms: None,
            count: 0,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn session_open(&self) -> bool {
        self.session_start_ms.is_some()
    }

    /// Fraction of the current interval completed at `now_ms`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        match self.session_start_ms {
            Some(start) => {
                (now_ms.saturating_sub(start) as f32 / self.interval_ms as f32).min(1.0)
            }
            None => 0.0,
        }
    }

    /// Advance the timer with this frame's focus outcome.
    pub fn update(&mut self, now_ms: u64, focused: bool) -> RewardStatus {
        let mut rewarded = false;

        if focused {
            match self.session_start_ms {
                None => self.session_start_ms = Some(now_ms),
                Some(start) => {
                    if now_ms.saturating_sub(start) >= self.interval_ms {
                        self.count += 1;
                        self.session_start_ms = Some(now_ms);
                        rewarded = true;
                        info!(count = self.count, "reward earned");
                    }
                }
            }
        } else {
            // Loss of focus discards partial progress.
            self.session_start_ms = None;
        }

        RewardStatus {
            count: self.count,
            progress: self.progress(now_ms),
            rewarded,
        }
    }
}
