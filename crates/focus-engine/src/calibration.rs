//! One-shot baseline calibration
//!
//! During the warm-up window the calibrator accumulates smoothed feature
//! vectors; once the window elapses it freezes their mean as the baseline.
//! Calibrated is terminal: the baseline is never recomputed.
//!
//! The window is anchored at the first frame that reaches the calibrator
//! (i.e. the first frame with a visible face), so a subject who appears late
//! still gets a full window and the mean is never taken over zero samples.

use crate::features::{Gaze, HeadPose};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Reference pose and gaze frozen at the end of calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    pub gaze_x: f32,
    pub gaze_y: f32,
}

/// One smoothed feature vector collected during the window.
#[derive(Debug, Clone, Copy)]
struct Sample {
    yaw: f32,
    pitch: f32,
    roll: f32,
    gaze_x: f32,
    gaze_y: f32,
}

#[derive(Debug)]
enum State {
    Calibrating {
        started_at_ms: Option<u64>,
        samples: Vec<Sample>,
    },
    Calibrated(Baseline),
}

/// Two-state calibrator: CALIBRATING until the window elapses, then
/// CALIBRATED forever.
#[derive(Debug)]
pub struct Calibrator {
    state: State,
    duration_ms: u64,
}

impl Calibrator {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            state: State::Calibrating {
                started_at_ms: None,
                samples: Vec::new(),
            },
            duration_ms,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        matches!(self.state, State::Calibrated(_))
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        match &self.state {
            State::Calibrated(baseline) => Some(baseline),
            State::Calibrating { .. } => None,
        }
    }

    /// Feed one frame's smoothed features.
    ///
    /// Returns the baseline once calibrated, `None` while still collecting.
    pub fn update(&mut self, now_ms: u64, pose: &HeadPose, gaze: &Gaze) -> Option<&Baseline> {
        if self.is_calibrated() {
            return self.baseline();
        }
        let State::Calibrating {
            started_at_ms,
            samples,
        } = &mut self.state
        else {
            return None;
        };

        let started = *started_at_ms.get_or_insert(now_ms);

        if now_ms.saturating_sub(started) < self.duration_ms {
            samples.push(Sample {
                yaw: pose.yaw,
                pitch: pose.pitch,
                roll: pose.roll,
                gaze_x: gaze.x,
                gaze_y: gaze.y,
            });
            debug!(samples = samples.len(), "calibration sample collected");
            return None;
        }

        let n = samples.len() as f32;
        let mut baseline = Baseline {
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            gaze_x: 0.0,
            gaze_y: 0.0,
        };
        for s in samples.iter() {
            baseline.yaw += s.yaw;
            baseline.pitch += s.pitch;
            baseline.roll += s.roll;
            baseline.gaze_x += s.gaze_x;
            baseline.gaze_y += s.gaze_y;
        }
        baseline.yaw /= n;
        baseline.pitch /= n;
        baseline.roll /= n;
        baseline.gaze_x /= n;
        baseline.gaze_y /= n;

        info!(
            yaw = baseline.yaw,
            pitch = baseline.pitch,
            gaze_x = baseline.gaze_x,
            gaze_y = baseline.gaze_y,
            samples = samples.len(),
            "baseline calibrated"
        );
        self.state = State::Calibrated(baseline);
        self.baseline()
    }
}
