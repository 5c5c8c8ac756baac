//! Focus Engine
//!
//! Real-time attentional state classification from per-frame landmark
//! estimates:
//! - Feature extraction (head pose, gaze ratio, eye openness, body center)
//! - Exponential smoothing per feature stream
//! - One-shot baseline calibration
//! - Sliding-window motion detection with hysteresis
//! - Priority-ordered focus classification
//! - Sustained-focus reward accounting
//!
//! The pipeline is single-threaded and frame-synchronous: [`FocusMonitor`]
//! owns all cross-frame state and processes exactly one [`LandmarkFrame`]
//! per call. Landmark detection, capture, and rendering live outside this
//! crate behind the [`landmarks`] boundary types.

pub mod analysis;
pub mod calibration;
pub mod classifier;
pub mod config;
pub mod features;
pub mod motion;
pub mod reward;
pub mod smoothing;

#[cfg(test)]
mod testutil;

pub use analysis::FrameAnalysis;
pub use calibration::{Baseline, Calibrator};
pub use classifier::{FocusClassifier, FocusReason, FocusState, Verdict};
pub use config::{ConfigError, FocusConfig};
pub use features::{Gaze, HeadPose};
pub use motion::{MotionDetector, MotionStatus};
pub use reward::{RewardStatus, RewardTimer};

use classifier::ClassifierInput;
use landmarks::{LandmarkFrame, Point2};
use smoothing::Ema;
use tracing::debug;

/// The full pipeline behind one frame-synchronous entry point.
pub struct FocusMonitor {
    config: FocusConfig,
    pose_ema: Ema<HeadPose>,
    gaze_ema: Ema<Gaze>,
    body_ema: Ema<Point2>,
    calibrator: Calibrator,
    motion: MotionDetector,
    classifier: FocusClassifier,
    reward: RewardTimer,
    last_motion: MotionStatus,
}

impl FocusMonitor {
    /// Build a monitor from a validated configuration.
    pub fn new(config: FocusConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pose_ema: Ema::new(config.smoothing_alpha_pose),
            gaze_ema: Ema::new(config.smoothing_alpha_gaze),
            body_ema: Ema::new(config.smoothing_alpha_body),
            calibrator: Calibrator::new(config.calibration_ms),
            motion: MotionDetector::new(&config),
            classifier: FocusClassifier::new(config.clone()),
            reward: RewardTimer::new(config.focus_interval_ms),
            last_motion: MotionStatus::default(),
            config,
        })
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    pub fn is_calibrating(&self) -> bool {
        !self.calibrator.is_calibrated()
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.calibrator.baseline()
    }

    /// Rewards earned so far this run.
    pub fn reward(&self) -> u64 {
        self.reward.count()
    }

    /// Process one frame, returning the per-frame snapshot.
    ///
    /// A frame without a face performs no state update: smoothing, motion,
    /// calibration, and reward state all carry over unchanged.
    pub fn process(&mut self, frame: &LandmarkFrame) -> FrameAnalysis {
        let now = frame.timestamp_ms;

        let Some(face) = frame.face.as_ref() else {
            debug!(timestamp_ms = now, "no face detected, frame skipped");
            return FrameAnalysis {
                face_detected: false,
                calibrating: self.is_calibrating(),
                reward_count: self.reward.count(),
                reward_progress: self.reward.progress(now),
                motion: self.last_motion,
                ..Default::default()
            };
        };

        // Extract and smooth this frame's features.
        let raw_pose = features::head_pose(face, frame.width, frame.height);
        let pose = self.pose_ema.update(raw_pose);

        let raw_gaze = features::gaze_ratio(face);
        let gaze = smoothing::correct_gaze(
            self.gaze_ema.update(raw_gaze),
            &pose,
            self.config.gaze_correction_yaw,
            self.config.gaze_correction_pitch,
        );

        let body_center = features::body_center(frame.body.as_ref())
            .map(|center| self.body_ema.update(center));

        let (eyes_open, ear) = features::eyes_open(face, self.config.eye_ar_threshold);

        // Until calibrated, frames only feed the baseline. The frame that
        // completes calibration produces no classification either; the
        // state machine starts on the next one.
        let baseline = match self.calibrator.baseline().copied() {
            Some(baseline) => baseline,
            None => {
                let done = self.calibrator.update(now, &pose, &gaze).is_some();
                return FrameAnalysis {
                    face_detected: true,
                    calibrating: !done,
                    head_pose: Some(pose),
                    gaze: Some(gaze),
                    eye_aspect_ratio: Some(ear),
                    ..Default::default()
                };
            }
        };

        let motion = self.motion.update(&pose, body_center);
        self.last_motion = motion;

        let verdict = self.classifier.classify(&ClassifierInput {
            now_ms: now,
            eyes_open,
            pose: &pose,
            gaze,
            motion,
            baseline: &baseline,
        });

        let reward = self.reward.update(now, verdict.state.counts_as_focused());

        FrameAnalysis {
            face_detected: true,
            calibrating: false,
            state: Some(verdict.state),
            reason: Some(verdict.reason),
            reward_count: reward.count,
            reward_progress: reward.progress,
            rewarded: reward.rewarded,
            head_pose: Some(pose),
            gaze: Some(gaze),
            eye_aspect_ratio: Some(ear),
            motion,
        }
    }
}
